// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Lambda deploy error types

use std::error;
use std::fmt::{Display, Formatter};
use std::io;
use std::result;

/// Result type for operations that could result in a [DeployError]
pub type Result<T> = result::Result<T, DeployError>;

/// Lambda deploy error
#[derive(Debug)]
pub enum DeployError {
    /// The remote platform reported that the requested function or alias
    /// does not exist. The resource prober turns this into `false`; the
    /// orchestrators never surface it.
    ResourceNotFound(String),
    /// Error returned when accessing the AWS services fails.
    AWS(String),
    /// Error returned when the function could not be created.
    FunctionCreate(String),
    /// Error returned when the code or the configuration of an existing
    /// function could not be updated.
    FunctionUpdate(String),
    /// Error returned when a version is published for a function that has
    /// never been deployed.
    FunctionNotFound(String),
    /// Error returned when a task input is missing or malformed.
    Input(String),
    /// Error associated to I/O operations and associated traits.
    IoError(io::Error),
    /// Error returned when serde_json failed to serialize or deserialize data.
    SerdeJson(serde_json::Error),
    /// Error returned as a consequence of an error in lambda-deploy.
    /// This error should not happen in normal usage. It is raised when the
    /// remote platform answers with a response that is missing a field its
    /// API guarantees.
    Internal(String),
}

impl DeployError {
    /// Returns true if the error is the remote not-found signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeployError::ResourceNotFound(_))
    }
}

impl From<io::Error> for DeployError {
    fn from(e: io::Error) -> Self {
        DeployError::IoError(e)
    }
}

impl From<serde_json::Error> for DeployError {
    fn from(e: serde_json::Error) -> Self {
        DeployError::SerdeJson(e)
    }
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            DeployError::ResourceNotFound(ref desc) => write!(f, "Resource not found: {}", desc),
            DeployError::AWS(ref desc) => write!(f, "AWS error: {}", desc),
            DeployError::FunctionCreate(ref name) => {
                write!(f, "Error while creating the function {}", name)
            }
            DeployError::FunctionUpdate(ref name) => {
                write!(f, "Error while updating the function {}", name)
            }
            DeployError::FunctionNotFound(ref name) => write!(
                f,
                "The function {} does not exist. Deploy it before publishing a version",
                name
            ),
            DeployError::Input(ref desc) => write!(f, "Invalid task input: {}", desc),
            DeployError::IoError(ref desc) => write!(f, "IO error: {}", desc),
            DeployError::SerdeJson(ref desc) => write!(f, "serde_json error: {:?}", desc),
            DeployError::Internal(ref desc) => write!(
                f,
                "Internal error: {}. This was likely caused by an unexpected response \
                    from AWS Lambda",
                desc
            ),
        }
    }
}

impl error::Error for DeployError {}
