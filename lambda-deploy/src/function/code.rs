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

//! The deployment package of a function.
//!
//! Your AWS Lambda function's code consists of scripts or compiled programs
//! and their dependencies, bundled into a .zip deployment package. The package
//! is only needed by the create and update-code calls, so it is described here
//! as a deferred byte source: nothing is read from disk until one of those
//! calls asks for the bytes.

use crate::error::{DeployError, Result};
use bytes::Bytes;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type CodeLoader = Arc<dyn Fn() -> Result<Bytes> + Send + Sync>;

/// A deferred source of the .zip deployment package.
#[derive(Clone)]
pub enum FunctionCode {
    /// No package was given. Asking for the bytes is an input error.
    None,
    /// The package is read from this path on demand.
    Path(PathBuf),
    /// The package is already in memory.
    Bytes(Bytes),
    /// The package is produced by a caller-provided loader.
    Loader(CodeLoader),
}

impl FunctionCode {
    /// Returns a code source without a package.
    pub fn none() -> Self {
        FunctionCode::None
    }

    /// Returns a code source that reads the package from `path` when needed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        FunctionCode::Path(path.as_ref().to_path_buf())
    }

    /// Returns a code source backed by in-memory bytes.
    pub fn from_bytes<B: Into<Bytes>>(bytes: B) -> Self {
        FunctionCode::Bytes(bytes.into())
    }

    /// Returns a code source that calls `loader` when the bytes are needed.
    pub fn from_fn<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Bytes> + Send + Sync + 'static,
    {
        FunctionCode::Loader(Arc::new(loader))
    }

    /// Returns true if no package was given.
    pub fn is_none(&self) -> bool {
        matches!(self, FunctionCode::None)
    }

    /// Produces the bytes of the .zip package.
    pub fn zip_file(&self) -> Result<Bytes> {
        match self {
            FunctionCode::None => Err(DeployError::Input(
                "no project path was given for the function code".to_owned(),
            )),
            FunctionCode::Path(path) => {
                let bytes = fs::read(path).map_err(|e| {
                    io::Error::new(e.kind(), format!("cannot read {}: {}", path.display(), e))
                })?;
                Ok(Bytes::from(bytes))
            }
            FunctionCode::Bytes(bytes) => Ok(bytes.clone()),
            FunctionCode::Loader(loader) => loader(),
        }
    }
}

impl Default for FunctionCode {
    fn default() -> Self {
        FunctionCode::None
    }
}

impl fmt::Debug for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionCode::None => write!(f, "FunctionCode::None"),
            FunctionCode::Path(path) => write!(f, "FunctionCode::Path({})", path.display()),
            FunctionCode::Bytes(bytes) => write!(f, "FunctionCode::Bytes({} bytes)", bytes.len()),
            FunctionCode::Loader(_) => write!(f, "FunctionCode::Loader"),
        }
    }
}
