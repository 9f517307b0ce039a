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

//! Credentials and region of the AWS account that owns the function.

use crate::error::{DeployError, Result};
use rusoto_core::credential::StaticProvider;
use rusoto_core::{HttpClient, Region};
use rusoto_lambda::LambdaClient;
use std::fmt;
use std::str::FromStr;

/// The AWS account the task talks to. It is built once from the task inputs
/// and never changes during an invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsConfiguration {
    /// The access key ID of the service endpoint.
    pub access_key_id:     String,
    /// The secret access key of the service endpoint.
    pub secret_access_key: String,
    /// The region name, e.g. `us-east-1`.
    pub region:            String,
}

impl AwsConfiguration {
    /// Creates a new AWS configuration.
    pub fn new<K, S, R>(access_key_id: K, secret_access_key: S, region: R) -> Self
    where
        K: Into<String>,
        S: Into<String>,
        R: Into<String>,
    {
        AwsConfiguration {
            access_key_id:     access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region:            region.into(),
        }
    }

    /// Parses the configured region name.
    pub fn region(&self) -> Result<Region> {
        Region::from_str(self.region.trim())
            .map_err(|e| DeployError::Input(format!("region `{}`: {}", self.region, e)))
    }

    /// Creates a Lambda client bound to these credentials and region.
    pub fn lambda_client(&self) -> Result<LambdaClient> {
        let region = self.region()?;
        let dispatcher = HttpClient::new().map_err(|e| DeployError::AWS(e.to_string()))?;
        let credentials =
            StaticProvider::new_minimal(self.access_key_id.clone(), self.secret_access_key.clone());
        Ok(LambdaClient::new_with(dispatcher, credentials, region))
    }
}

// Keeps the secret out of the logs.
impl fmt::Debug for AwsConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConfiguration")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"******")
            .field("region", &self.region)
            .finish()
    }
}
