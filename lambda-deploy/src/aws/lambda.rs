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

//! This crate contains all wrapped functions of the AWS Lambda services.

use crate::client::FunctionClient;
use crate::configs::*;
use crate::error::{DeployError, Result};
use crate::function::{AliasResult, FunctionDefinition, PublishedVersion, VpcConfig};
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use rusoto_core::RusotoError;
use rusoto_lambda::{
    AliasConfiguration, CreateAliasRequest, CreateFunctionRequest, Environment,
    FunctionCode as LambdaFunctionCode, GetAliasError, GetAliasRequest,
    GetFunctionConfigurationError, GetFunctionConfigurationRequest, Lambda, LambdaClient,
    ListVersionsByFunctionRequest, PublishVersionRequest, UpdateAliasRequest,
    UpdateFunctionCodeRequest, UpdateFunctionConfigurationRequest, VpcConfig as LambdaVpcConfig,
};
use std::collections::HashMap;
use std::error::Error;

/// A [`FunctionClient`] backed by the Rusoto AWS Lambda client.
pub struct RusotoFunctionClient {
    client: LambdaClient,
}

impl RusotoFunctionClient {
    /// Wraps an existing Lambda client.
    pub fn new(client: LambdaClient) -> Self {
        RusotoFunctionClient { client }
    }

    /// Creates a client for the account and region of `conf`.
    pub fn try_new(conf: &AwsConfiguration) -> Result<Self> {
        Ok(Self::new(conf.lambda_client()?))
    }
}

/// Converts a Rusoto error. A plain HTTP 404 is the not-found signal; any
/// other failure keeps the message reported by AWS.
fn aws_error<E: Error + 'static>(err: RusotoError<E>) -> DeployError {
    match err {
        RusotoError::Unknown(ref resp) if resp.status.as_u16() == 404 => {
            DeployError::ResourceNotFound(resp.body_as_str().to_owned())
        }
        err => DeployError::AWS(err.to_string()),
    }
}

fn vpc_config(vpc: &VpcConfig) -> Option<LambdaVpcConfig> {
    Some(LambdaVpcConfig {
        security_group_ids: Some(vpc.security_group_ids.clone()),
        subnet_ids:         Some(vpc.subnet_ids.clone()),
    })
}

fn environment(variables: &HashMap<String, String>) -> Option<Environment> {
    Some(Environment {
        variables: Some(variables.clone()),
    })
}

fn alias_result(alias: AliasConfiguration) -> AliasResult {
    AliasResult {
        name:             alias.name.unwrap_or_default(),
        function_version: alias.function_version.unwrap_or_default(),
        alias_arn:        alias.alias_arn.unwrap_or_default(),
    }
}

#[async_trait]
impl FunctionClient for RusotoFunctionClient {
    async fn get_function_configuration(&self, function_name: &str) -> Result<()> {
        debug!("Getting the configuration of function {}", function_name);
        self.client
            .get_function_configuration(GetFunctionConfigurationRequest {
                function_name: function_name.to_owned(),
                ..Default::default()
            })
            .await
            .map(|_| ())
            .map_err(|e| match e {
                RusotoError::Service(GetFunctionConfigurationError::ResourceNotFound(msg)) => {
                    DeployError::ResourceNotFound(msg)
                }
                e => aws_error(e),
            })
    }

    async fn get_alias(&self, function_name: &str, alias_name: &str) -> Result<AliasResult> {
        debug!("Getting alias {} of function {}", alias_name, function_name);
        self.client
            .get_alias(GetAliasRequest {
                function_name: function_name.to_owned(),
                name: alias_name.to_owned(),
                ..Default::default()
            })
            .await
            .map(alias_result)
            .map_err(|e| match e {
                RusotoError::Service(GetAliasError::ResourceNotFound(msg)) => {
                    DeployError::ResourceNotFound(msg)
                }
                e => aws_error(e),
            })
    }

    async fn create_alias(
        &self,
        function_name: &str,
        version: &str,
        alias_name: &str,
    ) -> Result<AliasResult> {
        debug!(
            "Creating alias {} of function {} for version {}",
            alias_name, function_name, version
        );
        self.client
            .create_alias(CreateAliasRequest {
                function_name: function_name.to_owned(),
                function_version: version.to_owned(),
                name: alias_name.to_owned(),
                ..Default::default()
            })
            .await
            .map(alias_result)
            .map_err(aws_error)
    }

    async fn update_alias(
        &self,
        function_name: &str,
        version: &str,
        alias_name: &str,
    ) -> Result<AliasResult> {
        debug!(
            "Updating alias {} of function {} to version {}",
            alias_name, function_name, version
        );
        self.client
            .update_alias(UpdateAliasRequest {
                function_name: function_name.to_owned(),
                function_version: Some(version.to_owned()),
                name: alias_name.to_owned(),
                ..Default::default()
            })
            .await
            .map(alias_result)
            .map_err(aws_error)
    }

    async fn create_function(
        &self,
        definition: &FunctionDefinition,
        zip_file: Bytes,
    ) -> Result<String> {
        let role = definition.role.clone().ok_or_else(|| {
            DeployError::Input(format!(
                "an execution role is required to create the function {}",
                definition.function_name
            ))
        })?;

        let conf = self
            .client
            .create_function(CreateFunctionRequest {
                function_name: definition.function_name.clone(),
                handler: definition.handler.clone(),
                role,
                runtime: definition.runtime.clone(),
                description: Some(definition.description.clone()),
                memory_size: definition.memory_size,
                timeout: definition.timeout,
                code: LambdaFunctionCode {
                    zip_file: Some(zip_file),
                    ..Default::default()
                },
                vpc_config: vpc_config(&definition.vpc_config),
                environment: environment(&definition.environment_variables),
                ..Default::default()
            })
            .await
            .map_err(aws_error)?;

        conf.function_name
            .ok_or_else(|| DeployError::Internal("No function name!".to_string()))
    }

    async fn update_function_code(&self, function_name: &str, zip_file: Bytes) -> Result<()> {
        self.client
            .update_function_code(UpdateFunctionCodeRequest {
                function_name: function_name.to_owned(),
                zip_file: Some(zip_file),
                ..Default::default()
            })
            .await
            .map(|_| ())
            .map_err(aws_error)
    }

    async fn update_function_configuration(
        &self,
        definition: &FunctionDefinition,
    ) -> Result<String> {
        let conf = self
            .client
            .update_function_configuration(UpdateFunctionConfigurationRequest {
                function_name: definition.function_name.clone(),
                handler: definition.handler.clone(),
                role: definition.role.clone(),
                runtime: definition.runtime.clone(),
                description: Some(definition.description.clone()),
                memory_size: definition.memory_size,
                timeout: definition.timeout,
                vpc_config: vpc_config(&definition.vpc_config),
                environment: environment(&definition.environment_variables),
                ..Default::default()
            })
            .await
            .map_err(aws_error)?;

        conf.function_name
            .ok_or_else(|| DeployError::Internal("No function name!".to_string()))
    }

    async fn list_versions_by_function(&self, function_name: &str) -> Result<Vec<String>> {
        let mut request = ListVersionsByFunctionRequest {
            function_name: function_name.to_owned(),
            max_items: Some(*LAMBDA_LIST_VERSIONS_MAX_ITEMS),
            ..Default::default()
        };

        let mut versions = vec![];

        // Lambda returns up to `max_items` versions per call, starting with
        // `$LATEST`. Follow the marker until every page has been read.
        loop {
            let response = self
                .client
                .list_versions_by_function(request.clone())
                .await
                .map_err(aws_error)?;
            if let Some(page) = response.versions {
                for conf in page {
                    if let Some(version) = conf.version {
                        versions.push(version);
                    }
                }
            }
            if response.next_marker.is_none() {
                break;
            }
            request.marker = response.next_marker;
        }

        debug!("Function {} has versions {:?}", function_name, versions);
        Ok(versions)
    }

    async fn publish_version(
        &self,
        function_name: &str,
        description: &str,
    ) -> Result<PublishedVersion> {
        let conf = self
            .client
            .publish_version(PublishVersionRequest {
                function_name: function_name.to_owned(),
                description: Some(description.to_owned()),
                ..Default::default()
            })
            .await
            .map_err(aws_error)?;

        Ok(PublishedVersion {
            function_name: conf
                .function_name
                .unwrap_or_else(|| function_name.to_owned()),
            version:       conf
                .version
                .ok_or_else(|| DeployError::Internal("No function version!".to_string()))?,
        })
    }
}
