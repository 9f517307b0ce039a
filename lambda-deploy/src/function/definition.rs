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

//! The desired state of one Lambda function and its alias.

use crate::configs::*;
use crate::error::{DeployError, Result};
use crate::function::FunctionCode;
use serde_json::Value;
use std::collections::HashMap;

/// The VPC settings of a function.
///
/// You can configure a Lambda function to connect to private subnets in a
/// virtual private cloud (VPC) in your AWS account. Both lists keep the order
/// in which they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VpcConfig {
    /// The VPC security groups.
    pub security_group_ids: Vec<String>,
    /// The VPC subnets.
    pub subnet_ids:         Vec<String>,
}

impl VpcConfig {
    /// Builds the VPC settings from the comma-separated list inputs.
    pub fn from_lists(security_groups: Option<&str>, subnets: Option<&str>) -> Self {
        VpcConfig {
            security_group_ids: split_list(security_groups),
            subnet_ids:         split_list(subnets),
        }
    }

    /// Returns true if neither list has an entry.
    pub fn is_empty(&self) -> bool {
        self.security_group_ids.is_empty() && self.subnet_ids.is_empty()
    }
}

/// Splits a comma-separated list input. All whitespace is removed first and
/// empty entries are dropped, so `"sg-1, sg-2,"` yields `["sg-1", "sg-2"]`.
pub fn split_list(input: Option<&str>) -> Vec<String> {
    match input {
        Some(list) => {
            let list: String = list.chars().filter(|c| !c.is_whitespace()).collect();
            list.split(TASK_LIST_SEPARATOR.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_owned())
                .collect()
        }
        None => vec![],
    }
}

/// Parses the environment variables input, a JSON object whose values are
/// strings. A missing or blank input yields an empty map.
pub fn parse_environment_variables(input: Option<&str>) -> Result<HashMap<String, String>> {
    let text = match input {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Ok(HashMap::new()),
    };

    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key, s)),
                other => Err(DeployError::Input(format!(
                    "environment variable `{}` must be a string, got {}",
                    key, other
                ))),
            })
            .collect(),
        other => Err(DeployError::Input(format!(
            "environment variables must be a JSON object, got {}",
            other
        ))),
    }
}

/// The result of binding an alias to a version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasResult {
    /// The name of the alias.
    pub name:             String,
    /// The version the alias points at.
    pub function_version: String,
    /// The Amazon Resource Name (ARN) of the alias.
    pub alias_arn:        String,
}

/// The version produced by a publish request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedVersion {
    /// The name of the function.
    pub function_name: String,
    /// The version the platform reports after the publish. When nothing has
    /// changed since the last published version, this is that version.
    pub version:       String,
}

/// The desired state of a Lambda function.
#[derive(Debug, Clone, Default)]
pub struct FunctionDefinition {
    /// The name of the Lambda function. It identifies the function across
    /// invocations.
    pub function_name:         String,
    /// The name of the alias managed together with the function.
    pub alias_name:            String,
    /// The name of the method within your code that Lambda calls to execute
    /// your function.
    pub handler:               Option<String>,
    /// The Amazon Resource Name (ARN) of the function's execution role.
    /// Required to create a function.
    pub role:                  Option<String>,
    /// The identifier of the function's runtime.
    pub runtime:               Option<String>,
    /// A description of the function. Also used as the description of the
    /// published versions.
    pub description:           String,
    /// The amount of memory available to the function, in MB.
    pub memory_size:           Option<i64>,
    /// The amount of time that Lambda allows a function to run before
    /// stopping it, in seconds.
    pub timeout:               Option<i64>,
    /// The version the alias is bound to. Deploy forces it to `$LATEST`;
    /// publish overwrites it with the resolved version numbers.
    pub function_version:      String,
    /// The deployment package.
    pub code:                  FunctionCode,
    /// The VPC settings.
    pub vpc_config:            VpcConfig,
    /// Environment variables that are accessible from function code during
    /// execution.
    pub environment_variables: HashMap<String, String>,
}

impl FunctionDefinition {
    /// Creates a definition with the identity fields set and the
    /// deployment-time configuration left empty.
    pub fn new<N, A, D>(function_name: N, alias_name: A, description: D) -> Self
    where
        N: Into<String>,
        A: Into<String>,
        D: Into<String>,
    {
        FunctionDefinition {
            function_name: function_name.into(),
            alias_name: alias_name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Sets the function handler.
    pub fn set_handler(&mut self, handler: &str) -> &mut Self {
        self.handler = Some(handler.to_owned());
        self
    }

    /// Sets the execution role.
    pub fn set_role(&mut self, role: &str) -> &mut Self {
        self.role = Some(role.to_owned());
        self
    }

    /// Sets the runtime identifier.
    pub fn set_runtime(&mut self, runtime: &str) -> &mut Self {
        self.runtime = Some(runtime.to_owned());
        self
    }

    /// Sets the memory size.
    pub fn set_memory_size(&mut self, memory_size: i64) -> &mut Self {
        self.memory_size = Some(memory_size);
        self
    }

    /// Sets the timeout.
    pub fn set_timeout(&mut self, timeout: i64) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the deployment package.
    pub fn set_code(&mut self, code: FunctionCode) -> &mut Self {
        self.code = code;
        self
    }

    /// Sets the VPC settings.
    pub fn set_vpc_config(&mut self, vpc_config: VpcConfig) -> &mut Self {
        self.vpc_config = vpc_config;
        self
    }

    /// Sets the environment variables.
    pub fn set_environment_variables(&mut self, variables: HashMap<String, String>) -> &mut Self {
        self.environment_variables = variables;
        self
    }
}
