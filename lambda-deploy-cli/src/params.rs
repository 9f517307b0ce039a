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

//! Turns the task inputs into the function definition, the operation and the
//! AWS configuration. Everything here runs before the first remote call.

use crate::args::*;
use crate::endpoint::endpoint_authorization;
use clap::ArgMatches;
use lambda_deploy::prelude::*;
use log::debug;

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    optional(matches, name).ok_or_else(|| DeployError::Input(format!("`{}` is required", name)))
}

fn optional<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches
        .value_of(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn optional_i64(matches: &ArgMatches, name: &str) -> Result<Option<i64>> {
    optional(matches, name)
        .map(|value| {
            value.parse::<i64>().map_err(|e| {
                DeployError::Input(format!("`{}` must be an integer, got `{}`: {}", name, value, e))
            })
        })
        .transpose()
}

/// Reads the operation selector.
pub fn operation(matches: &ArgMatches) -> Result<Operation> {
    required(matches, TASK_OPERATION)?.parse()
}

/// Reads the function definition. The package at the project path is not
/// read here, only when a create or update needs it.
pub fn function_definition(matches: &ArgMatches) -> Result<FunctionDefinition> {
    let mut def = FunctionDefinition::new(
        required(matches, FUNCTION_NAME)?,
        required(matches, FUNCTION_ALIAS)?,
        required(matches, FUNCTION_DESCRIPTION)?,
    );

    def.handler = optional(matches, FUNCTION_HANDLER).map(str::to_owned);
    def.role = optional(matches, FUNCTION_ROLE).map(str::to_owned);
    def.runtime = optional(matches, FUNCTION_RUNTIME).map(str::to_owned);
    def.memory_size = optional_i64(matches, FUNCTION_MEMORY)?;
    def.timeout = optional_i64(matches, FUNCTION_TIMEOUT)?;

    if let Some(path) = optional(matches, PROJECT_PATH) {
        def.set_code(FunctionCode::from_path(path));
    }

    def.set_vpc_config(VpcConfig::from_lists(
        matches.value_of(SECURITY_GROUPS),
        matches.value_of(SUBNETS),
    ));

    def.set_environment_variables(
        parse_environment_variables(matches.value_of(ENVIRONMENT_VARIABLES)).map_err(|e| {
            DeployError::Input(format!("`{}`: {}", ENVIRONMENT_VARIABLES, e))
        })?,
    );

    Ok(def)
}

/// Reads the credentials and the region.
///
/// Explicit access keys take precedence over the service endpoint.
pub fn aws_configuration(matches: &ArgMatches) -> Result<AwsConfiguration> {
    let region = required(matches, REGION)?;

    let (key, secret) = match (
        optional(matches, ACCESS_KEY_ID),
        optional(matches, SECRET_ACCESS_KEY),
    ) {
        (Some(key), Some(secret)) => (key.to_owned(), secret.to_owned()),
        _ => {
            let endpoint = required(matches, AWS_CREDENTIALS)?;
            let auth = endpoint_authorization(endpoint)?;
            debug!("Service endpoint {} uses scheme {:?}", endpoint, auth.scheme);
            auth.credentials(endpoint)?
        }
    };

    Ok(AwsConfiguration::new(key, secret, region))
}
