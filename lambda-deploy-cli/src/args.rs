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

//! Command line arguments of the task.
//!
//! The pipeline host passes every task input as an `INPUT_<NAME>` environment
//! variable, so each argument falls back to the matching variable. Flags given
//! on the command line win, which makes the task easy to run by hand.

use anyhow::Result;
use clap::{crate_version, App, Arg, ArgMatches};
use std::io::Write;

pub const FUNCTION_NAME: &str = "function-name";
pub const FUNCTION_ALIAS: &str = "function-alias";
pub const FUNCTION_HANDLER: &str = "function-handler";
pub const FUNCTION_ROLE: &str = "function-role";
pub const FUNCTION_RUNTIME: &str = "function-runtime";
pub const FUNCTION_DESCRIPTION: &str = "function-description";
pub const FUNCTION_MEMORY: &str = "function-memory";
pub const FUNCTION_TIMEOUT: &str = "function-timeout";
pub const TASK_OPERATION: &str = "task-operation";
pub const PROJECT_PATH: &str = "project-path";
pub const SECURITY_GROUPS: &str = "function-security-groups";
pub const SUBNETS: &str = "function-subnets";
pub const ENVIRONMENT_VARIABLES: &str = "function-environment-variables";
pub const AWS_CREDENTIALS: &str = "aws-credentials";
pub const ACCESS_KEY_ID: &str = "access-key-id";
pub const SECRET_ACCESS_KEY: &str = "secret-access-key";
pub const REGION: &str = "region";

pub fn app() -> App<'static> {
    App::new("lambda-deploy")
        .version(crate_version!())
        .about("Deploys and publishes an AWS Lambda function and its alias")
        .author("UMD Database Group")
        .args(get_task_args())
        .args(get_logging_args())
}

/// Declares a task input that can also be read from `INPUT_<NAME>`.
fn input(name: &'static str, env: &'static str, help: &'static str) -> Arg<'static> {
    Arg::new(name)
        .long(name)
        .env(env)
        .takes_value(true)
        .help(help)
}

fn get_task_args() -> Vec<Arg<'static>> {
    vec![
        input(
            FUNCTION_NAME,
            "INPUT_FUNCTIONNAME",
            "The name of the Lambda function",
        )
        .required(true),
        input(
            FUNCTION_ALIAS,
            "INPUT_FUNCTIONALIAS",
            "The alias bound to the deployed or published version",
        )
        .required(true),
        input(
            FUNCTION_HANDLER,
            "INPUT_FUNCTIONHANDLER",
            "The method Lambda calls to execute the function",
        ),
        input(
            FUNCTION_ROLE,
            "INPUT_FUNCTIONROLE",
            "The ARN of the function's execution role (required to create it)",
        ),
        input(
            FUNCTION_RUNTIME,
            "INPUT_FUNCTIONRUNTIME",
            "The identifier of the function's runtime",
        ),
        input(
            FUNCTION_DESCRIPTION,
            "INPUT_FUNCTIONDESCRIPTION",
            "The description of the function and of its published versions",
        )
        .required(true),
        input(
            FUNCTION_MEMORY,
            "INPUT_FUNCTIONMEMORY",
            "The memory available to the function, in MB",
        ),
        input(
            FUNCTION_TIMEOUT,
            "INPUT_FUNCTIONTIMEOUT",
            "The maximum execution time of the function, in seconds",
        ),
        input(
            TASK_OPERATION,
            "INPUT_TASKOPERATION",
            "The operation to run: deployFunction or publishFunction",
        )
        .required(true),
        input(
            PROJECT_PATH,
            "INPUT_PROJECTPATH",
            "The .zip deployment package of the function",
        )
        .value_name("FILE"),
        input(
            SECURITY_GROUPS,
            "INPUT_FUNCTIONSECURITYGROUPS",
            "Comma-separated VPC security group IDs",
        ),
        input(
            SUBNETS,
            "INPUT_FUNCTIONSUBNETS",
            "Comma-separated VPC subnet IDs",
        ),
        input(
            ENVIRONMENT_VARIABLES,
            "INPUT_FUNCTIONENVIRONMENTVARIABLES",
            "Environment variables of the function, as a JSON object",
        )
        .value_name("JSON"),
        input(
            AWS_CREDENTIALS,
            "INPUT_AWSCREDENTIALS",
            "The service endpoint holding the AWS credentials",
        )
        .value_name("ENDPOINT"),
        input(
            ACCESS_KEY_ID,
            "AWS_ACCESS_KEY_ID",
            "The AWS access key ID, overrides the service endpoint",
        ),
        input(
            SECRET_ACCESS_KEY,
            "AWS_SECRET_ACCESS_KEY",
            "The AWS secret access key, overrides the service endpoint",
        )
        .hide_env_values(true),
        input(REGION, "INPUT_REGIONNAME", "The AWS region of the function").required(true),
    ]
}

fn get_logging_args() -> Vec<Arg<'static>> {
    vec![
        Arg::new("log-level")
            .short('L')
            .long("log-level")
            .possible_values(["error", "warn", "info", "debug", "trace", "off"])
            .help("Log level [default: info]")
            .takes_value(true),
        Arg::new("trace")
            .long("trace")
            .help("Log ultra-verbose (trace level) information")
            .takes_value(false),
        Arg::new("silent")
            .long("silent")
            .help("Suppress all output")
            .takes_value(false),
    ]
}

pub fn get_logging(matches: &ArgMatches) -> Result<env_logger::Builder> {
    let mut builder = env_logger::Builder::new();

    let level = if matches.is_present("trace") {
        log::LevelFilter::Trace
    } else if matches.is_present("silent") {
        log::LevelFilter::Off
    } else {
        match matches.value_of("log-level") {
            Some("error") => log::LevelFilter::Error,
            Some("warn") => log::LevelFilter::Warn,
            Some("debug") => log::LevelFilter::Debug,
            Some("trace") => log::LevelFilter::Trace,
            Some("off") => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        }
    };
    builder.filter(None, level);
    builder.filter_module("rusoto_core", log::LevelFilter::Warn);
    builder.filter_module("hyper", log::LevelFilter::Warn);
    // Keep log lines and host commands on the same stream so they stay in
    // order in the pipeline log.
    builder.target(env_logger::Target::Stdout);

    if level == log::LevelFilter::Trace {
        builder.format_timestamp_secs();
    } else {
        builder.format(|f, record| {
            writeln!(
                f,
                "[{}] {}",
                record.level().to_string().to_lowercase(),
                record.args()
            )
        });
    }

    Ok(builder)
}
