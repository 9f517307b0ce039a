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

//! The pipeline task entry point: reads the task inputs, runs the deploy or
//! the publish, and reports the result to the host.

mod args;
mod endpoint;
mod params;
mod task;

use anyhow::Result;
use lambda_deploy::prelude::*;
use log::{debug, error};
use task::TaskResult;

/// Runs the requested operation once.
async fn execute(matches: &clap::ArgMatches) -> Result<TaskOutcome> {
    let operation = params::operation(matches)?;
    let definition = params::function_definition(matches)?;
    let conf = params::aws_configuration(matches)?;
    debug!("Running {} with {:?}", operation, conf);

    let outcome = match operation {
        Operation::Deploy => driver::deploy(&conf, definition).await?,
        Operation::Publish => driver::publish(&conf, definition).await?,
    };
    Ok(outcome)
}

#[tokio::main]
pub async fn main() -> Result<()> {
    let matches = args::app().get_matches();
    args::get_logging(&matches)?.init();

    let result = match execute(&matches).await {
        Ok(outcome) => {
            debug!("{:?}", outcome);
            task::set_result(TaskResult::Succeeded, "");
            TaskResult::Succeeded
        }
        Err(e) => {
            error!("{:#}", e);
            task::set_result(TaskResult::Failed, &format!("{:#}", e));
            TaskResult::Failed
        }
    };

    std::process::exit(result.exit_code());
}
