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

//! This module drives one invocation of the task: it picks the operation,
//! builds the orchestrator for it and runs it to completion.
//!
//! Every remote call is awaited before the next one is issued. There is no
//! state shared between invocations; the orchestrator owns the function
//! definition for the duration of the run and is dropped afterwards.

pub mod deploy;
pub mod publish;
pub use deploy::{DeployOutcome, FunctionDeployer};
pub use publish::{FunctionPublisher, PublishOutcome};

use crate::aws::RusotoFunctionClient;
use crate::client::FunctionClient;
use crate::configs::*;
use crate::error::{DeployError, Result};
use crate::function::FunctionDefinition;
use std::fmt;
use std::str::FromStr;

/// The operation requested by the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create or update `$LATEST` and make sure the alias exists.
    Deploy,
    /// Publish a version from `$LATEST` and point the alias at it.
    Publish,
}

impl FromStr for Operation {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == TASK_DEPLOY_OPERATION.as_str() {
            Ok(Operation::Deploy)
        } else if s == TASK_PUBLISH_OPERATION.as_str() {
            Ok(Operation::Publish)
        } else {
            Err(DeployError::Input(format!(
                "unknown operation `{}`, expected `{}` or `{}`",
                s, *TASK_DEPLOY_OPERATION, *TASK_PUBLISH_OPERATION
            )))
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deploy => write!(f, "{}", *TASK_DEPLOY_OPERATION),
            Operation::Publish => write!(f, "{}", *TASK_PUBLISH_OPERATION),
        }
    }
}

/// What the invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The result of a deploy.
    Deployed(DeployOutcome),
    /// The result of a publish.
    Published(PublishOutcome),
}

/// Runs `operation` for `definition` through `client`.
pub async fn run<C>(
    client: &C,
    operation: Operation,
    definition: FunctionDefinition,
) -> Result<TaskOutcome>
where
    C: FunctionClient + ?Sized,
{
    match operation {
        Operation::Deploy => FunctionDeployer::new(client, definition)
            .deploy()
            .await
            .map(TaskOutcome::Deployed),
        Operation::Publish => FunctionPublisher::new(client, definition)
            .publish()
            .await
            .map(TaskOutcome::Published),
    }
}

/// Creates or updates the function described by `definition` in the account
/// of `conf`, then makes sure its alias exists.
pub async fn deploy(
    conf: &AwsConfiguration,
    definition: FunctionDefinition,
) -> Result<TaskOutcome> {
    let client = RusotoFunctionClient::try_new(conf)?;
    run(&client, Operation::Deploy, definition).await
}

/// Publishes a new version of the function described by `definition` in the
/// account of `conf` and points its alias at it.
pub async fn publish(
    conf: &AwsConfiguration,
    definition: FunctionDefinition,
) -> Result<TaskOutcome> {
    let client = RusotoFunctionClient::try_new(conf)?;
    run(&client, Operation::Publish, definition).await
}
