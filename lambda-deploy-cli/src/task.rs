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

//! Reports the result of the task to the pipeline host with logging commands
//! written to stdout.

/// The result of the task as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskResult {
    Succeeded,
    Failed,
}

impl TaskResult {
    fn as_str(&self) -> &'static str {
        match self {
            TaskResult::Succeeded => "Succeeded",
            TaskResult::Failed => "Failed",
        }
    }

    /// The process exit code of the result.
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskResult::Succeeded => 0,
            TaskResult::Failed => 1,
        }
    }
}

/// Escapes the message of a logging command so it stays on one line.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Formats the commands that report `result` with `message`. A failure is
/// also reported as an error issue so that it shows in the run summary.
pub fn result_commands(result: TaskResult, message: &str) -> Vec<String> {
    let message = escape_data(message);
    let mut commands = vec![];
    if result == TaskResult::Failed {
        commands.push(format!("##vso[task.issue type=error;]{}", message));
    }
    commands.push(format!(
        "##vso[task.complete result={};]{}",
        result.as_str(),
        message
    ));
    commands
}

/// Reports `result` to the host.
pub fn set_result(result: TaskResult, message: &str) {
    for command in result_commands(result, message) {
        println!("{}", command);
    }
}
