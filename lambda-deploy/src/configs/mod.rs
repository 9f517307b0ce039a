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

//! This module provides the default configurations for lambda-deploy.

pub mod aws;
pub use aws::AwsConfiguration;

use ini::Ini;
use lazy_static::lazy_static;

lazy_static! {
    /// Global settings.
    pub static ref LAMBDA_DEPLOY_CONF: Ini = Ini::load_from_str(include_str!("./config.toml")).unwrap();

    /// The version of a function's unpublished working copy.
    pub static ref LAMBDA_LATEST_VERSION: String = LAMBDA_DEPLOY_CONF["lambda"]["latest"].to_string();
    /// The version reported when only the working copy exists.
    pub static ref LAMBDA_UNPUBLISHED_VERSION: String = LAMBDA_DEPLOY_CONF["lambda"]["unpublished_version"].to_string();
    /// Maximum number of versions returned by a single listing request.
    pub static ref LAMBDA_LIST_VERSIONS_MAX_ITEMS: i64 = LAMBDA_DEPLOY_CONF["lambda"]["list_versions_max_items"].parse::<i64>().unwrap();

    /// The operation selector value that requests a deploy.
    pub static ref TASK_DEPLOY_OPERATION: String = LAMBDA_DEPLOY_CONF["task"]["deploy_operation"].to_string();
    /// The operation selector value that requests a publish.
    pub static ref TASK_PUBLISH_OPERATION: String = LAMBDA_DEPLOY_CONF["task"]["publish_operation"].to_string();
    /// Separator of list inputs.
    pub static ref TASK_LIST_SEPARATOR: String = LAMBDA_DEPLOY_CONF["task"]["list_separator"].to_string();
}
