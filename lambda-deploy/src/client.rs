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


//! The capability the orchestrators need from the remote platform.
//!
//! [`FunctionClient`] lists exactly the Lambda operations used by deploy and
//! publish. Production code talks to AWS through
//! [`RusotoFunctionClient`](crate::aws::RusotoFunctionClient); tests script
//! the answers with an in-memory client.

use crate::error::Result;
use crate::function::{AliasResult, FunctionDefinition, PublishedVersion};
use async_trait::async_trait;
use bytes::Bytes;

/// The remote function client trait.
///
/// Lookups of a function or an alias that does not exist must fail with
/// [`DeployError::ResourceNotFound`](crate::error::DeployError::ResourceNotFound)
/// so that callers can tell a missing resource from a failed request.
#[async_trait]
pub trait FunctionClient: Send + Sync {
    /// Returns the configuration of the unpublished version of a function.
    async fn get_function_configuration(&self, function_name: &str) -> Result<()>;

    /// Returns the alias of a function.
    async fn get_alias(&self, function_name: &str, alias_name: &str) -> Result<AliasResult>;

    /// Creates an alias bound to `version`.
    async fn create_alias(
        &self,
        function_name: &str,
        version: &str,
        alias_name: &str,
    ) -> Result<AliasResult>;

    /// Binds an existing alias to `version`.
    async fn update_alias(
        &self,
        function_name: &str,
        version: &str,
        alias_name: &str,
    ) -> Result<AliasResult>;

    /// Creates a function from its definition and the .zip package. Returns
    /// the name of the created function.
    async fn create_function(&self, definition: &FunctionDefinition, zip_file: Bytes)
        -> Result<String>;

    /// Replaces the code of the unpublished version of a function.
    async fn update_function_code(&self, function_name: &str, zip_file: Bytes) -> Result<()>;

    /// Replaces the configuration of the unpublished version of a function.
    /// Returns the name of the updated function.
    async fn update_function_configuration(&self, definition: &FunctionDefinition)
        -> Result<String>;

    /// Lists the versions of a function in the order the platform returns
    /// them, `$LATEST` included.
    async fn list_versions_by_function(&self, function_name: &str) -> Result<Vec<String>>;

    /// Publishes a version from the current code and configuration of the
    /// unpublished version.
    async fn publish_version(
        &self,
        function_name: &str,
        description: &str,
    ) -> Result<PublishedVersion>;
}
