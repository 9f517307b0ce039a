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

//! Existence and version checks shared by deploy and publish.

use crate::client::FunctionClient;
use crate::configs::*;
use crate::error::Result;

/// Turns the not-found signal of a lookup into `false`. Any other failure is
/// returned as is.
fn exists<T>(lookup: Result<T>) -> Result<bool> {
    match lookup {
        Ok(_) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Returns true if the function exists, judged by its `$LATEST`
/// configuration.
pub async fn function_exists<C>(client: &C, function_name: &str) -> Result<bool>
where
    C: FunctionClient + ?Sized,
{
    exists(client.get_function_configuration(function_name).await)
}

/// Returns true if the function has an alias with this name.
pub async fn alias_exists<C>(client: &C, function_name: &str, alias_name: &str) -> Result<bool>
where
    C: FunctionClient + ?Sized,
{
    exists(client.get_alias(function_name, alias_name).await)
}

/// Returns the most recently published version of the function, or `0` if
/// only `$LATEST` exists.
///
/// Lambda lists `$LATEST` first and the published versions in ascending
/// order after it, so the newest version is the last one listed.
pub async fn latest_version<C>(client: &C, function_name: &str) -> Result<String>
where
    C: FunctionClient + ?Sized,
{
    let mut versions = client.list_versions_by_function(function_name).await?;
    if versions.len() <= 1 {
        return Ok(LAMBDA_UNPUBLISHED_VERSION.clone());
    }
    Ok(versions.pop().unwrap_or_else(|| LAMBDA_UNPUBLISHED_VERSION.clone()))
}
