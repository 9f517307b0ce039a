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

//! Publishes an immutable version from `$LATEST` and points the alias at it.

use crate::client::FunctionClient;
use crate::error::{DeployError, Result};
use crate::function::{AliasResult, FunctionDefinition};
use crate::probe;
use log::info;

/// What a publish did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A new version was created and the alias now points at it.
    Published {
        /// The newest version before the publish.
        previous: String,
        /// The version created by the publish.
        version:  String,
        /// The alias after it was created or rebound.
        alias:    AliasResult,
    },
    /// Nothing changed since the last published version. The alias was not
    /// touched.
    Unchanged {
        /// The version the platform reported, equal to the newest version
        /// before the publish.
        version: String,
    },
}

/// Publishes one function definition through a [`FunctionClient`].
pub struct FunctionPublisher<'a, C: FunctionClient + ?Sized> {
    client:     &'a C,
    definition: FunctionDefinition,
}

impl<'a, C: FunctionClient + ?Sized> FunctionPublisher<'a, C> {
    /// Creates a publisher.
    pub fn new(client: &'a C, definition: FunctionDefinition) -> Self {
        FunctionPublisher { client, definition }
    }

    /// The definition being published. After a publish its version holds the
    /// version the alias points at.
    pub fn definition(&self) -> &FunctionDefinition {
        &self.definition
    }

    /// Runs the publish.
    ///
    /// The publish call does not say whether it created anything: when the
    /// code and configuration are unchanged, Lambda answers with the newest
    /// existing version. The version listed before the call is therefore the
    /// baseline, and only a different answer counts as a new version.
    pub async fn publish(&mut self) -> Result<PublishOutcome> {
        info!(
            "Publishing function {} with alias {}",
            self.definition.function_name, self.definition.alias_name
        );

        if !probe::function_exists(self.client, &self.definition.function_name).await? {
            return Err(DeployError::FunctionNotFound(
                self.definition.function_name.clone(),
            ));
        }

        let previous = probe::latest_version(self.client, &self.definition.function_name).await?;
        self.definition.function_version = previous.clone();

        let published = self
            .client
            .publish_version(
                &self.definition.function_name,
                &self.definition.description,
            )
            .await?;

        if published.version == previous {
            info!(
                "Version {} of function {} is up to date. Nothing was published",
                published.version, published.function_name
            );
            info!("Publish of function {} succeeded", published.function_name);
            return Ok(PublishOutcome::Unchanged {
                version: published.version,
            });
        }

        self.definition.function_version = published.version.clone();
        info!(
            "Version {} of function {} published",
            published.version, published.function_name
        );

        let alias = self.bind_alias().await?;

        info!("Publish of function {} succeeded", published.function_name);
        Ok(PublishOutcome::Published {
            previous,
            version: published.version,
            alias,
        })
    }

    /// Rebinds the alias to the new version, creating it if it is missing.
    async fn bind_alias(&self) -> Result<AliasResult> {
        let def = &self.definition;
        if probe::alias_exists(self.client, &def.function_name, &def.alias_name).await? {
            let alias = self
                .client
                .update_alias(&def.function_name, &def.function_version, &def.alias_name)
                .await?;
            info!(
                "Alias {} updated to version {}: {}",
                alias.name, alias.function_version, alias.alias_arn
            );
            Ok(alias)
        } else {
            let alias = self
                .client
                .create_alias(&def.function_name, &def.function_version, &def.alias_name)
                .await?;
            info!(
                "Alias {} created for version {}: {}",
                alias.name, alias.function_version, alias.alias_arn
            );
            Ok(alias)
        }
    }
}
