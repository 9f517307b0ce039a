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

//! Creates or updates the `$LATEST` working copy of a function and makes sure
//! its alias exists.

use crate::client::FunctionClient;
use crate::configs::*;
use crate::error::{DeployError, Result};
use crate::function::{AliasResult, FunctionDefinition};
use crate::probe;
use log::{error, info};

/// What a deploy did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    /// The name of the deployed function.
    pub function_name: String,
    /// True if the function was created, false if it was updated.
    pub created:       bool,
    /// The alias created by this deploy. `None` if the alias already existed.
    pub alias:         Option<AliasResult>,
}

/// Deploys one function definition through a [`FunctionClient`].
///
/// A deploy always targets `$LATEST`. The function is created if it does not
/// exist, otherwise its code and then its configuration are updated. An alias
/// that already exists is left where it points; a missing one is created and
/// bound to `$LATEST`.
pub struct FunctionDeployer<'a, C: FunctionClient + ?Sized> {
    client:     &'a C,
    definition: FunctionDefinition,
}

impl<'a, C: FunctionClient + ?Sized> FunctionDeployer<'a, C> {
    /// Creates a deployer. The definition's version is forced to `$LATEST`.
    pub fn new(client: &'a C, mut definition: FunctionDefinition) -> Self {
        definition.function_version = LAMBDA_LATEST_VERSION.clone();
        FunctionDeployer { client, definition }
    }

    /// The definition being deployed.
    pub fn definition(&self) -> &FunctionDefinition {
        &self.definition
    }

    /// Runs the deploy. The first failure aborts it; nothing is retried or
    /// rolled back.
    pub async fn deploy(&self) -> Result<DeployOutcome> {
        let def = &self.definition;
        info!(
            "Deploying function {} with alias {}",
            def.function_name, def.alias_name
        );

        let created = if probe::function_exists(self.client, &def.function_name).await? {
            info!("Function {} exists. Updating it", def.function_name);
            let name = self.update_function().await?;
            info!("Function {} updated", name);
            false
        } else {
            info!("Function {} does not exist. Creating it", def.function_name);
            let name = self.create_function().await?;
            info!("Function {} created", name);
            true
        };

        info!(
            "Associating alias {} with function {}",
            def.alias_name, def.function_name
        );
        let alias = self.ensure_alias().await?;

        info!("Deploy of function {} succeeded", def.function_name);
        Ok(DeployOutcome {
            function_name: def.function_name.clone(),
            created,
            alias,
        })
    }

    /// Creates the function with its full configuration and code.
    async fn create_function(&self) -> Result<String> {
        let def = &self.definition;
        if def.role.is_none() {
            return Err(DeployError::Input(format!(
                "an execution role is required to create the function {}",
                def.function_name
            )));
        }
        let zip_file = def.code.zip_file()?;

        self.client
            .create_function(def, zip_file)
            .await
            .map_err(|e| {
                error!("{}", e);
                DeployError::FunctionCreate(def.function_name.clone())
            })
    }

    /// Updates the code, then the configuration. If the second call fails the
    /// new code stays in place with the old configuration.
    async fn update_function(&self) -> Result<String> {
        let def = &self.definition;
        let zip_file = def.code.zip_file()?;

        let updated = match self
            .client
            .update_function_code(&def.function_name, zip_file)
            .await
        {
            Ok(()) => self.client.update_function_configuration(def).await,
            Err(e) => Err(e),
        };

        updated.map_err(|e| {
            error!("{}", e);
            DeployError::FunctionUpdate(def.function_name.clone())
        })
    }

    /// Creates the alias bound to `$LATEST` unless it already exists. An
    /// existing alias is assumed to be pinned on purpose and is never moved.
    async fn ensure_alias(&self) -> Result<Option<AliasResult>> {
        let def = &self.definition;
        if probe::alias_exists(self.client, &def.function_name, &def.alias_name).await? {
            info!(
                "Alias {} already exists. Version {} was not associated with it",
                def.alias_name, def.function_version
            );
            return Ok(None);
        }

        let alias = self
            .client
            .create_alias(&def.function_name, &def.function_version, &def.alias_name)
            .await?;
        info!(
            "Alias {} created for version {}: {}",
            alias.name, alias.function_version, alias.alias_arn
        );
        Ok(Some(alias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionCode;
    use crate::tests::{definition, Call, MockFunctionClient};
    use bytes::Bytes;

    #[test]
    fn version_is_forced_to_latest() {
        let client = MockFunctionClient::new();
        let mut def = definition("f1", "prod");
        def.function_version = "7".to_owned();
        let deployer = FunctionDeployer::new(&client, def);
        assert_eq!(deployer.definition().function_version, "$LATEST");
    }

    #[tokio::test]
    async fn create_when_absent() -> Result<()> {
        let client = MockFunctionClient::new();
        let outcome = FunctionDeployer::new(&client, definition("f1", "prod"))
            .deploy()
            .await?;

        assert!(outcome.created);
        assert_eq!(outcome.alias.map(|a| a.function_version).as_deref(), Some("$LATEST"));

        let calls = client.calls();
        let creates = calls
            .iter()
            .filter(|c| matches!(c, Call::CreateFunction { .. }))
            .count();
        assert_eq!(creates, 1);
        assert!(!calls.iter().any(|c| matches!(
            c,
            Call::UpdateFunctionCode { .. } | Call::UpdateFunctionConfiguration(_)
        )));
        Ok(())
    }

    #[tokio::test]
    async fn update_code_then_configuration() -> Result<()> {
        let client = MockFunctionClient::new().with_function("f1");
        let outcome = FunctionDeployer::new(&client, definition("f1", "prod"))
            .deploy()
            .await?;
        assert!(!outcome.created);

        let calls = client.calls();
        let code = calls
            .iter()
            .position(|c| matches!(c, Call::UpdateFunctionCode { .. }))
            .unwrap();
        let conf = calls
            .iter()
            .position(|c| matches!(c, Call::UpdateFunctionConfiguration(_)))
            .unwrap();
        assert!(code < conf);
        assert_eq!(
            calls.iter().filter(|c| matches!(c, Call::UpdateFunctionCode { .. })).count(),
            1
        );
        assert_eq!(
            calls.iter().filter(|c| matches!(c, Call::UpdateFunctionConfiguration(_))).count(),
            1
        );
        assert!(!calls.iter().any(|c| matches!(c, Call::CreateFunction { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn existing_alias_is_never_rebound() -> Result<()> {
        // A deploy leaves an existing alias pinned where it is, even though
        // the working copy just changed.
        let client = MockFunctionClient::new()
            .with_function("f1")
            .with_alias("prod", "2");
        let outcome = FunctionDeployer::new(&client, definition("f1", "prod"))
            .deploy()
            .await?;

        assert_eq!(outcome.alias, None);
        assert!(!client.calls().iter().any(Call::mutates_alias));
        assert_eq!(client.alias("prod").as_deref(), Some("2"));
        Ok(())
    }

    #[tokio::test]
    async fn create_failure_names_the_function() {
        let client = MockFunctionClient::new().fail_on("create_function");
        let err = FunctionDeployer::new(&client, definition("f1", "prod"))
            .deploy()
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::FunctionCreate(ref name) if name == "f1"));
        assert!(!client.calls().iter().any(Call::mutates_alias));
    }

    #[tokio::test]
    async fn configuration_failure_keeps_code_update() {
        let client = MockFunctionClient::new()
            .with_function("f1")
            .fail_on("update_function_configuration");
        let err = FunctionDeployer::new(&client, definition("f1", "prod"))
            .deploy()
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::FunctionUpdate(ref name) if name == "f1"));

        let calls = client.calls();
        assert!(calls.iter().any(|c| matches!(c, Call::UpdateFunctionCode { .. })));
        assert!(!calls.iter().any(|c| matches!(c, Call::GetAlias(..))));
    }

    #[tokio::test]
    async fn code_failure_skips_configuration() {
        let client = MockFunctionClient::new()
            .with_function("f1")
            .fail_on("update_function_code");
        let err = FunctionDeployer::new(&client, definition("f1", "prod"))
            .deploy()
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::FunctionUpdate(_)));
        assert!(!client
            .calls()
            .iter()
            .any(|c| matches!(c, Call::UpdateFunctionConfiguration(_))));
    }

    #[tokio::test]
    async fn alias_failures_are_not_wrapped() {
        let client = MockFunctionClient::new().fail_on("create_alias");
        let err = FunctionDeployer::new(&client, definition("f1", "prod"))
            .deploy()
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::AWS(_)));
    }

    #[tokio::test]
    async fn create_without_role_fails_before_the_call() {
        let client = MockFunctionClient::new();
        let mut def = definition("f1", "prod");
        def.role = None;
        let err = FunctionDeployer::new(&client, def).deploy().await.unwrap_err();
        assert!(matches!(err, DeployError::Input(_)));
        assert!(!client
            .calls()
            .iter()
            .any(|c| matches!(c, Call::CreateFunction { .. })));
    }

    #[tokio::test]
    async fn code_is_read_only_when_needed() -> Result<()> {
        // Updating an existing function reads the package exactly once.
        let client = MockFunctionClient::new().with_function("f1");
        let mut def = definition("f1", "prod");
        def.set_code(FunctionCode::from_bytes(Bytes::from_static(b"v2")));
        FunctionDeployer::new(&client, def).deploy().await?;

        assert!(client.calls().contains(&Call::UpdateFunctionCode {
            function_name: "f1".to_owned(),
            zip_file:      Bytes::from_static(b"v2"),
        }));
        Ok(())
    }
}
