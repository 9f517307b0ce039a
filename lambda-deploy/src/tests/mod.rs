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

//! Common unit test utility methods


use crate::client::FunctionClient;
use crate::configs::*;
use crate::error::{DeployError, Result};
use crate::function::{AliasResult, FunctionDefinition, PublishedVersion};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A remote call recorded by [`MockFunctionClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    GetFunctionConfiguration(String),
    GetAlias(String, String),
    CreateAlias {
        function_name: String,
        version:       String,
        alias_name:    String,
    },
    UpdateAlias {
        function_name: String,
        version:       String,
        alias_name:    String,
    },
    CreateFunction {
        function_name: String,
        zip_file:      Bytes,
    },
    UpdateFunctionCode {
        function_name: String,
        zip_file:      Bytes,
    },
    UpdateFunctionConfiguration(String),
    ListVersionsByFunction(String),
    PublishVersion {
        function_name: String,
        description:   String,
    },
}

impl Call {
    /// Returns true if the call creates or rebinds an alias.
    pub fn mutates_alias(&self) -> bool {
        matches!(self, Call::CreateAlias { .. } | Call::UpdateAlias { .. })
    }
}

#[derive(Debug, Default)]
struct MockState {
    function: Option<String>,
    aliases:  HashMap<String, String>,
    versions: Vec<String>,
    publish:  Option<String>,
    failures: HashSet<&'static str>,
    calls:    Vec<Call>,
}

/// An in-memory Lambda that records every call made against it.
///
/// The mock keeps just enough state to answer consistently: creating the
/// function or an alias makes later lookups succeed, and publishing appends
/// a version unless an answer was scripted with [`publishes`].
///
/// [`publishes`]: MockFunctionClient::publishes
#[derive(Debug, Default)]
pub(crate) struct MockFunctionClient {
    state: Mutex<MockState>,
}

impl MockFunctionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// The function exists remotely.
    pub fn with_function(self, function_name: &str) -> Self {
        self.state.lock().unwrap().function = Some(function_name.to_owned());
        self
    }

    /// The alias exists and points at `version`.
    pub fn with_alias(self, alias_name: &str, version: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .aliases
            .insert(alias_name.to_owned(), version.to_owned());
        self
    }

    /// The published versions, oldest first. `$LATEST` is always listed.
    pub fn with_versions(self, versions: &[&str]) -> Self {
        self.state.lock().unwrap().versions = versions.iter().map(|v| v.to_string()).collect();
        self
    }

    /// The next publish reports `version`.
    pub fn publishes(self, version: &str) -> Self {
        self.state.lock().unwrap().publish = Some(version.to_owned());
        self
    }

    /// The named operation fails with a remote error.
    pub fn fail_on(self, operation: &'static str) -> Self {
        self.state.lock().unwrap().failures.insert(operation);
        self
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// The version an alias currently points at.
    pub fn alias(&self, alias_name: &str) -> Option<String> {
        self.state.lock().unwrap().aliases.get(alias_name).cloned()
    }

    /// Records `call` and fails it if `operation` was scripted to fail.
    fn record(&self, operation: &'static str, call: Call) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failures.contains(operation) {
            return Err(DeployError::AWS(format!("{} failed", operation)));
        }
        Ok(())
    }

    fn alias_result(function_name: &str, version: &str, alias_name: &str) -> AliasResult {
        AliasResult {
            name:             alias_name.to_owned(),
            function_version: version.to_owned(),
            alias_arn:        format!(
                "arn:aws:lambda:us-east-1:123456789012:function:{}:{}",
                function_name, alias_name
            ),
        }
    }

    fn bind_alias(&self, function_name: &str, version: &str, alias_name: &str) -> AliasResult {
        self.state
            .lock()
            .unwrap()
            .aliases
            .insert(alias_name.to_owned(), version.to_owned());
        Self::alias_result(function_name, version, alias_name)
    }

    fn not_found(&self, function_name: &str) -> Option<DeployError> {
        match self.state.lock().unwrap().function {
            Some(ref name) if name == function_name => None,
            _ => Some(DeployError::ResourceNotFound(format!(
                "Function not found: {}",
                function_name
            ))),
        }
    }
}

#[async_trait]
impl FunctionClient for MockFunctionClient {
    async fn get_function_configuration(&self, function_name: &str) -> Result<()> {
        self.record(
            "get_function_configuration",
            Call::GetFunctionConfiguration(function_name.to_owned()),
        )?;
        match self.not_found(function_name) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn get_alias(&self, function_name: &str, alias_name: &str) -> Result<AliasResult> {
        self.record(
            "get_alias",
            Call::GetAlias(function_name.to_owned(), alias_name.to_owned()),
        )?;
        match self.alias(alias_name) {
            Some(version) => Ok(Self::alias_result(function_name, &version, alias_name)),
            None => Err(DeployError::ResourceNotFound(format!(
                "Alias not found: {}",
                alias_name
            ))),
        }
    }

    async fn create_alias(
        &self,
        function_name: &str,
        version: &str,
        alias_name: &str,
    ) -> Result<AliasResult> {
        self.record("create_alias", Call::CreateAlias {
            function_name: function_name.to_owned(),
            version:       version.to_owned(),
            alias_name:    alias_name.to_owned(),
        })?;
        Ok(self.bind_alias(function_name, version, alias_name))
    }

    async fn update_alias(
        &self,
        function_name: &str,
        version: &str,
        alias_name: &str,
    ) -> Result<AliasResult> {
        self.record("update_alias", Call::UpdateAlias {
            function_name: function_name.to_owned(),
            version:       version.to_owned(),
            alias_name:    alias_name.to_owned(),
        })?;
        Ok(self.bind_alias(function_name, version, alias_name))
    }

    async fn create_function(
        &self,
        definition: &FunctionDefinition,
        zip_file: Bytes,
    ) -> Result<String> {
        self.record("create_function", Call::CreateFunction {
            function_name: definition.function_name.clone(),
            zip_file,
        })?;
        self.state.lock().unwrap().function = Some(definition.function_name.clone());
        Ok(definition.function_name.clone())
    }

    async fn update_function_code(&self, function_name: &str, zip_file: Bytes) -> Result<()> {
        self.record("update_function_code", Call::UpdateFunctionCode {
            function_name: function_name.to_owned(),
            zip_file,
        })
    }

    async fn update_function_configuration(
        &self,
        definition: &FunctionDefinition,
    ) -> Result<String> {
        self.record(
            "update_function_configuration",
            Call::UpdateFunctionConfiguration(definition.function_name.clone()),
        )?;
        Ok(definition.function_name.clone())
    }

    async fn list_versions_by_function(&self, function_name: &str) -> Result<Vec<String>> {
        self.record(
            "list_versions_by_function",
            Call::ListVersionsByFunction(function_name.to_owned()),
        )?;
        if let Some(e) = self.not_found(function_name) {
            return Err(e);
        }
        let state = self.state.lock().unwrap();
        Ok(std::iter::once(LAMBDA_LATEST_VERSION.clone())
            .chain(state.versions.iter().cloned())
            .collect())
    }

    async fn publish_version(
        &self,
        function_name: &str,
        description: &str,
    ) -> Result<PublishedVersion> {
        self.record("publish_version", Call::PublishVersion {
            function_name: function_name.to_owned(),
            description:   description.to_owned(),
        })?;
        let mut state = self.state.lock().unwrap();
        let version = match state.publish.take() {
            Some(version) => version,
            None => (state.versions.len() + 1).to_string(),
        };
        if !state.versions.contains(&version) {
            state.versions.push(version.clone());
        }
        Ok(PublishedVersion {
            function_name: function_name.to_owned(),
            version,
        })
    }
}

/// A definition with everything a create needs.
pub(crate) fn definition(function_name: &str, alias_name: &str) -> FunctionDefinition {
    let mut def = FunctionDefinition::new(function_name, alias_name, "integration test");
    def.set_handler("bootstrap")
        .set_role("arn:aws:iam::123456789012:role/lambda-deploy")
        .set_runtime("provided.al2")
        .set_memory_size(128)
        .set_timeout(30)
        .set_code(crate::function::FunctionCode::from_bytes(Bytes::from_static(
            b"PK\x03\x04bootstrap",
        )));
    def
}
