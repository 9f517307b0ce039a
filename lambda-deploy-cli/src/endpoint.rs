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

//! Reads the authorization of a service endpoint handed to the task by the
//! pipeline host.

use lambda_deploy::error::{DeployError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

/// The authorization of a service endpoint. For AWS endpoints the access key
/// ID is the `username` parameter and the secret is the `password`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointAuthorization {
    #[serde(default)]
    pub scheme:     Option<String>,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl EndpointAuthorization {
    /// Looks up a parameter, ignoring the case of its name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the access key ID and secret access key.
    pub fn credentials(&self, endpoint: &str) -> Result<(String, String)> {
        match (self.parameter("username"), self.parameter("password")) {
            (Some(key), Some(secret)) => Ok((key.to_owned(), secret.to_owned())),
            _ => Err(DeployError::Input(format!(
                "the service endpoint {} has no username/password authorization",
                endpoint
            ))),
        }
    }
}

/// Reads the authorization of `endpoint` from the process environment.
pub fn endpoint_authorization(endpoint: &str) -> Result<EndpointAuthorization> {
    authorization_from(endpoint, |name| env::var(name).ok())
}

/// Reads the authorization of `endpoint` through `lookup`.
///
/// The host exposes it as JSON in `ENDPOINT_AUTH_<ID>`. Some hosts pass each
/// parameter on its own as `ENDPOINT_AUTH_PARAMETER_<ID>_<NAME>` instead;
/// those are used when the JSON variable is absent. Only the parameter name
/// is uppercased; the endpoint ID is used as given.
fn authorization_from<F>(endpoint: &str, lookup: F) -> Result<EndpointAuthorization>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(json) = lookup(&format!("ENDPOINT_AUTH_{}", endpoint)) {
        return Ok(serde_json::from_str(&json)?);
    }

    let mut auth = EndpointAuthorization::default();
    for name in ["username", "password"] {
        let var = format!("ENDPOINT_AUTH_PARAMETER_{}_{}", endpoint, name.to_uppercase());
        if let Some(value) = lookup(&var) {
            auth.parameters.insert(name.to_owned(), value);
        }
    }
    if auth.parameters.is_empty() {
        return Err(DeployError::Input(format!(
            "no authorization was found for the service endpoint {}",
            endpoint
        )));
    }
    auth.scheme = lookup(&format!("ENDPOINT_AUTH_SCHEME_{}", endpoint));
    Ok(auth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn json_authorization() -> Result<()> {
        let lookup = environment(&[(
            "ENDPOINT_AUTH_json-endpoint",
            r#"{"parameters":{"username":"AKID","password":"SECRET"},"scheme":"UsernamePassword"}"#,
        )]);
        let auth = authorization_from("json-endpoint", lookup)?;
        assert_eq!(auth.scheme.as_deref(), Some("UsernamePassword"));
        assert_eq!(auth.credentials("json-endpoint")?, (
            "AKID".to_owned(),
            "SECRET".to_owned()
        ));
        Ok(())
    }

    #[test]
    fn parameter_authorization() -> Result<()> {
        let lookup = environment(&[
            ("ENDPOINT_AUTH_PARAMETER_param-endpoint_USERNAME", "AKID"),
            ("ENDPOINT_AUTH_PARAMETER_param-endpoint_PASSWORD", "SECRET"),
            ("ENDPOINT_AUTH_SCHEME_param-endpoint", "UsernamePassword"),
        ]);
        let auth = authorization_from("param-endpoint", lookup)?;
        assert_eq!(auth.parameter("UserName"), Some("AKID"));
        assert_eq!(auth.credentials("param-endpoint")?.1, "SECRET");
        assert_eq!(auth.scheme.as_deref(), Some("UsernamePassword"));
        Ok(())
    }

    #[test]
    fn endpoint_id_is_not_uppercased() {
        let lookup = environment(&[
            ("ENDPOINT_AUTH_PARAMETER_PARAM-ENDPOINT_USERNAME", "AKID"),
            ("ENDPOINT_AUTH_PARAMETER_PARAM-ENDPOINT_PASSWORD", "SECRET"),
        ]);
        assert!(matches!(
            authorization_from("param-endpoint", lookup),
            Err(DeployError::Input(_))
        ));
    }

    #[test]
    fn missing_authorization() {
        assert!(matches!(
            authorization_from("missing-endpoint", environment(&[])),
            Err(DeployError::Input(_))
        ));

        let auth = EndpointAuthorization::default();
        assert!(auth.credentials("empty").is_err());
    }
}
