// This file is part of the terraform-provider-stackit project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provider configuration
//!
//! Settings come from the provider block, with environment variables and the STACKIT
//! credentials file as fallbacks.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::common::ProviderData;

pub const TOKEN_ENV: &str = "STACKIT_SERVICE_ACCOUNT_TOKEN";
pub const CREDENTIALS_PATH_ENV: &str = "STACKIT_CREDENTIALS_PATH";
pub const DEFAULT_REGION: &str = "eu01";
pub const DEFAULT_DNS_ENDPOINT: &str = "https://dns.api.stackit.cloud";

/// Settings from the provider block, null attributes being `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub service_account_token: Option<String>,
    pub credentials_path: Option<String>,
    pub region: Option<String>,
    pub dns_custom_endpoint: Option<String>,
    pub argus_custom_endpoint: Option<String>,
    pub postgresql_custom_endpoint: Option<String>,
    pub rabbitmq_custom_endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    #[serde(rename = "STACKIT_SERVICE_ACCOUNT_TOKEN")]
    service_account_token: Option<String>,
}

/// Default endpoint of a regional service
pub fn regional_endpoint(service: &str, region: &str) -> String {
    format!("https://{service}.api.{region}.stackit.cloud")
}

impl Settings {
    /// Build the provider data, looking up the environment with `env`
    pub async fn resolve<E>(&self, env: E) -> Result<ProviderData>
    where
        E: Fn(&str) -> Option<String>,
    {
        let token = self.token(&env).await?;
        let region = non_empty(self.region.clone()).unwrap_or_else(|| DEFAULT_REGION.to_owned());

        let endpoint = |custom: &Option<String>, service: &str| {
            non_empty(custom.clone()).unwrap_or_else(|| regional_endpoint(service, &region))
        };
        let argus_endpoint = endpoint(&self.argus_custom_endpoint, "argus");
        let postgresql_endpoint = endpoint(&self.postgresql_custom_endpoint, "postgresql");
        let rabbitmq_endpoint = endpoint(&self.rabbitmq_custom_endpoint, "rabbitmq");
        let dns_endpoint = non_empty(self.dns_custom_endpoint.clone())
            .unwrap_or_else(|| DEFAULT_DNS_ENDPOINT.to_owned());

        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .context("Could not build the HTTP client")?;

        debug!(%region, %dns_endpoint, %argus_endpoint, %postgresql_endpoint, %rabbitmq_endpoint, "provider configured");

        Ok(ProviderData {
            token,
            region,
            dns_endpoint,
            argus_endpoint,
            postgresql_endpoint,
            rabbitmq_endpoint,
            http,
        })
    }

    async fn token<E>(&self, env: &E) -> Result<String>
    where
        E: Fn(&str) -> Option<String>,
    {
        if let Some(token) = non_empty(self.service_account_token.clone()) {
            return Ok(token);
        }
        if let Some(token) = non_empty(env(TOKEN_ENV)) {
            return Ok(token);
        }

        let path = match non_empty(self.credentials_path.clone())
            .or_else(|| non_empty(env(CREDENTIALS_PATH_ENV)))
        {
            Some(path) => PathBuf::from(path),
            None => match non_empty(env("HOME")) {
                Some(home) => PathBuf::from(home).join(".stackit").join("credentials.json"),
                None => return Err(missing_token()),
            },
        };

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(missing_token())
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Could not read credentials file {}", path.display()))
            }
        };
        let credentials: CredentialsFile = serde_json::from_str(&content)
            .with_context(|| format!("Could not parse credentials file {}", path.display()))?;
        non_empty(credentials.service_account_token).ok_or_else(|| {
            anyhow!(
                "Credentials file {} does not define {TOKEN_ENV}",
                path.display()
            )
        })
    }
}

fn missing_token() -> anyhow::Error {
    anyhow!(
        "No service account token: set `service_account_token` in the provider block, \
         the {TOKEN_ENV} environment variable, or a credentials file"
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
