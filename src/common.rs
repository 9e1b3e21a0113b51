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

//! State shared between the provider and its resources

use std::sync::Arc;

use tf_provider::Diagnostics;
use tokio::sync::RwLock;
use tracing::error;

use crate::client::{self, ApiClient};

/// Separator of the parts of composite identifiers
pub const SEPARATOR: &str = ",";

/// Everything resources need to talk to STACKIT, built once at configure time
#[derive(Debug, Clone)]
pub struct ProviderData {
    pub token: String,
    pub region: String,
    pub dns_endpoint: String,
    pub argus_endpoint: String,
    pub postgresql_endpoint: String,
    pub rabbitmq_endpoint: String,
    pub http: reqwest::Client,
}

impl ProviderData {
    /// Client for the service reachable at `endpoint`
    pub fn client(&self, endpoint: &str) -> client::Result<ApiClient> {
        ApiClient::new(self.http.clone(), endpoint, &self.token)
    }
}

/// Handle on the provider data
///
/// Resources are instantiated before the provider is configured: they all keep a handle
/// that `configure` fills afterwards.
#[derive(Debug, Clone, Default)]
pub struct ProviderHandle {
    data: Arc<RwLock<Option<Arc<ProviderData>>>>,
}

impl ProviderHandle {
    /// Handle already holding `data`
    pub fn configured(data: ProviderData) -> Self {
        Self {
            data: Arc::new(RwLock::new(Some(Arc::new(data)))),
        }
    }

    pub async fn set(&self, data: ProviderData) {
        *self.data.write().await = Some(Arc::new(data));
    }

    /// Get the provider data, reporting an error if the provider is not configured yet
    pub async fn get(&self, diags: &mut Diagnostics) -> Option<Arc<ProviderData>> {
        let data = self.data.read().await.clone();
        if data.is_none() {
            log_and_add_error(
                diags,
                "Provider not configured",
                "The provider has not been configured yet. This is a bug in the provider, please report it.",
            );
        }
        data
    }

    /// Client for one of the services, selected from the provider data
    pub async fn client<F>(&self, diags: &mut Diagnostics, endpoint: F) -> Option<ApiClient>
    where
        F: FnOnce(&ProviderData) -> &str,
    {
        let data = self.get(diags).await?;
        data.client(endpoint(&data))
            .map_err(|err| log_and_add_error(diags, "Error configuring API client", err))
            .ok()
    }
}

/// Log an error and report it to Terraform
pub fn log_and_add_error<S, D>(diags: &mut Diagnostics, summary: S, detail: D)
where
    S: Into<String>,
    D: std::fmt::Display,
{
    let summary = summary.into();
    let detail = detail.to_string();
    error!(%summary, %detail);
    diags.root_error(summary, detail);
}

/// Join the parts of a composite identifier
pub fn build_id(parts: &[&str]) -> String {
    parts.join(SEPARATOR)
}

/// Split an import identifier into the parts named by `names`
///
/// Every part must be present and non-empty.
pub fn parse_import_id(diags: &mut Diagnostics, id: &str, names: &[&str]) -> Option<Vec<String>> {
    let parts: Vec<&str> = id.split(SEPARATOR).collect();
    if parts.len() != names.len() || parts.iter().any(|part| part.is_empty()) {
        let format = names
            .iter()
            .map(|name| format!("[{name}]"))
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        log_and_add_error(
            diags,
            "Unexpected Import Identifier",
            format!("Expected import identifier with format: {format}. Got: {id:?}"),
        );
        return None;
    }
    Some(parts.into_iter().map(str::to_owned).collect())
}
