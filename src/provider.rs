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

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::{
    map,
    schema::{AttributeConstraint::*, Block, Description, Schema},
    value::{ValueEmpty, ValueString},
    AttributePath, Diagnostics, DynamicDataSource, DynamicResource, Provider,
};
use tracing::info;

use crate::argus;
use crate::attributes::{sensitive, string};
use crate::common::{log_and_add_error, ProviderHandle};
use crate::config::Settings;
use crate::dns;
use crate::dsa::{CredentialsDataSource, CredentialsResource, InstanceDataSource, InstanceResource};
use crate::postgresql::PostgreSql;
use crate::rabbitmq::RabbitMq;
use crate::utils::known_str;
use crate::validate;

const ENDPOINTS: [&str; 4] = [
    "dns_custom_endpoint",
    "argus_custom_endpoint",
    "postgresql_custom_endpoint",
    "rabbitmq_custom_endpoint",
];

/// Attributes of the provider block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderConfig<'a> {
    #[serde(borrow = "'a")]
    pub service_account_token: ValueString<'a>,
    pub credentials_path: ValueString<'a>,
    pub region: ValueString<'a>,
    pub dns_custom_endpoint: ValueString<'a>,
    pub argus_custom_endpoint: ValueString<'a>,
    pub postgresql_custom_endpoint: ValueString<'a>,
    pub rabbitmq_custom_endpoint: ValueString<'a>,
}

impl ProviderConfig<'_> {
    fn endpoints(&self) -> [&ValueString<'_>; 4] {
        [
            &self.dns_custom_endpoint,
            &self.argus_custom_endpoint,
            &self.postgresql_custom_endpoint,
            &self.rabbitmq_custom_endpoint,
        ]
    }

    pub fn settings(&self) -> Settings {
        let get = |value: &ValueString<'_>| known_str(value).map(str::to_owned);
        Settings {
            service_account_token: get(&self.service_account_token),
            credentials_path: get(&self.credentials_path),
            region: get(&self.region),
            dns_custom_endpoint: get(&self.dns_custom_endpoint),
            argus_custom_endpoint: get(&self.argus_custom_endpoint),
            postgresql_custom_endpoint: get(&self.postgresql_custom_endpoint),
            rabbitmq_custom_endpoint: get(&self.rabbitmq_custom_endpoint),
        }
    }
}

/// STACKIT provider
///
/// The handle is shared with every resource and data source, and filled by `configure`.
#[derive(Debug, Default, Clone)]
pub struct StackitProvider {
    data: ProviderHandle,
}

impl StackitProvider {
    pub fn new(data: ProviderHandle) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Provider for StackitProvider {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes: map! {
                    "service_account_token" => sensitive(string(Optional, "Service account token used for authentication. If set, it takes precedence over the credentials file.")),
                    "credentials_path" => string(Optional, "Path of JSON from where the credentials are read. Takes precedence over the env var `STACKIT_CREDENTIALS_PATH`. Default value is `~/.stackit/credentials.json`."),
                    "region" => string(Optional, "Region will be used as the default location for regional services. Defaults to `eu01`."),
                    "dns_custom_endpoint" => string(Optional, "Custom endpoint for the DNS service."),
                    "argus_custom_endpoint" => string(Optional, "Custom endpoint for the Argus service."),
                    "postgresql_custom_endpoint" => string(Optional, "Custom endpoint for the PostgreSQL service."),
                    "rabbitmq_custom_endpoint" => string(Optional, "Custom endpoint for the RabbitMQ service."),
                },
                description: Description::plain("STACKIT provider"),
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        for (name, value) in ENDPOINTS.into_iter().zip(config.endpoints()) {
            validate::url(diags, AttributePath::new(name), value);
        }
        validate::no_separator(diags, AttributePath::new("region"), &config.region);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let data = match config.settings().resolve(|name| std::env::var(name).ok()).await {
            Ok(data) => data,
            Err(err) => {
                log_and_add_error(diags, "Error configuring provider", format!("{err:#}"));
                return None;
            }
        };
        info!(%terraform_version, region = %data.region, "STACKIT provider configured");
        self.data.set(data).await;

        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
        let data = &self.data;
        Some(map! {
            "dns_zone" => dns::ZoneResource::new(data.clone()),
            "dns_record_set" => dns::RecordSetResource::new(data.clone()),
            "argus_instance" => argus::InstanceResource::new(data.clone()),
            "postgresql_instance" => InstanceResource::<PostgreSql>::new(data.clone()),
            "postgresql_credentials" => CredentialsResource::<PostgreSql>::new(data.clone()),
            "rabbitmq_instance" => InstanceResource::<RabbitMq>::new(data.clone()),
            "rabbitmq_credentials" => CredentialsResource::<RabbitMq>::new(data.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
        let data = &self.data;
        Some(map! {
            "dns_zone" => dns::ZoneDataSource::new(data.clone()),
            "dns_record_set" => dns::RecordSetDataSource::new(data.clone()),
            "argus_instance" => argus::InstanceDataSource::new(data.clone()),
            "postgresql_instance" => InstanceDataSource::<PostgreSql>::new(data.clone()),
            "postgresql_credentials" => CredentialsDataSource::<PostgreSql>::new(data.clone()),
            "rabbitmq_instance" => InstanceDataSource::<RabbitMq>::new(data.clone()),
            "rabbitmq_credentials" => CredentialsDataSource::<RabbitMq>::new(data.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_from_config() {
        let config = ProviderConfig {
            service_account_token: "token".into(),
            region: "eu02".into(),
            dns_custom_endpoint: ValueString::Unknown,
            ..Default::default()
        };
        assert_eq!(
            config.settings(),
            Settings {
                service_account_token: Some("token".to_owned()),
                region: Some("eu02".to_owned()),
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn invalid_endpoint() {
        let mut diags = Diagnostics::default();
        let config = ProviderConfig {
            argus_custom_endpoint: "not an url".into(),
            ..Default::default()
        };
        assert!(StackitProvider::default()
            .validate(&mut diags, config)
            .await
            .is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[test]
    fn every_service_is_exposed() {
        let mut diags = Diagnostics::default();
        let provider = StackitProvider::default();
        let resources = provider.get_resources(&mut diags).unwrap();
        let data_sources = provider.get_data_sources(&mut diags).unwrap();
        for name in [
            "dns_zone",
            "dns_record_set",
            "argus_instance",
            "postgresql_instance",
            "postgresql_credentials",
            "rabbitmq_instance",
            "rabbitmq_credentials",
        ] {
            assert!(resources.contains_key(name), "missing resource {name}");
            assert!(data_sources.contains_key(name), "missing data source {name}");
        }
    }

    #[tokio::test]
    async fn resources_wait_for_configuration() {
        let provider = StackitProvider::default();
        let mut diags = Diagnostics::default();
        assert!(provider.data.get(&mut diags).await.is_none());

        let config = ProviderConfig {
            service_account_token: "token".into(),
            ..Default::default()
        };
        provider
            .configure(&mut diags, "1.6.0".to_owned(), config)
            .await
            .unwrap();
        let data = provider.data.get(&mut diags).await.unwrap();
        assert_eq!(data.token, "token");
        assert_eq!(data.region, "eu01");
        assert_eq!(diags.errors.len(), 1);
    }
}
