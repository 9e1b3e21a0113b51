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

//! DNS API: zones and record sets

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{
    wait::{Operation, WaitHandler},
    ApiClient, Result,
};

pub const RECORD_SET_TIMEOUT: Duration = Duration::from_secs(60);
pub const ZONE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub ttl: Option<i64>,
    pub records: Option<Vec<Record>>,
    pub active: Option<bool>,
    pub comment: Option<String>,
    pub error: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordSetResponse {
    pub rrset: Option<RecordSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordSetPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub name: Option<String>,
    pub records: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordSetPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: Option<String>,
    pub name: Option<String>,
    pub dns_name: Option<String>,
    pub description: Option<String>,
    pub acl: Option<String>,
    pub active: Option<bool>,
    pub contact_email: Option<String>,
    #[serde(rename = "defaultTTL")]
    pub default_ttl: Option<i64>,
    pub expire_time: Option<i64>,
    pub is_reverse_zone: Option<bool>,
    pub negative_cache: Option<i64>,
    pub primaries: Option<Vec<String>>,
    pub primary_name_server: Option<String>,
    pub record_count: Option<i64>,
    pub refresh_time: Option<i64>,
    pub retry_time: Option<i64>,
    pub serial_number: Option<i64>,
    #[serde(rename = "type")]
    pub zone_type: Option<String>,
    pub visibility: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ZoneResponse {
    pub zone: Option<Zone>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateZonePayload {
    pub name: Option<String>,
    pub dns_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(rename = "defaultTTL", skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_reverse_zone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_cache: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primaries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_time: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateZonePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(rename = "defaultTTL", skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_cache: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primaries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_time: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct DnsApi {
    client: ApiClient,
}

impl DnsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_zone(
        &self,
        project_id: &str,
        payload: &CreateZonePayload,
    ) -> Result<ZoneResponse> {
        self.client
            .post(&["v1", "projects", project_id, "zones"], payload)
            .await
    }

    pub async fn get_zone(&self, project_id: &str, zone_id: &str) -> Result<ZoneResponse> {
        self.client
            .get(&["v1", "projects", project_id, "zones", zone_id])
            .await
    }

    pub async fn partial_update_zone(
        &self,
        project_id: &str,
        zone_id: &str,
        payload: &UpdateZonePayload,
    ) -> Result<()> {
        self.client
            .patch::<_, serde_json::Value>(&["v1", "projects", project_id, "zones", zone_id], payload)
            .await
            .map(|_| ())
    }

    pub async fn delete_zone(&self, project_id: &str, zone_id: &str) -> Result<()> {
        self.client
            .delete(&["v1", "projects", project_id, "zones", zone_id])
            .await
    }

    pub async fn create_record_set(
        &self,
        project_id: &str,
        zone_id: &str,
        payload: &CreateRecordSetPayload,
    ) -> Result<RecordSetResponse> {
        self.client
            .post(
                &["v1", "projects", project_id, "zones", zone_id, "rrsets"],
                payload,
            )
            .await
    }

    pub async fn get_record_set(
        &self,
        project_id: &str,
        zone_id: &str,
        record_set_id: &str,
    ) -> Result<RecordSetResponse> {
        self.client
            .get(&[
                "v1",
                "projects",
                project_id,
                "zones",
                zone_id,
                "rrsets",
                record_set_id,
            ])
            .await
    }

    pub async fn partial_update_record_set(
        &self,
        project_id: &str,
        zone_id: &str,
        record_set_id: &str,
        payload: &UpdateRecordSetPayload,
    ) -> Result<()> {
        self.client
            .patch::<_, serde_json::Value>(
                &[
                    "v1",
                    "projects",
                    project_id,
                    "zones",
                    zone_id,
                    "rrsets",
                    record_set_id,
                ],
                payload,
            )
            .await
            .map(|_| ())
    }

    pub async fn delete_record_set(
        &self,
        project_id: &str,
        zone_id: &str,
        record_set_id: &str,
    ) -> Result<()> {
        self.client
            .delete(&[
                "v1",
                "projects",
                project_id,
                "zones",
                zone_id,
                "rrsets",
                record_set_id,
            ])
            .await
    }

    /// Wait until the zone reaches the terminal state of `operation`
    ///
    /// A zone that disappeared while waiting for its deletion counts as deleted.
    pub async fn wait_zone(
        &self,
        project_id: &str,
        zone_id: &str,
        operation: Operation,
    ) -> Result<ZoneResponse> {
        WaitHandler::new(move || async move {
            let response = match self.get_zone(project_id, zone_id).await {
                Ok(response) => response,
                Err(err) if operation == Operation::Delete && err.is_not_found() => {
                    return Ok(Some(ZoneResponse::default()))
                }
                Err(err) => return Err(err),
            };
            let zone = response.zone.as_ref();
            let state = zone.and_then(|zone| zone.state.as_deref());
            debug!(project_id, zone_id, ?state, %operation, "waiting for zone");
            let done = operation.check_status(state, zone.and_then(|zone| zone.error.as_deref()))?;
            Ok(done.then_some(response))
        })
        .set_timeout(ZONE_TIMEOUT)
        .wait()
        .await
    }

    /// Wait until the record set reaches the terminal state of `operation`
    pub async fn wait_record_set(
        &self,
        project_id: &str,
        zone_id: &str,
        record_set_id: &str,
        operation: Operation,
    ) -> Result<RecordSetResponse> {
        WaitHandler::new(move || async move {
            let response = match self
                .get_record_set(project_id, zone_id, record_set_id)
                .await
            {
                Ok(response) => response,
                Err(err) if operation == Operation::Delete && err.is_not_found() => {
                    return Ok(Some(RecordSetResponse::default()))
                }
                Err(err) => return Err(err),
            };
            let rrset = response.rrset.as_ref();
            let state = rrset.and_then(|rrset| rrset.state.as_deref());
            debug!(project_id, zone_id, record_set_id, ?state, %operation, "waiting for record set");
            let done =
                operation.check_status(state, rrset.and_then(|rrset| rrset.error.as_deref()))?;
            Ok(done.then_some(response))
        })
        .set_timeout(RECORD_SET_TIMEOUT)
        .wait()
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_set_payload() {
        let payload = CreateRecordSetPayload {
            comment: None,
            name: Some("www".to_owned()),
            records: Some(vec![Record {
                content: Some("1.2.3.4".to_owned()),
                id: None,
            }]),
            ttl: Some(3600),
            record_type: Some("A".to_owned()),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "name": "www",
                "records": [{"content": "1.2.3.4"}],
                "ttl": 3600,
                "type": "A",
            })
        );
    }

    #[test]
    fn zone_payload_names() {
        let payload = CreateZonePayload {
            name: Some("example".to_owned()),
            dns_name: Some("example.runs.onstackit.cloud".to_owned()),
            default_ttl: Some(3600),
            is_reverse_zone: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "name": "example",
                "dnsName": "example.runs.onstackit.cloud",
                "defaultTTL": 3600,
                "isReverseZone": false,
            })
        );
    }

    #[test]
    fn zone_response() {
        let response: ZoneResponse = serde_json::from_value(serde_json::json!({
            "zone": {
                "id": "zid",
                "dnsName": "example.com",
                "defaultTTL": 1000,
                "primaryNameServer": "ns1.example.com",
                "type": "primary",
                "state": "CREATE_SUCCEEDED",
                "unknownField": true,
            }
        }))
        .unwrap();
        let zone = response.zone.unwrap();
        assert_eq!(zone.id.as_deref(), Some("zid"));
        assert_eq!(zone.default_ttl, Some(1000));
        assert_eq!(zone.zone_type.as_deref(), Some("primary"));
        assert_eq!(zone.primary_name_server.as_deref(), Some("ns1.example.com"));
    }
}
