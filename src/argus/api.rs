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

//! Argus API: monitoring instances and their plans

use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{
    wait::{Operation, WaitHandler},
    ApiClient, Result,
};

pub const CREATE_TIMEOUT: Duration = Duration::from_secs(20 * 60);
pub const UPDATE_TIMEOUT: Duration = Duration::from_secs(20 * 60);
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub plan_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlansResponse {
    #[serde(default)]
    pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstancePayload {
    pub name: Option<String>,
    pub plan_id: Option<String>,
    pub parameter: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceResponse {
    pub instance_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSensitiveData {
    pub grafana_url: Option<String>,
    pub grafana_public_read_access: Option<bool>,
    pub grafana_admin_password: Option<String>,
    pub grafana_admin_user: Option<String>,
    pub metrics_retention_time_raw: Option<i64>,
    pub metrics_retention_time_5m: Option<i64>,
    pub metrics_retention_time_1h: Option<i64>,
    pub metrics_url: Option<String>,
    pub push_metrics_url: Option<String>,
    pub targets_url: Option<String>,
    pub alerting_url: Option<String>,
    pub logs_url: Option<String>,
    pub logs_push_url: Option<String>,
    pub jaeger_traces_url: Option<String>,
    pub jaeger_ui_url: Option<String>,
    pub otlp_traces_url: Option<String>,
    pub zipkin_spans_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceResponse {
    pub id: Option<String>,
    pub name: Option<String>,
    pub plan_name: Option<String>,
    pub plan_id: Option<String>,
    pub parameters: Option<BTreeMap<String, String>>,
    pub dashboard_url: Option<String>,
    pub is_updatable: Option<bool>,
    pub status: Option<String>,
    pub error: Option<String>,
    pub instance: Option<InstanceSensitiveData>,
}

#[derive(Debug, Clone)]
pub struct ArgusApi {
    client: ApiClient,
}

impl ArgusApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_plans(&self, project_id: &str) -> Result<PlansResponse> {
        self.client
            .get(&["v1", "projects", project_id, "plans"])
            .await
    }

    pub async fn create_instance(
        &self,
        project_id: &str,
        payload: &InstancePayload,
    ) -> Result<CreateInstanceResponse> {
        self.client
            .post(&["v1", "projects", project_id, "instances"], payload)
            .await
    }

    pub async fn get_instance(&self, project_id: &str, instance_id: &str) -> Result<InstanceResponse> {
        self.client
            .get(&["v1", "projects", project_id, "instances", instance_id])
            .await
    }

    pub async fn update_instance(
        &self,
        project_id: &str,
        instance_id: &str,
        payload: &InstancePayload,
    ) -> Result<()> {
        self.client
            .put::<_, serde_json::Value>(
                &["v1", "projects", project_id, "instances", instance_id],
                payload,
            )
            .await
            .map(|_| ())
    }

    pub async fn delete_instance(&self, project_id: &str, instance_id: &str) -> Result<()> {
        self.client
            .delete(&["v1", "projects", project_id, "instances", instance_id])
            .await
    }

    /// Wait until the instance reaches the terminal status of `operation`
    ///
    /// An instance that disappeared while waiting for its deletion counts as deleted.
    pub async fn wait_instance(
        &self,
        project_id: &str,
        instance_id: &str,
        operation: Operation,
    ) -> Result<InstanceResponse> {
        let timeout = match operation {
            Operation::Create => CREATE_TIMEOUT,
            Operation::Update => UPDATE_TIMEOUT,
            Operation::Delete => DELETE_TIMEOUT,
        };
        WaitHandler::new(move || async move {
            let instance = match self.get_instance(project_id, instance_id).await {
                Ok(instance) => instance,
                Err(err) if operation == Operation::Delete && err.is_not_found() => {
                    return Ok(Some(InstanceResponse::default()))
                }
                Err(err) => return Err(err),
            };
            let status = instance.status.as_deref();
            debug!(project_id, instance_id, ?status, %operation, "waiting for Argus instance");
            let done = operation.check_status(status, instance.error.as_deref())?;
            Ok(done.then_some(instance))
        })
        .set_timeout(timeout)
        .wait()
        .await
    }
}

/// Find the identifier of the plan named `plan_name`, ignoring case
///
/// The error lists the names of the available plans.
pub fn find_plan_id(plans: &[Plan], plan_name: &str) -> std::result::Result<String, String> {
    let mut available = String::new();
    for plan in plans {
        let Some(name) = plan.name.as_deref() else {
            continue;
        };
        if name.eq_ignore_ascii_case(plan_name) {
            if let Some(plan_id) = &plan.plan_id {
                return Ok(plan_id.clone());
            }
        }
        available.push_str("\n- ");
        available.push_str(name);
    }
    Err(format!(
        "Couldn't find plan_name '{plan_name}', available names are:{available}"
    ))
}
