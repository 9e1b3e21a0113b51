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

mod common;

use httpmock::prelude::*;
use serde_json::json;
use terraform_provider_stackit::argus::{instance::InstanceState, InstanceDataSource, InstanceResource};
use tf_provider::{
    value::{Value, ValueString},
    DataSource, Diagnostics, Resource,
};

use common::{bearer, provider, PROJECT_ID};

const INSTANCE_ID: &str = "33333333-4444-5555-6666-777777777777";
const PLAN_ID: &str = "plan-basic";

fn instance_path() -> String {
    format!("/v1/projects/{PROJECT_ID}/instances/{INSTANCE_ID}")
}

fn plans() -> serde_json::Value {
    json!({
        "plans": [
            {"planId": "plan-starter", "name": "Monitoring-Starter-EU01"},
            {"planId": PLAN_ID, "name": "Monitoring-Basic-EU01"},
        ]
    })
}

fn instance(status: &str) -> serde_json::Value {
    json!({
        "id": INSTANCE_ID,
        "name": "monitoring",
        "planName": "Monitoring-Basic-EU01",
        "planId": PLAN_ID,
        "parameters": {"key": "value"},
        "dashboardUrl": "https://dashboard",
        "isUpdatable": true,
        "status": status,
        "instance": {
            "grafanaUrl": "https://grafana",
            "grafanaPublicReadAccess": false,
            "grafanaAdminUser": "admin",
            "grafanaAdminPassword": "secret",
            "metricsRetentionTimeRaw": 90,
            "metricsRetentionTime5m": 90,
            "metricsRetentionTime1h": 90,
            "metricsUrl": "https://metrics",
            "pushMetricsUrl": "https://push",
        },
    })
}

async fn planned<'a>(server: &MockServer, plan_name: &'a str) -> InstanceState<'a> {
    let config = InstanceState {
        project_id: PROJECT_ID.into(),
        name: "monitoring".into(),
        plan_name: plan_name.into(),
        ..Default::default()
    };
    let mut diags = Diagnostics::default();
    let (planned, _) = InstanceResource::new(provider(server))
        .plan_create(&mut diags, config.clone(), config, Default::default())
        .await
        .unwrap();
    planned
}

#[tokio::test]
async fn instance_create() {
    let server = MockServer::start_async().await;
    let list_plans = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v1/projects/{PROJECT_ID}/plans"))
                .header("Authorization", bearer());
            then.status(200).json_body(plans());
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v1/projects/{PROJECT_ID}/instances"))
                .json_body(json!({"name": "monitoring", "planId": PLAN_ID, "parameter": {}}));
            then.status(202).json_body(json!({"instanceId": INSTANCE_ID}));
        })
        .await;
    let get = server
        .mock_async(|when, then| {
            when.method(GET).path(instance_path());
            then.status(200).json_body(instance("CREATE_SUCCEEDED"));
        })
        .await;

    // Plan names are matched ignoring case
    let planned = planned(&server, "monitoring-basic-eu01").await;
    assert!(planned.grafana_url.is_unknown());
    assert!(planned.parameters.is_unknown());

    let mut diags = Diagnostics::default();
    let (state, _) = InstanceResource::new(provider(&server))
        .create(
            &mut diags,
            planned.clone(),
            planned,
            Default::default(),
            Default::default(),
        )
        .await
        .unwrap();

    list_plans.assert_async().await;
    create.assert_async().await;
    get.assert_async().await;
    assert!(diags.errors.is_empty());
    assert_eq!(state.id, ValueString::from(format!("{PROJECT_ID},{INSTANCE_ID}")));
    assert_eq!(state.plan_name, ValueString::from("monitoring-basic-eu01"));
    assert_eq!(state.plan_id, ValueString::from(PLAN_ID));
    assert_eq!(state.grafana_initial_admin_password, ValueString::from("secret"));
    assert_eq!(state.metrics_retention_days, Value::Value(90));
    assert_eq!(state.metrics_push_url, ValueString::from("https://push"));
}

#[tokio::test]
async fn instance_create_unknown_plan() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v1/projects/{PROJECT_ID}/plans"));
            then.status(200).json_body(plans());
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path(format!("/v1/projects/{PROJECT_ID}/instances"));
            then.status(202).json_body(json!({"instanceId": INSTANCE_ID}));
        })
        .await;

    let planned = planned(&server, "Monitoring-Premium-EU01").await;
    let mut diags = Diagnostics::default();
    let result = InstanceResource::new(provider(&server))
        .create(
            &mut diags,
            planned.clone(),
            planned,
            Default::default(),
            Default::default(),
        )
        .await;

    assert!(result.is_none());
    create.assert_hits_async(0).await;
    assert_eq!(diags.errors[0].summary, "Invalid plan_name");
    assert!(diags.errors[0]
        .detail
        .contains("- Monitoring-Starter-EU01\n- Monitoring-Basic-EU01"));
}

#[tokio::test]
async fn instance_update() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v1/projects/{PROJECT_ID}/plans"));
            then.status(200).json_body(plans());
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT).path(instance_path()).json_body(json!({
                "name": "monitoring",
                "planId": PLAN_ID,
                "parameter": {"key": "value"},
            }));
            then.status(202).json_body(json!({}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(instance_path());
            then.status(200).json_body(instance("UPDATE_SUCCEEDED"));
        })
        .await;

    let prior = InstanceState {
        id: format!("{PROJECT_ID},{INSTANCE_ID}").into(),
        project_id: PROJECT_ID.into(),
        instance_id: INSTANCE_ID.into(),
        name: "monitoring".into(),
        plan_name: "Monitoring-Starter-EU01".into(),
        plan_id: "plan-starter".into(),
        ..Default::default()
    };
    let proposed = InstanceState {
        plan_name: "Monitoring-Basic-EU01".into(),
        parameters: Value::Value([("key".into(), "value".into())].into_iter().collect()),
        ..prior.clone()
    };

    let resource = InstanceResource::new(provider(&server));
    let mut diags = Diagnostics::default();
    let (planned, _, replace) = resource
        .plan_update(
            &mut diags,
            prior.clone(),
            proposed.clone(),
            proposed,
            Default::default(),
            Default::default(),
        )
        .await
        .unwrap();
    assert!(replace.is_empty());
    assert!(planned.plan_id.is_unknown());
    assert!(planned.dashboard_url.is_unknown());

    let (state, _) = resource
        .update(
            &mut diags,
            prior,
            planned.clone(),
            planned,
            Default::default(),
            Default::default(),
        )
        .await
        .unwrap();

    put.assert_async().await;
    assert!(diags.errors.is_empty());
    assert_eq!(state.plan_id, ValueString::from(PLAN_ID));
    assert_eq!(state.dashboard_url, ValueString::from("https://dashboard"));
}

#[tokio::test]
async fn instance_delete() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path(instance_path());
            then.status(202);
        })
        .await;
    let get = server
        .mock_async(|when, then| {
            when.method(GET).path(instance_path());
            then.status(200)
                .json_body(json!({"id": INSTANCE_ID, "status": "DELETE_SUCCEEDED"}));
        })
        .await;

    let prior = InstanceState {
        project_id: PROJECT_ID.into(),
        instance_id: INSTANCE_ID.into(),
        ..Default::default()
    };
    let mut diags = Diagnostics::default();
    InstanceResource::new(provider(&server))
        .destroy(&mut diags, prior, Default::default(), Default::default())
        .await
        .unwrap();

    delete.assert_async().await;
    get.assert_async().await;
}

#[tokio::test]
async fn instance_data_source() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(instance_path());
            then.status(200).json_body(instance("CREATE_SUCCEEDED"));
        })
        .await;

    let lookup = InstanceState {
        project_id: PROJECT_ID.into(),
        instance_id: INSTANCE_ID.into(),
        ..Default::default()
    };
    let data_source = InstanceDataSource::new(provider(&server));
    let mut diags = Diagnostics::default();
    assert!(data_source
        .validate(&mut diags, lookup.clone())
        .await
        .is_some());
    let state = data_source
        .read(&mut diags, lookup, Default::default())
        .await
        .unwrap();

    assert_eq!(state.name, ValueString::from("monitoring"));
    assert_eq!(state.plan_name, ValueString::from("Monitoring-Basic-EU01"));
    assert_eq!(state.is_updatable, Value::Value(true));
}

#[tokio::test]
async fn instance_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(instance_path());
            then.status(404).json_body(json!({"message": "instance not found"}));
        })
        .await;

    let state = InstanceState {
        project_id: PROJECT_ID.into(),
        instance_id: INSTANCE_ID.into(),
        ..Default::default()
    };
    let mut diags = Diagnostics::default();
    let result = InstanceResource::new(provider(&server))
        .read(&mut diags, state, Default::default(), Default::default())
        .await;

    assert!(result.is_none());
    assert_eq!(diags.errors[0].summary, "Error reading instance");
    assert!(diags.errors[0].detail.contains("instance not found"));
}
