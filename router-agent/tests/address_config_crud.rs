/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod support;

use router_agent::{EntityType, Operation, Request};
use serde_json::json;
use support::{
    assert_no_response, create_address, list_addresses, next_response, start_agent, REPLY_TO,
};

#[tokio::test(flavor = "multi_thread")]
async fn create_returns_created_with_defaulted_attributes() {
    let (agent, mut received) = start_agent("crud-create");

    agent
        .post_request(create_address("a1", json!({"prefix": "A/foo"})).with_correlation_id(json!(7)))
        .expect("create should be accepted");
    let response = next_response(&mut received).await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.correlation_id, Some(json!(7)));
    assert_eq!(response.reply_to, REPLY_TO);
    assert_eq!(response.body["name"], json!("a1"));
    assert_eq!(response.body["prefix"], json!("A/foo"));
    assert_eq!(response.body["ingressPhase"], json!(0));
    assert_eq!(response.body["egressPhase"], json!(0));
    assert_eq!(response.body["distribution"], json!("balanced"));
    assert!(response.body["identity"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_prefix_is_rejected_without_adding_a_row() {
    let (agent, mut received) = start_agent("crud-duplicate");

    agent
        .post_request(create_address("a1", json!({"prefix": "A/foo"})))
        .expect("create should be accepted");
    assert_eq!(next_response(&mut received).await.status_code(), 201);

    agent
        .post_request(create_address("a2", json!({"prefix": "A/foo"})))
        .expect("create should be accepted");
    let rejected = next_response(&mut received).await;
    assert_eq!(rejected.status_code(), 400);
    assert_eq!(
        rejected.status.description(),
        "Address prefix conflicts with an existing entity"
    );
    assert_eq!(rejected.body, json!({}));

    agent
        .post_request(list_addresses())
        .expect("query should be accepted");
    let listed = next_response(&mut received).await;
    assert_eq!(listed.results().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn read_then_delete_by_identity() {
    let (agent, mut received) = start_agent("crud-read-delete");
    agent
        .post_request(create_address("a1", json!({"prefix": "B", "waypoint": true})))
        .expect("create should be accepted");
    let created = next_response(&mut received).await;
    let identity = created.body["identity"]
        .as_str()
        .expect("identity should be a string")
        .to_string();

    agent
        .post_request(
            Request::new(Operation::Read, EntityType::ConfigAddress)
                .with_identity(identity.clone())
                .with_reply_to(REPLY_TO),
        )
        .expect("read should be accepted");
    let read = next_response(&mut received).await;
    assert_eq!(read.status_code(), 200);
    assert_eq!(read.body, created.body);
    assert_eq!(read.body["waypoint"], json!(true));

    agent
        .post_request(
            Request::new(Operation::Delete, EntityType::ConfigAddress)
                .with_identity(identity.clone())
                .with_reply_to(REPLY_TO),
        )
        .expect("delete should be accepted");
    let deleted = next_response(&mut received).await;
    assert_eq!(deleted.status_code(), 204);
    assert_eq!(deleted.body, json!({}));

    agent
        .post_request(
            Request::new(Operation::Delete, EntityType::ConfigAddress)
                .with_identity(identity)
                .with_reply_to(REPLY_TO),
        )
        .expect("delete should be accepted");
    assert_eq!(next_response(&mut received).await.status_code(), 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn read_by_name_returns_created_attributes() {
    let (agent, mut received) = start_agent("crud-read-name");
    agent
        .post_request(create_address(
            "A",
            json!({"prefix": "foo", "distribution": "closest", "ingressPhase": 3}),
        ))
        .expect("create should be accepted");
    let created = next_response(&mut received).await;
    assert_eq!(created.status_code(), 201);

    agent
        .post_request(
            Request::new(Operation::Read, EntityType::ConfigAddress)
                .with_name("A")
                .with_reply_to(REPLY_TO),
        )
        .expect("read should be accepted");
    let read = next_response(&mut received).await;
    assert_eq!(read.status_code(), 200);
    assert_eq!(read.body, created.body);
    assert_eq!(read.body["distribution"], json!("closest"));
    assert_eq!(read.body["ingressPhase"], json!(3));

    agent
        .post_request(
            Request::new(Operation::Read, EntityType::ConfigAddress)
                .with_name("missing")
                .with_reply_to(REPLY_TO),
        )
        .expect("read should be accepted");
    let missing = next_response(&mut received).await;
    assert_eq!(missing.status_code(), 404);
    assert_eq!(missing.body, json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_on_empty_store_is_not_found() {
    let (agent, mut received) = start_agent("crud-empty-delete");

    agent
        .post_request(
            Request::new(Operation::Delete, EntityType::ConfigAddress)
                .with_identity("1")
                .with_reply_to(REPLY_TO),
        )
        .expect("delete should be accepted");

    let response = next_response(&mut received).await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.body, json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_is_forbidden_for_address_configuration() {
    let (agent, mut received) = start_agent("crud-update");

    agent
        .post_request(
            Request::new(Operation::Update, EntityType::ConfigAddress)
                .with_name("a1")
                .with_body(json!({"distribution": "closest"}))
                .with_reply_to(REPLY_TO),
        )
        .expect("update should be accepted");

    let response = next_response(&mut received).await;
    assert_eq!(response.status_code(), 403);
    assert_eq!(response.body, json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn unsupported_entity_types_answer_forbidden() {
    let (agent, mut received) = start_agent("crud-forbidden");

    for entity_type in [
        EntityType::ConfigLinkRoute,
        EntityType::ConfigAutoLink,
        EntityType::Address,
        EntityType::Link,
        EntityType::Connection,
    ] {
        agent
            .post_request(Request::new(Operation::Query, entity_type).with_reply_to(REPLY_TO))
            .expect("request should be accepted");
        let response = next_response(&mut received).await;
        assert_eq!(response.status_code(), 403, "{entity_type} should be forbidden");
        assert_eq!(response.body, json!({}));
        assert!(!response.more);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn request_without_reply_to_mutates_but_stays_silent() {
    let (agent, mut received) = start_agent("crud-silent");

    agent
        .post_request(
            Request::new(Operation::Create, EntityType::ConfigAddress)
                .with_body(json!({"prefix": "silent"})),
        )
        .expect("create should be accepted");
    assert_no_response(&mut received).await;

    agent
        .post_request(list_addresses().with_attribute_names(json!(["prefix"])))
        .expect("query should be accepted");
    let listed = next_response(&mut received).await;
    assert_eq!(listed.results(), &[json!(["silent"])]);
}
