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

use async_trait::async_trait;
use router_agent::{
    AgentConfig, EntityType, HandlerRegistry, ManagementAgent, ManagementResponse, Operation,
    Request, ResponseSender,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub(crate) const REPLY_TO: &str = "amqp:/_topo/0/management-client";
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) struct RecordingSender {
    responses: UnboundedSender<ManagementResponse>,
}

#[async_trait]
impl ResponseSender for RecordingSender {
    async fn send_response(&self, response: ManagementResponse) {
        let _ = self.responses.send(response);
    }
}

pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt::try_init();
}

pub(crate) fn start_agent(name: &str) -> (ManagementAgent, UnboundedReceiver<ManagementResponse>) {
    init_logging();
    let (responses, received) = mpsc::unbounded_channel();
    let agent = ManagementAgent::start(
        AgentConfig::new(name),
        HandlerRegistry::router_defaults(),
        Arc::new(RecordingSender { responses }),
    )
    .expect("agent should start");
    (agent, received)
}

pub(crate) async fn next_response(
    received: &mut UnboundedReceiver<ManagementResponse>,
) -> ManagementResponse {
    tokio::time::timeout(RESPONSE_TIMEOUT, received.recv())
        .await
        .expect("response should arrive before timeout")
        .expect("response channel should stay open")
}

#[allow(dead_code)]
pub(crate) async fn assert_no_response(received: &mut UnboundedReceiver<ManagementResponse>) {
    let outcome = tokio::time::timeout(Duration::from_millis(200), received.recv()).await;
    assert!(outcome.is_err(), "no response should be delivered");
}

pub(crate) fn create_address(name: &str, body: Value) -> Request {
    Request::new(Operation::Create, EntityType::ConfigAddress)
        .with_name(name)
        .with_body(body)
        .with_reply_to(REPLY_TO)
}

pub(crate) fn list_addresses() -> Request {
    Request::new(Operation::Query, EntityType::ConfigAddress).with_reply_to(REPLY_TO)
}

/// Creates `count` addresses `addr-<n>` with prefixes `P/<n>` and waits for
/// each CREATE to complete.
#[allow(dead_code)]
pub(crate) async fn seed_addresses(
    agent: &ManagementAgent,
    received: &mut UnboundedReceiver<ManagementResponse>,
    count: usize,
) {
    for n in 0..count {
        agent
            .post_request(create_address(
                &format!("addr-{n}"),
                json!({"prefix": format!("P/{n}")}),
            ))
            .expect("create should be accepted");
        let response = next_response(received).await;
        assert_eq!(response.status_code(), 201, "seed create should succeed");
    }
}
