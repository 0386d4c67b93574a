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

//! Canonical structured field values and value-format helpers.

use crate::request::Request;
use serde_json::Value;

pub const NONE: &str = "none";
pub const REASON_INVALID_THREAD_NAME: &str = "invalid_thread_name";
pub const REASON_SHUTTING_DOWN: &str = "shutting_down";
pub const DEFAULT_WORKER_THREAD: &str = "unknown-thread";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkerContext {
    pub agent_id: String,
    pub worker_thread: String,
}

impl WorkerContext {
    pub fn new(agent_id: impl Into<String>, worker_thread: Option<&str>) -> Self {
        Self {
            agent_id: agent_id.into(),
            worker_thread: thread_name_or_default(worker_thread),
        }
    }

    pub fn with_current_thread(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            worker_thread: current_thread_name_or_default(),
        }
    }
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_WORKER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

/// Renders an opaque correlation id the way it would appear on the wire.
pub fn format_correlation_id(correlation_id: Option<&Value>) -> String {
    match correlation_id {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => NONE.to_string(),
    }
}

pub fn format_reply_to(reply_to: Option<&str>) -> String {
    reply_to.unwrap_or(NONE).to_string()
}

/// Compact `identity=..`/`name=..` rendering of the record a request targets.
pub fn format_selector(request: &Request) -> String {
    match (request.identity(), request.name()) {
        (Some(identity), _) => format!("identity={identity}"),
        (None, Some(name)) => format!("name={name}"),
        (None, None) => NONE.to_string(),
    }
}
