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

//! Canonical structured event names used across `router-agent`.

// Agent lifecycle events.
pub const AGENT_START: &str = "agent_start";
pub const AGENT_STOP: &str = "agent_stop";
pub const AGENT_THREAD_PANICKED: &str = "agent_thread_panicked";

// Ingress events.
pub const INGRESS_ENQUEUE: &str = "ingress_enqueue";
pub const INGRESS_REJECTED_SHUTDOWN: &str = "ingress_rejected_shutdown";
pub const INGRESS_UNREGISTERED_ENTITY_TYPE: &str = "ingress_unregistered_entity_type";

// Core thread events.
pub const CORE_LOOP_START: &str = "core_loop_start";
pub const CORE_LOOP_STOP: &str = "core_loop_stop";
pub const CORE_REQUEST_ACCEPT: &str = "core_request_accept";
pub const CORE_WORK_ITEM_DROPPED: &str = "core_work_item_dropped";
pub const CORE_ACTION_RUN: &str = "core_action_run";
pub const CORE_ACTION_DISCARD: &str = "core_action_discard";
pub const CORE_ACTION_REJECTED: &str = "core_action_rejected";

// Entity handler events.
pub const ENTITY_CREATE_OK: &str = "entity_create_ok";
pub const ENTITY_DELETE_OK: &str = "entity_delete_ok";
pub const ENTITY_OPERATION_FAILED: &str = "entity_operation_failed";
pub const ENTITY_OPERATION_FORBIDDEN: &str = "entity_operation_forbidden";

// Response dispatch events.
pub const DISPATCH_LOOP_START: &str = "dispatch_loop_start";
pub const DISPATCH_LOOP_STOP: &str = "dispatch_loop_stop";
pub const DISPATCH_TIMER_SCHEDULED: &str = "dispatch_timer_scheduled";
pub const DISPATCH_DRAIN: &str = "dispatch_drain";
pub const QUERY_CONTINUE: &str = "query_continue";
pub const QUERY_CONTINUE_DROPPED: &str = "query_continue_dropped";
pub const RESPONSE_SEND: &str = "response_send";
pub const RESPONSE_SUPPRESSED: &str = "response_suppressed";

// Runtime observability events.
pub const RUNTIME_THREAD_NAME_FALLBACK: &str = "runtime_thread_name_fallback";
pub const RUNTIME_SPAWN_START: &str = "runtime_spawn_start";
pub const RUNTIME_SPAWN_OK: &str = "runtime_spawn_ok";
pub const RUNTIME_SPAWN_FAILED: &str = "runtime_spawn_failed";
