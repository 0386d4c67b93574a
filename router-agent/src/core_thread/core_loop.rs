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

//! The core thread's event loop.

use super::{manage, ActionQueue, RouterState};
use crate::dispatch::OutgoingQueue;
use crate::ingress::WorkQueue;
use crate::observability::events;
use crate::observability::fields::{self, WorkerContext};
use crate::query::Query;
use crate::registry::HandlerRegistry;
use crate::request::Request;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{debug, info, warn, Level};

const COMPONENT: &str = "core_loop";

/// What an action may touch: router state, and the outgoing queue for
/// finished queries.
pub(crate) struct CoreContext {
    state: RouterState,
    outgoing: Arc<OutgoingQueue>,
}

impl CoreContext {
    pub(crate) fn new(state: RouterState, outgoing: Arc<OutgoingQueue>) -> Self {
        Self { state, outgoing }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &RouterState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut RouterState {
        &mut self.state
    }

    pub(crate) fn enqueue_response(&self, query: Box<Query>) {
        self.outgoing.enqueue_response(query);
    }
}

pub(crate) struct CoreLoop {
    agent_id: String,
    registry: Arc<HandlerRegistry>,
    work_queue: Arc<WorkQueue>,
    actions: Arc<ActionQueue>,
    core_signal: Arc<Notify>,
    max_columns: usize,
}

impl CoreLoop {
    pub(crate) fn new(
        agent_id: String,
        registry: Arc<HandlerRegistry>,
        work_queue: Arc<WorkQueue>,
        actions: Arc<ActionQueue>,
        core_signal: Arc<Notify>,
        max_columns: usize,
    ) -> Self {
        Self {
            agent_id,
            registry,
            work_queue,
            actions,
            core_signal,
            max_columns,
        }
    }

    /// Runs until the action queue is closed, then drops pending work items
    /// and runs every remaining action in discard mode.
    pub(crate) async fn run(self, mut context: CoreContext) {
        let worker_context = WorkerContext::with_current_thread(self.agent_id.clone());
        info!(
            event = events::CORE_LOOP_START,
            component = COMPONENT,
            agent_id = worker_context.agent_id.as_str(),
            worker_thread = worker_context.worker_thread.as_str(),
            "core loop started"
        );

        loop {
            self.core_signal.notified().await;
            if self.actions.is_closed() {
                break;
            }
            self.process_work_queue(&worker_context);
            self.process_actions(&mut context, &worker_context, false);
        }

        let pending_actions = self.actions.len();
        let dropped = self.drop_work_queue(&worker_context);
        let discarded = self.process_actions(&mut context, &worker_context, true);
        info!(
            event = events::CORE_LOOP_STOP,
            component = COMPONENT,
            agent_id = worker_context.agent_id.as_str(),
            worker_thread = worker_context.worker_thread.as_str(),
            pending_actions,
            dropped,
            discarded,
            "core loop stopped"
        );
    }

    fn process_work_queue(&self, worker_context: &WorkerContext) {
        while let Some(item) = self.work_queue.drain_one() {
            self.accept(item.into_request(), worker_context);
        }
    }

    /// Turns a request into a query and queues its first action.
    fn accept(&self, request: Request, worker_context: &WorkerContext) {
        let Some(handler) = self.registry.get(request.entity_type()) else {
            warn!(
                event = events::INGRESS_UNREGISTERED_ENTITY_TYPE,
                component = COMPONENT,
                agent_id = worker_context.agent_id.as_str(),
                entity_type = request.entity_type().as_str(),
                "dropping request for unregistered entity type"
            );
            return;
        };

        if tracing::enabled!(Level::DEBUG) {
            debug!(
                event = events::CORE_REQUEST_ACCEPT,
                component = COMPONENT,
                agent_id = worker_context.agent_id.as_str(),
                operation = request.operation().as_str(),
                entity_type = request.entity_type().as_str(),
                selector = fields::format_selector(&request).as_str(),
                correlation_id = fields::format_correlation_id(request.correlation_id()).as_str(),
                reply_to = fields::format_reply_to(request.reply_to()).as_str(),
                "accepted management request"
            );
        }

        let query = Box::new(Query::new(request, handler, self.max_columns));
        if let Err(rejected) = self.actions.enqueue(manage(query)) {
            debug!(
                event = events::CORE_ACTION_REJECTED,
                component = COMPONENT,
                agent_id = worker_context.agent_id.as_str(),
                action = rejected.label(),
                reason = fields::REASON_SHUTTING_DOWN,
                "action queue closed; dropping request"
            );
        }
    }

    fn process_actions(
        &self,
        context: &mut CoreContext,
        worker_context: &WorkerContext,
        discard: bool,
    ) -> usize {
        let event = if discard {
            events::CORE_ACTION_DISCARD
        } else {
            events::CORE_ACTION_RUN
        };
        let mut executed = 0;
        while let Some(action) = self.actions.pop() {
            debug!(
                event,
                component = COMPONENT,
                agent_id = worker_context.agent_id.as_str(),
                action = action.label(),
                discard,
                "running core action"
            );
            action.execute(context, discard);
            executed += 1;
        }
        executed
    }

    fn drop_work_queue(&self, worker_context: &WorkerContext) -> usize {
        let mut dropped = 0;
        while let Some(item) = self.work_queue.drain_one() {
            debug!(
                event = events::CORE_WORK_ITEM_DROPPED,
                component = COMPONENT,
                agent_id = worker_context.agent_id.as_str(),
                operation = item.request().operation().as_str(),
                reason = fields::REASON_SHUTTING_DOWN,
                "dropping unprocessed request"
            );
            dropped += 1;
        }
        dropped
    }
}
