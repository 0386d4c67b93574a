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

//! Dispatch thread loop: wait for the timer, drain the outgoing queue.

use super::{OutgoingQueue, ResponseHandler};
use crate::observability::events;
use crate::observability::fields::WorkerContext;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

const COMPONENT: &str = "dispatch_loop";

pub(crate) struct DispatchLoop {
    agent_id: String,
    outgoing: Arc<OutgoingQueue>,
    handler: Arc<dyn ResponseHandler>,
}

impl DispatchLoop {
    pub(crate) fn new(
        agent_id: String,
        outgoing: Arc<OutgoingQueue>,
        handler: Arc<dyn ResponseHandler>,
    ) -> Self {
        Self {
            agent_id,
            outgoing,
            handler,
        }
    }

    /// Drains once per timer fire. When every timer handle is gone, makes a
    /// final pass so nothing queued before shutdown is lost, then returns.
    pub(crate) async fn run(self, mut timer_fires: UnboundedReceiver<Duration>) {
        let worker_context = WorkerContext::with_current_thread(self.agent_id.clone());
        info!(
            event = events::DISPATCH_LOOP_START,
            component = COMPONENT,
            agent_id = worker_context.agent_id.as_str(),
            worker_thread = worker_context.worker_thread.as_str(),
            "dispatch loop started"
        );

        while let Some(delay) = timer_fires.recv().await {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.drain(&worker_context).await;
        }

        let delivered = self.drain(&worker_context).await;
        info!(
            event = events::DISPATCH_LOOP_STOP,
            component = COMPONENT,
            agent_id = worker_context.agent_id.as_str(),
            worker_thread = worker_context.worker_thread.as_str(),
            delivered,
            "dispatch loop stopped"
        );
    }

    /// Pops and handles queries until the queue reports empty.
    async fn drain(&self, worker_context: &WorkerContext) -> usize {
        let mut delivered = 0;
        loop {
            let (query, done) = self.outgoing.pop();
            if let Some(query) = query {
                self.handler.handle(query, worker_context).await;
                delivered += 1;
            }
            if done {
                break;
            }
        }

        debug!(
            event = events::DISPATCH_DRAIN,
            component = COMPONENT,
            agent_id = worker_context.agent_id.as_str(),
            delivered,
            "outgoing queue drained"
        );
        delivered
    }
}
