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

//! Finished queries waiting for the dispatch thread.

use crate::observability::events;
use crate::query::Query;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

const COMPONENT: &str = "outgoing_queue";

/// Schedules one dispatch pass after `delay`.
#[derive(Clone, Debug)]
pub(crate) struct DispatchTimer {
    fire: UnboundedSender<Duration>,
    delay: Duration,
}

impl DispatchTimer {
    pub(crate) fn new(fire: UnboundedSender<Duration>, delay: Duration) -> Self {
        Self { fire, delay }
    }

    fn schedule(&self) -> bool {
        self.fire.send(self.delay).is_ok()
    }
}

struct OutgoingState {
    queries: VecDeque<Box<Query>>,
    timer: Option<DispatchTimer>,
}

/// FIFO from the core thread to the dispatch thread.
pub(crate) struct OutgoingQueue {
    state: Mutex<OutgoingState>,
}

impl OutgoingQueue {
    pub(crate) fn new(timer: DispatchTimer) -> Self {
        Self::with_timer(Some(timer))
    }

    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        Self::with_timer(None)
    }

    fn with_timer(timer: Option<DispatchTimer>) -> Self {
        Self {
            state: Mutex::new(OutgoingState {
                queries: VecDeque::new(),
                timer,
            }),
        }
    }

    /// Appends `query` and schedules a dispatch pass if the queue was empty.
    /// Returns whether a pass was scheduled.
    pub(crate) fn enqueue_response(&self, query: Box<Query>) -> bool {
        let timer = {
            let mut state = self.state.lock();
            state.queries.push_back(query);
            if state.queries.len() == 1 {
                state.timer.clone()
            } else {
                None
            }
        };

        let Some(timer) = timer else {
            return false;
        };
        let scheduled = timer.schedule();
        debug!(
            event = events::DISPATCH_TIMER_SCHEDULED,
            component = COMPONENT,
            delay_ms = timer.delay.as_millis() as u64,
            scheduled,
            "response dispatch scheduled"
        );
        scheduled
    }

    /// Pops the head, reporting whether the queue is now empty.
    pub(crate) fn pop(&self) -> (Option<Box<Query>>, bool) {
        let mut state = self.state.lock();
        let query = state.queries.pop_front();
        (query, state.queries.is_empty())
    }

    /// Drops the timer so the dispatch loop runs its final pass and exits.
    pub(crate) fn close_timer(&self) {
        self.state.lock().timer = None;
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.state.lock().queries.len()
    }
}
