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

use crate::request::Request;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Notify;

/// A posted request waiting for the core thread.
#[derive(Debug)]
pub(crate) struct WorkItem {
    request: Request,
}

impl WorkItem {
    pub(crate) fn new(request: Request) -> Self {
        Self { request }
    }

    pub(crate) fn request(&self) -> &Request {
        &self.request
    }

    pub(crate) fn into_request(self) -> Request {
        self.request
    }
}

#[derive(Default)]
struct WorkQueueState {
    items: VecDeque<WorkItem>,
    closed: bool,
}

/// FIFO between request producers and the core thread.
///
/// The mutex guards only the list; the core is woken after it is released,
/// and only when the list goes from empty to non-empty.
pub(crate) struct WorkQueue {
    state: Mutex<WorkQueueState>,
    core_signal: Arc<Notify>,
}

impl WorkQueue {
    pub(crate) fn new(core_signal: Arc<Notify>) -> Self {
        Self {
            state: Mutex::new(WorkQueueState::default()),
            core_signal,
        }
    }

    /// Appends `item`. Returns whether the core was woken, or the item itself
    /// once the queue is closed.
    pub(crate) fn enqueue(&self, item: WorkItem) -> Result<bool, WorkItem> {
        let was_empty = {
            let mut state = self.state.lock();
            if state.closed {
                return Err(item);
            }
            let was_empty = state.items.is_empty();
            state.items.push_back(item);
            was_empty
        };

        if was_empty {
            self.core_signal.notify_one();
        }
        Ok(was_empty)
    }

    pub(crate) fn drain_one(&self) -> Option<WorkItem> {
        self.state.lock().items.pop_front()
    }

    pub(crate) fn close(&self) {
        self.state.lock().closed = true;
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.state.lock().items.len()
    }
}
