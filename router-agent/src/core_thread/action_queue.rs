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

//! FIFO of closures the core thread runs against router state.

use super::CoreContext;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tokio::sync::Notify;

type ActionFn = Box<dyn FnOnce(&mut CoreContext, bool) + Send>;

/// A deferred unit of core-thread work.
///
/// The closure receives `discard = true` when the core is shutting down; it
/// must then release what it owns without touching state.
pub(crate) struct Action {
    label: &'static str,
    run: ActionFn,
}

impl Action {
    pub(crate) fn new<F>(label: &'static str, run: F) -> Self
    where
        F: FnOnce(&mut CoreContext, bool) + Send + 'static,
    {
        Self {
            label,
            run: Box::new(run),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        self.label
    }

    pub(crate) fn execute(self, context: &mut CoreContext, discard: bool) {
        (self.run)(context, discard)
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct ActionQueueState {
    actions: VecDeque<Action>,
    closed: bool,
}

/// Multi-producer action FIFO drained by the core thread.
pub(crate) struct ActionQueue {
    state: Mutex<ActionQueueState>,
    core_signal: Arc<Notify>,
}

impl ActionQueue {
    pub(crate) fn new(core_signal: Arc<Notify>) -> Self {
        Self {
            state: Mutex::new(ActionQueueState::default()),
            core_signal,
        }
    }

    /// Appends `action`, waking the core only on the empty to non-empty
    /// transition. Returns whether a wake was sent, or the action itself once
    /// the queue is closed.
    pub(crate) fn enqueue(&self, action: Action) -> Result<bool, Action> {
        let was_empty = {
            let mut state = self.state.lock();
            if state.closed {
                return Err(action);
            }
            let was_empty = state.actions.is_empty();
            state.actions.push_back(action);
            was_empty
        };

        if was_empty {
            self.core_signal.notify_one();
        }
        Ok(was_empty)
    }

    pub(crate) fn pop(&self) -> Option<Action> {
        self.state.lock().actions.pop_front()
    }

    /// Refuses further actions and wakes the core so it can wind down.
    pub(crate) fn close(&self) {
        self.state.lock().closed = true;
        self.core_signal.notify_one();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub(crate) fn len(&self) -> usize {
        self.state.lock().actions.len()
    }
}
