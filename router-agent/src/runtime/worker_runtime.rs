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

//! Runtime helper for spawning the agent's loop threads.

use crate::observability::events;
use crate::observability::fields;
use std::future::Future;
use std::io;
use std::thread;
use tokio::runtime::Builder;
use tracing::{debug, error, warn};

const COMPONENT: &str = "worker_runtime";
const RUNTIME_THREAD_NAME_MAX_LEN: usize = 15;

/// Handle to a loop thread and the name it runs under.
#[derive(Debug)]
pub(crate) struct RuntimeThreadHandle {
    worker_thread: String,
    join_handle: thread::JoinHandle<()>,
}

impl RuntimeThreadHandle {
    pub(crate) fn worker_thread(&self) -> &str {
        &self.worker_thread
    }

    pub(crate) fn join(self) -> thread::Result<()> {
        self.join_handle.join()
    }
}

/// Linux truncates thread names past 15 bytes; names that are empty or too
/// long fall back to `fallback`.
pub(crate) fn runtime_thread_name(requested: &str, fallback: &str) -> String {
    if !requested.is_empty() && requested.len() <= RUNTIME_THREAD_NAME_MAX_LEN {
        return requested.to_string();
    }

    warn!(
        event = events::RUNTIME_THREAD_NAME_FALLBACK,
        component = COMPONENT,
        requested,
        fallback,
        reason = fields::REASON_INVALID_THREAD_NAME,
        "runtime thread name rejected; using fallback"
    );
    fallback.to_string()
}

/// Spawns `run_loop` on a named thread driving its own current-thread
/// runtime. The runtime is built before the thread starts so build failures
/// surface to the caller.
pub(crate) fn spawn_runtime_thread<F, Fut>(
    thread_name: String,
    run_loop: F,
) -> io::Result<RuntimeThreadHandle>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    debug!(
        event = events::RUNTIME_SPAWN_START,
        component = COMPONENT,
        worker_thread = thread_name.as_str(),
        "spawning runtime thread"
    );

    let spawned = Builder::new_current_thread()
        .enable_all()
        .build()
        .and_then(|runtime| {
            thread::Builder::new()
                .name(thread_name.clone())
                .spawn(move || runtime.block_on(run_loop()))
        });

    match spawned {
        Ok(join_handle) => {
            debug!(
                event = events::RUNTIME_SPAWN_OK,
                component = COMPONENT,
                worker_thread = thread_name.as_str(),
                "runtime thread spawned"
            );
            Ok(RuntimeThreadHandle {
                worker_thread: thread_name,
                join_handle,
            })
        }
        Err(err) => {
            error!(
                event = events::RUNTIME_SPAWN_FAILED,
                component = COMPONENT,
                worker_thread = thread_name.as_str(),
                err = %err,
                "failed to spawn runtime thread"
            );
            Err(err)
        }
    }
}
