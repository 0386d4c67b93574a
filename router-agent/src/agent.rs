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

//! `ManagementAgent` facade: thread setup, request intake and shutdown.

use crate::config::{AgentConfig, ConfigError, DEFAULT_CORE_THREAD_NAME, DEFAULT_DISPATCH_THREAD_NAME};
use crate::core_thread::{ActionQueue, CoreContext, CoreLoop, RouterState};
use crate::dispatch::{DispatchLoop, DispatchTimer, OutgoingQueue, PagingResponseHandler, ResponseSender};
use crate::ingress::{WorkItem, WorkQueue};
use crate::observability::events;
use crate::observability::fields;
use crate::registry::HandlerRegistry;
use crate::request::{EntityType, Request};
use crate::runtime::worker_runtime::{runtime_thread_name, spawn_runtime_thread, RuntimeThreadHandle};
use parking_lot::Mutex;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tracing::{debug, error, info, warn, Level};
use uuid::Uuid;

const COMPONENT: &str = "agent";

/// Engine-level failures. Request outcomes are reported as response statuses,
/// never through this type.
#[derive(Debug)]
pub enum AgentError {
    UnregisteredEntityType(EntityType),
    ShuttingDown,
    RuntimeSpawn(io::Error),
    Config(ConfigError),
}

impl Display for AgentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentError::UnregisteredEntityType(entity_type) => {
                write!(f, "no handler registered for entity type {entity_type}")
            }
            AgentError::ShuttingDown => write!(f, "management agent is shutting down"),
            AgentError::RuntimeSpawn(err) => {
                write!(f, "failed to spawn agent runtime thread: {err}")
            }
            AgentError::Config(err) => write!(f, "agent configuration error: {err}"),
        }
    }
}

impl Error for AgentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AgentError::RuntimeSpawn(err) => Some(err),
            AgentError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for AgentError {
    fn from(err: ConfigError) -> Self {
        AgentError::Config(err)
    }
}

/// The router's management agent.
///
/// Owns a core thread, the only place router state is read or written, and a
/// dispatch thread that completes responses. Any thread may post requests;
/// responses arrive on the [`ResponseSender`] in completion order.
///
/// Dropping the agent shuts it down: requests not yet picked up by the core
/// are dropped, queued actions run in discard mode, and responses already
/// completed are still delivered.
pub struct ManagementAgent {
    name: String,
    agent_id: String,
    registry: Arc<HandlerRegistry>,
    work_queue: Arc<WorkQueue>,
    actions: Arc<ActionQueue>,
    outgoing: Arc<OutgoingQueue>,
    threads: Mutex<Option<AgentThreads>>,
}

struct AgentThreads {
    core: RuntimeThreadHandle,
    dispatch: RuntimeThreadHandle,
}

impl ManagementAgent {
    /// Starts the core and dispatch threads.
    pub fn start(
        config: AgentConfig,
        registry: HandlerRegistry,
        sender: Arc<dyn ResponseSender>,
    ) -> Result<Self, AgentError> {
        config.validate()?;

        let agent_id = Uuid::new_v4().to_string();
        let core_signal = Arc::new(Notify::new());
        let work_queue = Arc::new(WorkQueue::new(core_signal.clone()));
        let actions = Arc::new(ActionQueue::new(core_signal.clone()));
        let (timer_fire, timer_fires) = mpsc::unbounded_channel();
        let outgoing = Arc::new(OutgoingQueue::new(DispatchTimer::new(
            timer_fire,
            config.response_delay(),
        )));
        let registry = Arc::new(registry);

        let dispatch_loop = DispatchLoop::new(
            agent_id.clone(),
            outgoing.clone(),
            Arc::new(PagingResponseHandler::new(actions.clone(), sender)),
        );
        let dispatch_thread = spawn_runtime_thread(
            runtime_thread_name(&config.dispatch_thread_name, DEFAULT_DISPATCH_THREAD_NAME),
            move || dispatch_loop.run(timer_fires),
        )
        .map_err(AgentError::RuntimeSpawn)?;

        let core_loop = CoreLoop::new(
            agent_id.clone(),
            registry.clone(),
            work_queue.clone(),
            actions.clone(),
            core_signal,
            config.max_columns(),
        );
        let context = CoreContext::new(RouterState::new(), outgoing.clone());
        let core_thread = match spawn_runtime_thread(
            runtime_thread_name(&config.core_thread_name, DEFAULT_CORE_THREAD_NAME),
            move || core_loop.run(context),
        ) {
            Ok(core_thread) => core_thread,
            Err(err) => {
                outgoing.close_timer();
                if dispatch_thread.join().is_err() {
                    error!(
                        event = events::AGENT_THREAD_PANICKED,
                        component = COMPONENT,
                        agent_id = agent_id.as_str(),
                        "dispatch thread panicked during aborted start"
                    );
                }
                return Err(AgentError::RuntimeSpawn(err));
            }
        };

        info!(
            event = events::AGENT_START,
            component = COMPONENT,
            agent_id = agent_id.as_str(),
            name = config.name(),
            core_thread = core_thread.worker_thread(),
            dispatch_thread = dispatch_thread.worker_thread(),
            entity_types = registry.len(),
            "management agent started"
        );

        Ok(Self {
            name: config.name().to_string(),
            agent_id,
            registry,
            work_queue,
            actions,
            outgoing,
            threads: Mutex::new(Some(AgentThreads {
                core: core_thread,
                dispatch: dispatch_thread,
            })),
        })
    }

    /// Loads a JSON5 config from `path` and starts the agent with it.
    pub fn start_from_file(
        path: impl AsRef<Path>,
        registry: HandlerRegistry,
        sender: Arc<dyn ResponseSender>,
    ) -> Result<Self, AgentError> {
        Self::start(AgentConfig::from_file(path)?, registry, sender)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instance id carried as `agent_id` on every log event.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Queues `request` for the core thread. Callable from any thread;
    /// never blocks on request processing.
    pub fn post_request(&self, request: Request) -> Result<(), AgentError> {
        let entity_type = request.entity_type();
        if !self.registry.is_registered(entity_type) {
            warn!(
                event = events::INGRESS_UNREGISTERED_ENTITY_TYPE,
                component = COMPONENT,
                agent_id = self.agent_id.as_str(),
                entity_type = entity_type.as_str(),
                "rejecting request for unregistered entity type"
            );
            return Err(AgentError::UnregisteredEntityType(entity_type));
        }

        let operation = request.operation();
        let correlation_id = tracing::enabled!(Level::DEBUG)
            .then(|| fields::format_correlation_id(request.correlation_id()));

        match self.work_queue.enqueue(WorkItem::new(request)) {
            Ok(woke_core) => {
                if let Some(correlation_id) = correlation_id {
                    debug!(
                        event = events::INGRESS_ENQUEUE,
                        component = COMPONENT,
                        agent_id = self.agent_id.as_str(),
                        operation = operation.as_str(),
                        entity_type = entity_type.as_str(),
                        correlation_id = correlation_id.as_str(),
                        woke_core,
                        "management request queued"
                    );
                }
                Ok(())
            }
            Err(_rejected) => {
                debug!(
                    event = events::INGRESS_REJECTED_SHUTDOWN,
                    component = COMPONENT,
                    agent_id = self.agent_id.as_str(),
                    operation = operation.as_str(),
                    reason = fields::REASON_SHUTTING_DOWN,
                    "management request rejected"
                );
                Err(AgentError::ShuttingDown)
            }
        }
    }

    /// Stops both threads and waits for them to exit. Later calls, and
    /// requests posted afterwards, see [`AgentError::ShuttingDown`].
    pub fn shutdown(&self) -> Result<(), AgentError> {
        let Some(threads) = self.threads.lock().take() else {
            return Err(AgentError::ShuttingDown);
        };

        self.work_queue.close();
        self.actions.close();
        self.join_thread(threads.core);

        self.outgoing.close_timer();
        self.join_thread(threads.dispatch);

        info!(
            event = events::AGENT_STOP,
            component = COMPONENT,
            agent_id = self.agent_id.as_str(),
            name = self.name.as_str(),
            "management agent stopped"
        );
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.threads.lock().is_some()
    }

    fn join_thread(&self, handle: RuntimeThreadHandle) {
        let worker_thread = handle.worker_thread().to_string();
        if handle.join().is_err() {
            error!(
                event = events::AGENT_THREAD_PANICKED,
                component = COMPONENT,
                agent_id = self.agent_id.as_str(),
                worker_thread = worker_thread.as_str(),
                "agent thread panicked"
            );
        }
    }
}

impl Drop for ManagementAgent {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

impl Debug for ManagementAgent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagementAgent")
            .field("name", &self.name)
            .field("agent_id", &self.agent_id)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
