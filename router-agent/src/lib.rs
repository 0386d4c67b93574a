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

//! # router-agent
//!
//! `router-agent` is the management control plane of a message router. It
//! accepts CREATE/READ/UPDATE/DELETE/QUERY requests against router
//! configuration, runs them on a single core thread so they never race the
//! router's own state changes, and delivers paged results back through an
//! adapter-supplied [`ResponseSender`].
//!
//! Typical usage is API-first and centered on [`ManagementAgent`] and
//! [`Request`].
//!
//! ```
//! use std::sync::{mpsc, Arc, Mutex};
//! use std::time::Duration;
//! use async_trait::async_trait;
//! use router_agent::{
//!     AgentConfig, EntityType, HandlerRegistry, ManagementAgent, ManagementResponse, Operation,
//!     Request, ResponseSender,
//! };
//! use serde_json::json;
//!
//! struct ChannelSender(Mutex<mpsc::Sender<ManagementResponse>>);
//!
//! #[async_trait]
//! impl ResponseSender for ChannelSender {
//!     async fn send_response(&self, response: ManagementResponse) {
//!         let _ = self.0.lock().unwrap().send(response);
//!     }
//! }
//!
//! let (responses_tx, responses) = mpsc::channel();
//! let agent = ManagementAgent::start(
//!     AgentConfig::new("doc-agent"),
//!     HandlerRegistry::router_defaults(),
//!     Arc::new(ChannelSender(Mutex::new(responses_tx))),
//! )
//! .unwrap();
//!
//! agent
//!     .post_request(
//!         Request::new(Operation::Create, EntityType::ConfigAddress)
//!             .with_name("a1")
//!             .with_body(json!({"prefix": "A/foo"}))
//!             .with_reply_to("client"),
//!     )
//!     .unwrap();
//! let created = responses.recv_timeout(Duration::from_secs(5)).unwrap();
//! assert_eq!(created.status_code(), 201);
//!
//! agent
//!     .post_request(
//!         Request::new(Operation::Query, EntityType::ConfigAddress)
//!             .with_attribute_names(json!(["name", "prefix"]))
//!             .with_reply_to("client"),
//!     )
//!     .unwrap();
//! let listed = responses.recv_timeout(Duration::from_secs(5)).unwrap();
//! assert_eq!(listed.results(), &[json!(["a1", "A/foo"])]);
//! assert!(!listed.more);
//!
//! agent.shutdown().unwrap();
//! ```
//!
//! ## Paging
//!
//! A QUERY emits one row per core-thread action. The dispatch thread keeps
//! asking for the next row until the table is exhausted or `count` rows have
//! been delivered; in the latter case the response carries `more = true` and
//! the requester resumes with a larger `offset`. `count = 0` means no limit.
//!
//! ## Internal architecture map
//!
//! - API facade: [`ManagementAgent`], [`Request`], [`ManagementResponse`]
//! - Ingress: thread-safe work queue feeding the core thread
//! - Core thread: action queue, core loop and the router state it owns
//! - Entities: handler registry, address configuration, forbidden-only types
//! - Query: per-request status, row cursor and column selection
//! - Dispatch: outgoing queue, timer-driven drain and paging continuation
//! - Runtime: dedicated loop threads, each on a current-thread Tokio runtime
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod agent;
pub use agent::{AgentError, ManagementAgent};

mod config;
pub use config::{AgentConfig, ConfigError};

mod core_thread;
pub use core_thread::RouterState;

mod dispatch;
pub use dispatch::ResponseSender;

mod entities;
pub use entities::{AddressConfig, ConfigAddressHandler, Treatment, UnsupportedEntityHandler};

mod ingress;

#[doc(hidden)]
pub mod observability;

mod query;
pub use query::Query;

mod registry;
pub use registry::{EntityHandler, HandlerRegistry};

mod request;
pub use request::{EntityType, Operation, Request, UnknownNameError};

mod response;
pub use response::ManagementResponse;

mod runtime;

mod status;
pub use status::{ManagementStatus, StatusCode};

mod store;
pub use store::{EntityStore, ManagedEntity};
