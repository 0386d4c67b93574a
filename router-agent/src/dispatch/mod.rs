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

//! Timer-driven response dispatch.
//!
//! Finished queries leave the core thread through the outgoing queue. A
//! zero-delay timer wakes the dispatch thread, which hands each query to the
//! response handler: paged QUERYs go back to the core for their next row,
//! everything else becomes a [`ManagementResponse`](crate::ManagementResponse)
//! for the [`ResponseSender`].

mod dispatch_loop;
mod outgoing_queue;
mod response_handler;
mod response_sender;

pub(crate) use dispatch_loop::DispatchLoop;
pub(crate) use outgoing_queue::{DispatchTimer, OutgoingQueue};
pub(crate) use response_handler::{PagingResponseHandler, ResponseHandler};
pub use response_sender::ResponseSender;
