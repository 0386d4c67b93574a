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

//! Single-writer core thread.
//!
//! All router state lives here and is only touched by actions run on the
//! core thread, one at a time, in the order they were queued. Other threads
//! hand work in through the ingress queue and the action queue; both wake the
//! core through one shared signal.

mod action_queue;
mod core_loop;
mod management_actions;
mod router_state;

pub(crate) use action_queue::{Action, ActionQueue};
pub(crate) use core_loop::{CoreContext, CoreLoop};
pub(crate) use management_actions::{manage, query_next};
pub use router_state::RouterState;
