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

//! Actions that run entity handlers for a query.

use super::{Action, CoreContext};
use crate::query::Query;
use crate::request::Operation;

/// First action for a freshly accepted request.
pub(crate) fn manage(query: Box<Query>) -> Action {
    let label = match query.request().operation() {
        Operation::Create => "manage_create",
        Operation::Read => "manage_read",
        Operation::Update => "manage_update",
        Operation::Delete => "manage_delete",
        Operation::Query => "manage_query_first",
    };
    Action::new(label, move |context, discard| {
        run_handler(context, query, discard)
    })
}

/// Continues a paged QUERY with its next row.
pub(crate) fn query_next(query: Box<Query>) -> Action {
    Action::new("manage_query_next", move |context, discard| {
        run_handler(context, query, discard)
    })
}

fn run_handler(context: &mut CoreContext, mut query: Box<Query>, discard: bool) {
    if discard {
        return;
    }

    let handler = query.handler();
    let state = context.state_mut();
    match query.request().operation() {
        Operation::Create => handler.create(state, &mut query),
        Operation::Read => handler.read(state, &mut query),
        Operation::Update => handler.update(state, &mut query),
        Operation::Delete => handler.delete(state, &mut query),
        Operation::Query => handler.query(state, &mut query),
    }
    context.enqueue_response(query);
}
