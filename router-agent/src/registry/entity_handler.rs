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

use crate::core_thread::RouterState;
use crate::observability::events;
use crate::query::Query;
use crate::status::ManagementStatus;
use tracing::debug;

const COMPONENT: &str = "entity_handler";

/// Operation handlers for one entity type.
///
/// Handlers only ever run on the core thread, one at a time, and are the only
/// code that touches [`RouterState`]. Every operation defaults to
/// `403 Forbidden`; an entity type opts into an operation by overriding it.
///
/// `query` is called once per row: it advances the query cursor, emits the
/// row it lands on, and leaves `more` set while rows remain.
pub trait EntityHandler: Send + Sync {
    fn create(&self, _state: &mut RouterState, query: &mut Query) {
        forbid(query);
    }

    fn read(&self, _state: &RouterState, query: &mut Query) {
        forbid(query);
    }

    fn update(&self, _state: &mut RouterState, query: &mut Query) {
        forbid(query);
    }

    fn delete(&self, _state: &mut RouterState, query: &mut Query) {
        forbid(query);
    }

    fn query(&self, _state: &RouterState, query: &mut Query) {
        forbid(query);
    }
}

fn forbid(query: &mut Query) {
    let request = query.request();
    debug!(
        event = events::ENTITY_OPERATION_FORBIDDEN,
        component = COMPONENT,
        operation = request.operation().as_str(),
        entity_type = request.entity_type().as_str(),
        "operation not supported for entity type"
    );
    query.set_status(ManagementStatus::forbidden());
}
