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

use crate::registry::EntityHandler;

/// Handler for entity types the agent lists but does not manage: every
/// operation answers `403 Forbidden`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedEntityHandler;

impl EntityHandler for UnsupportedEntityHandler {}

#[cfg(test)]
mod tests {
    use super::UnsupportedEntityHandler;
    use crate::core_thread::RouterState;
    use crate::query::Query;
    use crate::registry::EntityHandler;
    use crate::request::{EntityType, Operation, Request};
    use crate::status::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn every_operation_is_forbidden_and_state_untouched() {
        let handler = UnsupportedEntityHandler;
        let mut state = RouterState::new();

        for operation in Operation::ALL {
            let request = Request::new(operation, EntityType::ConfigLinkRoute)
                .with_name("lr1")
                .with_body(json!({"prefix": "A"}));
            let mut query = Query::new(request, Arc::new(UnsupportedEntityHandler), 64);

            match operation {
                Operation::Create => handler.create(&mut state, &mut query),
                Operation::Read => handler.read(&state, &mut query),
                Operation::Update => handler.update(&mut state, &mut query),
                Operation::Delete => handler.delete(&mut state, &mut query),
                Operation::Query => handler.query(&state, &mut query),
            }

            assert_eq!(query.status().code(), StatusCode::Forbidden);
            assert!(!query.more());
        }
        assert!(state.config_addresses().is_empty());
    }
}
