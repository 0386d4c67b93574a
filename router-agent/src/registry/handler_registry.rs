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

use super::EntityHandler;
use crate::entities::{ConfigAddressHandler, UnsupportedEntityHandler};
use crate::request::EntityType;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps each entity type to the handler serving its operations.
///
/// Registration happens before the agent starts; the table is read-only once
/// the core thread owns it.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EntityType, Arc<dyn EntityHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers for the router's built-in entity types.
    ///
    /// Address configuration is fully managed; link routes, auto links,
    /// runtime addresses, links and connections answer every operation with
    /// `403 Forbidden`.
    pub fn router_defaults() -> Self {
        let unsupported: Arc<dyn EntityHandler> = Arc::new(UnsupportedEntityHandler);
        let mut registry = Self::new();
        registry.register(EntityType::ConfigAddress, Arc::new(ConfigAddressHandler));
        for entity_type in [
            EntityType::ConfigLinkRoute,
            EntityType::ConfigAutoLink,
            EntityType::Address,
            EntityType::Link,
            EntityType::Connection,
        ] {
            registry.register(entity_type, unsupported.clone());
        }
        registry
    }

    /// Registers `handler` for `entity_type`, replacing any previous one.
    pub fn register(
        &mut self,
        entity_type: EntityType,
        handler: Arc<dyn EntityHandler>,
    ) -> &mut Self {
        self.handlers.insert(entity_type, handler);
        self
    }

    pub fn get(&self, entity_type: EntityType) -> Option<Arc<dyn EntityHandler>> {
        self.handlers.get(&entity_type).cloned()
    }

    pub fn is_registered(&self, entity_type: EntityType) -> bool {
        self.handlers.contains_key(&entity_type)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
