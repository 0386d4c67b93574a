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

use crate::entities::AddressConfig;
use crate::store::EntityStore;

/// Router configuration owned by the core thread.
#[derive(Debug)]
pub struct RouterState {
    next_identity: u64,
    config_addresses: EntityStore<AddressConfig>,
}

impl RouterState {
    pub fn new() -> Self {
        Self {
            next_identity: 1,
            config_addresses: EntityStore::new(),
        }
    }

    /// Allocates the next agent-unique entity identity.
    pub fn next_identifier(&mut self) -> u64 {
        let identity = self.next_identity;
        self.next_identity += 1;
        identity
    }

    pub fn config_addresses(&self) -> &EntityStore<AddressConfig> {
        &self.config_addresses
    }

    pub fn config_addresses_mut(&mut self) -> &mut EntityStore<AddressConfig> {
        &mut self.config_addresses
    }
}

impl Default for RouterState {
    fn default() -> Self {
        Self::new()
    }
}
