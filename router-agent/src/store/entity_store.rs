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

//! Insertion-ordered entity list with a unique-key index.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// A record that can be stored, listed and rendered by management.
pub trait ManagedEntity {
    /// Attribute names in attribute-id order.
    const ATTRIBUTES: &'static [&'static str];

    /// Agent-unique identity, stable for the record's lifetime.
    fn identity(&self) -> u64;

    fn name(&self) -> Option<&str>;

    /// Key under which the record is indexed; unique within a store.
    fn index_key(&self) -> &str;

    /// Value of the attribute at `attr_id`, `null` when out of range or unset.
    fn attribute(&self, attr_id: usize) -> Value;

    fn attribute_map(&self) -> Map<String, Value> {
        Self::ATTRIBUTES
            .iter()
            .enumerate()
            .map(|(attr_id, name)| (name.to_string(), self.attribute(attr_id)))
            .collect()
    }
}

/// Records in insertion order plus a key index for conflict checks.
///
/// Row positions are what QUERY cursors walk, so removal shifts later rows
/// down by one.
#[derive(Debug)]
pub struct EntityStore<E> {
    entries: Vec<E>,
    index: HashMap<String, u64>,
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E: ManagedEntity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&E> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn name_in_use(&self, name: &str) -> bool {
        self.position_by_name(name).is_some()
    }

    /// Matches `identity` against the decimal rendering of each record's identity.
    pub fn position_by_identity(&self, identity: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.identity().to_string() == identity)
    }

    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name() == Some(name))
    }

    /// Appends `entity`, handing it back untouched if its key is taken.
    pub fn insert(&mut self, entity: E) -> Result<&E, E> {
        if self.index.contains_key(entity.index_key()) {
            return Err(entity);
        }

        self.index
            .insert(entity.index_key().to_string(), entity.identity());
        self.entries.push(entity);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Removes the record at `position` along with its index entry.
    pub fn remove(&mut self, position: usize) -> Option<E> {
        if position >= self.entries.len() {
            return None;
        }

        let entity = self.entries.remove(position);
        self.index.remove(entity.index_key());
        Some(entity)
    }
}
