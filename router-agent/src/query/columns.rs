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

//! Attribute-name filter resolution for QUERY tables.

use crate::store::ManagedEntity;
use serde_json::Value;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Column {
    Attribute(usize),
    Null,
}

/// Columns a QUERY emits, resolved once per query.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ColumnSelection {
    columns: Vec<Column>,
    headers: Vec<Value>,
}

impl ColumnSelection {
    /// Resolves `filter` against `known` attribute names.
    ///
    /// A missing filter, a non-list, an empty list, or one with
    /// `max_columns` or more entries selects every known attribute. Entries
    /// that are not strings or name no known attribute yield a `null`
    /// column under the requested header.
    pub(crate) fn resolve(filter: Option<&Value>, known: &[&str], max_columns: usize) -> Self {
        let requested = match filter.and_then(Value::as_array) {
            Some(names) if !names.is_empty() && names.len() < max_columns => names,
            _ => return Self::all(known),
        };

        let (columns, headers): (Vec<Column>, Vec<Value>) = requested
            .iter()
            .map(|requested_name| {
                let attr_id = requested_name
                    .as_str()
                    .and_then(|name| known.iter().position(|known_name| *known_name == name));
                match attr_id {
                    Some(attr_id) => (Column::Attribute(attr_id), Value::from(known[attr_id])),
                    None => (Column::Null, requested_name.clone()),
                }
            })
            .unzip();

        Self { columns, headers }
    }

    fn all(known: &[&str]) -> Self {
        Self {
            columns: (0..known.len()).map(Column::Attribute).collect(),
            headers: known.iter().map(|name| Value::from(*name)).collect(),
        }
    }

    pub(crate) fn headers(&self) -> &[Value] {
        &self.headers
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }

    pub(crate) fn row<E: ManagedEntity>(&self, entity: &E) -> Value {
        Value::Array(
            self.columns
                .iter()
                .map(|column| match column {
                    Column::Attribute(attr_id) => entity.attribute(*attr_id),
                    Column::Null => Value::Null,
                })
                .collect(),
        )
    }
}
