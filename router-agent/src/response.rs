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

//! Completed responses and the body shapes a query accumulates.

use crate::request::Operation;
use crate::status::ManagementStatus;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// A completed management response, ready for the AMQP adapter.
///
/// `more` is set when a paged QUERY stopped at its row limit with rows still
/// remaining; the requester continues with a larger `offset`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementResponse {
    pub correlation_id: Option<Value>,
    pub reply_to: String,
    #[serde(flatten)]
    pub status: ManagementStatus,
    pub body: Value,
    pub more: bool,
}

impl ManagementResponse {
    pub fn status_code(&self) -> u16 {
        self.status.code().as_u16()
    }

    /// Rows of a QUERY body, empty for any other body shape.
    pub fn results(&self) -> &[Value] {
        self.body
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn attribute_names(&self) -> &[Value] {
        self.body
            .get("attributeNames")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Output payload built up while a query runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum ResponseBody {
    #[default]
    Empty,
    Map(Map<String, Value>),
    Table {
        attribute_names: Vec<Value>,
        results: Vec<Value>,
    },
}

impl ResponseBody {
    pub(crate) fn push_row(&mut self, attribute_names: &[Value], row: Value) {
        match self {
            ResponseBody::Table { results, .. } => results.push(row),
            body => {
                *body = ResponseBody::Table {
                    attribute_names: attribute_names.to_vec(),
                    results: vec![row],
                }
            }
        }
    }

    /// Final body for the response. Failed operations always carry an empty map.
    pub(crate) fn into_value(self, operation: Operation, status: &ManagementStatus) -> Value {
        if !status.is_success() {
            return Value::Object(Map::new());
        }

        match (operation, self) {
            (
                Operation::Query,
                ResponseBody::Table {
                    attribute_names,
                    results,
                },
            ) => json!({
                "attributeNames": attribute_names,
                "results": results,
            }),
            (Operation::Query, _) => json!({
                "attributeNames": [],
                "results": [],
            }),
            (Operation::Delete, _) => Value::Object(Map::new()),
            (_, ResponseBody::Map(map)) => Value::Object(map),
            (_, _) => Value::Object(Map::new()),
        }
    }
}
