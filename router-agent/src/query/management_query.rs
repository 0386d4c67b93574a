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

use super::columns::ColumnSelection;
use crate::registry::EntityHandler;
use crate::request::{Operation, Request};
use crate::response::{ManagementResponse, ResponseBody};
use crate::status::ManagementStatus;
use crate::store::{EntityStore, ManagedEntity};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// State for one in-flight management request.
///
/// A query is owned by exactly one stage at a time: the core thread while an
/// action runs, the outgoing queue while it waits for dispatch, and the
/// response handler while a response is produced or the next row is
/// requested. It is dropped once its response is complete.
pub struct Query {
    request: Request,
    handler: Arc<dyn EntityHandler>,
    status: ManagementStatus,
    more: bool,
    cursor: Option<usize>,
    delivered: usize,
    max_columns: usize,
    columns: Option<ColumnSelection>,
    body: ResponseBody,
}

impl Query {
    pub(crate) fn new(request: Request, handler: Arc<dyn EntityHandler>, max_columns: usize) -> Self {
        Self {
            request,
            handler,
            status: ManagementStatus::default(),
            more: false,
            cursor: None,
            delivered: 0,
            max_columns,
            columns: None,
            body: ResponseBody::Empty,
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn status(&self) -> &ManagementStatus {
        &self.status
    }

    pub fn set_status(&mut self, status: ManagementStatus) {
        self.status = status;
    }

    /// Whether rows remain after the one most recently emitted.
    pub fn more(&self) -> bool {
        self.more
    }

    pub(crate) fn handler(&self) -> Arc<dyn EntityHandler> {
        self.handler.clone()
    }

    /// Rows handed to the response handler for the current page.
    pub(crate) fn delivered(&self) -> usize {
        self.delivered
    }

    /// Moves the cursor one row forward and returns that row.
    ///
    /// The first call starts at the request's `offset`. Returns `None` and
    /// clears `more` once the cursor passes the end of `store`; rows removed
    /// between calls simply shorten the walk.
    pub fn advance<'a, E: ManagedEntity>(&mut self, store: &'a EntityStore<E>) -> Option<&'a E> {
        let len = store.len();
        let position = self.cursor.unwrap_or(self.request.offset());

        if position >= len {
            self.cursor = Some(position);
            self.more = false;
            return None;
        }

        self.cursor = Some(position + 1);
        self.more = position + 1 < len;
        store.get(position)
    }

    /// One QUERY step: advance the cursor and emit the row it lands on.
    pub fn emit_next<E: ManagedEntity>(&mut self, store: &EntityStore<E>) {
        self.status = ManagementStatus::ok();
        self.ensure_table::<E>();
        if let Some(entity) = self.advance(store) {
            self.write_object(entity);
        }
    }

    /// Renders `entity` into the response body.
    ///
    /// QUERY appends a row of the selected columns; CREATE, READ and UPDATE
    /// replace the body with the full attribute map. Nothing is rendered for
    /// requests that expect no response.
    pub fn write_object<E: ManagedEntity>(&mut self, entity: &E) {
        if !self.request.expects_response() {
            return;
        }

        match self.request.operation() {
            Operation::Query => {
                self.ensure_table::<E>();
                if let Some(columns) = &self.columns {
                    let row = columns.row(entity);
                    self.body.push_row(columns.headers(), row);
                }
            }
            Operation::Create | Operation::Read | Operation::Update => {
                self.body = ResponseBody::Map(entity.attribute_map());
            }
            Operation::Delete => {}
        }
    }

    fn ensure_table<E: ManagedEntity>(&mut self) {
        if self.columns.is_some() || !self.request.expects_response() {
            return;
        }

        let columns = ColumnSelection::resolve(
            self.request.attribute_names(),
            E::ATTRIBUTES,
            self.max_columns,
        );
        self.body = ResponseBody::Table {
            attribute_names: columns.headers().to_vec(),
            results: Vec::new(),
        };
        self.columns = Some(columns);
    }

    /// Counts a row delivered to the response handler. Returns `true` once the
    /// page limit is reached; a zero `count` never limits.
    pub(crate) fn record_delivered_row(&mut self) -> bool {
        self.delivered += 1;
        let count = self.request.count();
        count != 0 && self.delivered >= count
    }

    /// Final response, or `None` when the requester gave no reply address.
    pub(crate) fn into_response(self) -> Option<ManagementResponse> {
        let operation = self.request.operation();
        let (reply_to, correlation_id) = self.request.into_reply_parts();
        let reply_to = reply_to?;
        let more = self.more && self.status.is_success();
        let body = self.body.into_value(operation, &self.status);

        Some(ManagementResponse {
            correlation_id,
            reply_to,
            status: self.status,
            body,
            more,
        })
    }
}

impl Debug for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("request", &self.request)
            .field("status", &self.status)
            .field("more", &self.more)
            .field("cursor", &self.cursor)
            .field("delivered", &self.delivered)
            .finish_non_exhaustive()
    }
}
