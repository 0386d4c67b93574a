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

//! Per-query completion: continue a paged QUERY or emit the response.

use super::ResponseSender;
use crate::core_thread::{query_next, ActionQueue};
use crate::observability::events;
use crate::observability::fields::{self, WorkerContext};
use crate::query::Query;
use crate::request::Operation;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, Level};

const COMPONENT: &str = "response_handler";

/// Consumes queries popped from the outgoing queue.
#[async_trait]
pub(crate) trait ResponseHandler: Send + Sync {
    async fn handle(&self, query: Box<Query>, worker_context: &WorkerContext);
}

/// Default handler: re-queues QUERYs that have rows left within their page,
/// and completes everything else.
pub(crate) struct PagingResponseHandler {
    actions: Arc<ActionQueue>,
    sender: Arc<dyn ResponseSender>,
}

impl PagingResponseHandler {
    pub(crate) fn new(actions: Arc<ActionQueue>, sender: Arc<dyn ResponseSender>) -> Self {
        Self { actions, sender }
    }

    fn wants_next_row(query: &mut Query) -> bool {
        query.request().operation() == Operation::Query
            && query.status().is_success()
            && query.more()
            && !query.record_delivered_row()
    }
}

#[async_trait]
impl ResponseHandler for PagingResponseHandler {
    async fn handle(&self, mut query: Box<Query>, worker_context: &WorkerContext) {
        if Self::wants_next_row(&mut query) {
            debug!(
                event = events::QUERY_CONTINUE,
                component = COMPONENT,
                agent_id = worker_context.agent_id.as_str(),
                delivered = query.delivered(),
                "requesting next query row"
            );
            if let Err(rejected) = self.actions.enqueue(query_next(query)) {
                debug!(
                    event = events::QUERY_CONTINUE_DROPPED,
                    component = COMPONENT,
                    agent_id = worker_context.agent_id.as_str(),
                    action = rejected.label(),
                    reason = fields::REASON_SHUTTING_DOWN,
                    "core closed; abandoning paged query"
                );
            }
            return;
        }

        let operation = query.request().operation();
        let Some(response) = query.into_response() else {
            debug!(
                event = events::RESPONSE_SUPPRESSED,
                component = COMPONENT,
                agent_id = worker_context.agent_id.as_str(),
                operation = operation.as_str(),
                "request carried no reply address"
            );
            return;
        };

        if tracing::enabled!(Level::DEBUG) {
            debug!(
                event = events::RESPONSE_SEND,
                component = COMPONENT,
                agent_id = worker_context.agent_id.as_str(),
                worker_thread = worker_context.worker_thread.as_str(),
                operation = operation.as_str(),
                status_code = response.status_code(),
                reply_to = response.reply_to.as_str(),
                correlation_id = fields::format_correlation_id(response.correlation_id.as_ref()).as_str(),
                more = response.more,
                "sending management response"
            );
        }
        self.sender.send_response(response).await;
    }
}

#[cfg(test)]
mod tests {
    use super::{PagingResponseHandler, ResponseHandler};
    use crate::core_thread::ActionQueue;
    use crate::dispatch::ResponseSender;
    use crate::entities::ConfigAddressHandler;
    use crate::observability::fields::WorkerContext;
    use crate::query::Query;
    use crate::request::{EntityType, Operation, Request};
    use crate::response::ManagementResponse;
    use crate::status::{ManagementStatus, StatusCode};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct CollectingSender {
        responses: Mutex<Vec<ManagementResponse>>,
    }

    #[async_trait]
    impl ResponseSender for CollectingSender {
        async fn send_response(&self, response: ManagementResponse) {
            self.responses.lock().push(response);
        }
    }

    fn handler() -> (PagingResponseHandler, Arc<ActionQueue>, Arc<CollectingSender>) {
        let actions = Arc::new(ActionQueue::new(Arc::new(Notify::new())));
        let sender = Arc::new(CollectingSender::default());
        (
            PagingResponseHandler::new(actions.clone(), sender.clone()),
            actions,
            sender,
        )
    }

    fn worker() -> WorkerContext {
        WorkerContext::new("handler-test", Some("dispatch"))
    }

    /// A QUERY positioned mid-table: status OK with rows remaining.
    fn mid_table_query(request: Request) -> Box<Query> {
        let mut store = crate::store::EntityStore::new();
        for identity in 1..=3 {
            let _ = store.insert(crate::store::entity_store::tests::Row::new(
                identity,
                &format!("row-{identity}"),
                &format!("Zrow-{identity}"),
            ));
        }
        let mut query = Box::new(Query::new(request, Arc::new(ConfigAddressHandler), 64));
        query.emit_next(&store);
        query
    }

    #[tokio::test]
    async fn query_with_rows_left_is_requeued_not_sent() {
        let (handler, actions, sender) = handler();
        let request = Request::new(Operation::Query, EntityType::ConfigAddress).with_reply_to("c");

        handler.handle(mid_table_query(request), &worker()).await;

        assert_eq!(actions.len(), 1);
        assert!(sender.responses.lock().is_empty());
    }

    #[tokio::test]
    async fn page_limit_completes_with_more_set() {
        let (handler, actions, sender) = handler();
        let request = Request::new(Operation::Query, EntityType::ConfigAddress)
            .with_reply_to("c")
            .with_paging(1, 0);

        handler.handle(mid_table_query(request), &worker()).await;

        assert_eq!(actions.len(), 0);
        let responses = sender.responses.lock();
        assert_eq!(responses.len(), 1);
        assert!(responses[0].more);
        assert_eq!(responses[0].results().len(), 1);
    }

    #[tokio::test]
    async fn request_without_reply_to_is_dropped_silently() {
        let (handler, actions, sender) = handler();
        let mut query = Box::new(Query::new(
            Request::new(Operation::Delete, EntityType::ConfigAddress).with_name("x"),
            Arc::new(ConfigAddressHandler),
            64,
        ));
        query.set_status(ManagementStatus::no_content());

        handler.handle(query, &worker()).await;

        assert_eq!(actions.len(), 0);
        assert!(sender.responses.lock().is_empty());
    }

    #[tokio::test]
    async fn closed_core_drops_continuation() {
        let (handler, actions, sender) = handler();
        actions.close();
        let request = Request::new(Operation::Query, EntityType::ConfigAddress).with_reply_to("c");

        handler.handle(mid_table_query(request), &worker()).await;

        assert_eq!(actions.len(), 0);
        assert!(sender.responses.lock().is_empty());
    }

    #[tokio::test]
    async fn error_status_completes_immediately() {
        let (handler, _actions, sender) = handler();
        let mut query = Box::new(Query::new(
            Request::new(Operation::Read, EntityType::ConfigAddress).with_reply_to("c"),
            Arc::new(ConfigAddressHandler),
            64,
        ));
        query.set_status(ManagementStatus::not_found());

        handler.handle(query, &worker()).await;

        let responses = sender.responses.lock();
        assert_eq!(responses[0].status.code(), StatusCode::NotFound);
        assert!(!responses[0].more);
    }
}
