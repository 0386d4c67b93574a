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

use crate::response::ManagementResponse;
use async_trait::async_trait;

/// Delivers completed responses to the requester, typically over AMQP.
///
/// Called on the dispatch thread, one response at a time, in completion
/// order.
#[async_trait]
pub trait ResponseSender: Send + Sync {
    async fn send_response(&self, response: ManagementResponse);
}
