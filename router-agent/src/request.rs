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

//! Management requests as handed to the agent by the AMQP adapter.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const ENTITY_TYPE_NAMESPACE: &str = "org.apache.qpid.dispatch.";

/// The five management operations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Query,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
        Operation::Query,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Read => "READ",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Query => "QUERY",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = UnknownNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|operation| operation.as_str() == value)
            .ok_or_else(|| UnknownNameError::new("operation", value))
    }
}

/// Entity types the router exposes through management.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EntityType {
    ConfigAddress,
    ConfigLinkRoute,
    ConfigAutoLink,
    Address,
    Link,
    Connection,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        EntityType::ConfigAddress,
        EntityType::ConfigLinkRoute,
        EntityType::ConfigAutoLink,
        EntityType::Address,
        EntityType::Link,
        EntityType::Connection,
    ];

    /// Fully qualified type name as carried in the `type` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityType::ConfigAddress => "org.apache.qpid.dispatch.router.config.address",
            EntityType::ConfigLinkRoute => "org.apache.qpid.dispatch.router.config.linkRoute",
            EntityType::ConfigAutoLink => "org.apache.qpid.dispatch.router.config.autoLink",
            EntityType::Address => "org.apache.qpid.dispatch.router.address",
            EntityType::Link => "org.apache.qpid.dispatch.router.link",
            EntityType::Connection => "org.apache.qpid.dispatch.connection",
        }
    }

    /// Type name without the `org.apache.qpid.dispatch.` namespace.
    pub fn short_name(self) -> &'static str {
        self.as_str()
            .strip_prefix(ENTITY_TYPE_NAMESPACE)
            .unwrap_or(self.as_str())
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = UnknownNameError;

    /// Accepts either the fully qualified or the namespace-relative name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let short = value.strip_prefix(ENTITY_TYPE_NAMESPACE).unwrap_or(value);
        EntityType::ALL
            .into_iter()
            .find(|entity_type| entity_type.short_name() == short)
            .ok_or_else(|| UnknownNameError::new("entity type", value))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownNameError {
    kind: &'static str,
    value: String,
}

impl UnknownNameError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl Display for UnknownNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown management {}: {}", self.kind, self.value)
    }
}

impl Error for UnknownNameError {}

/// One management request.
///
/// Requests are immutable once posted. `count == 0` means no page limit;
/// `offset` is the zero-based starting row for QUERY. A request without a
/// `reply_to` address still runs but never produces a response.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    operation: Operation,
    entity_type: EntityType,
    name: Option<String>,
    identity: Option<String>,
    attribute_names: Option<Value>,
    count: usize,
    offset: usize,
    correlation_id: Option<Value>,
    reply_to: Option<String>,
    body: Value,
}

impl Request {
    pub fn new(operation: Operation, entity_type: EntityType) -> Self {
        Self {
            operation,
            entity_type,
            name: None,
            identity: None,
            attribute_names: None,
            count: 0,
            offset: 0,
            correlation_id: None,
            reply_to: None,
            body: Value::Null,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Column filter for QUERY. Anything other than a non-empty list selects
    /// every column.
    pub fn with_attribute_names(mut self, attribute_names: Value) -> Self {
        self.attribute_names = Some(attribute_names);
        self
    }

    pub fn with_paging(mut self, count: usize, offset: usize) -> Self {
        self.count = count;
        self.offset = offset;
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: Value) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn attribute_names(&self) -> Option<&Value> {
        self.attribute_names.as_ref()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn correlation_id(&self) -> Option<&Value> {
        self.correlation_id.as_ref()
    }

    pub fn reply_to(&self) -> Option<&str> {
        self.reply_to.as_deref()
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Whether the requester asked for a response.
    pub fn expects_response(&self) -> bool {
        self.reply_to.is_some()
    }

    /// Body attribute by name; JSON `null` counts as absent.
    pub fn attribute(&self, attribute: &str) -> Option<&Value> {
        self.body
            .as_object()?
            .get(attribute)
            .filter(|value| !value.is_null())
    }

    pub fn attribute_str(&self, attribute: &str) -> Option<&str> {
        self.attribute(attribute)?.as_str()
    }

    /// Integer attribute; numeric strings are accepted.
    pub fn attribute_i64(&self, attribute: &str) -> Option<i64> {
        match self.attribute(attribute)? {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn attribute_bool(&self, attribute: &str) -> Option<bool> {
        match self.attribute(attribute)? {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) => text.parse().ok(),
            _ => None,
        }
    }

    pub(crate) fn into_reply_parts(self) -> (Option<String>, Option<Value>) {
        (self.reply_to, self.correlation_id)
    }
}
