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

//! Configured address prefixes (`router.config.address`).

use crate::core_thread::RouterState;
use crate::observability::events;
use crate::query::Query;
use crate::registry::EntityHandler;
use crate::request::{EntityType, Request};
use crate::status::ManagementStatus;
use crate::store::{EntityStore, ManagedEntity};
use serde_json::{json, Value};
use tracing::{debug, error};

const COMPONENT: &str = "config_address";
const CONFIG_ADDRESS_TYPE: &str = EntityType::ConfigAddress.as_str();
const HASH_KEY_PREFIX: char = 'Z';
const MAX_PHASE: u8 = 9;

const ATTR_NAME: usize = 0;
const ATTR_IDENTITY: usize = 1;
const ATTR_TYPE: usize = 2;
const ATTR_PREFIX: usize = 3;
const ATTR_DISTRIBUTION: usize = 4;
const ATTR_WAYPOINT: usize = 5;
const ATTR_INGRESS_PHASE: usize = 6;
const ATTR_EGRESS_PHASE: usize = 7;

const NAME_CONFLICT: &str = "Name conflicts with an existing entity";
const PREFIX_MANDATORY: &str = "prefix field is mandatory";
const PREFIX_CONFLICT: &str = "Address prefix conflicts with an existing entity";
const PHASE_OUT_OF_RANGE: &str = "Phase values must be between 0 and 9";
const NO_SELECTOR: &str = "No name or identity provided";

/// Delivery treatment applied to addresses matching a configured prefix.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Treatment {
    MulticastFlood,
    MulticastOnce,
    AnycastClosest,
    #[default]
    AnycastBalanced,
}

impl Treatment {
    /// Parses a `distribution` attribute; anything unrecognised is balanced.
    pub fn from_distribution(distribution: Option<&str>) -> Self {
        match distribution {
            Some("multicast") => Treatment::MulticastOnce,
            Some("closest") => Treatment::AnycastClosest,
            _ => Treatment::AnycastBalanced,
        }
    }

    pub fn distribution(self) -> &'static str {
        match self {
            Treatment::MulticastFlood | Treatment::MulticastOnce => "multicast",
            Treatment::AnycastClosest => "closest",
            Treatment::AnycastBalanced => "balanced",
        }
    }
}

/// One configured address prefix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressConfig {
    name: Option<String>,
    identity: u64,
    hash_key: String,
    treatment: Treatment,
    in_phase: u8,
    out_phase: u8,
}

impl AddressConfig {
    pub fn prefix(&self) -> Option<&str> {
        self.hash_key.strip_prefix(HASH_KEY_PREFIX)
    }

    pub fn treatment(&self) -> Treatment {
        self.treatment
    }

    pub fn in_phase(&self) -> u8 {
        self.in_phase
    }

    pub fn out_phase(&self) -> u8 {
        self.out_phase
    }

    pub fn is_waypoint(&self) -> bool {
        self.in_phase == 0 && self.out_phase == 1
    }
}

/// Index key of a configured prefix.
pub(crate) fn config_address_key(prefix: &str) -> String {
    format!("{HASH_KEY_PREFIX}{prefix}")
}

impl ManagedEntity for AddressConfig {
    const ATTRIBUTES: &'static [&'static str] = &[
        "name",
        "identity",
        "type",
        "prefix",
        "distribution",
        "waypoint",
        "ingressPhase",
        "egressPhase",
    ];

    fn identity(&self) -> u64 {
        self.identity
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn index_key(&self) -> &str {
        &self.hash_key
    }

    fn attribute(&self, attr_id: usize) -> Value {
        match attr_id {
            ATTR_NAME => json!(self.name),
            ATTR_IDENTITY => json!(self.identity.to_string()),
            ATTR_TYPE => json!(CONFIG_ADDRESS_TYPE),
            ATTR_PREFIX => json!(self.prefix()),
            ATTR_DISTRIBUTION => json!(self.treatment.distribution()),
            ATTR_WAYPOINT => json!(self.is_waypoint()),
            ATTR_INGRESS_PHASE => json!(self.in_phase),
            ATTR_EGRESS_PHASE => json!(self.out_phase),
            _ => Value::Null,
        }
    }
}

/// Full CRUDQ support for configured address prefixes. UPDATE is not
/// supported and answers `403 Forbidden`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigAddressHandler;

impl ConfigAddressHandler {
    /// Validates a CREATE body; the first failing check wins.
    fn validate(
        store: &EntityStore<AddressConfig>,
        request: &Request,
    ) -> Result<PendingAddress, &'static str> {
        if request.name().is_some_and(|name| store.name_in_use(name)) {
            return Err(NAME_CONFLICT);
        }

        let prefix = request.attribute_str("prefix").ok_or(PREFIX_MANDATORY)?;
        let hash_key = config_address_key(prefix);
        if store.contains_key(&hash_key) {
            return Err(PREFIX_CONFLICT);
        }

        let waypoint = request.attribute_bool("waypoint").unwrap_or(false);
        let in_phase = phase(request, "ingressPhase", 0)?;
        let out_phase = phase(request, "egressPhase", if waypoint { 1 } else { 0 })?;

        Ok(PendingAddress {
            hash_key,
            treatment: Treatment::from_distribution(request.attribute_str("distribution")),
            in_phase,
            out_phase,
        })
    }

    /// Position of the record a READ/DELETE targets. Identity takes
    /// precedence over name.
    fn locate(
        store: &EntityStore<AddressConfig>,
        request: &Request,
    ) -> Result<Option<usize>, &'static str> {
        match (request.identity(), request.name()) {
            (Some(identity), _) => Ok(store.position_by_identity(identity)),
            (None, Some(name)) => Ok(store.position_by_name(name)),
            (None, None) => Err(NO_SELECTOR),
        }
    }

    fn reject(query: &mut Query, description: &'static str) {
        let operation = query.request().operation();
        error!(
            event = events::ENTITY_OPERATION_FAILED,
            component = COMPONENT,
            operation = operation.as_str(),
            entity_type = CONFIG_ADDRESS_TYPE,
            reason = description,
            "Error performing {operation} of {CONFIG_ADDRESS_TYPE}: {description}"
        );
        query.set_status(ManagementStatus::bad_request(description));
    }
}

struct PendingAddress {
    hash_key: String,
    treatment: Treatment,
    in_phase: u8,
    out_phase: u8,
}

/// Phase attribute, or `default` when absent. Anything else must be an
/// integer (or integer string) within `0..=MAX_PHASE`.
fn phase(request: &Request, attribute: &str, default: u8) -> Result<u8, &'static str> {
    let Some(value) = request.attribute(attribute) else {
        return Ok(default);
    };
    let parsed = match value {
        Value::Number(number) => number.as_u64().and_then(|n| u8::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u8>().ok(),
        _ => None,
    };
    parsed
        .filter(|phase| *phase <= MAX_PHASE)
        .ok_or(PHASE_OUT_OF_RANGE)
}

impl EntityHandler for ConfigAddressHandler {
    fn create(&self, state: &mut RouterState, query: &mut Query) {
        let pending = match Self::validate(state.config_addresses(), query.request()) {
            Ok(pending) => pending,
            Err(description) => return Self::reject(query, description),
        };

        let address = AddressConfig {
            name: query.request().name().map(str::to_string),
            identity: state.next_identifier(),
            hash_key: pending.hash_key,
            treatment: pending.treatment,
            in_phase: pending.in_phase,
            out_phase: pending.out_phase,
        };

        match state.config_addresses_mut().insert(address) {
            Ok(inserted) => {
                debug!(
                    event = events::ENTITY_CREATE_OK,
                    component = COMPONENT,
                    identity = inserted.identity,
                    prefix = inserted.prefix().unwrap_or_default(),
                    "configured address created"
                );
                query.set_status(ManagementStatus::created());
                query.write_object(inserted);
            }
            Err(_) => Self::reject(query, PREFIX_CONFLICT),
        }
    }

    fn read(&self, state: &RouterState, query: &mut Query) {
        let store = state.config_addresses();
        match Self::locate(store, query.request()) {
            Ok(Some(position)) => {
                if let Some(address) = store.get(position) {
                    query.set_status(ManagementStatus::ok());
                    query.write_object(address);
                }
            }
            Ok(None) => query.set_status(ManagementStatus::not_found()),
            Err(description) => Self::reject(query, description),
        }
    }

    fn delete(&self, state: &mut RouterState, query: &mut Query) {
        let store = state.config_addresses_mut();
        match Self::locate(store, query.request()) {
            Ok(Some(position)) => {
                if let Some(removed) = store.remove(position) {
                    debug!(
                        event = events::ENTITY_DELETE_OK,
                        component = COMPONENT,
                        identity = removed.identity,
                        "configured address deleted"
                    );
                }
                query.set_status(ManagementStatus::no_content());
            }
            Ok(None) => query.set_status(ManagementStatus::not_found()),
            Err(description) => Self::reject(query, description),
        }
    }

    fn query(&self, state: &RouterState, query: &mut Query) {
        query.emit_next(state.config_addresses());
    }
}

#[cfg(test)]
mod tests {
    use super::{config_address_key, AddressConfig, ConfigAddressHandler, Treatment};
    use crate::core_thread::RouterState;
    use crate::query::Query;
    use crate::registry::EntityHandler;
    use crate::request::{EntityType, Operation, Request};
    use crate::status::StatusCode;
    use crate::store::ManagedEntity;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn run(state: &mut RouterState, request: Request) -> Query {
        let handler = ConfigAddressHandler;
        let mut query = Query::new(request.with_reply_to("client"), Arc::new(handler), 64);
        match query.request().operation() {
            Operation::Create => handler.create(state, &mut query),
            Operation::Read => handler.read(state, &mut query),
            Operation::Update => handler.update(state, &mut query),
            Operation::Delete => handler.delete(state, &mut query),
            Operation::Query => handler.query(state, &mut query),
        }
        query
    }

    fn create(body: Value) -> Request {
        Request::new(Operation::Create, EntityType::ConfigAddress).with_body(body)
    }

    fn body_of(query: Query) -> Value {
        query
            .into_response()
            .expect("reply_to should yield response")
            .body
    }

    #[test]
    fn create_defaults_to_balanced_non_waypoint() {
        let mut state = RouterState::new();

        let query = run(&mut state, create(json!({"prefix": "A/foo"})));

        assert_eq!(query.status().code(), StatusCode::Created);
        let body = body_of(query);
        assert_eq!(body["prefix"], json!("A/foo"));
        assert_eq!(body["distribution"], json!("balanced"));
        assert_eq!(body["waypoint"], json!(false));
        assert_eq!(body["ingressPhase"], json!(0));
        assert_eq!(body["egressPhase"], json!(0));
        assert_eq!(body["type"], json!("org.apache.qpid.dispatch.router.config.address"));
        assert_eq!(state.config_addresses().len(), 1);
    }

    #[test]
    fn waypoint_defaults_egress_phase_to_one() {
        let mut state = RouterState::new();

        let query = run(
            &mut state,
            create(json!({"prefix": "queue.", "waypoint": true, "distribution": "multicast"})),
        );

        let body = body_of(query);
        assert_eq!(body["egressPhase"], json!(1));
        assert_eq!(body["waypoint"], json!(true));
        assert_eq!(body["distribution"], json!("multicast"));
    }

    #[test]
    fn explicit_ingress_phase_keeps_waypoint_default_for_egress() {
        let mut state = RouterState::new();

        let query = run(
            &mut state,
            create(json!({"prefix": "p", "waypoint": true, "ingressPhase": 2})),
        );

        let body = body_of(query);
        assert_eq!(body["ingressPhase"], json!(2));
        assert_eq!(body["egressPhase"], json!(1));
    }

    #[test]
    fn create_validation_order_and_descriptions() {
        let mut state = RouterState::new();
        run(&mut state, create(json!({"prefix": "A"})).with_name("a1"));

        let cases = [
            (create(json!({"prefix": "B"})).with_name("a1"), "Name conflicts with an existing entity"),
            (create(json!({"distribution": "closest"})), "prefix field is mandatory"),
            (create(json!({"prefix": "A"})), "Address prefix conflicts with an existing entity"),
            (create(json!({"prefix": "C", "ingressPhase": 10})), "Phase values must be between 0 and 9"),
            (create(json!({"prefix": "C", "egressPhase": -1})), "Phase values must be between 0 and 9"),
            (create(json!({"prefix": "C", "ingressPhase": 10.0})), "Phase values must be between 0 and 9"),
            (create(json!({"prefix": "C", "ingressPhase": 2.5})), "Phase values must be between 0 and 9"),
            (
                create(json!({"prefix": "C", "egressPhase": u64::MAX})),
                "Phase values must be between 0 and 9",
            ),
            (create(json!({"prefix": "C", "ingressPhase": "ten"})), "Phase values must be between 0 and 9"),
            (create(json!({"prefix": "C", "egressPhase": true})), "Phase values must be between 0 and 9"),
        ];

        for (request, expected) in cases {
            let query = run(&mut state, request);
            assert_eq!(query.status().code(), StatusCode::BadRequest);
            assert_eq!(query.status().description(), expected);
            assert_eq!(body_of(query), json!({}));
        }
        assert_eq!(state.config_addresses().len(), 1);
    }

    #[test]
    fn identities_are_unique_and_increasing() {
        let mut state = RouterState::new();

        run(&mut state, create(json!({"prefix": "A"})));
        run(&mut state, create(json!({"prefix": "B"})));

        let identities: Vec<u64> = state
            .config_addresses()
            .iter()
            .map(AddressConfig::identity)
            .collect();
        assert_eq!(identities.len(), 2);
        assert!(identities[0] < identities[1]);
    }

    #[test]
    fn read_by_identity_takes_precedence_over_name() {
        let mut state = RouterState::new();
        run(&mut state, create(json!({"prefix": "A"})).with_name("a1"));
        run(&mut state, create(json!({"prefix": "B"})).with_name("b1"));
        let identity = state.config_addresses().iter().next().map(|a| a.identity());
        let identity = identity.expect("first address should exist").to_string();

        let query = run(
            &mut state,
            Request::new(Operation::Read, EntityType::ConfigAddress)
                .with_identity(identity)
                .with_name("b1"),
        );

        assert_eq!(query.status().code(), StatusCode::Ok);
        assert_eq!(body_of(query)["name"], json!("a1"));
    }

    #[test]
    fn read_and_delete_require_a_selector() {
        let mut state = RouterState::new();

        for operation in [Operation::Read, Operation::Delete] {
            let query = run(&mut state, Request::new(operation, EntityType::ConfigAddress));
            assert_eq!(query.status().code(), StatusCode::BadRequest);
            assert_eq!(query.status().description(), "No name or identity provided");
        }
    }

    #[test]
    fn delete_unknown_identity_is_not_found() {
        let mut state = RouterState::new();

        let query = run(
            &mut state,
            Request::new(Operation::Delete, EntityType::ConfigAddress).with_identity("12345"),
        );

        assert_eq!(query.status().code(), StatusCode::NotFound);
    }

    #[test]
    fn identity_selector_must_match_exactly() {
        let mut state = RouterState::new();
        run(&mut state, create(json!({"prefix": "A"})).with_name("a1"));

        for alias in ["01", "+1", " 1 "] {
            for operation in [Operation::Read, Operation::Delete] {
                let query = run(
                    &mut state,
                    Request::new(operation, EntityType::ConfigAddress).with_identity(alias),
                );
                assert_eq!(query.status().code(), StatusCode::NotFound, "{alias:?}");
            }
        }
        assert_eq!(state.config_addresses().len(), 1);

        let query = run(
            &mut state,
            Request::new(Operation::Read, EntityType::ConfigAddress).with_identity("1"),
        );
        assert_eq!(query.status().code(), StatusCode::Ok);
    }

    #[test]
    fn delete_by_name_frees_the_prefix() {
        let mut state = RouterState::new();
        run(&mut state, create(json!({"prefix": "A"})).with_name("a1"));

        let query = run(
            &mut state,
            Request::new(Operation::Delete, EntityType::ConfigAddress).with_name("a1"),
        );

        assert_eq!(query.status().code(), StatusCode::NoContent);
        assert_eq!(body_of(query), json!({}));
        assert!(!state
            .config_addresses()
            .contains_key(&config_address_key("A")));
        let again = run(&mut state, create(json!({"prefix": "A"})));
        assert_eq!(again.status().code(), StatusCode::Created);
    }

    #[test]
    fn update_is_forbidden() {
        let mut state = RouterState::new();
        run(&mut state, create(json!({"prefix": "A"})).with_name("a1"));

        let query = run(
            &mut state,
            Request::new(Operation::Update, EntityType::ConfigAddress)
                .with_name("a1")
                .with_body(json!({"distribution": "closest"})),
        );

        assert_eq!(query.status().code(), StatusCode::Forbidden);
        let unchanged = state.config_addresses().get(0).map(AddressConfig::treatment);
        assert_eq!(unchanged, Some(Treatment::AnycastBalanced));
    }

    #[test]
    fn unknown_attribute_id_is_null() {
        let mut state = RouterState::new();
        run(&mut state, create(json!({"prefix": "A"})));
        let address = state
            .config_addresses()
            .get(0)
            .expect("address should exist");

        assert_eq!(address.attribute(AddressConfig::ATTRIBUTES.len()), Value::Null);
        assert_eq!(address.attribute(0), Value::Null);
    }

    #[test]
    fn distribution_parsing_falls_back_to_balanced() {
        assert_eq!(Treatment::from_distribution(Some("closest")), Treatment::AnycastClosest);
        assert_eq!(Treatment::from_distribution(Some("fanout")), Treatment::AnycastBalanced);
        assert_eq!(Treatment::from_distribution(None), Treatment::AnycastBalanced);
        assert_eq!(Treatment::MulticastFlood.distribution(), "multicast");
    }
}
