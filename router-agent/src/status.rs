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

//! Management status codes and the `statusCode`/`statusDescription` pair
//! carried on every response.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// HTTP-style status codes used by the management protocol.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "u16")]
pub enum StatusCode {
    Ok,
    Created,
    NoContent,
    BadRequest,
    Forbidden,
    NotFound,
}

impl StatusCode {
    pub const fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
        }
    }

    /// Default description used when a handler does not supply its own.
    pub const fn description(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
        }
    }

    pub const fn is_success(self) -> bool {
        self.as_u16() / 100 == 2
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.as_u16()
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.description())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementStatus {
    status_code: StatusCode,
    status_description: String,
}

impl ManagementStatus {
    pub fn new(code: StatusCode) -> Self {
        Self::with_description(code, code.description())
    }

    pub fn with_description(code: StatusCode, description: impl Into<String>) -> Self {
        Self {
            status_code: code,
            status_description: description.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::Ok)
    }

    pub fn created() -> Self {
        Self::new(StatusCode::Created)
    }

    pub fn no_content() -> Self {
        Self::new(StatusCode::NoContent)
    }

    pub fn bad_request(description: impl Into<String>) -> Self {
        Self::with_description(StatusCode::BadRequest, description)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::Forbidden)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    pub fn code(&self) -> StatusCode {
        self.status_code
    }

    pub fn description(&self) -> &str {
        &self.status_description
    }

    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }
}

impl Default for ManagementStatus {
    fn default() -> Self {
        Self::ok()
    }
}

impl Display for ManagementStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.status_code.as_u16(),
            self.status_description
        )
    }
}
