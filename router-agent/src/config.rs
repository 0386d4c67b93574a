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

//! Agent configuration, loadable from JSON5.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::Path;
use std::time::Duration;

const DEFAULT_AGENT_NAME: &str = "router-agent";
pub(crate) const DEFAULT_CORE_THREAD_NAME: &str = "agent-core";
pub(crate) const DEFAULT_DISPATCH_THREAD_NAME: &str = "agent-dispatch";
const DEFAULT_MAX_COLUMNS: usize = 64;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct AgentConfig {
    pub(crate) name: String,
    pub(crate) core_thread_name: String,
    pub(crate) dispatch_thread_name: String,
    pub(crate) max_columns: usize,
    pub(crate) response_delay_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            core_thread_name: DEFAULT_CORE_THREAD_NAME.to_string(),
            dispatch_thread_name: DEFAULT_DISPATCH_THREAD_NAME.to_string(),
            max_columns: DEFAULT_MAX_COLUMNS,
            response_delay_ms: 0,
        }
    }
}

impl AgentConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_json5_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = json5::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json5_str(&contents)
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_columns == 0 {
            return Err(ConfigError::Invalid(
                "max_columns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(json5::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "unable to read agent config: {err}"),
            ConfigError::Parse(err) => write!(f, "unable to parse agent config: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid agent config: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}
