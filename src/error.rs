// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `homedeck` library.
//!
//! The store has a single runtime failure mode (the mutation target does not
//! exist). The remaining variants cover building a store from configuration
//! and parsing value types from strings.

use thiserror::Error;

use crate::types::DeviceId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// No device with this id exists in the store.
    #[error("device not found: {0}")]
    DeviceNotFound(DeviceId),

    /// The same device id appears more than once in a seed.
    #[error("duplicate device id: {0}")]
    DuplicateDevice(DeviceId),

    /// Error occurred while parsing a value type.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Store configuration could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised when converting strings into value types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The string does not name a known device type.
    #[error("invalid device type: {0}")]
    InvalidDeviceType(String),

    /// The string does not name a known security status.
    #[error("invalid security status: {0}")]
    InvalidSecurityStatus(String),

    /// The string does not name a known device attribute.
    #[error("invalid device attribute: {0}")]
    InvalidAttribute(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
