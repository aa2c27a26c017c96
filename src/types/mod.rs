// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the store and its consumers.
//!
//! # Types
//!
//! - [`DeviceId`] - Opaque, immutable device identifier
//! - [`DeviceType`] - Closed set of device kinds
//! - [`DeviceAttribute`] - Type-specific optional attributes
//! - [`SecurityStatus`] - Home security status in the metrics snapshot

mod device_id;
mod device_type;
mod security_status;

pub use device_id::DeviceId;
pub use device_type::{DeviceAttribute, DeviceType};
pub use security_status::SecurityStatus;
