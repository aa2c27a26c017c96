// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `homedeck` - the device state store behind a smart-home control panel.
//!
//! This library keeps the panel's devices and its aggregate metrics in
//! memory, applies toggles and partial updates to them, and tells the views
//! about every change as it happens.
//!
//! # Features
//!
//! - **Typed devices**: lights, thermostats, fans, cameras and locks with
//!   their type-specific attributes
//! - **Ordered collection**: insertion order for display, O(1) lookup by id
//! - **Partial updates**: merge any subset of fields into a device or the
//!   metrics snapshot
//! - **Synchronous observers**: callbacks run inside the mutating call
//! - **Async event stream**: the same events over a broadcast channel
//!
//! # Quick Start
//!
//! ```
//! use homedeck::{DeviceStore, Error};
//! use homedeck::state::{DevicePatch, NewDevice};
//! use homedeck::subscription::Subscribable;
//! use homedeck::types::{DeviceId, DeviceType};
//!
//! let store = DeviceStore::with_demo_devices();
//!
//! // Observe changes
//! store.on_device_changed(|device| {
//!     println!("{} changed", device.name());
//! });
//!
//! // Flip the living room light
//! let light = store.toggle_device(&DeviceId::from("1"))?;
//! assert!(!light.is_active());
//!
//! // Set the bedroom thermostat
//! let ac = store.update_device(&DeviceId::from("2"), DevicePatch::new().temperature(25.0))?;
//! assert_eq!(ac.temperature(), Some(25.0));
//!
//! // Add a device; the store assigns its id
//! let hallway = store.add_device(NewDevice::new("Hallway Light", DeviceType::Light, "Hallway"));
//! assert_eq!(store.list_devices().last(), Some(&hallway));
//!
//! // Unknown ids are reported
//! assert!(matches!(
//!     store.toggle_device(&DeviceId::from("nonexistent")),
//!     Err(Error::DeviceNotFound(_))
//! ));
//! # Ok::<(), Error>(())
//! ```

pub mod error;
pub mod event;
pub mod state;
pub mod store;
pub mod subscription;
pub mod types;

pub use error::{Error, Result, ValueError};
pub use event::{EventBus, StoreEvent};
pub use state::{Device, DeviceMetrics, DevicePatch, MetricsPatch, NewDevice, StoreState};
pub use store::{DeviceStore, DeviceSummary, StoreConfig};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{DeviceAttribute, DeviceId, DeviceType, SecurityStatus};
