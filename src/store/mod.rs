// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The observable device store.
//!
//! [`DeviceStore`] owns the device collection and the metrics snapshot, and
//! is the only way to change them. Views read snapshots from it and register
//! callbacks to learn about changes.
//!
//! # Examples
//!
//! ## Wiring a view
//!
//! ```
//! use std::sync::Arc;
//!
//! use homedeck::DeviceStore;
//! use homedeck::subscription::Subscribable;
//! use homedeck::types::DeviceId;
//!
//! let store = Arc::new(DeviceStore::with_demo_devices());
//!
//! // Re-render on every change, reading the post-change state
//! let view_store = Arc::downgrade(&store);
//! store.on_store_changed(move |_event| {
//!     if let Some(store) = view_store.upgrade() {
//!         println!("Active devices: {}", store.summary());
//!     }
//! });
//!
//! store.toggle_device(&DeviceId::from("2")).unwrap();
//! ```
//!
//! ## Async consumers
//!
//! ```
//! use homedeck::DeviceStore;
//! use homedeck::state::MetricsPatch;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = DeviceStore::new();
//! let mut events = store.subscribe();
//!
//! store.update_metrics(MetricsPatch::new().humidity(52.0));
//!
//! let event = events.recv().await.unwrap();
//! assert!(event.is_metrics());
//! # }
//! ```

mod device_store;
mod store_config;
mod summary;

pub use device_store::DeviceStore;
pub use store_config::StoreConfig;
pub use summary::DeviceSummary;
