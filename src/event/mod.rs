// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Store change events.
//!
//! Every successful store mutation produces one [`StoreEvent`]. The store
//! hands it to its synchronous callbacks (see [`crate::subscription`]) and
//! then publishes it on an [`EventBus`] for async consumers.

mod event_bus;
mod store_event;

pub use event_bus::EventBus;
pub use store_event::StoreEvent;
