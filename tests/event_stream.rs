// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the async event stream.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use homedeck::state::{DevicePatch, MetricsPatch, NewDevice};
use homedeck::store::{DeviceStore, StoreConfig};
use homedeck::subscription::Subscribable;
use homedeck::types::{DeviceId, DeviceType};
use homedeck::StoreEvent;
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::test]
async fn events_arrive_in_mutation_order() {
    let store = DeviceStore::with_demo_devices();
    let mut events = store.subscribe();

    store.toggle_device(&DeviceId::from("1")).unwrap();
    let added = store.add_device(NewDevice::new("Hallway Light", DeviceType::Light, "Hallway"));
    store.remove_device(added.id()).unwrap();
    store.update_metrics(MetricsPatch::new().temperature(21.0));

    assert!(matches!(events.recv().await.unwrap(), StoreEvent::DeviceToggled { .. }));
    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::DeviceAdded {
            device: added.clone()
        }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::DeviceRemoved { device: added }
    );
    assert!(events.recv().await.unwrap().is_metrics());
}

#[tokio::test]
async fn failed_mutation_publishes_nothing() {
    let store = DeviceStore::with_demo_devices();
    let mut events = store.subscribe();

    assert!(store.remove_device(&DeviceId::from("missing")).is_err());

    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn late_subscriber_misses_earlier_events() {
    let store = DeviceStore::with_demo_devices();
    store.toggle_device(&DeviceId::from("1")).unwrap();

    let mut events = store.subscribe();
    store.toggle_device(&DeviceId::from("2")).unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.device_id(), Some(&DeviceId::from("2")));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn small_capacity_lags_slow_subscriber() {
    let store = DeviceStore::from_config(StoreConfig::demo().with_event_capacity(1)).unwrap();
    let mut events = store.subscribe();

    store.toggle_device(&DeviceId::from("1")).unwrap();
    store.toggle_device(&DeviceId::from("2")).unwrap();

    assert!(matches!(events.try_recv(), Err(TryRecvError::Lagged(1))));
    assert_eq!(
        events.try_recv().unwrap().device_id(),
        Some(&DeviceId::from("2"))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn store_shared_across_tasks() {
    let store = Arc::new(DeviceStore::with_demo_devices());
    let mut events = store.subscribe();

    let writer = Arc::clone(&store);
    tokio::spawn(async move {
        writer
            .update_device(&DeviceId::from("2"), DevicePatch::new().temperature(24.0))
            .unwrap();
    })
    .await
    .unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.device().and_then(|d| d.temperature()), Some(24.0));
    assert_eq!(
        store.get_device(&DeviceId::from("2")).unwrap().temperature(),
        Some(24.0)
    );
}

#[tokio::test]
async fn callback_mutation_follows_outer_event() {
    let store = Arc::new(DeviceStore::with_demo_devices());
    let mut events = store.subscribe();
    let lamp = DeviceId::from("1");

    let view_store = Arc::downgrade(&store);
    let toggled_back = Arc::new(AtomicBool::new(false));
    let toggled_back_clone = toggled_back.clone();
    store.on_device_changed(move |device| {
        if toggled_back_clone.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(store) = view_store.upgrade() {
            store.toggle_device(device.id()).unwrap();
        }
    });

    store.toggle_device(&lamp).unwrap();

    let first = events.recv().await.unwrap();
    let second = events.recv().await.unwrap();
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    assert!(!first.device().unwrap().is_active());
    assert!(second.device().unwrap().is_active());
    assert_eq!(second.device(), store.get_device(&lamp).as_ref());
}

#[test]
fn concurrent_writers_stream_matches_store() {
    let store = Arc::new(DeviceStore::with_demo_devices());
    let mut events = store.subscribe();
    let lamp = DeviceId::from("1");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let lamp = lamp.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    store.toggle_device(&lamp).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut last = None;
    let mut previous_stamp = None;
    while let Ok(event) = events.try_recv() {
        let device = event.device().unwrap().clone();
        if let Some(stamp) = previous_stamp {
            assert!(device.last_updated() > stamp);
        }
        previous_stamp = Some(device.last_updated());
        last = Some(device);
    }

    assert_eq!(last, store.get_device(&lamp));
    assert_eq!(store.revision(), 100);
}
