// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregate home metrics.

use chrono::{DateTime, Utc};

use crate::types::SecurityStatus;

/// Aggregate readings shown on the dashboard summary.
///
/// The snapshot is independent of the device collection: it is never
/// recomputed from device state and only changes through explicit
/// [`DeviceStore::update_metrics`](crate::DeviceStore::update_metrics) calls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMetrics {
    /// Indoor temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Energy usage in kWh.
    pub energy: f64,
    /// Security status, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_status: Option<SecurityStatus>,
    /// When the snapshot was created or last updated.
    #[serde(default = "Utc::now")]
    pub last_update: DateTime<Utc>,
}

impl DeviceMetrics {
    /// Default indoor temperature.
    pub const DEFAULT_TEMPERATURE: f64 = 22.0;

    /// Default relative humidity.
    pub const DEFAULT_HUMIDITY: f64 = 45.0;

    /// Default energy reading.
    pub const DEFAULT_ENERGY: f64 = 3.2;

    /// Merges every field set in `patch` and stamps `last_update`.
    pub(crate) fn apply(&mut self, patch: &MetricsPatch, stamp: DateTime<Utc>) {
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if let Some(humidity) = patch.humidity {
            self.humidity = humidity;
        }
        if let Some(energy) = patch.energy {
            self.energy = energy;
        }
        if patch.security_status.is_some() {
            self.security_status = patch.security_status;
        }
        self.last_update = stamp;
    }
}

impl Default for DeviceMetrics {
    fn default() -> Self {
        Self {
            temperature: Self::DEFAULT_TEMPERATURE,
            humidity: Self::DEFAULT_HUMIDITY,
            energy: Self::DEFAULT_ENERGY,
            security_status: Some(SecurityStatus::Secured),
            last_update: Utc::now(),
        }
    }
}

/// A partial update to the metrics snapshot.
///
/// # Examples
///
/// ```
/// use homedeck::state::MetricsPatch;
/// use homedeck::types::SecurityStatus;
///
/// let patch = MetricsPatch::new()
///     .humidity(50.0)
///     .security_status(SecurityStatus::Warning);
/// assert_eq!(patch.humidity, Some(50.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsPatch {
    /// New indoor temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// New relative humidity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// New energy reading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// New security status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_status: Option<SecurityStatus>,
}

impl MetricsPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indoor temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the relative humidity.
    #[must_use]
    pub fn humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    /// Sets the energy reading.
    #[must_use]
    pub fn energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Sets the security status.
    #[must_use]
    pub fn security_status(mut self, status: SecurityStatus) -> Self {
        self.security_status = Some(status);
        self
    }

    /// Returns `true` if the patch sets no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn default_snapshot() {
        let metrics = DeviceMetrics::default();
        assert!((metrics.temperature - 22.0).abs() < f64::EPSILON);
        assert!((metrics.humidity - 45.0).abs() < f64::EPSILON);
        assert!((metrics.energy - 3.2).abs() < f64::EPSILON);
        assert_eq!(metrics.security_status, Some(SecurityStatus::Secured));
    }

    #[test]
    fn apply_merges_only_set_fields() {
        let mut metrics = DeviceMetrics::default();
        let stamp = metrics.last_update + TimeDelta::seconds(1);

        metrics.apply(
            &MetricsPatch::new()
                .energy(4.2)
                .security_status(SecurityStatus::Breached),
            stamp,
        );

        assert!((metrics.energy - 4.2).abs() < f64::EPSILON);
        assert!((metrics.humidity - 45.0).abs() < f64::EPSILON);
        assert_eq!(metrics.security_status, Some(SecurityStatus::Breached));
        assert_eq!(metrics.last_update, stamp);
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let json = serde_json::to_value(DeviceMetrics::default()).unwrap();
        assert_eq!(json["securityStatus"], "secured");
        assert!(json.get("lastUpdate").is_some());
    }

    #[test]
    fn patch_is_empty() {
        assert!(MetricsPatch::new().is_empty());
        assert!(!MetricsPatch::new().temperature(20.0).is_empty());
    }
}
