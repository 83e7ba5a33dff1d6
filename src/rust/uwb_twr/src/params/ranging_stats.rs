// Copyright 2022, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This module defines the statistics accumulated over the ranging reports of a session.

use crate::params::ranging_data::RangingPosition;
use crate::utils::getter_field;

/// The running mean and variance of a measured dimension (Welford's algorithm). The samples
/// themselves are not retained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunningSummary {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningSummary {
    fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// The number of samples.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The mean of the samples, if any.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// The sample standard deviation. At least 2 samples are needed.
    pub fn std_dev(&self) -> Option<f64> {
        (self.count > 1).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }
}

/// The statistics of the ranging reports received since ranging started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangingStats {
    total_reports: u64,
    distance: RunningSummary,
    azimuth: RunningSummary,
    elevation: RunningSummary,
}

#[allow(missing_docs)]
impl RangingStats {
    getter_field!(distance, RunningSummary);
    getter_field!(azimuth, RunningSummary);
    getter_field!(elevation, RunningSummary);

    /// Account a new ranging report.
    pub fn update(&mut self, position: &RangingPosition) {
        self.total_reports += 1;
        if let Some(distance) = position.distance_m {
            self.distance.push(distance.into());
        }
        if let Some(azimuth) = position.azimuth_deg {
            self.azimuth.push(azimuth.into());
        }
        if let Some(elevation) = position.elevation_deg {
            self.elevation.push(elevation.into());
        }
    }

    /// The number of reports received, including the ones without a distance.
    pub fn total_reports(&self) -> u64 {
        self.total_reports
    }

    /// The number of reports carrying a distance.
    pub fn ok_reports(&self) -> u64 {
        self.distance.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.unwrap();
        assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
    }

    #[test]
    fn test_empty_stats() {
        let stats = RangingStats::default();
        assert_eq!(stats.total_reports(), 0);
        assert_eq!(stats.distance().mean(), None);
        assert_eq!(stats.distance().std_dev(), None);
    }

    #[test]
    fn test_std_dev_needs_two_samples() {
        let mut stats = RangingStats::default();
        stats.update(&RangingPosition::with_distance(1.5, 0));
        assert_close(stats.distance().mean(), 1.5);
        assert_eq!(stats.distance().std_dev(), None);
    }

    #[test]
    fn test_update() {
        let mut stats = RangingStats::default();
        for (i, distance) in [1.0f32, 2.0, 3.0, 4.0].into_iter().enumerate() {
            stats.update(&RangingPosition {
                distance_m: Some(distance),
                azimuth_deg: Some(10.0),
                elevation_deg: None,
                elapsed_realtime_nanos: i as u64,
            });
        }
        // A report without any measurement.
        stats.update(&RangingPosition::default());

        assert_eq!(stats.total_reports(), 5);
        assert_eq!(stats.ok_reports(), 4);
        assert_close(stats.distance().mean(), 2.5);
        // Sample variance of [1, 2, 3, 4] is 5/3.
        assert_close(stats.distance().std_dev(), (5.0f64 / 3.0).sqrt());
        assert_close(stats.azimuth().mean(), 10.0);
        assert_close(stats.azimuth().std_dev(), 0.0);
        assert_eq!(stats.elevation().count(), 0);
    }
}
