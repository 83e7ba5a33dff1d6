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

//! This module defines the measurement data delivered by the platform ranging service.

/// A single ranging measurement towards the peer device.
///
/// Each dimension is optional since the hardware reports a subset of them depending on its
/// antenna configuration (e.g. a single-antenna DWM3001CDK reports no angle of arrival).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangingPosition {
    /// The distance to the peer, in meters.
    pub distance_m: Option<f32>,
    /// The azimuth angle of arrival, in degrees.
    pub azimuth_deg: Option<f32>,
    /// The elevation angle of arrival, in degrees.
    pub elevation_deg: Option<f32>,
    /// Nanoseconds since an arbitrary monotonic origin.
    pub elapsed_realtime_nanos: u64,
}

impl RangingPosition {
    /// Create a position that only carries the distance.
    pub fn with_distance(distance_m: f32, elapsed_realtime_nanos: u64) -> Self {
        Self { distance_m: Some(distance_m), elapsed_realtime_nanos, ..Default::default() }
    }

    /// Whether the report carries any measured dimension.
    pub fn has_measurement(&self) -> bool {
        self.distance_m.is_some() || self.azimuth_deg.is_some() || self.elevation_deg.is_some()
    }
}

/// The event emitted by the ranging stream of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum RangingEvent {
    /// A new measurement is available.
    Position(RangingPosition),
    /// The peer left the session. No more events follow.
    PeerDisconnected,
}
