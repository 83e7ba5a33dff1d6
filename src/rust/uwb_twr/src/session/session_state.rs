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

//! This module defines the observable state of the ranging session controller.

use crate::error::Error;
use crate::params::ranging_data::RangingPosition;
use crate::params::ranging_params::RangingRole;
use crate::params::ranging_stats::RangingStats;
use crate::params::uwb_address::UwbShortAddress;

/// The text shown in place of the local address while no session is prepared.
pub const LOCAL_ADDRESS_PLACEHOLDER: &str = "--:--";

/// The lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    /// No session handle is held.
    #[default]
    Idle,
    /// The session negotiation is in flight.
    Preparing,
    /// The session handle is held and ranging may be started.
    Prepared,
    /// The ranging event stream is subscribed.
    Ranging,
}

/// The reason why the ranging is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The client called stop().
    Requested,
    /// The platform reported that the peer disconnected.
    PeerDisconnected,
    /// The event stream closed without a disconnection event.
    StreamClosed,
}

/// The snapshot of the controller, published after every transition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerState {
    /// The current phase.
    pub phase: SessionPhase,
    /// The role requested by the latest prepare().
    pub role: Option<RangingRole>,
    /// The local address of the prepared session.
    pub local_address: Option<UwbShortAddress>,
    /// The peer of the ranging session.
    pub peer_address: Option<UwbShortAddress>,
    /// The latest position. It is kept after the ranging stops.
    pub position: RangingPosition,
    /// The statistics since the ranging started.
    pub stats: RangingStats,
    /// The latest failure reported by the platform.
    pub last_error: Option<Error>,
}

impl ControllerState {
    /// Whether the event stream is subscribed.
    pub fn ranging_active(&self) -> bool {
        self.phase == SessionPhase::Ranging
    }

    /// Whether a session handle is held.
    pub fn session_prepared(&self) -> bool {
        matches!(self.phase, SessionPhase::Prepared | SessionPhase::Ranging)
    }

    /// The local address in the `XX:XX` format, or the placeholder while no session is prepared.
    pub fn local_address_text(&self) -> String {
        match self.local_address {
            Some(address) => address.to_string(),
            None => LOCAL_ADDRESS_PLACEHOLDER.to_string(),
        }
    }
}
