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

//! This module defines the callback through which the controller notifies its client.

use log::debug;

use crate::error::Error;
use crate::params::ranging_data::RangingPosition;
use crate::params::ranging_params::RangingRole;
use crate::params::uwb_address::UwbShortAddress;
use crate::session::session_state::StopReason;

/// The callback of the ranging session controller. The methods are invoked from the
/// controller's task, after the new state is published.
pub trait RangingSessionCallback: 'static + Send {
    /// A session handle is obtained. |local_address| should be shown to the operator.
    fn on_session_prepared(&mut self, role: RangingRole, local_address: UwbShortAddress);

    /// The ranging with |peer_address| is started.
    fn on_ranging_started(&mut self, peer_address: UwbShortAddress);

    /// A new position is received.
    fn on_position_updated(&mut self, position: RangingPosition);

    /// The ranging is stopped and the session handle is released.
    fn on_ranging_stopped(&mut self, reason: StopReason);

    /// The platform failed to prepare the session or to start ranging.
    fn on_session_failed(&mut self, error: Error);
}

/// The placeholder of RangingSessionCallback. All the methods do nothing.
pub struct NopRangingSessionCallback {}

impl RangingSessionCallback for NopRangingSessionCallback {
    fn on_session_prepared(&mut self, role: RangingRole, local_address: UwbShortAddress) {
        debug!("NopRangingSessionCallback::on_session_prepared({:?}, {})", role, local_address);
    }

    fn on_ranging_started(&mut self, peer_address: UwbShortAddress) {
        debug!("NopRangingSessionCallback::on_ranging_started({})", peer_address);
    }

    fn on_position_updated(&mut self, position: RangingPosition) {
        debug!("NopRangingSessionCallback::on_position_updated({:?})", position);
    }

    fn on_ranging_stopped(&mut self, reason: StopReason) {
        debug!("NopRangingSessionCallback::on_ranging_stopped({:?})", reason);
    }

    fn on_session_failed(&mut self, error: Error) {
        debug!("NopRangingSessionCallback::on_session_failed({:?})", error);
    }
}
