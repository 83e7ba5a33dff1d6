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

//! This module defines the RangingService, the blocking interface of the ranging session
//! controller.

use std::time::Duration;

use log::{debug, error};
use tokio::runtime::Runtime;

use crate::error::{Error, Result};
use crate::params::ranging_params::{RangingParametersBuilder, RangingRole};
use crate::session::ranging_platform::RangingPlatform;
use crate::session::session_callback::RangingSessionCallback;
use crate::session::session_controller::RangingSessionController;
use crate::session::session_state::ControllerState;

/// The blocking wrapper of [`RangingSessionController`]. It owns the tokio runtime where the
/// controller runs, so it must not be used, nor dropped, within an async context.
pub struct RangingService {
    runtime: Runtime,
    controller: RangingSessionController,
}

impl RangingService {
    /// Create a new RangingService instance.
    pub(super) fn new<P: RangingPlatform, C: RangingSessionCallback>(
        runtime: Runtime,
        platform: P,
        callback: C,
        params_template: RangingParametersBuilder,
    ) -> Self {
        let controller = runtime.block_on(async move {
            RangingSessionController::new(platform, callback, params_template)
        });
        debug!("RangingService is created");

        Self { runtime, controller }
    }

    /// Negotiate a new session where the local device takes |role|. The outcome is published
    /// through the state.
    pub fn prepare(&self, role: RangingRole) -> Result<()> {
        self.runtime.block_on(self.controller.prepare(role))
    }

    /// Start ranging with the peer whose address is |peer_address| in the `XX:XX` format.
    pub fn start(&self, peer_address: &str) -> Result<()> {
        self.runtime.block_on(self.controller.start(peer_address))
    }

    /// Stop ranging and release the session.
    pub fn stop(&self) -> Result<()> {
        self.runtime.block_on(self.controller.stop())
    }

    /// The latest state of the controller.
    pub fn state(&self) -> ControllerState {
        self.controller.state()
    }

    /// Block until the state satisfies |predicate|, at most for |duration|.
    pub fn wait_for_state<F>(&self, predicate: F, duration: Duration) -> Result<ControllerState>
    where
        F: FnMut(&ControllerState) -> bool,
    {
        self.runtime.block_on(async {
            tokio::time::timeout(duration, self.controller.wait_for_state(predicate))
                .await
                .map_err(|_| {
                    error!("Timeout waiting for the expected state");
                    Error::Timeout
                })?
        })
    }

    /// The async interface, for the clients which already run within a tokio runtime.
    pub fn controller(&self) -> &RangingSessionController {
        &self.controller
    }

    #[cfg(test)]
    fn block_on_for_testing<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::params::ranging_data::{RangingEvent, RangingPosition};
    use crate::params::uwb_address::UwbShortAddress;
    use crate::service::ranging_service_builder::default_runtime;
    use crate::session::mock_ranging_platform::MockRangingPlatform;
    use crate::session::mock_session_callback::MockRangingSessionCallback;
    use crate::session::session_state::{SessionPhase, StopReason};
    use crate::utils::init_test_logging;

    const TIMEOUT: Duration = Duration::from_secs(1);

    fn setup_ranging_service(
        platform: &MockRangingPlatform,
        callback: &MockRangingSessionCallback,
    ) -> RangingService {
        init_test_logging();
        RangingService::new(
            default_runtime().unwrap(),
            platform.clone(),
            callback.clone(),
            RangingParametersBuilder::new(),
        )
    }

    #[test]
    fn test_ranging() {
        let local_address = UwbShortAddress::new([0x12, 0x34]);
        let peer_address = UwbShortAddress::new([0xab, 0xcd]);
        let position = RangingPosition {
            distance_m: Some(2.5),
            azimuth_deg: Some(-12.0),
            elevation_deg: Some(3.0),
            elapsed_realtime_nanos: 42,
        };
        let params = RangingParametersBuilder::new().peer_address(peer_address).build().unwrap();

        let mut platform = MockRangingPlatform::new();
        let mut callback = MockRangingSessionCallback::new();
        let service = setup_ranging_service(&platform, &callback);

        callback.expect_on_session_prepared(RangingRole::Controlee, local_address);
        platform.expect_create_session_scope(RangingRole::Controlee, Ok(local_address));
        assert_eq!(service.prepare(RangingRole::Controlee), Ok(()));
        let state =
            service.wait_for_state(|state| state.phase == SessionPhase::Prepared, TIMEOUT).unwrap();
        assert_eq!(state.local_address_text(), "12:34");
        assert!(service.block_on_for_testing(callback.wait_expected_calls_done()));

        callback.expect_on_ranging_started(peer_address);
        callback.expect_on_position_updated(position);
        platform.expect_begin_ranging(params, vec![RangingEvent::Position(position)], Ok(()));
        assert_eq!(service.start("AB:CD"), Ok(()));
        let state = service.wait_for_state(|state| state.position == position, TIMEOUT).unwrap();
        assert!(state.ranging_active());
        assert!(service.block_on_for_testing(callback.wait_expected_calls_done()));

        callback.expect_on_ranging_stopped(StopReason::Requested);
        assert_eq!(service.stop(), Ok(()));
        assert!(!service.state().ranging_active());
        assert_eq!(service.state().position, position);
        assert_eq!(platform.live_scopes(), 0);
        assert!(service.block_on_for_testing(callback.wait_expected_calls_done()));
        assert!(service.block_on_for_testing(platform.wait_expected_calls_done()));
    }

    #[test]
    fn test_wait_for_state_timeout() {
        let platform = MockRangingPlatform::new();
        let callback = MockRangingSessionCallback::new();
        let service = setup_ranging_service(&platform, &callback);

        let result = service.wait_for_state(
            |state| state.phase == SessionPhase::Ranging,
            Duration::from_millis(50),
        );
        assert_eq!(result, Err(Error::Timeout));
        assert_eq!(service.start("AB:CD"), Err(Error::NotPrepared));
    }
}
