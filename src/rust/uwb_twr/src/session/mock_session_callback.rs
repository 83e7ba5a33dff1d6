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

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use tokio::time::{timeout, Duration};

use crate::error::Error;
use crate::params::ranging_data::RangingPosition;
use crate::params::ranging_params::RangingRole;
use crate::params::uwb_address::UwbShortAddress;
use crate::session::session_callback::RangingSessionCallback;
use crate::session::session_state::StopReason;

#[derive(Clone, Default)]
pub(crate) struct MockRangingSessionCallback {
    expected_calls: Arc<Mutex<VecDeque<ExpectedCall>>>,
    expect_call_consumed: Arc<Notify>,
}

impl MockRangingSessionCallback {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn expect_on_session_prepared(
        &mut self,
        role: RangingRole,
        local_address: UwbShortAddress,
    ) {
        self.push_expected_call(ExpectedCall::SessionPrepared { role, local_address });
    }

    pub fn expect_on_ranging_started(&mut self, peer_address: UwbShortAddress) {
        self.push_expected_call(ExpectedCall::RangingStarted { peer_address });
    }

    pub fn expect_on_position_updated(&mut self, position: RangingPosition) {
        self.push_expected_call(ExpectedCall::PositionUpdated { position });
    }

    pub fn expect_on_ranging_stopped(&mut self, reason: StopReason) {
        self.push_expected_call(ExpectedCall::RangingStopped { reason });
    }

    pub fn expect_on_session_failed(&mut self, error: Error) {
        self.push_expected_call(ExpectedCall::SessionFailed { error });
    }

    pub async fn wait_expected_calls_done(&mut self) -> bool {
        while !self.expected_calls.lock().unwrap().is_empty() {
            if timeout(Duration::from_secs(1), self.expect_call_consumed.notified()).await.is_err()
            {
                return false;
            }
        }
        true
    }

    fn push_expected_call(&mut self, call: ExpectedCall) {
        self.expected_calls.lock().unwrap().push_back(call);
    }

    fn pop_expected_call(&mut self) -> ExpectedCall {
        let call = self.expected_calls.lock().unwrap().pop_front().unwrap();
        self.expect_call_consumed.notify_one();
        call
    }
}

impl RangingSessionCallback for MockRangingSessionCallback {
    fn on_session_prepared(&mut self, role: RangingRole, local_address: UwbShortAddress) {
        assert_eq!(self.pop_expected_call(), ExpectedCall::SessionPrepared { role, local_address });
    }

    fn on_ranging_started(&mut self, peer_address: UwbShortAddress) {
        assert_eq!(self.pop_expected_call(), ExpectedCall::RangingStarted { peer_address });
    }

    fn on_position_updated(&mut self, position: RangingPosition) {
        assert_eq!(self.pop_expected_call(), ExpectedCall::PositionUpdated { position });
    }

    fn on_ranging_stopped(&mut self, reason: StopReason) {
        assert_eq!(self.pop_expected_call(), ExpectedCall::RangingStopped { reason });
    }

    fn on_session_failed(&mut self, error: Error) {
        assert_eq!(self.pop_expected_call(), ExpectedCall::SessionFailed { error });
    }
}

#[derive(PartialEq, Debug)]
pub(crate) enum ExpectedCall {
    SessionPrepared { role: RangingRole, local_address: UwbShortAddress },
    RangingStarted { peer_address: UwbShortAddress },
    PositionUpdated { position: RangingPosition },
    RangingStopped { reason: StopReason },
    SessionFailed { error: Error },
}
