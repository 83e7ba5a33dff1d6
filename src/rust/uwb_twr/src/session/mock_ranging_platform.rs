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

//! The mock implementation of [`RangingPlatform`], driven by the expected calls queued by the
//! test.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::error;
use tokio::sync::{mpsc, oneshot, Notify};
use tokio::time::{timeout, Duration};

use crate::error::{Error, Result};
use crate::params::ranging_data::RangingEvent;
use crate::params::ranging_params::{RangingParameters, RangingRole};
use crate::params::uwb_address::UwbShortAddress;
use crate::session::ranging_platform::{RangingPlatform, RangingSubscription, SessionScope};

/// The mock of the platform ranging service. The clones share the expected calls and the
/// ranging event stream.
#[derive(Clone, Default)]
pub struct MockRangingPlatform {
    expected_calls: Arc<Mutex<VecDeque<ExpectedCall>>>,
    expect_call_consumed: Arc<Notify>,
    event_sender: Arc<Mutex<Option<mpsc::UnboundedSender<RangingEvent>>>>,
    live_scopes: Arc<AtomicUsize>,
}

impl MockRangingPlatform {
    /// Create a mock without any expected call.
    pub fn new() -> Self {
        Default::default()
    }

    /// Expect create_session_scope() with |expected_role|. On success, the scope is assigned
    /// |out| as the local address.
    pub fn expect_create_session_scope(
        &mut self,
        expected_role: RangingRole,
        out: Result<UwbShortAddress>,
    ) {
        self.push_expected_call(ExpectedCall::CreateSessionScope {
            expected_role,
            gate: None,
            out,
        });
    }

    /// Same as expect_create_session_scope(), but the negotiation doesn't finish until the
    /// returned sender is fired or dropped.
    pub fn expect_gated_create_session_scope(
        &mut self,
        expected_role: RangingRole,
        out: Result<UwbShortAddress>,
    ) -> oneshot::Sender<()> {
        let (gate_sender, gate) = oneshot::channel();
        self.push_expected_call(ExpectedCall::CreateSessionScope {
            expected_role,
            gate: Some(gate),
            out,
        });
        gate_sender
    }

    /// Expect begin_ranging() with |expected_params|. On success, |events| are delivered to the
    /// subscription right away, and the stream stays open for send_event().
    pub fn expect_begin_ranging(
        &mut self,
        expected_params: RangingParameters,
        events: Vec<RangingEvent>,
        out: Result<()>,
    ) {
        self.push_expected_call(ExpectedCall::BeginRanging { expected_params, events, out });
    }

    /// Deliver |event| to the latest subscription. Returns false if it is already cancelled.
    pub fn send_event(&self, event: RangingEvent) -> bool {
        match self.event_sender.lock().unwrap().as_ref() {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        }
    }

    /// Close the event stream from the platform side.
    pub fn close_event_stream(&self) {
        self.event_sender.lock().unwrap().take();
    }

    /// Whether the latest subscription is cancelled or closed.
    pub fn is_event_stream_closed(&self) -> bool {
        match self.event_sender.lock().unwrap().as_ref() {
            Some(sender) => sender.is_closed(),
            None => true,
        }
    }

    /// The number of the session scopes which are created but not released yet.
    pub fn live_scopes(&self) -> usize {
        self.live_scopes.load(Ordering::SeqCst)
    }

    /// Wait until all the expected calls are consumed. Returns false on timeout.
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

    fn pop_expected_call(&self) -> Option<ExpectedCall> {
        let call = self.expected_calls.lock().unwrap().pop_front();
        self.expect_call_consumed.notify_one();
        call
    }
}

#[async_trait]
impl RangingPlatform for MockRangingPlatform {
    type Scope = MockSessionScope;

    async fn create_session_scope(&mut self, role: RangingRole) -> Result<MockSessionScope> {
        match self.pop_expected_call() {
            Some(ExpectedCall::CreateSessionScope { expected_role, gate, out })
                if expected_role == role =>
            {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                let local_address = out?;
                self.live_scopes.fetch_add(1, Ordering::SeqCst);
                Ok(MockSessionScope { role, local_address, live_scopes: self.live_scopes.clone() })
            }
            Some(call) => {
                error!("Unexpected create_session_scope({:?}), expected {:?}", role, call);
                Err(Error::MockUndefined)
            }
            None => {
                error!("Unexpected create_session_scope({:?})", role);
                Err(Error::MockUndefined)
            }
        }
    }

    fn begin_ranging(
        &mut self,
        _scope: &MockSessionScope,
        params: RangingParameters,
    ) -> Result<RangingSubscription> {
        match self.pop_expected_call() {
            Some(ExpectedCall::BeginRanging { expected_params, events, out })
                if expected_params == params =>
            {
                out?;
                let (sender, subscription) = RangingSubscription::channel();
                for event in events.into_iter() {
                    let _ = sender.send(event);
                }
                self.event_sender.lock().unwrap().replace(sender);
                Ok(subscription)
            }
            Some(call) => {
                error!("Unexpected begin_ranging({:?}), expected {:?}", params, call);
                Err(Error::MockUndefined)
            }
            None => {
                error!("Unexpected begin_ranging({:?})", params);
                Err(Error::MockUndefined)
            }
        }
    }
}

/// The session scope created by [`MockRangingPlatform`].
#[derive(Debug)]
pub struct MockSessionScope {
    role: RangingRole,
    local_address: UwbShortAddress,
    live_scopes: Arc<AtomicUsize>,
}

impl SessionScope for MockSessionScope {
    fn local_address(&self) -> UwbShortAddress {
        self.local_address
    }

    fn role(&self) -> RangingRole {
        self.role
    }
}

impl Drop for MockSessionScope {
    fn drop(&mut self) {
        self.live_scopes.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
enum ExpectedCall {
    CreateSessionScope {
        expected_role: RangingRole,
        gate: Option<oneshot::Receiver<()>>,
        out: Result<UwbShortAddress>,
    },
    BeginRanging {
        expected_params: RangingParameters,
        events: Vec<RangingEvent>,
        out: Result<()>,
    },
}
