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

//! This module defines the contract of the platform UWB stack, which negotiates the sessions and
//! performs the actual ranging. The client of this library implements [`RangingPlatform`] and
//! injects it into the controller.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::params::ranging_data::RangingEvent;
use crate::params::ranging_params::{RangingParameters, RangingRole};
use crate::params::uwb_address::UwbShortAddress;
use crate::utils::clean_mpsc_receiver;

/// The trait for the platform ranging service.
///
/// The methods are called from the controller's tokio task. The instance is cloned for each
/// session negotiation, so the clones should share the underlying UWB stack.
#[async_trait]
pub trait RangingPlatform: 'static + Send + Sync + Clone {
    /// The session handle. Dropping it releases the session on the platform.
    type Scope: SessionScope;

    /// Negotiate a new session where the local device takes |role|.
    ///
    /// The method may take arbitrarily long; the controller keeps serving other requests in the
    /// meantime.
    async fn create_session_scope(&mut self, role: RangingRole) -> Result<Self::Scope>;

    /// Start ranging within |scope| with |params|.
    ///
    /// The events are delivered in order through the returned subscription. The platform should
    /// stop ranging once the subscription is cancelled, which is observable through
    /// `UnboundedSender::is_closed()` or a failed `send()`.
    fn begin_ranging(
        &mut self,
        scope: &Self::Scope,
        params: RangingParameters,
    ) -> Result<RangingSubscription>;
}

/// The session handle obtained from [`RangingPlatform::create_session_scope()`]. It is valid for
/// exactly one ranging attempt.
pub trait SessionScope: 'static + Send {
    /// The address assigned to the local device. The operator copies it to the peer device.
    fn local_address(&self) -> UwbShortAddress;

    /// The role of the local device.
    fn role(&self) -> RangingRole;
}

/// The subscription of the ranging event stream.
///
/// Cancelling the subscription closes the stream. It is always safe to cancel, even if the
/// stream is already closed or was never started.
#[derive(Debug)]
pub struct RangingSubscription {
    receiver: mpsc::UnboundedReceiver<RangingEvent>,
    active: bool,
}

impl RangingSubscription {
    /// Wrap the receiving end of an event stream.
    pub fn new(receiver: mpsc::UnboundedReceiver<RangingEvent>) -> Self {
        Self { receiver, active: true }
    }

    /// Create a subscription and the sender feeding it.
    pub fn channel() -> (mpsc::UnboundedSender<RangingEvent>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self::new(receiver))
    }

    /// A subscription that never yields any event.
    pub(crate) fn inactive() -> Self {
        Self { receiver: mpsc::unbounded_channel().1, active: false }
    }

    /// Whether the stream may still yield events.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Receive the next event. Returns None once the stream is closed or cancelled.
    pub async fn recv(&mut self) -> Option<RangingEvent> {
        if !self.active {
            return None;
        }
        let event = self.receiver.recv().await;
        if event.is_none() {
            self.active = false;
        }
        event
    }

    /// Cancel the subscription. The pending events are discarded.
    pub fn cancel(&mut self) {
        if self.active {
            clean_mpsc_receiver(&mut self.receiver);
            self.active = false;
        }
    }
}

impl Drop for RangingSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::params::ranging_data::RangingPosition;

    #[tokio::test]
    async fn test_subscription_delivers_in_order() {
        let (sender, mut subscription) = RangingSubscription::channel();
        let first = RangingEvent::Position(RangingPosition::with_distance(1.0, 1));
        let second = RangingEvent::Position(RangingPosition::with_distance(2.0, 2));
        sender.send(first.clone()).unwrap();
        sender.send(second.clone()).unwrap();
        drop(sender);

        assert_eq!(subscription.recv().await, Some(first));
        assert_eq!(subscription.recv().await, Some(second));
        assert!(subscription.is_active());
        assert_eq!(subscription.recv().await, None);
        assert!(!subscription.is_active());
    }

    #[tokio::test]
    async fn test_cancel() {
        let (sender, mut subscription) = RangingSubscription::channel();
        sender.send(RangingEvent::PeerDisconnected).unwrap();

        subscription.cancel();
        assert!(sender.is_closed());
        assert!(!subscription.is_active());
        assert_eq!(subscription.recv().await, None);

        // Cancelling again is a no-op.
        subscription.cancel();
        assert!(!RangingSubscription::inactive().is_active());
    }

    #[test]
    fn test_drop_closes_stream() {
        let (sender, subscription) = RangingSubscription::channel();
        drop(subscription);
        assert!(sender.send(RangingEvent::PeerDisconnected).is_err());
    }
}
