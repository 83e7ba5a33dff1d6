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

//! This module implements the controller of a single two-way-ranging session.
//!
//! The controller walks through Idle -> Preparing -> Prepared -> Ranging and back to Idle. All
//! the transitions happen in one tokio task, so the requests from the client, the result of the
//! session negotiation, and the ranging events are handled one at a time.

use log::{debug, error, info, warn};
use tokio::sync::{mpsc, oneshot, watch};

use crate::error::{Error, Result};
use crate::params::ranging_data::RangingEvent;
use crate::params::ranging_params::{RangingParametersBuilder, RangingRole};
use crate::params::uwb_address::UwbShortAddress;
use crate::session::ranging_platform::{RangingPlatform, RangingSubscription, SessionScope};
use crate::session::session_callback::RangingSessionCallback;
use crate::session::session_state::{ControllerState, SessionPhase, StopReason};
use crate::utils::clean_mpsc_receiver;

type CommandSender = mpsc::UnboundedSender<(ControllerCommand, oneshot::Sender<Result<()>>)>;
type CommandReceiver = mpsc::UnboundedReceiver<(ControllerCommand, oneshot::Sender<Result<()>>)>;

/// The controller of the ranging session.
///
/// Using the actor model, RangingSessionController delegates the requests to
/// RangingSessionActor. The handle is cheap to clone, and the actor stops once all the handles
/// are dropped, releasing the session it holds.
#[derive(Clone)]
pub struct RangingSessionController {
    cmd_sender: CommandSender,
    state_receiver: watch::Receiver<ControllerState>,
}

impl RangingSessionController {
    /// Create the controller. |params_template| carries every ranging parameter except the peer
    /// address, which is given to start().
    ///
    /// Must be called within a tokio runtime.
    pub fn new<P: RangingPlatform, C: RangingSessionCallback>(
        platform: P,
        callback: C,
        params_template: RangingParametersBuilder,
    ) -> Self {
        let (cmd_sender, cmd_receiver) = mpsc::unbounded_channel();
        let (state_sender, state_receiver) = watch::channel(ControllerState::default());
        let mut actor = RangingSessionActor::new(
            cmd_receiver,
            platform,
            callback,
            params_template,
            state_sender,
        );
        tokio::spawn(async move { actor.run().await });

        Self { cmd_sender, state_receiver }
    }

    /// Negotiate a new session where the local device takes |role|.
    ///
    /// Returns once the negotiation is dispatched. The outcome is published through the state:
    /// the phase becomes Prepared with the local address, or Idle with the error.
    pub async fn prepare(&self, role: RangingRole) -> Result<()> {
        self.send_cmd(ControllerCommand::Prepare { role }).await
    }

    /// Start ranging with the peer whose address is |peer_address| in the `XX:XX` format.
    pub async fn start(&self, peer_address: &str) -> Result<()> {
        let peer_address = UwbShortAddress::parse(peer_address).map_err(|e| {
            warn!("Refuse to start ranging: {}", e);
            e
        })?;
        self.send_cmd(ControllerCommand::Start { peer_address }).await
    }

    /// Stop ranging and release the session. It is a no-op if nothing is held.
    pub async fn stop(&self) -> Result<()> {
        self.send_cmd(ControllerCommand::Stop).await
    }

    /// The latest state.
    pub fn state(&self) -> ControllerState {
        self.state_receiver.borrow().clone()
    }

    /// Subscribe the state changes.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state_receiver.clone()
    }

    /// Wait until the state satisfies |predicate|, and return that state.
    pub async fn wait_for_state<F>(&self, predicate: F) -> Result<ControllerState>
    where
        F: FnMut(&ControllerState) -> bool,
    {
        let mut receiver = self.state_receiver.clone();
        let state = receiver.wait_for(predicate).await.map_err(|_| Error::TokioFailure)?;
        Ok(state.clone())
    }

    // Send the |cmd| to the RangingSessionActor.
    async fn send_cmd(&self, cmd: ControllerCommand) -> Result<()> {
        let (result_sender, result_receiver) = oneshot::channel();
        self.cmd_sender.send((cmd, result_sender)).map_err(|cmd| {
            error!("Failed to send cmd: {:?}", cmd.0);
            Error::TokioFailure
        })?;
        result_receiver.await.unwrap_or(Err(Error::TokioFailure))
    }
}

// The outcome of a session negotiation, tagged with the generation of the prepare request.
type ScopeResult<S> = (u64, Result<S>);

struct RangingSessionActor<P: RangingPlatform, C: RangingSessionCallback> {
    // Receive the commands and the corresponding response senders from the controller.
    cmd_receiver: CommandReceiver,

    platform: P,
    callback: C,
    params_template: RangingParametersBuilder,

    // The negotiations run in their own tasks and report back here.
    scope_sender: mpsc::UnboundedSender<ScopeResult<P::Scope>>,
    scope_receiver: mpsc::UnboundedReceiver<ScopeResult<P::Scope>>,
    prepare_generation: u64,
    // The generation of the negotiation whose result is awaited.
    pending_prepare: Option<u64>,

    scope: Option<P::Scope>,
    // Inactive unless the phase is Ranging.
    subscription: RangingSubscription,

    state_sender: watch::Sender<ControllerState>,
}

impl<P: RangingPlatform, C: RangingSessionCallback> RangingSessionActor<P, C> {
    fn new(
        cmd_receiver: CommandReceiver,
        platform: P,
        callback: C,
        params_template: RangingParametersBuilder,
        state_sender: watch::Sender<ControllerState>,
    ) -> Self {
        let (scope_sender, scope_receiver) = mpsc::unbounded_channel();
        Self {
            cmd_receiver,
            platform,
            callback,
            params_template,
            scope_sender,
            scope_receiver,
            prepare_generation: 0,
            pending_prepare: None,
            scope: None,
            subscription: RangingSubscription::inactive(),
            state_sender,
        }
    }

    async fn run(&mut self) {
        loop {
            tokio::select! {
                cmd = self.cmd_receiver.recv() => {
                    match cmd {
                        None => {
                            debug!("RangingSessionController is about to drop.");
                            break;
                        },
                        Some((cmd, result_sender)) => {
                            let result = self.handle_cmd(cmd);
                            let _ = result_sender.send(result);
                        }
                    }
                }

                Some((generation, result)) = self.scope_receiver.recv() => {
                    self.handle_scope_result(generation, result);
                }

                event = self.subscription.recv(), if self.subscription.is_active() => {
                    self.handle_ranging_event(event);
                }
            }
        }

        self.subscription.cancel();
        self.scope = None;
        clean_mpsc_receiver(&mut self.scope_receiver);
    }

    fn handle_cmd(&mut self, cmd: ControllerCommand) -> Result<()> {
        match cmd {
            ControllerCommand::Prepare { role } => self.prepare(role),
            ControllerCommand::Start { peer_address } => self.start(peer_address),
            ControllerCommand::Stop => {
                self.stop(StopReason::Requested);
                Ok(())
            }
        }
    }

    fn prepare(&mut self, role: RangingRole) -> Result<()> {
        match self.phase() {
            SessionPhase::Ranging => {
                warn!("The session is ranging, refuse to prepare another one");
                return Err(Error::SessionAlreadyActive);
            }
            SessionPhase::Prepared => {
                debug!("Release the prepared session before preparing a new one");
                self.scope = None;
            }
            SessionPhase::Preparing => {
                debug!("Supersede the pending preparation {:?}", self.pending_prepare);
            }
            SessionPhase::Idle => {}
        }

        self.prepare_generation += 1;
        let generation = self.prepare_generation;
        self.pending_prepare = Some(generation);

        let mut platform = self.platform.clone();
        let scope_sender = self.scope_sender.clone();
        tokio::spawn(async move {
            let result = platform.create_session_scope(role).await;
            // The actor is gone if the receiver is closed. Dropping the scope releases it.
            let _ = scope_sender.send((generation, result));
        });

        self.update_state(|state| {
            state.phase = SessionPhase::Preparing;
            state.role = Some(role);
            state.local_address = None;
            state.peer_address = None;
            state.last_error = None;
        });
        Ok(())
    }

    fn handle_scope_result(&mut self, generation: u64, result: Result<P::Scope>) {
        if self.pending_prepare != Some(generation) {
            debug!("Drop the result of the stale preparation {}", generation);
            return;
        }
        self.pending_prepare = None;

        match result {
            Ok(scope) => {
                let role = scope.role();
                let local_address = scope.local_address();
                info!("The session is prepared as {:?}, local address: {}", role, local_address);
                self.scope = Some(scope);
                self.update_state(|state| {
                    state.phase = SessionPhase::Prepared;
                    state.role = Some(role);
                    state.local_address = Some(local_address);
                });
                self.callback.on_session_prepared(role, local_address);
            }
            Err(e) => {
                error!("Failed to prepare the session: {:?}", e);
                self.update_state(|state| {
                    state.phase = SessionPhase::Idle;
                    state.role = None;
                    state.last_error = Some(e.clone());
                });
                self.callback.on_session_failed(e);
            }
        }
    }

    fn start(&mut self, peer_address: UwbShortAddress) -> Result<()> {
        if self.subscription.is_active() {
            warn!("The session is already ranging");
            return Err(Error::SessionAlreadyActive);
        }
        let scope = match self.scope.as_ref() {
            Some(scope) => scope,
            None => {
                warn!("Cannot start ranging before the session is prepared");
                return Err(Error::NotPrepared);
            }
        };

        let mut builder = self.params_template.clone();
        builder.peer_address(peer_address);
        let params = builder.build().ok_or(Error::BadParameters)?;
        if params.uses_static_session_key() {
            debug!("The session is protected by the static session key");
        }

        match self.platform.begin_ranging(scope, params) {
            Ok(subscription) => {
                info!("Start ranging with {}", peer_address);
                self.subscription = subscription;
                self.update_state(|state| {
                    state.phase = SessionPhase::Ranging;
                    state.peer_address = Some(peer_address);
                    state.stats = Default::default();
                    state.last_error = None;
                });
                self.callback.on_ranging_started(peer_address);
                Ok(())
            }
            Err(e) => {
                error!("Failed to start ranging with {}: {:?}", peer_address, e);
                self.scope = None;
                self.update_state(|state| {
                    state.phase = SessionPhase::Idle;
                    state.role = None;
                    state.local_address = None;
                    state.last_error = Some(e.clone());
                });
                self.callback.on_session_failed(e.clone());
                Err(e)
            }
        }
    }

    fn handle_ranging_event(&mut self, event: Option<RangingEvent>) {
        match event {
            Some(RangingEvent::Position(position)) => {
                self.update_state(|state| {
                    state.position = position;
                    state.stats.update(&position);
                });
                self.callback.on_position_updated(position);
            }
            Some(RangingEvent::PeerDisconnected) => {
                info!("The peer is disconnected");
                self.stop(StopReason::PeerDisconnected);
            }
            None => {
                warn!("The ranging event stream is closed");
                self.stop(StopReason::StreamClosed);
            }
        }
    }

    fn stop(&mut self, reason: StopReason) {
        let was_ranging = self.phase() == SessionPhase::Ranging;

        self.subscription.cancel();
        if let Some(generation) = self.pending_prepare.take() {
            debug!("Cancel the pending preparation {}", generation);
        }
        self.scope = None;
        self.update_state(|state| {
            state.phase = SessionPhase::Idle;
            state.role = None;
            state.local_address = None;
            state.peer_address = None;
        });

        if was_ranging {
            info!("Ranging is stopped: {:?}", reason);
            self.callback.on_ranging_stopped(reason);
        }
    }

    fn phase(&self) -> SessionPhase {
        self.state_sender.borrow().phase
    }

    // Apply |update| to the state, and notify the subscribers if it changes.
    fn update_state<F: FnOnce(&mut ControllerState)>(&self, update: F) {
        self.state_sender.send_if_modified(|state| {
            let prev_state = state.clone();
            update(state);
            *state != prev_state
        });
    }
}

#[derive(Debug)]
enum ControllerCommand {
    Prepare { role: RangingRole },
    Start { peer_address: UwbShortAddress },
    Stop,
}
