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

//! This module manages the lifecycle of the ranging session, on top of the platform ranging
//! service.

pub mod ranging_platform;
pub mod session_callback;
pub mod session_controller;
pub mod session_state;

#[cfg(any(test, feature = "mock-utils"))]
pub mod mock_ranging_platform;
#[cfg(test)]
pub(crate) mod mock_session_callback;

// Re-export the public elements.
pub use ranging_platform::{RangingPlatform, RangingSubscription, SessionScope};
pub use session_callback::{NopRangingSessionCallback, RangingSessionCallback};
pub use session_controller::RangingSessionController;
pub use session_state::{ControllerState, SessionPhase, StopReason, LOCAL_ADDRESS_PLACEHOLDER};
