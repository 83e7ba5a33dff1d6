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

//! The library of the two-way-ranging session between a phone and a UWB accessory.
//!
//! The [`session::RangingSessionController`] drives a single unicast session over an injected
//! [`session::RangingPlatform`], and publishes the [`session::ControllerState`] for the UI. The
//! [`service::RangingService`] wraps it with a dedicated tokio runtime for the blocking callers.

pub mod error;
pub mod params;
pub mod service;
pub mod session;

pub(crate) mod utils;

// Re-export the commonly used elements.
pub use error::{Error, Result};
