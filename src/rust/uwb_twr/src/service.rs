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

//! This module provides the blocking interface of the ranging session.

pub mod ranging_service;
pub mod ranging_service_builder;

// Re-export the public elements.
pub use ranging_service::RangingService;
pub use ranging_service_builder::{default_runtime, RangingServiceBuilder};
pub use crate::session::session_callback::{NopRangingSessionCallback, RangingSessionCallback};
