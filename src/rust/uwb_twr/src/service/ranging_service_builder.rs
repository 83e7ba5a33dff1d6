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

//! This module defines the RangingServiceBuilder, the builder of the RangingService.

use tokio::runtime::Runtime;

use crate::params::ranging_params::RangingParametersBuilder;
use crate::service::ranging_service::RangingService;
use crate::session::ranging_platform::RangingPlatform;
use crate::session::session_callback::RangingSessionCallback;
use crate::utils::consuming_builder_field;

/// Create the default runtime for RangingService.
pub fn default_runtime() -> Option<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .thread_name("RangingService")
        .enable_all()
        .build()
        .ok()
}

/// The builder of RangingService. The runtime and the parameter template have defaults, the
/// platform and the callback must be provided.
pub struct RangingServiceBuilder<P: RangingPlatform, C: RangingSessionCallback> {
    runtime: Option<Runtime>,
    platform: Option<P>,
    callback: Option<C>,
    params_template: RangingParametersBuilder,
}

impl<P: RangingPlatform, C: RangingSessionCallback> Default for RangingServiceBuilder<P, C> {
    fn default() -> Self {
        Self {
            runtime: None,
            platform: None,
            callback: None,
            params_template: RangingParametersBuilder::new(),
        }
    }
}

impl<P: RangingPlatform, C: RangingSessionCallback> RangingServiceBuilder<P, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Default::default()
    }

    consuming_builder_field!(runtime, Runtime, Some);
    consuming_builder_field!(platform, P, Some);
    consuming_builder_field!(callback, C, Some);
    consuming_builder_field!(params_template, RangingParametersBuilder);

    /// Build the RangingService.
    pub fn build(mut self) -> Option<RangingService> {
        let runtime = self.runtime.take().or_else(default_runtime)?;
        let platform = self.platform.take()?;
        let callback = self.callback.take()?;
        Some(RangingService::new(runtime, platform, callback, self.params_template))
    }
}
