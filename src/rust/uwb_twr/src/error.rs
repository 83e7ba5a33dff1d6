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

//! This module defines the error type and the result type for this library.

/// The error type for the uwb_twr library.
#[non_exhaustive] // Adding new enum fields doesn't break the downstream build.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The peer address text doesn't match the `XX:XX` hex format.
    #[error("Invalid UWB short address: {0:?}")]
    InvalidAddress(String),
    /// Ranging is requested before a session handle is prepared.
    #[error("The ranging session is not prepared")]
    NotPrepared,
    /// The session is ranging, so the request is refused.
    #[error("The ranging session is already active")]
    SessionAlreadyActive,
    /// The provided parameters are invalid.
    #[error("Bad parameters")]
    BadParameters,
    /// The platform ranging service failed.
    #[error("The platform ranging service failed: {0}")]
    PlatformFailure(String),
    /// The expected state is not reached in time.
    #[error("The expected state is not reached in timeout")]
    Timeout,
    /// The controller actor is gone.
    #[error("Error from the tokio runtime")]
    TokioFailure,
    /// The unknown error.
    #[error("The unknown error")]
    Unknown,

    /// The result of the mock method is not assigned
    #[cfg(any(test, feature = "mock-utils"))]
    #[error("The result of the mock method is not assigned")]
    MockUndefined,
}

/// The result type for the uwb_twr library.
///
/// This type is broadly used by the methods in this library which may produce an error.
pub type Result<T> = std::result::Result<T, Error>;
