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

//! This module defines the UCI application configuration TLVs, used to hand the session
//! configuration to a UCI-driven peer such as the DWM3001CDK.

use std::collections::HashMap;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

/// The identifier of the FiRa application configuration parameters.
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum AppConfigTlvType {
    DeviceType = 0x00,
    RangingRoundUsage = 0x01,
    StsConfig = 0x02,
    MultiNodeMode = 0x03,
    ChannelNumber = 0x04,
    NoOfControlee = 0x05,
    DeviceMacAddress = 0x06,
    DstMacAddress = 0x07,
    SlotDuration = 0x08,
    RangingDuration = 0x09,
    DeviceRole = 0x11,
    PreambleCodeIndex = 0x14,
    VendorId = 0x27,
    StaticStsIv = 0x28,
    SubSessionId = 0x30,
    SessionKey = 0x45,
    SubSessionKey = 0x46,
}

/// A single application configuration TLV.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfigTlv {
    /// The identifier of the parameter.
    pub cfg_id: AppConfigTlvType,
    /// The little-endian encoded value.
    pub v: Vec<u8>,
}

impl AppConfigTlv {
    /// Create a new TLV.
    pub fn new(cfg_id: AppConfigTlvType, v: Vec<u8>) -> Self {
        Self { cfg_id, v }
    }

    fn is_secret(&self) -> bool {
        matches!(
            self.cfg_id,
            AppConfigTlvType::StaticStsIv
                | AppConfigTlvType::SessionKey
                | AppConfigTlvType::SubSessionKey
        )
    }
}

/// Explicitly implement Debug trait to prevent logging the key material.
impl std::fmt::Debug for AppConfigTlv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        static REDACTED_STR: &str = "redacted";

        let mut s = f.debug_struct("AppConfigTlv");
        s.field("cfg_id", &self.cfg_id);
        if self.is_secret() {
            s.field("v", &REDACTED_STR);
        } else {
            s.field("v", &self.v);
        }
        s.finish()
    }
}

/// Serialize the TLVs to the payload layout of SESSION_SET_APP_CONFIG_CMD, without the session
/// id: `[count] ([type] [length] [value...])*`.
///
/// Returns None if there are more than 255 TLVs or a value is longer than 255 bytes.
pub fn encode_tlvs(tlvs: &[AppConfigTlv]) -> Option<Vec<u8>> {
    let mut payload = vec![u8::try_from(tlvs.len()).ok()?];
    for tlv in tlvs.iter() {
        payload.push(tlv.cfg_id.to_u8()?);
        payload.push(u8::try_from(tlv.v.len()).ok()?);
        payload.extend_from_slice(&tlv.v);
    }
    Some(payload)
}

/// Parse the payload produced by [`encode_tlvs`]. Returns None if the payload is truncated,
/// has trailing bytes or carries an unknown parameter identifier.
pub fn decode_tlvs(payload: &[u8]) -> Option<Vec<AppConfigTlv>> {
    let (&count, mut rest) = payload.split_first()?;
    let mut tlvs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let (&cfg_id, remaining) = rest.split_first()?;
        let (&len, remaining) = remaining.split_first()?;
        let len = len as usize;
        if remaining.len() < len {
            return None;
        }
        let (value, remaining) = remaining.split_at(len);
        tlvs.push(AppConfigTlv::new(AppConfigTlvType::from_u8(cfg_id)?, value.to_vec()));
        rest = remaining;
    }
    rest.is_empty().then_some(tlvs)
}

/// Compare if two AppConfigTlv array are equal. Convert the array to HashMap before comparing
/// because the order of TLV elements doesn't matter.
pub fn app_config_tlvs_eq(a: &[AppConfigTlv], b: &[AppConfigTlv]) -> bool {
    app_config_tlvs_to_map(a) == app_config_tlvs_to_map(b)
}

fn app_config_tlvs_to_map(tlvs: &[AppConfigTlv]) -> HashMap<AppConfigTlvType, &Vec<u8>> {
    tlvs.iter().map(|config| (config.cfg_id, &config.v)).collect()
}
