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

//! A demo of the ranging session, driven by the scripted mock platform.
//!
//! Usage: main [controller|controlee] [PEER_ADDRESS]

use std::time::Duration;

use log::{debug, error};

use uwb_twr::error::Error;
use uwb_twr::params::{
    encode_tlvs, RangingEvent, RangingParametersBuilder, RangingPosition, RangingRole,
    UwbShortAddress,
};
use uwb_twr::service::{default_runtime, RangingServiceBuilder, RangingSessionCallback};
use uwb_twr::session::mock_ranging_platform::MockRangingPlatform;
use uwb_twr::session::{SessionPhase, StopReason};

const LOCAL_ADDRESS: UwbShortAddress = UwbShortAddress::new([0x0a, 0x1b]);
const TIMEOUT: Duration = Duration::from_secs(1);

struct PrintingCallback {}

impl RangingSessionCallback for PrintingCallback {
    fn on_session_prepared(&mut self, role: RangingRole, local_address: UwbShortAddress) {
        println!("Session prepared as {:?}, local address: {}", role, local_address);
    }

    fn on_ranging_started(&mut self, peer_address: UwbShortAddress) {
        println!("Ranging with {}", peer_address);
    }

    fn on_position_updated(&mut self, position: RangingPosition) {
        match position.distance_m {
            Some(distance) => println!("Distance: {:.2} m", distance),
            None => println!("No distance in this report"),
        }
    }

    fn on_ranging_stopped(&mut self, reason: StopReason) {
        println!("Ranging stopped: {:?}", reason);
    }

    fn on_session_failed(&mut self, error: Error) {
        println!("Session failed: {}", error);
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let role = match args.next().as_deref() {
        Some("controlee") => RangingRole::Controlee,
        _ => RangingRole::Controller,
    };
    let peer_text = args.next().unwrap_or_else(|| "02:0F".to_string());

    // Script the platform: one session, a few reports, then the peer walks away.
    let mut platform = MockRangingPlatform::new();
    platform.expect_create_session_scope(role, Ok(LOCAL_ADDRESS));
    let peer_address = UwbShortAddress::parse(&peer_text).ok();
    if let Some(peer_address) = peer_address {
        let params = RangingParametersBuilder::new().peer_address(peer_address).build().unwrap();
        let mut events: Vec<_> = [1.02f32, 0.98, 1.05]
            .iter()
            .enumerate()
            .map(|(i, d)| RangingEvent::Position(RangingPosition::with_distance(*d, i as u64)))
            .collect();
        events.push(RangingEvent::PeerDisconnected);
        platform.expect_begin_ranging(params, events, Ok(()));
    }

    let service = RangingServiceBuilder::new()
        .runtime(default_runtime().unwrap())
        .platform(platform)
        .callback(PrintingCallback {})
        .build()
        .unwrap();

    service.prepare(role).unwrap();
    let state =
        service.wait_for_state(|state| state.phase == SessionPhase::Prepared, TIMEOUT).unwrap();
    println!("Enter {} on the peer device", state.local_address_text());

    // Print the configuration the accessory needs to join the session.
    if let Some(peer_address) = peer_address {
        let params = RangingParametersBuilder::new().peer_address(peer_address).build().unwrap();
        let mut tlvs =
            params.counterpart(LOCAL_ADDRESS).generate_tlvs(role.counterpart(), peer_address);
        tlvs.sort_by_key(|tlv| tlv.cfg_id as u8);
        for tlv in tlvs.iter() {
            debug!("{:?}", tlv);
        }
        if let Some(payload) = encode_tlvs(&tlvs) {
            let hex: Vec<String> = payload.iter().map(|b| format!("{:02X}", b)).collect();
            println!("Peer app config: {}", hex.join(" "));
        }
    }

    if let Err(e) = service.start(&peer_text) {
        error!("Failed to start ranging: {}", e);
        return;
    }
    let state = service.wait_for_state(|state| state.phase == SessionPhase::Idle, TIMEOUT).unwrap();
    let distance = state.stats.distance();
    println!(
        "{} reports, mean distance {:?} m, std dev {:?} m",
        state.stats.total_reports(),
        distance.mean(),
        distance.std_dev()
    );
}
