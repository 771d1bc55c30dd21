#![no_main]

use libfuzzer_sys::fuzz_target;
use roomsense::error::DecodeError;
use roomsense::sensors::dht22::{FRAME_BYTES, Frame};

fuzz_target!(|data: &[u8]| {
    let Some(head) = data.get(..FRAME_BYTES) else {
        return;
    };
    let Ok(bytes) = <[u8; FRAME_BYTES]>::try_from(head) else {
        return;
    };

    match Frame::parse(bytes) {
        Ok(reading) => {
            assert_eq!(Frame(bytes).checksum(), bytes[4]);
            assert!(reading.humidity_pct >= 0.0 && reading.humidity_pct <= 6553.5);
            assert!(reading.temperature_c.abs() <= 3276.7);
        }
        Err(DecodeError::ChecksumMismatch { expected, received }) => {
            assert_ne!(expected, received);
        }
        Err(e) => panic!("parse produced a line error: {e:?}"),
    }
});
