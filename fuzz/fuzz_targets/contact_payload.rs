#![no_main]

//! Fuzz target for contact-form payload handling.
//!
//! Feeds arbitrary bytes through body decoding and reshaping. Neither step
//! may panic, and any record produced must survive a JSON round trip.

use formhook_api::handlers::contact::decode_payload;
use formhook_core::{reshape, EventRecord};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = decode_payload(data) else {
        return;
    };
    let Ok(record) = reshape(&payload) else {
        return;
    };

    let encoded = serde_json::to_vec(&record).expect("records always encode");
    let decoded: EventRecord = serde_json::from_slice(&encoded).expect("records always decode");
    assert_eq!(decoded, record);
});
