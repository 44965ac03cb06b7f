#![no_main]
use std::path::Path;

use libfuzzer_sys::fuzz_target;
use snappy_fixtures::fixture::content_checksum;
use snappy_fixtures::{ReferenceCodec, SnappyCodec, Validator};

fuzz_target!(|data: &[u8]| {
    // Anything the reference codec compresses must pass every stage.
    let codec = SnappyCodec::new();
    let compressed = codec.compress(data).expect("compress");
    let report = Validator::new(codec).validate_bytes(
        Path::new("fuzz"),
        &compressed,
        data.len() as u64,
        Some(content_checksum(data)),
    );
    assert!(report.passed(), "{:?}", report.failure);
});
