#![no_main]
use libfuzzer_sys::fuzz_target;
use snappy_fixtures::codec::walk::walk_stream;
use snappy_fixtures::{ReferenceCodec, SnappyCodec};

fuzz_target!(|data: &[u8]| {
    // The walker must never panic, and must never accept a stream the
    // decoder rejects. Cap the declared length so the decoder can't OOM.
    let walked = walk_stream(data);
    if let Ok(declared) = walked {
        if declared <= 1 << 24 {
            let decoded = SnappyCodec::new()
                .decompress(data)
                .expect("walker accepted a stream the decoder rejects");
            assert_eq!(decoded.len(), declared);
        }
    }
});
