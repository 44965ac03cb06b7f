// Stub codecs for exercising harness logic without trusting a real engine.
//
// Each stub wraps the real SnappyCodec and overrides one behaviour, and every
// call is recorded so tests can assert which pipeline stages were reached.

#![allow(dead_code)]

use std::cell::RefCell;

use snappy_fixtures::codec::{CodecError, CodecOp, ReferenceCodec};
use snappy_fixtures::SnappyCodec;

/// Which stub behaviour to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Behave exactly like the real codec.
    None,
    /// `is_valid_compressed_buffer` always returns false.
    AlwaysInvalid,
    /// Structure passes but the header cannot be read.
    UnreadableHeader,
    /// Report a declared length off by `delta`.
    WrongLength(i64),
    /// `decompress` always fails.
    RejectDecode,
    /// `decompress` drops the last byte of the real output.
    ShortDecode,
    /// `decompress` flips the first byte of the real output.
    CorruptDecode,
    /// `compress` always fails.
    RejectCompress,
}

pub struct StubCodec {
    fault: Fault,
    real: SnappyCodec,
    calls: RefCell<Vec<&'static str>>,
}

impl StubCodec {
    pub fn new(fault: Fault) -> Self {
        StubCodec { fault, real: SnappyCodec::new(), calls: RefCell::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, op: &str) -> bool {
        self.calls.borrow().iter().any(|c| *c == op)
    }

    fn record(&self, op: &'static str) {
        self.calls.borrow_mut().push(op);
    }
}

impl ReferenceCodec for StubCodec {
    fn name(&self) -> &str {
        "stub"
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.record("compress");
        if self.fault == Fault::RejectCompress {
            return Err(CodecError::new(CodecOp::Compress, "stub refuses to compress"));
        }
        self.real.compress(input)
    }

    fn is_valid_compressed_buffer(&self, compressed: &[u8]) -> bool {
        self.record("is_valid");
        if self.fault == Fault::AlwaysInvalid {
            return false;
        }
        self.real.is_valid_compressed_buffer(compressed)
    }

    fn uncompressed_length(&self, compressed: &[u8]) -> Result<usize, CodecError> {
        self.record("uncompressed_length");
        match self.fault {
            Fault::UnreadableHeader => {
                Err(CodecError::new(CodecOp::UncompressedLength, "stub header"))
            }
            Fault::WrongLength(delta) => {
                let len = self.real.uncompressed_length(compressed)? as i64;
                Ok((len + delta).max(0) as usize)
            }
            _ => self.real.uncompressed_length(compressed),
        }
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.record("decompress");
        match self.fault {
            Fault::RejectDecode => Err(CodecError::new(CodecOp::Decompress, "stub decoder")),
            Fault::ShortDecode => {
                let mut out = self.real.decompress(compressed)?;
                out.pop();
                Ok(out)
            }
            Fault::CorruptDecode => {
                let mut out = self.real.decompress(compressed)?;
                if let Some(b) = out.first_mut() {
                    *b ^= 0xFF;
                }
                Ok(out)
            }
            _ => self.real.decompress(compressed),
        }
    }
}

/// Compress `input` with the real codec.
pub fn snappy(input: &[u8]) -> Vec<u8> {
    SnappyCodec::new().compress(input).expect("reference compression")
}
