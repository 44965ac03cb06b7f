//! Structural walk of a raw (unframed) Snappy stream.
//!
//! A raw stream is a varint32 preamble holding the uncompressed length,
//! followed by a sequence of elements. The low two bits of each tag byte
//! select the element kind:
//!
//! | Tag bits | Element | Extra bytes | Length | Offset |
//! |----------|---------|-------------|--------|--------|
//! | `00` | literal | 0–4 (length) | `tag>>2 + 1`, or the extra bytes `+ 1` when `tag>>2 >= 60` | — |
//! | `01` | copy-1  | 1 | `4 + (tag>>2 & 7)` | `(tag>>5) << 8 \| byte` |
//! | `10` | copy-2  | 2 | `1 + tag>>2` | `u16` LE |
//! | `11` | copy-4  | 4 | `1 + tag>>2` | `u32` LE |
//!
//! [`walk_stream`] replays the element sequence counting produced bytes but
//! writing none, so a stream can be judged without allocating its output.
//! The stream is well-formed when every element lies inside the input, every
//! copy offset points into already-produced data, and the produced total
//! equals the declared length exactly.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

const TAG_LITERAL: u8 = 0b00;
const TAG_COPY_1: u8 = 0b01;
const TAG_COPY_2: u8 = 0b10;
const TAG_COPY_4: u8 = 0b11;

/// Largest literal length that fits in the tag byte itself (stored as `len - 1`).
const LITERAL_INLINE_MAX: usize = 60;

/// A varint32 occupies at most five bytes.
const VARINT32_MAX_BYTES: usize = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Why a stream failed the structural walk. Positions are byte offsets into
/// the compressed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFault {
    /// Zero-length input: not even a preamble.
    Empty,
    /// The varint32 preamble ends before its last byte.
    HeaderTruncated,
    /// The preamble is longer than five bytes or exceeds `u32::MAX`.
    HeaderOverflow,
    /// A literal's length bytes or payload run past the end of the input.
    LiteralTruncated { at: usize },
    /// A copy element's offset bytes run past the end of the input.
    CopyTruncated { at: usize },
    /// A copy refers to zero or to data not yet produced.
    OffsetOutOfRange { at: usize, offset: usize, produced: usize },
    /// An element would produce more than the declared length.
    Overrun { at: usize, declared: usize },
    /// The input ended before the declared length was produced.
    Underrun { produced: usize, declared: usize },
}

impl fmt::Display for StreamFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StreamFault::Empty => f.write_str("empty input, no length preamble"),
            StreamFault::HeaderTruncated => f.write_str("truncated length preamble"),
            StreamFault::HeaderOverflow => f.write_str("length preamble exceeds 32 bits"),
            StreamFault::LiteralTruncated { at } => {
                write!(f, "literal at byte {} runs past end of input", at)
            }
            StreamFault::CopyTruncated { at } => {
                write!(f, "copy at byte {} runs past end of input", at)
            }
            StreamFault::OffsetOutOfRange { at, offset, produced } => write!(
                f,
                "copy at byte {} has offset {} but only {} bytes were produced",
                at, offset, produced
            ),
            StreamFault::Overrun { at, declared } => write!(
                f,
                "element at byte {} overruns declared length {}",
                at, declared
            ),
            StreamFault::Underrun { produced, declared } => write!(
                f,
                "stream produced {} bytes but declares {}",
                produced, declared
            ),
        }
    }
}

impl std::error::Error for StreamFault {}

// ─────────────────────────────────────────────────────────────────────────────
// Preamble
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the varint32 preamble.
///
/// Returns `(declared_len, header_len)` where `header_len` is the number of
/// bytes the preamble occupies.
pub fn read_header(input: &[u8]) -> Result<(usize, usize), StreamFault> {
    if input.is_empty() {
        return Err(StreamFault::Empty);
    }
    let mut value: u64 = 0;
    for (i, &byte) in input.iter().take(VARINT32_MAX_BYTES).enumerate() {
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            if value > u64::from(u32::MAX) {
                return Err(StreamFault::HeaderOverflow);
            }
            return Ok((value as usize, i + 1));
        }
    }
    if input.len() < VARINT32_MAX_BYTES {
        Err(StreamFault::HeaderTruncated)
    } else {
        Err(StreamFault::HeaderOverflow)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Element walk
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
fn read_le(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .rev()
        .fold(0usize, |acc, &b| (acc << 8) | usize::from(b))
}

/// Walk every element of `input`, returning the declared length on success.
pub fn walk_stream(input: &[u8]) -> Result<usize, StreamFault> {
    let (declared, mut ip) = read_header(input)?;
    let mut produced: usize = 0;

    while ip < input.len() {
        let at = ip;
        let tag = input[ip];
        ip += 1;

        let (len, offset) = match tag & 0b11 {
            TAG_LITERAL => {
                let mut len = usize::from(tag >> 2);
                if len >= LITERAL_INLINE_MAX {
                    let extra = len - (LITERAL_INLINE_MAX - 1);
                    if input.len() - ip < extra {
                        return Err(StreamFault::LiteralTruncated { at });
                    }
                    len = read_le(&input[ip..ip + extra]);
                    ip += extra;
                }
                let len = len
                    .checked_add(1)
                    .ok_or(StreamFault::LiteralTruncated { at })?;
                if input.len() - ip < len {
                    return Err(StreamFault::LiteralTruncated { at });
                }
                ip += len;
                (len, None)
            }
            TAG_COPY_1 => {
                if input.len() - ip < 1 {
                    return Err(StreamFault::CopyTruncated { at });
                }
                let len = 4 + usize::from((tag >> 2) & 0x07);
                let offset = (usize::from(tag >> 5) << 8) | usize::from(input[ip]);
                ip += 1;
                (len, Some(offset))
            }
            TAG_COPY_2 => {
                if input.len() - ip < 2 {
                    return Err(StreamFault::CopyTruncated { at });
                }
                let len = 1 + usize::from(tag >> 2);
                let offset = read_le(&input[ip..ip + 2]);
                ip += 2;
                (len, Some(offset))
            }
            _ => {
                debug_assert_eq!(tag & 0b11, TAG_COPY_4);
                if input.len() - ip < 4 {
                    return Err(StreamFault::CopyTruncated { at });
                }
                let len = 1 + usize::from(tag >> 2);
                let offset = read_le(&input[ip..ip + 4]);
                ip += 4;
                (len, Some(offset))
            }
        };

        if let Some(offset) = offset {
            if offset == 0 || offset > produced {
                return Err(StreamFault::OffsetOutOfRange { at, offset, produced });
            }
        }
        if len > declared - produced {
            return Err(StreamFault::Overrun { at, declared });
        }
        produced += len;
    }

    if produced != declared {
        return Err(StreamFault::Underrun { produced, declared });
    }
    Ok(declared)
}
