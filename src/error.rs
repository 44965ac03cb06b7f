//! Error taxonomy shared by the generator and the validator.
//!
//! Every variant is terminal for the current run: nothing is retried and no
//! partial result is reported. Binaries map any error to exit status 1.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::codec::CodecError;

/// One step of the validation pipeline, numbered as it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Read the compressed artifact into memory.
    Load,
    /// Ask the codec whether the bytes form a well-framed stream.
    Structure,
    /// Read the declared uncompressed length and compare it to the caller's.
    DeclaredLength,
    /// Decode fully and cross-check size (and content, when known).
    Decompress,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 4] = [
        Stage::Load,
        Stage::Structure,
        Stage::DeclaredLength,
        Stage::Decompress,
    ];

    /// 1-based position in the pipeline.
    pub fn number(self) -> u8 {
        match self {
            Stage::Load => 1,
            Stage::Structure => 2,
            Stage::DeclaredLength => 3,
            Stage::Decompress => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Structure => "structural validity",
            Stage::DeclaredLength => "declared length",
            Stage::Decompress => "decompression",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {} ({})", self.number(), self.label())
    }
}

/// Errors raised by fixture generation and validation.
#[derive(Debug)]
pub enum HarnessError {
    /// Malformed or missing command-line input.
    Argument(String),
    /// A file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The stream failed the structural check or its header could not be parsed.
    Format { stage: Stage, detail: String },
    /// A declared or decoded length differs from the expected size.
    SizeMismatch { stage: Stage, expected: u64, actual: u64 },
    /// The codec rejected the stream during full decode.
    Decompression { detail: String },
    /// The decoded bytes hash to a different XXH64 than expected.
    ContentMismatch { expected: u64, actual: u64 },
    /// Compression itself failed.
    Codec(CodecError),
    /// The fixture manifest is malformed or lacks an entry.
    Manifest { path: PathBuf, line: usize, reason: String },
}

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HarnessError::Io { path: path.into(), source }
    }

    /// Pipeline stage the error belongs to, when it came from the validator.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            HarnessError::Io { .. } => Some(Stage::Load),
            HarnessError::Format { stage, .. } | HarnessError::SizeMismatch { stage, .. } => {
                Some(*stage)
            }
            HarnessError::Decompression { .. } | HarnessError::ContentMismatch { .. } => {
                Some(Stage::Decompress)
            }
            HarnessError::Argument(_)
            | HarnessError::Codec(_)
            | HarnessError::Manifest { .. } => None,
        }
    }

    /// Short taxonomy name, used as the diagnostic prefix.
    pub fn kind(&self) -> &'static str {
        match self {
            HarnessError::Argument(_) => "ArgumentError",
            HarnessError::Io { .. } => "IOError",
            HarnessError::Format { .. } => "FormatError",
            HarnessError::SizeMismatch { .. } => "SizeMismatchError",
            HarnessError::Decompression { .. } => "DecompressionError",
            HarnessError::ContentMismatch { .. } => "ContentMismatchError",
            HarnessError::Codec(_) => "CodecError",
            HarnessError::Manifest { .. } => "ManifestError",
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Argument(msg) => write!(f, "{}: {}", self.kind(), msg),
            HarnessError::Io { path, source } => {
                write!(f, "{}: {}: {}", self.kind(), path.display(), source)
            }
            HarnessError::Format { stage, detail } => {
                write!(f, "{}: {}: {}", self.kind(), stage, detail)
            }
            HarnessError::SizeMismatch { stage, expected, actual } => write!(
                f,
                "{}: {}: size mismatch expected={}, actual={}",
                self.kind(),
                stage,
                expected,
                actual
            ),
            HarnessError::Decompression { detail } => write!(
                f,
                "{}: {}: decoder rejected stream: {}",
                self.kind(),
                Stage::Decompress,
                detail
            ),
            HarnessError::ContentMismatch { expected, actual } => write!(
                f,
                "{}: {}: content mismatch expected xxh64={:016x}, actual xxh64={:016x}",
                self.kind(),
                Stage::Decompress,
                expected,
                actual
            ),
            HarnessError::Codec(err) => write!(f, "{}: {}", self.kind(), err),
            HarnessError::Manifest { path, line, reason } => {
                write!(f, "{}: {}:{}: {}", self.kind(), path.display(), line, reason)
            }
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Io { source, .. } => Some(source),
            HarnessError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CodecError> for HarnessError {
    fn from(err: CodecError) -> Self {
        HarnessError::Codec(err)
    }
}
