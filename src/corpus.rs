//! The fixed fixture corpus.
//!
//! [`CATALOG`] is the ordered, inspectable list of named cases. Each entry
//! carries a builder rather than the bytes themselves, so the multi-megabyte
//! inputs only exist while their fixture is being written.
//!
//! The catalog is versioned data: renaming a case or changing a builder
//! changes the fixtures every downstream implementation is tested against.

use crate::cli::constants::MB;

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Size bucket derived from an input's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeClass {
    Empty,
    /// 1..=64 bytes
    Tiny,
    /// 65 bytes ..= 4 KiB
    Small,
    /// ..= 64 KiB
    Medium,
    /// below 1 MiB
    Large,
    /// 1 MiB ..= 4 MiB
    VeryLarge,
    /// above 4 MiB
    Huge,
}

impl SizeClass {
    pub const ALL: [SizeClass; 7] = [
        SizeClass::Empty,
        SizeClass::Tiny,
        SizeClass::Small,
        SizeClass::Medium,
        SizeClass::Large,
        SizeClass::VeryLarge,
        SizeClass::Huge,
    ];

    pub fn of(len: usize) -> Self {
        match len {
            0 => SizeClass::Empty,
            1..=64 => SizeClass::Tiny,
            65..=4096 => SizeClass::Small,
            4097..=65536 => SizeClass::Medium,
            n if n < MB => SizeClass::Large,
            n if n <= 4 * MB => SizeClass::VeryLarge,
            _ => SizeClass::Huge,
        }
    }
}

/// Kind of redundancy a case is meant to exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Redundancy {
    /// No repeated substrings worth matching.
    None,
    /// A short period repeated many times.
    Periodic,
    /// Natural-language or semi-structured text.
    Natural,
    /// One byte value repeated throughout.
    Uniform,
    /// Alternating high- and low-redundancy regions.
    Mixed,
}

impl Redundancy {
    pub const ALL: [Redundancy; 5] = [
        Redundancy::None,
        Redundancy::Periodic,
        Redundancy::Natural,
        Redundancy::Uniform,
        Redundancy::Mixed,
    ];
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog entries
// ─────────────────────────────────────────────────────────────────────────────

/// A catalog entry: name, intent, and a builder for the input bytes.
#[derive(Debug, Clone, Copy)]
pub struct CaseSpec {
    pub name: &'static str,
    pub redundancy: Redundancy,
    pub summary: &'static str,
    build: fn() -> Vec<u8>,
}

impl CaseSpec {
    /// Build the input bytes and pair them with the case name.
    pub fn materialize(&self) -> TestCase {
        TestCase { name: self.name, input: (self.build)() }
    }
}

/// A named input, alive only while its fixture is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: &'static str,
    pub input: Vec<u8>,
}

impl TestCase {
    pub fn size_class(&self) -> SizeClass {
        SizeClass::of(self.input.len())
    }
}

/// Look a case up by name.
pub fn find(name: &str) -> Option<&'static CaseSpec> {
    CATALOG.iter().find(|c| c.name == name)
}

pub const CATALOG: &[CaseSpec] = &[
    CaseSpec {
        name: "empty",
        redundancy: Redundancy::None,
        summary: "zero-length input",
        build: build_empty,
    },
    CaseSpec {
        name: "single_byte",
        redundancy: Redundancy::None,
        summary: "smallest non-trivial input",
        build: build_single_byte,
    },
    CaseSpec {
        name: "hello",
        redundancy: Redundancy::None,
        summary: "short literal-only text",
        build: build_hello,
    },
    CaseSpec {
        name: "repeated",
        redundancy: Redundancy::Uniform,
        summary: "100-byte run of one byte",
        build: build_repeated,
    },
    CaseSpec {
        name: "pattern",
        redundancy: Redundancy::Periodic,
        summary: "8-byte pattern repeated 20 times",
        build: build_pattern,
    },
    CaseSpec {
        name: "longer_text",
        redundancy: Redundancy::Natural,
        summary: "repeated sentence",
        build: build_longer_text,
    },
    CaseSpec {
        name: "ascii",
        redundancy: Redundancy::None,
        summary: "printable ASCII 32..=126 once each",
        build: build_ascii,
    },
    CaseSpec {
        name: "large",
        redundancy: Redundancy::Uniform,
        summary: "10,000-byte run of one byte",
        build: build_large,
    },
    CaseSpec {
        name: "mixed",
        redundancy: Redundancy::Mixed,
        summary: "short runs of distinct bytes then digits",
        build: build_mixed,
    },
    CaseSpec {
        name: "numbers",
        redundancy: Redundancy::Natural,
        summary: "decimal numbers 0..99 separated by spaces",
        build: build_numbers,
    },
    CaseSpec {
        name: "large_100kb",
        redundancy: Redundancy::Natural,
        summary: "repeated phrase cut to exactly 100,000 bytes",
        build: build_large_100kb,
    },
    CaseSpec {
        name: "large_1mb",
        redundancy: Redundancy::Mixed,
        summary: "pseudo-log lines with bursts, fit to exactly 1 MiB",
        build: build_large_1mb,
    },
    CaseSpec {
        name: "large_10mb",
        redundancy: Redundancy::Uniform,
        summary: "104,857 runs of 100 identical bytes",
        build: build_large_10mb,
    },
];

// ─────────────────────────────────────────────────────────────────────────────
// Builders
// ─────────────────────────────────────────────────────────────────────────────

const FOX: &str = "The quick brown fox jumps over the lazy dog.";

pub const LARGE_100KB_LEN: usize = 100_000;
pub const LARGE_1MB_LEN: usize = MB;
const LARGE_1MB_LINES: usize = 10_000;
const LARGE_10MB_RUN: usize = 100;
const LARGE_10MB_RUNS: usize = 10 * MB / LARGE_10MB_RUN;

/// Resize to exactly `len` bytes: truncate when longer, NUL-pad when shorter.
fn fit_to(mut buf: Vec<u8>, len: usize) -> Vec<u8> {
    buf.resize(len, 0);
    buf
}

fn build_empty() -> Vec<u8> {
    Vec::new()
}

fn build_single_byte() -> Vec<u8> {
    b"A".to_vec()
}

fn build_hello() -> Vec<u8> {
    b"Hello, World!".to_vec()
}

fn build_repeated() -> Vec<u8> {
    vec![b'a'; 100]
}

fn build_pattern() -> Vec<u8> {
    b"abcdefgh".repeat(20)
}

fn build_longer_text() -> Vec<u8> {
    [FOX; 4].join(" ").into_bytes()
}

fn build_ascii() -> Vec<u8> {
    (32u8..127).collect()
}

fn build_large() -> Vec<u8> {
    vec![b'x'; 10 * 1000]
}

fn build_mixed() -> Vec<u8> {
    b"AAAAAAAbbbbbCCCCCdddEEFF1234567890".to_vec()
}

fn build_numbers() -> Vec<u8> {
    (0..100).map(|i| format!("{} ", i)).collect::<String>().into_bytes()
}

fn build_large_100kb() -> Vec<u8> {
    let chunk = format!("{} ", FOX);
    let mut buf = Vec::with_capacity(LARGE_100KB_LEN + chunk.len());
    while buf.len() < LARGE_100KB_LEN {
        buf.extend_from_slice(chunk.as_bytes());
    }
    fit_to(buf, LARGE_100KB_LEN)
}

fn build_large_1mb() -> Vec<u8> {
    let mut buf = Vec::with_capacity(LARGE_1MB_LEN);
    for i in 0..LARGE_1MB_LINES {
        buf.extend_from_slice(
            format!(
                "Line {}: Lorem ipsum dolor sit amet, consectetur adipiscing elit. ",
                i
            )
            .as_bytes(),
        );
        if i % 10 == 0 {
            let burst = b'A' + (i % 26) as u8;
            buf.extend(std::iter::repeat(burst).take(50));
        }
    }
    fit_to(buf, LARGE_1MB_LEN)
}

fn build_large_10mb() -> Vec<u8> {
    vec![b'X'; LARGE_10MB_RUNS * LARGE_10MB_RUN]
}
