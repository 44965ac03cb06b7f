// Integration tests for fixture generation.
//
// Covers the full-corpus run (one fixture per case plus a manifest), the
// round-trip property over every generated fixture, byte-identical
// regeneration, and the halt-on-first-failure contract.

mod common;

use std::fs;

use common::{Fault, StubCodec};
use snappy_fixtures::corpus::{find, CATALOG};
use snappy_fixtures::fixture::content_checksum;
use snappy_fixtures::{
    FixtureStore, Generator, Manifest, ReferenceCodec, SnappyCodec, Validator,
};
use tempfile::TempDir;

fn generate_all() -> (TempDir, Vec<snappy_fixtures::FixtureSummary>) {
    let dir = TempDir::new().unwrap();
    let generator = Generator::new(SnappyCodec::new(), FixtureStore::new(dir.path()));
    let summaries = generator.run(CATALOG).expect("full corpus generation");
    (dir, summaries)
}

#[test]
fn full_run_writes_one_fixture_per_case_and_a_manifest() {
    let (dir, summaries) = generate_all();
    assert_eq!(summaries.len(), CATALOG.len());

    let store = FixtureStore::new(dir.path());
    let listed: Vec<String> = store.list().unwrap().into_iter().map(|f| f.name).collect();
    let mut expected: Vec<String> = CATALOG.iter().map(|c| c.name.to_owned()).collect();
    expected.sort();
    assert_eq!(listed, expected);

    let manifest = Manifest::load(dir.path()).unwrap();
    assert_eq!(manifest.len(), CATALOG.len());
    for summary in &summaries {
        let entry = manifest.get(&summary.name).unwrap();
        assert_eq!(entry.input_len, summary.input_size as u64);
        assert_eq!(entry.compressed_len, summary.compressed_size as u64);
        assert_eq!(entry.input_xxh64, summary.input_xxh64);
    }
}

#[test]
fn every_fixture_roundtrips_to_its_input() {
    let (dir, summaries) = generate_all();
    let codec = SnappyCodec::new();
    let store = FixtureStore::new(dir.path());
    for (spec, summary) in CATALOG.iter().zip(&summaries) {
        assert_eq!(spec.name, summary.name);
        let input = spec.materialize().input;
        let compressed = store.read(spec.name).unwrap();
        assert_eq!(compressed.len(), summary.compressed_size);
        let decoded = codec.decompress(&compressed).unwrap();
        assert_eq!(decoded.len(), input.len(), "{}", spec.name);
        assert!(decoded == input, "{}: decoded bytes differ", spec.name);
        assert_eq!(content_checksum(&decoded), summary.input_xxh64);
    }
}

#[test]
fn regeneration_is_byte_identical() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let cases: Vec<_> = CATALOG.iter().filter(|c| c.name != "large_10mb").copied().collect();
    Generator::new(SnappyCodec::new(), FixtureStore::new(dir_a.path()))
        .run(&cases)
        .unwrap();
    Generator::new(SnappyCodec::new(), FixtureStore::new(dir_b.path()))
        .run(&cases)
        .unwrap();
    for case in &cases {
        let file = format!("{}.snappy", case.name);
        assert_eq!(
            fs::read(dir_a.path().join(&file)).unwrap(),
            fs::read(dir_b.path().join(&file)).unwrap(),
            "{} differs between runs",
            case.name
        );
    }
    assert_eq!(
        fs::read(Manifest::path_in(dir_a.path())).unwrap(),
        fs::read(Manifest::path_in(dir_b.path())).unwrap()
    );
}

#[test]
fn subset_run_keeps_manifest_entries_of_other_cases() {
    let dir = TempDir::new().unwrap();
    let store = FixtureStore::new(dir.path());
    let all: Vec<_> = ["hello", "repeated", "pattern"]
        .iter()
        .map(|n| *find(n).unwrap())
        .collect();
    Generator::new(SnappyCodec::new(), store.clone()).run(&all).unwrap();
    let before = Manifest::load(dir.path()).unwrap();

    let only_hello = [*find("hello").unwrap()];
    Generator::new(SnappyCodec::new(), store.clone())
        .run(&only_hello)
        .unwrap();

    let after = Manifest::load(dir.path()).unwrap();
    assert_eq!(after, before);
    let outcome = Validator::new(SnappyCodec::new())
        .validate_store(&store, &after)
        .unwrap();
    assert!(outcome.unlisted.is_empty(), "{:?}", outcome.unlisted);
    assert!(outcome.passed());
    assert_eq!(outcome.reports.len(), 3);
}

#[test]
fn redundant_cases_compress_below_input_size() {
    let (_dir, summaries) = generate_all();
    for name in ["repeated", "pattern", "large", "large_100kb", "large_1mb", "large_10mb"] {
        let s = summaries.iter().find(|s| s.name == name).unwrap();
        assert!(
            s.compressed_size < s.input_size,
            "{}: {} >= {}",
            name,
            s.compressed_size,
            s.input_size
        );
    }
}

#[test]
fn empty_case_reports_zero_ratio_without_dividing_by_zero() {
    let dir = TempDir::new().unwrap();
    let generator = Generator::new(SnappyCodec::new(), FixtureStore::new(dir.path()));
    let summary = generator
        .generate_case(&find("empty").unwrap().materialize())
        .unwrap();
    assert_eq!(summary.input_size, 0);
    assert_eq!(summary.compressed_size, 1);
    assert_eq!(summary.ratio(), Some(0.0));
}

#[test]
fn compress_failure_halts_run_and_names_case() {
    let dir = TempDir::new().unwrap();
    let codec = StubCodec::new(Fault::RejectCompress);
    let generator = Generator::new(&codec, FixtureStore::new(dir.path()));
    let err = generator.run(CATALOG).unwrap_err();
    assert!(format!("{:#}", err).contains("`empty`"), "{:#}", err);
    assert!(format!("{:#}", err).contains("CodecError"), "{:#}", err);
    // halted at the first case: nothing written, no manifest
    assert_eq!(codec.calls(), vec!["compress"]);
    assert!(!Manifest::path_in(dir.path()).exists());
}

#[test]
fn unwritable_root_is_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, b"not a directory").unwrap();
    let generator = Generator::new(SnappyCodec::new(), FixtureStore::new(blocker.join("sub")));
    let err = generator
        .generate_case(&find("hello").unwrap().materialize())
        .unwrap_err();
    assert_eq!(err.kind(), "IOError");
}
