//! Fixture generation.
//!
//! For each catalog case, in order: build the input, compress it with the
//! reference codec, write `<root>/<name>.snappy`, print a summary block, and
//! record a manifest entry. The manifest is written once every fixture is on
//! disk. The first failure halts the run; a partial corpus is never reported
//! as success.

use std::path::PathBuf;

use anyhow::Context;

use crate::codec::ReferenceCodec;
use crate::corpus::{CaseSpec, TestCase};
use crate::error::HarnessError;
use crate::fixture::{content_checksum, FixtureStore, Manifest, ManifestEntry};
use crate::{displaylevel, displayout, format_ratio, ratio};

/// What was written for one case.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSummary {
    pub name: String,
    pub input_size: usize,
    pub compressed_size: usize,
    pub input_xxh64: u64,
    pub path: PathBuf,
}

impl FixtureSummary {
    /// `input / compressed`, or `None` when nothing was written.
    pub fn ratio(&self) -> Option<f64> {
        ratio(self.input_size as u64, self.compressed_size as u64)
    }

    pub fn manifest_entry(&self) -> ManifestEntry {
        ManifestEntry {
            name: self.name.clone(),
            input_len: self.input_size as u64,
            compressed_len: self.compressed_size as u64,
            input_xxh64: self.input_xxh64,
        }
    }

    /// The human-readable block printed after each case.
    pub fn render(&self) -> String {
        format!(
            "{}:\n  Input size: {} bytes\n  Compressed size: {} bytes\n  Ratio: {}\n  Saved to: {}\n",
            self.name,
            self.input_size,
            self.compressed_size,
            format_ratio(self.ratio()),
            self.path.display()
        )
    }
}

/// Drives a [`ReferenceCodec`] over catalog cases into a [`FixtureStore`].
pub struct Generator<C> {
    codec: C,
    store: FixtureStore,
}

impl<C: ReferenceCodec> Generator<C> {
    pub fn new(codec: C, store: FixtureStore) -> Self {
        Generator { codec, store }
    }

    pub fn store(&self) -> &FixtureStore {
        &self.store
    }

    /// Compress one case and write its fixture.
    pub fn generate_case(&self, case: &TestCase) -> Result<FixtureSummary, HarnessError> {
        displaylevel!(4, "compressing {} ({} bytes)\n", case.name, case.input.len());
        let compressed = self.codec.compress(&case.input)?;
        let path = self.store.write(case.name, &compressed)?;
        Ok(FixtureSummary {
            name: case.name.to_owned(),
            input_size: case.input.len(),
            compressed_size: compressed.len(),
            input_xxh64: content_checksum(&case.input),
            path,
        })
    }

    /// Generate every case in `cases`, then write the manifest.
    pub fn run(&self, cases: &[CaseSpec]) -> anyhow::Result<Vec<FixtureSummary>> {
        displayout!("Generating Snappy test data...\n\n");
        displaylevel!(3, "codec: {}\n", self.codec.name());

        // Entries for cases outside this run survive a partial regeneration.
        let mut manifest = if Manifest::path_in(self.store.root()).is_file() {
            Manifest::load(self.store.root()).context("reading existing fixture manifest")?
        } else {
            Manifest::new()
        };
        let mut summaries = Vec::with_capacity(cases.len());
        for spec in cases {
            let case = spec.materialize();
            let summary = self
                .generate_case(&case)
                .with_context(|| format!("generating fixture `{}`", spec.name))?;
            // `case` (and its input) is dropped here, before the next one is built.
            displayout!("{}\n", summary.render());
            manifest.push(summary.manifest_entry());
            summaries.push(summary);
        }

        let manifest_path = manifest
            .write_to(self.store.root())
            .context("writing fixture manifest")?;
        displaylevel!(3, "manifest: {}\n", manifest_path.display());
        displayout!("Test data generation complete!\n");
        Ok(summaries)
    }
}
