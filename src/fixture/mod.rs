//! Fixture persistence.
//!
//! | Submodule    | Responsibility |
//! |--------------|---------------|
//! | [`store`]    | [`FixtureStore`] — deterministic `<root>/<name>.snappy` paths, reads and writes. |
//! | [`manifest`] | [`Manifest`] — per-fixture expected size and XXH64 content fingerprint. |

pub mod manifest;
pub mod store;

pub use manifest::{content_checksum, parse_checksum, Manifest, ManifestEntry};
pub use store::{read_fixture, FixtureStore, StoredFixture};
