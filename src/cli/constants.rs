// cli/constants.rs — Program identity strings, display level, and output macros.
//
// Both binaries share one process-wide display level. Results (summaries,
// checklists) go to stdout through `displayout!`; diagnostics go to stderr
// through `display!` / `displaylevel!`.

use std::sync::atomic::{AtomicU32, Ordering};

// ── Program identity ──────────────────────────────────────────────────────────
pub const GENERATOR_NAME: &str = "generate-fixtures";
pub const VALIDATOR_NAME: &str = "validate-fixture";

/// Check mark prefixed to every passed validation stage.
pub const CHECK_MARK: &str = "✓";
/// Final line printed when every stage passed.
pub const ALL_PASSED_MARKER: &str = "✅ ALL CHECKS PASSED";

// ── Size multipliers ──────────────────────────────────────────────────────────
pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal; 3 = per-stage detail; 4 = verbose
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Apply `-v` / `-q` counts on top of the default level.
///
/// Each `-v` raises the level by one, each `-q` lowers it by one; the result
/// is clamped to `0..=4`.
pub fn adjust_display_level(verbose: u8, quiet: u8) -> u32 {
    let level = (2 + verbose as i32 - quiet as i32).clamp(0, 4) as u32;
    set_display_level(level);
    level
}

// ── Display macros ────────────────────────────────────────────────────────────

/// Print to stdout when the display level is at least 2.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= 2 {
            print!($($arg)*);
        }
    };
}

/// Print to stderr when the display level is at least 1.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= 1 {
            eprint!($($arg)*);
        }
    };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_multipliers() {
        assert_eq!(KB, 1024);
        assert_eq!(MB, 1024 * 1024);
    }

    #[test]
    fn adjust_display_level_clamps() {
        let saved = display_level();
        assert_eq!(adjust_display_level(0, 0), 2);
        assert_eq!(adjust_display_level(1, 0), 3);
        assert_eq!(adjust_display_level(9, 0), 4);
        assert_eq!(adjust_display_level(0, 1), 1);
        assert_eq!(adjust_display_level(0, 7), 0);
        set_display_level(saved);
    }
}
