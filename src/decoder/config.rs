//! Decoder tuning read once from the environment
//!
//! - `QR_ADAPTIVE_WINDOW`: adaptive binarization window in pixels (0 = derive from image size)
//! - `QR_MAX_FINDER_GROUPS`: finder triples tried per binarization pass (default 16)
//! - `QR_MIRROR_FALLBACK`: retry mirrored symbols when format info is unreadable (default 1)

use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static ADAPTIVE_WINDOW: OnceLock<usize> = OnceLock::new();

pub(crate) fn adaptive_window() -> usize {
    *ADAPTIVE_WINDOW.get_or_init(|| parse_env_usize("QR_ADAPTIVE_WINDOW", 0).min(255))
}

static MAX_FINDER_GROUPS: OnceLock<usize> = OnceLock::new();

pub(crate) fn max_finder_groups() -> usize {
    *MAX_FINDER_GROUPS.get_or_init(|| parse_env_usize("QR_MAX_FINDER_GROUPS", 16).clamp(1, 64))
}

static MIRROR_FALLBACK: OnceLock<bool> = OnceLock::new();

pub(crate) fn mirror_fallback() -> bool {
    *MIRROR_FALLBACK.get_or_init(|| parse_env_bool_u8("QR_MIRROR_FALLBACK", true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers_fall_back_to_default() {
        assert_eq!(parse_env_usize("QRKIT_TEST_UNSET_VARIABLE", 7), 7);
        assert!(parse_env_bool_u8("QRKIT_TEST_UNSET_VARIABLE", true));
        assert!(!parse_env_bool_u8("QRKIT_TEST_UNSET_VARIABLE", false));
    }

    #[test]
    fn test_defaults_are_in_range() {
        assert!((1..=64).contains(&max_finder_groups()));
        assert!(adaptive_window() <= 255);
    }
}
