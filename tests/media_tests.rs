// Host-side tests for Act 1 media bookkeeping.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod warp {
    pub mod media {
        include!("../src/core/media.rs");
    }
}

use constants::{DEFAULT_VOLUME, MAX_ERROR_LOGS};
use warp::media::*;

#[test]
fn prefs_default_when_nothing_is_stored() {
    let p = MediaPrefs::from_stored(None, None);
    assert_eq!(p, MediaPrefs::default());
    assert_eq!(p.volume, DEFAULT_VOLUME);
    assert!(!p.muted);
}

#[test]
fn prefs_restore_stored_values() {
    let p = MediaPrefs::from_stored(Some("30"), Some("1"));
    assert!((p.volume - 0.3).abs() < 1e-9);
    assert!(p.muted);
    assert_eq!(p.volume_percent(), "30");
    assert_eq!(p.muted_flag(), "1");
}

#[test]
fn bad_entries_fall_back_individually() {
    let p = MediaPrefs::from_stored(Some("loud"), Some("1"));
    assert_eq!(p.volume, DEFAULT_VOLUME);
    assert!(p.muted);
    let p = MediaPrefs::from_stored(Some("80"), Some("yes"));
    assert!((p.volume - 0.8).abs() < 1e-9);
    assert!(!p.muted);
}

#[test]
fn volume_percent_is_clamped() {
    assert_eq!(parse_volume_percent("250"), Some(1.0));
    assert_eq!(parse_volume_percent("-5"), Some(0.0));
    assert_eq!(parse_volume_percent(" 50 "), Some(0.5));
    assert_eq!(parse_volume_percent("NaN"), None);
    assert_eq!(parse_volume_percent(""), None);
    let p = MediaPrefs {
        volume: 7.0,
        muted: false,
    };
    assert_eq!(p.volume_percent(), "100");
    assert_eq!(p.muted_flag(), "0");
}

#[test]
fn mute_label_names_the_next_action() {
    assert_eq!(mute_button_label(true), "Unmute music");
    assert_eq!(mute_button_label(false), "Mute music");
}

#[test]
fn error_budget_logs_then_notices_then_goes_quiet() {
    let mut b = ErrorBudget::default();
    for _ in 0..MAX_ERROR_LOGS {
        assert_eq!(b.record(), ErrorLog::Log);
        assert!(!b.exhausted());
    }
    assert_eq!(b.record(), ErrorLog::SuppressNotice);
    assert!(b.exhausted());
    assert_eq!(b.record(), ErrorLog::Silent);
    assert_eq!(b.record(), ErrorLog::Silent);
    assert_eq!(b.count(), MAX_ERROR_LOGS + 3);
}

#[test]
fn zero_budget_notices_on_the_first_error() {
    let mut b = ErrorBudget::new(0);
    assert_eq!(b.record(), ErrorLog::SuppressNotice);
    assert_eq!(b.record(), ErrorLog::Silent);
}

#[test]
fn loader_minimum_display_time() {
    assert_eq!(loader_remaining_ms(1000.0, 1500.0, 2000.0), Some(1500.0));
    assert_eq!(loader_remaining_ms(1000.0, 3000.0, 2000.0), None);
    assert_eq!(loader_remaining_ms(1000.0, 9000.0, 2000.0), None);
}

#[test]
fn volume_slider_visibility_follows_autoplay() {
    assert!(AutoplayOutcome::WithSound.shows_volume());
    assert!(AutoplayOutcome::Muted.shows_volume());
    assert!(!AutoplayOutcome::Blocked.shows_volume());
}
