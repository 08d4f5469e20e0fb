// Host-side tests for act sequencing: trigger coalescing, the pending slot
// and first-completion-wins.

#![allow(dead_code)]
mod warp {
    pub mod acts {
        include!("../src/core/acts.rs");
    }
}

use warp::acts::{Act, CompletionSource, Orchestration, TriggerOutcome, WarpAvailability};

#[test]
fn starts_in_act1_without_a_warp() {
    let o = Orchestration::new();
    assert_eq!(o.act(), Act::Act1);
    assert_eq!(o.warp(), WarpAvailability::NotRequested);
    assert!(o.needs_warp_load());
    assert!(!o.has_pending_trigger());
    assert_eq!(o.completion(), None);
}

#[test]
fn trigger_while_ready_begins_immediately() {
    let mut o = Orchestration::new();
    o.warp_loading();
    assert!(!o.on_warp_loaded(true));
    assert_eq!(o.on_trigger(), TriggerOutcome::Begin);
    assert_eq!(o.act(), Act::TransitioningTo2);
    assert_eq!(o.on_trigger(), TriggerOutcome::Ignored);
}

#[test]
fn repeated_triggers_during_load_yield_one_transition() {
    let mut o = Orchestration::new();
    o.warp_loading();
    assert!(!o.needs_warp_load());
    assert_eq!(o.on_trigger(), TriggerOutcome::Deferred);
    assert_eq!(o.on_trigger(), TriggerOutcome::Ignored);
    assert_eq!(o.on_trigger(), TriggerOutcome::Ignored);
    assert!(o.has_pending_trigger());

    assert!(o.on_warp_loaded(true));
    assert!(!o.has_pending_trigger());
    assert_eq!(o.act(), Act::TransitioningTo2);
    assert_eq!(o.on_trigger(), TriggerOutcome::Ignored);
}

#[test]
fn trigger_before_any_load_is_kept() {
    let mut o = Orchestration::new();
    assert_eq!(o.on_trigger(), TriggerOutcome::Deferred);
    assert!(o.needs_warp_load());
    o.warp_loading();
    assert_eq!(o.warp(), WarpAvailability::Loading);
    assert!(o.on_warp_loaded(true));
}

#[test]
fn failed_load_still_releases_the_pending_trigger() {
    let mut o = Orchestration::new();
    o.warp_loading();
    assert_eq!(o.on_trigger(), TriggerOutcome::Deferred);
    assert!(o.on_warp_loaded(false));
    assert_eq!(o.warp(), WarpAvailability::Failed);
    assert_eq!(o.act(), Act::TransitioningTo2);
}

#[test]
fn first_completion_signal_wins() {
    let mut o = Orchestration::new();
    o.on_warp_loaded(true);
    o.on_trigger();
    o.on_warp_started();
    assert_eq!(o.act(), Act::Act2);

    assert!(o.on_stage_completion(CompletionSource::Broadcast));
    assert!(!o.on_stage_completion(CompletionSource::Notification));
    assert!(!o.on_stage_completion(CompletionSource::Ceiling));
    assert_eq!(o.completion(), Some(CompletionSource::Broadcast));
    assert_eq!(o.act(), Act::TransitioningTo3);
}

#[test]
fn ceiling_completes_a_stalled_warp() {
    let mut o = Orchestration::new();
    o.on_warp_loaded(false);
    assert_eq!(o.on_trigger(), TriggerOutcome::Begin);
    o.on_warp_started();
    assert!(o.on_stage_completion(CompletionSource::Ceiling));
    o.on_act3_mounted();
    assert_eq!(o.act(), Act::Act3);
}

#[test]
fn completion_before_act2_is_ignored() {
    let mut o = Orchestration::new();
    assert!(!o.on_stage_completion(CompletionSource::Broadcast));
    assert_eq!(o.act(), Act::Act1);
    assert_eq!(o.completion(), None);
}

#[test]
fn full_sequence_reaches_act3_once() {
    let mut o = Orchestration::default();
    o.warp_loading();
    assert_eq!(o.on_trigger(), TriggerOutcome::Deferred);
    assert!(o.on_warp_loaded(true));
    o.on_warp_started();
    assert!(o.on_stage_completion(CompletionSource::Notification));
    o.on_act3_mounted();
    assert_eq!(o.act(), Act::Act3);

    // Nothing moves the page back.
    assert_eq!(o.on_trigger(), TriggerOutcome::Ignored);
    assert!(!o.on_warp_loaded(true));
    o.on_warp_started();
    assert_eq!(o.act(), Act::Act3);
}

#[test]
fn race_winner_tags_map_back_to_sources() {
    for source in [
        CompletionSource::Notification,
        CompletionSource::Broadcast,
        CompletionSource::Ceiling,
    ] {
        assert_eq!(CompletionSource::from_tag(Some(source.tag())), source);
    }
    // A race that produced nothing usable is treated as the ceiling firing.
    assert_eq!(CompletionSource::from_tag(None), CompletionSource::Ceiling);
    assert_eq!(CompletionSource::from_tag(Some("other")), CompletionSource::Ceiling);
}

#[test]
fn silent_warp_reaches_act3_through_the_ceiling() {
    let mut o = Orchestration::new();
    o.warp_loading();
    assert!(!o.on_warp_loaded(true));
    assert_eq!(o.on_trigger(), TriggerOutcome::Begin);
    o.on_warp_started();
    // Neither the notification nor the broadcast ever arrives.
    assert!(o.on_stage_completion(CompletionSource::from_tag(Some("ceiling"))));
    assert_eq!(o.completion(), Some(CompletionSource::Ceiling));
    o.on_act3_mounted();
    assert_eq!(o.act(), Act::Act3);
}
