// Host-side tests for best-effort teardown and the Act 1 body sweep.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod warp {
    pub mod teardown {
        include!("../src/core/teardown.rs");
    }
}

use constants::{APP_MOUNT_ID, LIGHT_OVERLAY_ID, TITLE_CLASS};
use std::cell::RefCell;
use warp::teardown::{first_error, sweep_decision, DisposeLatch, Sweep, Teardown};

#[test]
fn failing_step_does_not_stop_the_rest() {
    let ran = RefCell::new(Vec::new());
    let mut t = Teardown::new("test");
    t.step("first", || {
        ran.borrow_mut().push(1);
        Ok::<(), &str>(())
    });
    t.step("second", || {
        ran.borrow_mut().push(2);
        Err("boom")
    });
    t.always("third", || ran.borrow_mut().push(3));
    assert_eq!(*ran.borrow(), vec![1, 2, 3]);
    assert_eq!(t.steps(), 3);
    assert_eq!(t.failures(), ["second".to_string()]);
    assert_eq!(t.finish(), 1);
}

#[test]
fn clean_teardown_reports_zero() {
    let mut t = Teardown::new("clean");
    t.always("a", || {});
    t.always("b", || {});
    assert!(t.failures().is_empty());
    assert_eq!(t.finish(), 0);
}

#[test]
fn sweep_keeps_the_next_acts_nodes() {
    assert_eq!(sweep_decision(APP_MOUNT_ID, "", "div"), Sweep::Keep);
    assert_eq!(sweep_decision(LIGHT_OVERLAY_ID, "", "div"), Sweep::Keep);
    assert_eq!(sweep_decision("", &format!("x {TITLE_CLASS}"), "div"), Sweep::Keep);
    assert_eq!(sweep_decision("part2-canvas", "", "CANVAS"), Sweep::Keep);
    assert_eq!(sweep_decision("", "", "canvas"), Sweep::Keep);
}

#[test]
fn sweep_hides_scripts_and_removes_the_rest() {
    assert_eq!(sweep_decision("", "", "SCRIPT"), Sweep::Hide);
    assert_eq!(sweep_decision("bg-container", "", "DIV"), Sweep::Remove);
    assert_eq!(sweep_decision("", "entering-text", "SPAN"), Sweep::Remove);
}

#[test]
fn dispose_latch_claims_once() {
    let mut latch = DisposeLatch::default();
    assert!(!latch.is_released());
    assert!(latch.claim());
    assert!(latch.is_released());
    assert!(!latch.claim());
    assert!(!latch.claim());
}

#[test]
fn first_error_runs_everything_and_reports_the_earliest_failure() {
    let calls = RefCell::new(Vec::new());
    let act = |name: &'static str, ok: bool| {
        calls.borrow_mut().push(name);
        if ok {
            Ok(())
        } else {
            Err(name)
        }
    };
    let r = first_error([act("pause", false), act("source", false), act("remove", true)]);
    assert_eq!(r, Err("pause"));
    assert_eq!(*calls.borrow(), vec!["pause", "source", "remove"]);
    assert_eq!(first_error::<&str, 2>([Ok(()), Ok(())]), Ok(()));
}

#[test]
fn failed_pause_does_not_block_release_and_removal() {
    let ran = RefCell::new(Vec::new());
    let mut t = Teardown::new("media");
    t.step("video pause", || {
        ran.borrow_mut().push("pause");
        Err::<(), &str>("NotAllowedError")
    });
    t.step("video source", || {
        ran.borrow_mut().push("source");
        Ok::<(), &str>(())
    });
    t.always("video remove", || ran.borrow_mut().push("remove"));
    assert_eq!(*ran.borrow(), vec!["pause", "source", "remove"]);
    assert_eq!(t.finish(), 1);
}
