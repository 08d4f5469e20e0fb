// Best-effort teardown: every step runs, failures are logged and counted.

use crate::constants::{APP_MOUNT_ID, LIGHT_OVERLAY_ID, TITLE_CLASS};

pub struct Teardown {
    label: &'static str,
    failures: Vec<String>,
    steps: usize,
}

impl Teardown {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            failures: Vec::new(),
            steps: 0,
        }
    }

    /// Run one release step. A failing step never stops the next one.
    pub fn step<E: std::fmt::Debug>(&mut self, name: &str, f: impl FnOnce() -> Result<(), E>) {
        self.steps += 1;
        if let Err(e) = f() {
            log::warn!("[{}] teardown step '{}' failed: {:?}", self.label, name, e);
            self.failures.push(name.to_string());
        }
    }

    /// Step with no failure mode of its own (e.g. GPU `destroy`).
    pub fn always(&mut self, name: &str, f: impl FnOnce()) {
        self.step(name, || {
            f();
            Ok::<(), ()>(())
        });
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn finish(self) -> usize {
        if self.failures.is_empty() {
            log::debug!("[{}] teardown complete ({} steps)", self.label, self.steps);
        } else {
            log::warn!(
                "[{}] teardown finished with {} failed step(s): {}",
                self.label,
                self.failures.len(),
                self.failures.join(", ")
            );
        }
        self.failures.len()
    }
}

/// One-way released flag behind idempotent `dispose`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisposeLatch {
    released: bool,
}

impl DisposeLatch {
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// True for the first caller only.
    pub fn claim(&mut self) -> bool {
        !std::mem::replace(&mut self.released, true)
    }
}

/// All results are already evaluated; report the first failure.
pub fn first_error<E, const N: usize>(results: [Result<(), E>; N]) -> Result<(), E> {
    results.into_iter().find_map(Result::err).map_or(Ok(()), Err)
}

/// What to do with a leftover body child when Act 1 vacates the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sweep {
    Keep,
    Hide,
    Remove,
}

pub const SWEEP_KEEP_IDS: &[&str] = &[APP_MOUNT_ID, LIGHT_OVERLAY_ID];
pub const SWEEP_KEEP_CLASSES: &[&str] = &[TITLE_CLASS];

pub fn sweep_decision(id: &str, class_name: &str, tag: &str) -> Sweep {
    if SWEEP_KEEP_IDS.contains(&id) {
        return Sweep::Keep;
    }
    if class_name
        .split_whitespace()
        .any(|c| SWEEP_KEEP_CLASSES.contains(&c))
    {
        return Sweep::Keep;
    }
    match tag.to_ascii_uppercase().as_str() {
        "CANVAS" => Sweep::Keep,
        // Scripts may still be loading runtime code.
        "SCRIPT" => Sweep::Hide,
        _ => Sweep::Remove,
    }
}
