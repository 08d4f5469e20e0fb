// Act sequencing. The orchestrator feeds browser signals in and acts on the
// returned decisions; this type owns no browser handles.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Act {
    Act1,
    TransitioningTo2,
    Act2,
    TransitioningTo3,
    Act3,
}

/// Where the warp-finished signal came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionSource {
    Notification,
    Broadcast,
    Ceiling,
}

impl CompletionSource {
    pub fn tag(self) -> &'static str {
        match self {
            CompletionSource::Notification => "notification",
            CompletionSource::Broadcast => "broadcast",
            CompletionSource::Ceiling => "ceiling",
        }
    }

    /// Winner of the completion race. Anything unrecognised counts as the
    /// ceiling, the only racer that always settles.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("notification") => CompletionSource::Notification,
            Some("broadcast") => CompletionSource::Broadcast,
            _ => CompletionSource::Ceiling,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Warp stage is available: begin Act 1 -> Act 2 now.
    Begin,
    /// Warp stage still loading: the trigger waits in the pending slot.
    Deferred,
    /// A transition is already under way or done.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarpAvailability {
    NotRequested,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug)]
pub struct Orchestration {
    act: Act,
    warp: WarpAvailability,
    pending_trigger: bool,
    completion: Option<CompletionSource>,
}

impl Default for Orchestration {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestration {
    pub fn new() -> Self {
        Self {
            act: Act::Act1,
            warp: WarpAvailability::NotRequested,
            pending_trigger: false,
            completion: None,
        }
    }

    pub fn act(&self) -> Act {
        self.act
    }

    pub fn warp(&self) -> WarpAvailability {
        self.warp
    }

    pub fn has_pending_trigger(&self) -> bool {
        self.pending_trigger
    }

    pub fn completion(&self) -> Option<CompletionSource> {
        self.completion
    }

    /// True when the caller should kick off loading the warp stage.
    pub fn needs_warp_load(&self) -> bool {
        self.warp == WarpAvailability::NotRequested
    }

    pub fn warp_loading(&mut self) {
        if self.warp == WarpAvailability::NotRequested {
            self.warp = WarpAvailability::Loading;
        }
    }

    /// A qualifying trigger arrived. Only the first one is honored; repeats
    /// coalesce into the single pending slot.
    pub fn on_trigger(&mut self) -> TriggerOutcome {
        if self.act != Act::Act1 {
            return TriggerOutcome::Ignored;
        }
        match self.warp {
            WarpAvailability::Ready | WarpAvailability::Failed => {
                self.pending_trigger = false;
                self.act = Act::TransitioningTo2;
                TriggerOutcome::Begin
            }
            WarpAvailability::NotRequested | WarpAvailability::Loading => {
                if self.pending_trigger {
                    TriggerOutcome::Ignored
                } else {
                    self.pending_trigger = true;
                    TriggerOutcome::Deferred
                }
            }
        }
    }

    /// The warp stage finished loading (`ok`) or failed to. Returns true when
    /// a pending trigger was consumed and the transition should begin now.
    pub fn on_warp_loaded(&mut self, ok: bool) -> bool {
        self.warp = if ok {
            WarpAvailability::Ready
        } else {
            WarpAvailability::Failed
        };
        if self.pending_trigger && self.act == Act::Act1 {
            self.pending_trigger = false;
            self.act = Act::TransitioningTo2;
            return true;
        }
        false
    }

    /// Warp start was issued and Act 1 disposed.
    pub fn on_warp_started(&mut self) {
        if self.act == Act::TransitioningTo2 {
            self.act = Act::Act2;
        }
    }

    /// First completion signal wins; later ones are ignored. Returns true when
    /// the caller should hand off to Act 3.
    pub fn on_stage_completion(&mut self, source: CompletionSource) -> bool {
        if self.completion.is_some() {
            return false;
        }
        match self.act {
            Act::TransitioningTo2 | Act::Act2 => {
                self.completion = Some(source);
                self.act = Act::TransitioningTo3;
                true
            }
            _ => false,
        }
    }

    pub fn on_act3_mounted(&mut self) {
        if self.act == Act::TransitioningTo3 {
            self.act = Act::Act3;
        }
    }
}
