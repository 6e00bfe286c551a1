use bevy_ecs::component::Component;

use crate::model::PlayerId;

/// Which way the captured percent is being pushed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaptureDirection {
    #[default]
    Still,
    Claim,
    Unclaim,
}

impl CaptureDirection {
    /// Integer form used in persisted marker attributes.
    pub fn to_stored(self) -> i32 {
        match self {
            CaptureDirection::Still => 0,
            CaptureDirection::Claim => 1,
            CaptureDirection::Unclaim => 2,
        }
    }

    /// Unknown values load as `Still`.
    pub fn from_stored(value: i32) -> Self {
        match value {
            1 => CaptureDirection::Claim,
            2 => CaptureDirection::Unclaim,
            _ => CaptureDirection::Still,
        }
    }

    /// Holding the accelerate modifier pulls the banner down.
    pub fn from_input(accelerating: bool) -> Self {
        if accelerating {
            CaptureDirection::Unclaim
        } else {
            CaptureDirection::Claim
        }
    }
}

/// An actor holding the marker.
#[derive(Clone, Debug, PartialEq)]
pub struct Contest {
    pub actor: PlayerId,
    /// A claim rejection was already shown during this contest.
    pub rejection_shown: bool,
}

/// Per-marker capture progress.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct CaptureState {
    pub captured_percent: f32,
    pub direction: CaptureDirection,
    pub contest: Option<Contest>,
}

impl CaptureState {
    pub fn captured_by(&self) -> Option<&PlayerId> {
        self.contest.as_ref().map(|c| &c.actor)
    }

    pub fn is_contested(&self) -> bool {
        self.contest.is_some()
    }

    /// Begin a contest. Fails while another actor holds the marker; the
    /// holder re-starting is accepted.
    pub fn try_start(&mut self, actor: &PlayerId) -> bool {
        match &self.contest {
            Some(c) => c.actor == *actor,
            None => {
                self.contest = Some(Contest {
                    actor: actor.clone(),
                    rejection_shown: false,
                });
                true
            }
        }
    }

    /// End the active contest. Progress is kept.
    pub fn end_contest(&mut self) {
        self.contest = None;
        self.direction = CaptureDirection::Still;
    }

    /// Where the percent is headed this tick. `idle_target` is only consulted
    /// when nobody holds the marker.
    pub fn target_percent(&self, idle_target: impl FnOnce() -> bool) -> f32 {
        if self.is_contested() {
            match self.direction {
                CaptureDirection::Claim => 1.0,
                CaptureDirection::Unclaim => 0.0,
                CaptureDirection::Still => self.captured_percent,
            }
        } else if idle_target() {
            1.0
        } else {
            0.0
        }
    }

    /// Ramp toward `target` by at most `dt / capture_duration`.
    pub fn advance(&mut self, target: f32, dt: f32, capture_duration: f32) {
        let step = if capture_duration > 0.0 {
            dt / capture_duration
        } else {
            1.0
        };
        self.captured_percent = move_toward(self.captured_percent, target, step);
    }
}

/// Move `current` toward `target` by at most `max_delta`, snapping when within
/// reach. The result stays in [0, 1].
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let next = if (target - current).abs() <= max_delta {
        target
    } else if target > current {
        current + max_delta
    } else {
        current - max_delta
    };
    next.clamp(0.0, 1.0)
}
