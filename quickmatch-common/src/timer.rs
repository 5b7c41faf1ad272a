use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

/// Drift-corrected countdown clock. Elapsed time is derived from wall-clock
/// deltas rather than counted callbacks, so the clock stays correct under
/// scheduler jitter or backgrounding. An external poller is expected to call
/// [`TimerState::tick`] frequently while the clock runs; `tick` is a pure
/// function of `(state, now)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimerState {
    Stopped {
        remaining_seconds: u32,
    },
    Running {
        remaining_seconds: u32,
        last_tick: OffsetDateTime,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    Started,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Can't adjust the clock while it is running")]
    ClockIsRunning,
}

impl TimerState {
    pub fn new(default_seconds: u32) -> Self {
        Self::Stopped {
            remaining_seconds: default_seconds,
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        match *self {
            Self::Stopped { remaining_seconds } | Self::Running { remaining_seconds, .. } => {
                remaining_seconds
            }
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// `Stopped -> Running`. Starting an already-running clock, or one with
    /// no time left, changes nothing and emits nothing.
    #[must_use]
    pub fn start(self, now: OffsetDateTime) -> (Self, Option<TimerSignal>) {
        match self {
            Self::Stopped { remaining_seconds } if remaining_seconds > 0 => (
                Self::Running {
                    remaining_seconds,
                    last_tick: now,
                },
                Some(TimerSignal::Started),
            ),
            other => (other, None),
        }
    }

    /// Advances a running clock by the whole seconds elapsed since the last
    /// tick. On reaching zero the clock stops and `Expired` is emitted, once
    /// per crossing: further ticks on the stopped clock are no-ops. A `now`
    /// before `last_tick` counts as no elapsed time.
    #[must_use]
    pub fn tick(self, now: OffsetDateTime) -> (Self, Option<TimerSignal>) {
        match self {
            Self::Running {
                remaining_seconds,
                last_tick,
            } => {
                let elapsed = (now - last_tick).whole_seconds();
                if elapsed < 1 {
                    return (self, None);
                }
                let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
                let remaining_seconds = remaining_seconds.saturating_sub(elapsed);
                if remaining_seconds == 0 {
                    (
                        Self::Stopped {
                            remaining_seconds: 0,
                        },
                        Some(TimerSignal::Expired),
                    )
                } else {
                    (
                        Self::Running {
                            remaining_seconds,
                            last_tick: now,
                        },
                        None,
                    )
                }
            }
            stopped => (stopped, None),
        }
    }

    /// `Running -> Stopped`, remaining time unchanged. No drift accrues
    /// while stopped.
    #[must_use]
    pub fn pause(self) -> Self {
        match self {
            Self::Running {
                remaining_seconds, ..
            } => Self::Stopped { remaining_seconds },
            stopped => stopped,
        }
    }

    /// Shifts the remaining time by whole minutes. Only permitted while
    /// stopped.
    pub fn adjust(self, delta_minutes: i32) -> Result<Self, TimerError> {
        match self {
            Self::Stopped { remaining_seconds } => {
                let remaining = i64::from(remaining_seconds) + i64::from(delta_minutes) * 60;
                Ok(Self::Stopped {
                    remaining_seconds: remaining.clamp(0, i64::from(u32::MAX)) as u32,
                })
            }
            Self::Running { .. } => Err(TimerError::ClockIsRunning),
        }
    }

    /// Forces the clock back to a stopped state holding `default_seconds`.
    #[must_use]
    pub fn reset(self, default_seconds: u32) -> Self {
        Self::Stopped {
            remaining_seconds: default_seconds,
        }
    }
}
