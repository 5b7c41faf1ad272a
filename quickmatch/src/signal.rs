use quickmatch_common::timer::TimerSignal;

/// Feedback events emitted while operating a match. The engine only emits
/// these; rendering sound is an external capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSignal {
    Score,
    TimerStarted,
    TimerExpired,
}

impl From<TimerSignal> for MatchSignal {
    fn from(signal: TimerSignal) -> Self {
        match signal {
            TimerSignal::Started => Self::TimerStarted,
            TimerSignal::Expired => Self::TimerExpired,
        }
    }
}

impl core::fmt::Display for MatchSignal {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Score => write!(f, "Score"),
            Self::TimerStarted => write!(f, "Timer Started"),
            Self::TimerExpired => write!(f, "Timer Expired"),
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, signal: MatchSignal);
}

/// Sink that discards every signal, for callers without audio.
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _signal: MatchSignal) {}
}
