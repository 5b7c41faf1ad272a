use quickmatch_common::{
    config::Timing,
    evaluation::{Evaluation, EvaluationUpdate},
    participant::{Participant, Role, RosterError, validate_roster},
    score::{ScoreError, ScoreField, ScoreVariant},
    side::Side,
    sport::Sport,
    timer::{TimerError, TimerSignal, TimerState},
};
use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Mutation rejected: the match is finalized")]
    MatchFinalized,
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Timer(#[from] TimerError),
}

/// The single mutable root of a live quick match. Owns the score, the
/// clock, the roster and the evaluation exclusively; every mutation returns
/// a new value (snapshot-replace), the stored one is never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSession {
    pub id: String,
    pub sport: Sport,
    pub score: ScoreVariant,
    pub timer: TimerState,
    pub participants: Vec<Participant>,
    pub evaluation: Evaluation,
    pub finalized: bool,
    pub created_at: OffsetDateTime,
}

fn new_match_id(now: OffsetDateTime) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    let suffix = Alphanumeric.sample_string(&mut rand::rng(), 9);
    format!("{millis}_{suffix}")
}

impl MatchSession {
    /// Validates the roster and initializes the score and clock from the
    /// sport's kind and the configured default duration.
    pub fn new(
        sport: Sport,
        participants: Vec<Participant>,
        timing: &Timing,
        now: OffsetDateTime,
    ) -> Result<Self, SessionError> {
        validate_roster(&participants)?;
        let score = ScoreVariant::new(sport.kind);
        let timer = TimerState::new(timing.default_seconds(sport.kind));
        Ok(Self {
            id: new_match_id(now),
            sport,
            score,
            timer,
            participants,
            evaluation: Evaluation::default(),
            finalized: false,
            created_at: now,
        })
    }

    pub fn participant_for_role(&self, role: Role) -> Option<&Participant> {
        self.participants.iter().find(|p| p.role == role)
    }

    /// The team playing on `side`. Always present in a valid roster.
    pub fn participant_for_side(&self, side: Side) -> Option<&Participant> {
        self.participants.iter().find(|p| p.role.side() == Some(side))
    }

    fn reject_if_finalized(&self) -> Result<(), SessionError> {
        if self.finalized {
            Err(SessionError::MatchFinalized)
        } else {
            Ok(())
        }
    }

    pub fn adjust_score(
        &self,
        side: Side,
        field: &ScoreField,
        delta: i32,
    ) -> Result<Self, SessionError> {
        self.reject_if_finalized()?;
        let score = self.score.adjust(side, field, delta)?;
        Ok(Self {
            score,
            ..self.clone()
        })
    }

    pub fn toggle_cone(&self, side: Side, index: usize) -> Result<Self, SessionError> {
        self.reject_if_finalized()?;
        let score = self.score.toggle_cone(side, index)?;
        Ok(Self {
            score,
            ..self.clone()
        })
    }

    pub fn update_evaluation(&self, update: &EvaluationUpdate) -> Result<Self, SessionError> {
        self.reject_if_finalized()?;
        Ok(Self {
            evaluation: self.evaluation.merged(update),
            ..self.clone()
        })
    }

    pub fn start_timer(
        &self,
        now: OffsetDateTime,
    ) -> Result<(Self, Option<TimerSignal>), SessionError> {
        self.reject_if_finalized()?;
        let (timer, signal) = self.timer.start(now);
        Ok((
            Self {
                timer,
                ..self.clone()
            },
            signal,
        ))
    }

    pub fn tick_timer(
        &self,
        now: OffsetDateTime,
    ) -> Result<(Self, Option<TimerSignal>), SessionError> {
        self.reject_if_finalized()?;
        let (timer, signal) = self.timer.tick(now);
        Ok((
            Self {
                timer,
                ..self.clone()
            },
            signal,
        ))
    }

    pub fn pause_timer(&self) -> Result<Self, SessionError> {
        self.reject_if_finalized()?;
        Ok(Self {
            timer: self.timer.pause(),
            ..self.clone()
        })
    }

    pub fn adjust_timer(&self, delta_minutes: i32) -> Result<Self, SessionError> {
        self.reject_if_finalized()?;
        let timer = self.timer.adjust(delta_minutes)?;
        Ok(Self {
            timer,
            ..self.clone()
        })
    }

    pub fn reset_timer(&self, timing: &Timing) -> Result<Self, SessionError> {
        self.reject_if_finalized()?;
        Ok(Self {
            timer: self.timer.reset(timing.default_seconds(self.sport.kind)),
            ..self.clone()
        })
    }

    /// Stops the clock and marks the session read-only. Terminal: any later
    /// mutation, including a second finalize, is rejected.
    pub fn finalize(&self) -> Result<Self, SessionError> {
        self.reject_if_finalized()?;
        Ok(Self {
            timer: self.timer.pause(),
            finalized: true,
            ..self.clone()
        })
    }
}
