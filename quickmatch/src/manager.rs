use crate::{
    codec::{self, CodecError},
    session::{MatchSession, SessionError},
    signal::{AudioSink, MatchSignal, NullSink},
    store::{SessionStore, storage_key},
};
use log::*;
use quickmatch_common::{
    config::Timing,
    evaluation::EvaluationUpdate,
    participant::Participant,
    score::ScoreField,
    side::Side,
    sport::Sport,
    timer::TimerSignal,
};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("No match found with id {0}")]
    NotFound(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

type Result<T> = std::result::Result<T, ManagerError>;

/// Orchestrates the quick-match flow: every mutation loads the session from
/// the store, applies a pure transform, persists the new snapshot through
/// the codec, and forwards any feedback signal to the audio sink.
pub struct MatchManager<S: SessionStore> {
    timing: Timing,
    store: S,
    sink: Box<dyn AudioSink>,
}

impl<S: SessionStore> MatchManager<S> {
    pub fn new(timing: Timing, store: S) -> Self {
        Self::with_sink(timing, store, Box::new(NullSink))
    }

    pub fn with_sink(timing: Timing, store: S, sink: Box<dyn AudioSink>) -> Self {
        Self {
            timing,
            store,
            sink,
        }
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    fn status_string(session: &MatchSession) -> String {
        format!("[{} | {}]", session.sport.code, session.score)
    }

    fn load(&self, match_id: &str) -> Result<MatchSession> {
        let encoded = self
            .store
            .get(&storage_key(match_id))
            .ok_or_else(|| ManagerError::NotFound(match_id.to_string()))?;
        Ok(codec::decode(&encoded)?)
    }

    fn persist(&mut self, session: &MatchSession) -> Result<()> {
        let encoded = codec::encode(session)?;
        self.store.put(&storage_key(&session.id), encoded);
        Ok(())
    }

    fn forward(&mut self, signal: Option<TimerSignal>) {
        if let Some(signal) = signal {
            self.sink.play(signal.into());
        }
    }

    pub fn create_match(
        &mut self,
        sport: Sport,
        participants: Vec<Participant>,
        now: OffsetDateTime,
    ) -> Result<MatchSession> {
        let session = MatchSession::new(sport, participants, &self.timing, now)?;
        info!(
            "Created match {} ({}) with {} participants",
            session.id,
            session.sport.name,
            session.participants.len()
        );
        self.persist(&session)?;
        Ok(session)
    }

    pub fn session(&self, match_id: &str) -> Result<MatchSession> {
        self.load(match_id)
    }

    pub fn adjust_score(
        &mut self,
        match_id: &str,
        side: Side,
        field: &ScoreField,
        delta: i32,
    ) -> Result<MatchSession> {
        let session = self.load(match_id)?;
        let updated = session.adjust_score(side, field, delta)?;
        info!(
            "{} {side} {field} changed by {delta:+}",
            Self::status_string(&updated)
        );
        if delta > 0 {
            self.sink.play(MatchSignal::Score);
        }
        self.persist(&updated)?;
        Ok(updated)
    }

    pub fn toggle_cone(&mut self, match_id: &str, side: Side, index: usize) -> Result<MatchSession> {
        let session = self.load(match_id)?;
        let updated = session.toggle_cone(side, index)?;
        info!("{} {side} cone {index} toggled", Self::status_string(&updated));
        self.persist(&updated)?;
        Ok(updated)
    }

    pub fn update_evaluation(
        &mut self,
        match_id: &str,
        update: &EvaluationUpdate,
    ) -> Result<MatchSession> {
        let session = self.load(match_id)?;
        let updated = session.update_evaluation(update)?;
        self.persist(&updated)?;
        Ok(updated)
    }

    pub fn start_timer(&mut self, match_id: &str, now: OffsetDateTime) -> Result<MatchSession> {
        let session = self.load(match_id)?;
        let (updated, signal) = session.start_timer(now)?;
        if signal.is_some() {
            info!(
                "{} Clock started at {}s",
                Self::status_string(&updated),
                updated.timer.remaining_seconds()
            );
        }
        self.forward(signal);
        self.persist(&updated)?;
        Ok(updated)
    }

    pub fn tick_timer(&mut self, match_id: &str, now: OffsetDateTime) -> Result<MatchSession> {
        let session = self.load(match_id)?;
        let (updated, signal) = session.tick_timer(now)?;
        if signal == Some(TimerSignal::Expired) {
            info!("{} Clock expired", Self::status_string(&updated));
        }
        self.forward(signal);
        self.persist(&updated)?;
        Ok(updated)
    }

    pub fn pause_timer(&mut self, match_id: &str) -> Result<MatchSession> {
        let session = self.load(match_id)?;
        let updated = session.pause_timer()?;
        info!(
            "{} Clock paused at {}s",
            Self::status_string(&updated),
            updated.timer.remaining_seconds()
        );
        self.persist(&updated)?;
        Ok(updated)
    }

    pub fn adjust_timer(&mut self, match_id: &str, delta_minutes: i32) -> Result<MatchSession> {
        let session = self.load(match_id)?;
        let updated = session.adjust_timer(delta_minutes)?;
        self.persist(&updated)?;
        Ok(updated)
    }

    pub fn reset_timer(&mut self, match_id: &str) -> Result<MatchSession> {
        let session = self.load(match_id)?;
        let updated = session.reset_timer(&self.timing)?;
        self.persist(&updated)?;
        Ok(updated)
    }

    pub fn finalize(&mut self, match_id: &str) -> Result<MatchSession> {
        let session = self.load(match_id)?;
        let updated = session.finalize()?;
        info!("{} Match finalized", Self::status_string(&updated));
        self.persist(&updated)?;
        Ok(updated)
    }

    /// Encodes the current snapshot for a share link. Consuming it on
    /// another device yields a new independent session, not a live feed.
    pub fn share_payload(&self, match_id: &str) -> Result<String> {
        let session = self.load(match_id)?;
        Ok(codec::encode(&session)?)
    }

    /// Re-hydrates a shared envelope and immediately persists it under its
    /// own match id.
    pub fn import_shared(&mut self, payload: &str) -> Result<MatchSession> {
        let session = codec::decode(payload)?;
        info!(
            "Imported shared match {} ({})",
            session.id, session.sport.name
        );
        self.persist(&session)?;
        Ok(session)
    }

    pub fn remove_match(&mut self, match_id: &str) {
        info!("Removing match {match_id}");
        self.store.remove(&storage_key(match_id));
    }
}
