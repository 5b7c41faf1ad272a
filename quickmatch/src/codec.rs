use crate::session::MatchSession;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use quickmatch_common::{
    evaluation::MAX_RATING,
    participant::{RosterError, validate_roster},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bumped whenever the envelope layout changes incompatibly.
pub const SHARE_VERSION: u32 = 1;

/// Versioned wrapper around a serialized session, created once at share
/// time and consumed once at re-hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareEnvelope {
    #[serde(rename = "v")]
    pub version: u32,
    #[serde(rename = "m")]
    pub session: MatchSession,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Share payload is not valid base64: {0}")]
    Transport(#[from] base64::DecodeError),
    #[error("Share payload is not a valid match: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Unsupported share version {0}, expected {SHARE_VERSION}")]
    UnsupportedVersion(u32),
    #[error("Share payload has an invalid roster: {0}")]
    InvalidRoster(#[from] RosterError),
    #[error("Share payload has an evaluation rating above {MAX_RATING}")]
    RatingOutOfRange,
    #[error("Share payload has a score counter outside its bounds")]
    ScoreOutOfRange,
}

/// Deterministic transport encoding: JSON with fixed field order wrapped in
/// URL-safe base64, so structurally equal sessions always encode to the
/// same string and the result can ride in a URL query parameter.
pub fn encode(session: &MatchSession) -> Result<String, CodecError> {
    let envelope = ShareEnvelope {
        version: SHARE_VERSION,
        session: session.clone(),
    };
    let json = serde_json::to_vec(&envelope)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Inverse of [`encode`]. Fails, never partially populates, when the
/// payload is malformed, carries an unknown version, or violates the data
/// model invariants.
pub fn decode(payload: &str) -> Result<MatchSession, CodecError> {
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    let envelope: ShareEnvelope = serde_json::from_slice(&bytes)?;
    if envelope.version != SHARE_VERSION {
        return Err(CodecError::UnsupportedVersion(envelope.version));
    }

    let session = envelope.session;
    validate_roster(&session.participants)?;
    if !session.evaluation.is_within_range() {
        return Err(CodecError::RatingOutOfRange);
    }
    if !session.score.is_within_range() {
        return Err(CodecError::ScoreOutOfRange);
    }
    Ok(session)
}

#[cfg(test)]
mod test {
    use super::*;
    use quickmatch_common::{
        config::Timing,
        evaluation::{EvaluationUpdate, RefereeRating},
        participant::{Participant, Role},
        score::{ScoreField, ScoreKind, ScoreVariant},
        side::Side,
        sport::Sport,
    };
    use time::macros::datetime;

    fn sample_session(code: &str) -> MatchSession {
        let participants = vec![
            Participant::new("1", "Eagles", Role::Local),
            Participant::new("2", "Sharks", Role::Visitor),
            Participant::new("3", "Ms. Vega", Role::Referee),
        ];
        MatchSession::new(
            Sport::from_code(code, code),
            participants,
            &Timing::default(),
            datetime!(2026-03-14 10:00:00 UTC),
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip_every_kind() {
        for code in [
            "futbol",
            "baloncesto",
            "voleibol",
            "rugby",
            "beisbol",
            "towertouchball",
            "quidditch",
        ] {
            let session = sample_session(code);
            let decoded = decode(&encode(&session).unwrap()).unwrap();
            assert_eq!(decoded, session, "round trip failed for {code}");
        }
    }

    #[test]
    fn test_round_trip_preserves_mutations() {
        let session = sample_session("towertouchball");
        let session = session
            .adjust_score(Side::Local, &ScoreField::Points, 3)
            .unwrap();
        let session = session.toggle_cone(Side::Visitor, 1).unwrap();
        let session = session
            .update_evaluation(&EvaluationUpdate {
                referee: Some(RefereeRating {
                    knowledge: 9,
                    game_management: 8,
                    support: 10,
                }),
                ..Default::default()
            })
            .unwrap();
        let (session, _) = session
            .start_timer(datetime!(2026-03-14 10:05:00 UTC))
            .unwrap();

        let decoded = decode(&encode(&session).unwrap()).unwrap();
        assert_eq!(decoded, session);
        assert_eq!(decoded.score.kind(), ScoreKind::TowerTouchball);
        assert!(decoded.timer.is_running());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let session = sample_session("voleibol");
        assert_eq!(encode(&session).unwrap(), encode(&session.clone()).unwrap());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode("not base64 at all!"),
            Err(CodecError::Transport(_))
        ));
        assert!(matches!(
            decode(&URL_SAFE_NO_PAD.encode(b"{\"v\":1}")),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let mut envelope = ShareEnvelope {
            version: SHARE_VERSION,
            session: sample_session("futbol"),
        };
        envelope.version = 2;
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&envelope).unwrap());
        assert!(matches!(
            decode(&payload),
            Err(CodecError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_roster() {
        let mut session = sample_session("futbol");
        session.participants.pop();
        session.participants.pop();
        let envelope = ShareEnvelope {
            version: SHARE_VERSION,
            session,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&envelope).unwrap());
        assert!(matches!(decode(&payload), Err(CodecError::InvalidRoster(_))));
    }

    #[test]
    fn test_decode_rejects_out_of_range_score() {
        let mut session = sample_session("quidditch");
        session.score = ScoreVariant::Generic {
            values: std::collections::BTreeMap::from([("laps".to_string(), -5)]),
        };
        let envelope = ShareEnvelope {
            version: SHARE_VERSION,
            session,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&envelope).unwrap());
        assert!(matches!(decode(&payload), Err(CodecError::ScoreOutOfRange)));

        let mut session = sample_session("voleibol");
        session.score = ScoreVariant::Sets {
            sets: Default::default(),
            current_set: 0,
            current_set_points: Default::default(),
        };
        let envelope = ShareEnvelope {
            version: SHARE_VERSION,
            session,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&envelope).unwrap());
        assert!(matches!(decode(&payload), Err(CodecError::ScoreOutOfRange)));
    }

    #[test]
    fn test_decode_rejects_out_of_range_rating() {
        let mut session = sample_session("futbol");
        session.evaluation.fair_play[Side::Local] = Some(42);
        let envelope = ShareEnvelope {
            version: SHARE_VERSION,
            session,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&envelope).unwrap());
        assert!(matches!(decode(&payload), Err(CodecError::RatingOutOfRange)));
    }
}
