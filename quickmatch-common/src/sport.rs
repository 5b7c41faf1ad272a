use crate::score::ScoreKind;
use serde::{Deserialize, Serialize};

/// The sport a match is played under. `kind` decides the score shape and
/// the default clock duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    pub code: String,
    pub name: String,
    pub kind: ScoreKind,
}

impl Sport {
    /// Builds a sport from its code, looking up the score kind. Unknown
    /// codes fall back to a generic score.
    pub fn from_code(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        let kind = kind_for_code(&code);
        Self {
            code,
            name: name.into(),
            kind,
        }
    }

    pub fn with_kind(code: impl Into<String>, name: impl Into<String>, kind: ScoreKind) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            kind,
        }
    }
}

/// Sport-code to score-kind lookup for the sports the application seeds.
pub fn kind_for_code(code: &str) -> ScoreKind {
    match code {
        "futbol" | "futbol_sala" | "balonmano" | "hockey" | "floorball" => ScoreKind::Goals,
        "baloncesto" | "badminton" => ScoreKind::Points,
        "voleibol" | "voleibol_sentado" | "tenis" => ScoreKind::Sets,
        "rugby" | "rugby_tag" => ScoreKind::Tries,
        "beisbol" | "softball" => ScoreKind::Runs,
        "towertouchball" => ScoreKind::TowerTouchball,
        _ => ScoreKind::Generic,
    }
}
