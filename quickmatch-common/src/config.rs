use crate::score::ScoreKind;
use log::*;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

/// Default match duration per score kind, in seconds. Values match the
/// durations the stock scoreboards use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub goals: u32,
    pub points: u32,
    pub sets: u32,
    pub tries: u32,
    pub runs: u32,
    pub tower_touchball: u32,
    pub generic: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            goals: 45 * 60,
            points: 40 * 60,
            sets: 25 * 60,
            tries: 40 * 60,
            runs: 90 * 60,
            tower_touchball: 15 * 60,
            generic: 45 * 60,
        }
    }
}

impl Timing {
    pub fn default_seconds(&self, kind: ScoreKind) -> u32 {
        match kind {
            ScoreKind::Goals => self.goals,
            ScoreKind::Points => self.points,
            ScoreKind::Sets => self.sets,
            ScoreKind::Tries => self.tries,
            ScoreKind::Runs => self.runs,
            ScoreKind::TowerTouchball => self.tower_touchball,
            ScoreKind::Generic => self.generic,
        }
    }

    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let config_file = match read_to_string(path) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to read timing file: {}", e);
                return Err(Box::new(e));
            }
        };

        match toml::from_str(&config_file) {
            Ok(t) => Ok(t),
            Err(e) => {
                error!("Failed to parse timing file: {}", e);
                Err(Box::new(e))
            }
        }
    }
}
