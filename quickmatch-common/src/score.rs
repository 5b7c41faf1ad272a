use crate::{bundles::SideBundle, side::Side};
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub const CONES_PER_SIDE: usize = 3;

/// The shape of the live score record, one per family of sports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Sequence)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Goals,
    Points,
    Sets,
    Tries,
    Runs,
    TowerTouchball,
    Generic,
}

impl Display for ScoreKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Goals => write!(f, "goals"),
            Self::Points => write!(f, "points"),
            Self::Sets => write!(f, "sets"),
            Self::Tries => write!(f, "tries"),
            Self::Runs => write!(f, "runs"),
            Self::TowerTouchball => write!(f, "tower touchball"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

/// Addresses a single counter within a [`ScoreVariant`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    Goals,
    Points,
    Sets,
    CurrentSet,
    CurrentSetPoints,
    Tries,
    Conversions,
    Runs,
    /// A free-form counter in a generic score.
    Custom(String),
}

impl Display for ScoreField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Goals => write!(f, "goals"),
            Self::Points => write!(f, "points"),
            Self::Sets => write!(f, "sets"),
            Self::CurrentSet => write!(f, "current set"),
            Self::CurrentSetPoints => write!(f, "current set points"),
            Self::Tries => write!(f, "tries"),
            Self::Conversions => write!(f, "conversions"),
            Self::Runs => write!(f, "runs"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("A {kind} score has no {field} counter")]
    FieldMismatch { field: ScoreField, kind: ScoreKind },
    #[error("Cone index {0} is out of range (0..{CONES_PER_SIDE})")]
    InvalidConeIndex(usize),
    #[error("A {0} score has no cones")]
    NoCones(ScoreKind),
}

/// The live score of a match, shaped per sport family. Counters never go
/// below zero; no upper bound is enforced beyond the counter width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreVariant {
    Goals {
        goals: SideBundle<u16>,
    },
    Points {
        points: SideBundle<u16>,
    },
    Sets {
        sets: SideBundle<u8>,
        current_set: u8,
        current_set_points: SideBundle<u16>,
    },
    Tries {
        tries: SideBundle<u16>,
        conversions: SideBundle<u16>,
    },
    Runs {
        runs: SideBundle<u16>,
    },
    TowerTouchball {
        points: SideBundle<u16>,
        cones: SideBundle<[bool; CONES_PER_SIDE]>,
    },
    /// Open key-value score for sports no typed variant covers. Reads must
    /// not assume any particular key exists.
    Generic {
        values: BTreeMap<String, i64>,
    },
}

fn adjusted_u16(counter: u16, delta: i32) -> u16 {
    (i64::from(counter) + i64::from(delta)).clamp(0, i64::from(u16::MAX)) as u16
}

fn adjusted_u8(counter: u8, delta: i32, min: u8) -> u8 {
    (i64::from(counter) + i64::from(delta)).clamp(i64::from(min), i64::from(u8::MAX)) as u8
}

impl ScoreVariant {
    /// All counters zeroed (a sets score starts in set 1), tagged with `kind`.
    pub fn new(kind: ScoreKind) -> Self {
        match kind {
            ScoreKind::Goals => Self::Goals {
                goals: Default::default(),
            },
            ScoreKind::Points => Self::Points {
                points: Default::default(),
            },
            ScoreKind::Sets => Self::Sets {
                sets: Default::default(),
                current_set: 1,
                current_set_points: Default::default(),
            },
            ScoreKind::Tries => Self::Tries {
                tries: Default::default(),
                conversions: Default::default(),
            },
            ScoreKind::Runs => Self::Runs {
                runs: Default::default(),
            },
            ScoreKind::TowerTouchball => Self::TowerTouchball {
                points: Default::default(),
                cones: Default::default(),
            },
            ScoreKind::Generic => Self::Generic {
                values: BTreeMap::new(),
            },
        }
    }

    pub fn kind(&self) -> ScoreKind {
        match self {
            Self::Goals { .. } => ScoreKind::Goals,
            Self::Points { .. } => ScoreKind::Points,
            Self::Sets { .. } => ScoreKind::Sets,
            Self::Tries { .. } => ScoreKind::Tries,
            Self::Runs { .. } => ScoreKind::Runs,
            Self::TowerTouchball { .. } => ScoreKind::TowerTouchball,
            Self::Generic { .. } => ScoreKind::Generic,
        }
    }

    /// Returns a new score with `field` changed by `delta`, clamped so that
    /// no counter goes below zero (the current set number stays at least 1).
    /// `side` is ignored for the fields that are not kept per side
    /// (`CurrentSet` and `Custom` keys).
    pub fn adjust(&self, side: Side, field: &ScoreField, delta: i32) -> Result<Self, ScoreError> {
        let mut next = self.clone();
        match (&mut next, field) {
            (Self::Goals { goals }, ScoreField::Goals) => {
                goals[side] = adjusted_u16(goals[side], delta);
            }
            (Self::Points { points }, ScoreField::Points)
            | (Self::TowerTouchball { points, .. }, ScoreField::Points) => {
                points[side] = adjusted_u16(points[side], delta);
            }
            (Self::Sets { sets, .. }, ScoreField::Sets) => {
                sets[side] = adjusted_u8(sets[side], delta, 0);
            }
            (Self::Sets { current_set, .. }, ScoreField::CurrentSet) => {
                *current_set = adjusted_u8(*current_set, delta, 1);
            }
            (
                Self::Sets {
                    current_set_points, ..
                },
                ScoreField::CurrentSetPoints,
            ) => {
                current_set_points[side] = adjusted_u16(current_set_points[side], delta);
            }
            (Self::Tries { tries, .. }, ScoreField::Tries) => {
                tries[side] = adjusted_u16(tries[side], delta);
            }
            (Self::Tries { conversions, .. }, ScoreField::Conversions) => {
                conversions[side] = adjusted_u16(conversions[side], delta);
            }
            (Self::Runs { runs }, ScoreField::Runs) => {
                runs[side] = adjusted_u16(runs[side], delta);
            }
            (Self::Generic { values }, ScoreField::Custom(key)) => {
                let counter = values.entry(key.clone()).or_insert(0);
                *counter = counter.saturating_add(i64::from(delta)).max(0);
            }
            _ => {
                return Err(ScoreError::FieldMismatch {
                    field: field.clone(),
                    kind: self.kind(),
                });
            }
        }
        Ok(next)
    }

    /// Whether every counter satisfies its bounds: generic values never
    /// below zero, the current set number at least 1. Always holds for
    /// scores built through [`new`](Self::new) and [`adjust`](Self::adjust);
    /// decoded payloads are checked against this before they are accepted.
    pub fn is_within_range(&self) -> bool {
        match self {
            Self::Sets { current_set, .. } => *current_set >= 1,
            Self::Generic { values } => values.values().all(|v| *v >= 0),
            _ => true,
        }
    }

    /// Flips one of the three knocked-down flags (tower touchball only).
    pub fn toggle_cone(&self, side: Side, index: usize) -> Result<Self, ScoreError> {
        match self {
            Self::TowerTouchball { points, cones } => {
                if index >= CONES_PER_SIDE {
                    return Err(ScoreError::InvalidConeIndex(index));
                }
                let mut cones = *cones;
                cones[side][index] = !cones[side][index];
                Ok(Self::TowerTouchball {
                    points: *points,
                    cones,
                })
            }
            _ => Err(ScoreError::NoCones(self.kind())),
        }
    }
}

impl Display for ScoreVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Goals { goals } => write!(f, "Goals {goals}"),
            Self::Points { points } => write!(f, "Points {points}"),
            Self::Sets {
                sets,
                current_set,
                current_set_points,
            } => write!(
                f,
                "Sets {sets} (set {current_set}: {current_set_points})"
            ),
            Self::Tries { tries, conversions } => {
                write!(f, "Tries {tries}, Conversions {conversions}")
            }
            Self::Runs { runs } => write!(f, "Runs {runs}"),
            Self::TowerTouchball { points, .. } => write!(f, "Points {points}"),
            Self::Generic { values } => write!(f, "Generic ({} counters)", values.len()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use enum_iterator::all;

    #[test]
    fn test_new_variant_is_zeroed() {
        for kind in all::<ScoreKind>() {
            let variant = ScoreVariant::new(kind);
            assert_eq!(variant.kind(), kind);
            match variant {
                ScoreVariant::Goals { goals } => assert_eq!(goals, Default::default()),
                ScoreVariant::Points { points } => assert_eq!(points, Default::default()),
                ScoreVariant::Sets {
                    sets,
                    current_set,
                    current_set_points,
                } => {
                    assert_eq!(sets, Default::default());
                    assert_eq!(current_set, 1);
                    assert_eq!(current_set_points, Default::default());
                }
                ScoreVariant::Tries { tries, conversions } => {
                    assert_eq!(tries, Default::default());
                    assert_eq!(conversions, Default::default());
                }
                ScoreVariant::Runs { runs } => assert_eq!(runs, Default::default()),
                ScoreVariant::TowerTouchball { points, cones } => {
                    assert_eq!(points, Default::default());
                    assert_eq!(cones, Default::default());
                }
                ScoreVariant::Generic { values } => assert!(values.is_empty()),
            }
        }
    }

    #[test]
    fn test_goals_scenario() {
        let score = ScoreVariant::new(ScoreKind::Goals);
        let score = score.adjust(Side::Local, &ScoreField::Goals, 1).unwrap();
        let score = score.adjust(Side::Local, &ScoreField::Goals, 1).unwrap();
        let score = score.adjust(Side::Local, &ScoreField::Goals, -1).unwrap();
        assert_eq!(
            score,
            ScoreVariant::Goals {
                goals: SideBundle { local: 1, visitor: 0 },
            }
        );
    }

    #[test]
    fn test_adjust_clamps_at_zero() {
        let score = ScoreVariant::new(ScoreKind::Points);
        let score = score.adjust(Side::Visitor, &ScoreField::Points, -1).unwrap();
        let score = score.adjust(Side::Visitor, &ScoreField::Points, -1).unwrap();
        assert_eq!(
            score,
            ScoreVariant::Points {
                points: SideBundle { local: 0, visitor: 0 },
            }
        );
    }

    #[test]
    fn test_set_points_do_not_advance_sets() {
        let score = ScoreVariant::new(ScoreKind::Sets);
        let mut score = score;
        for _ in 0..25 {
            score = score
                .adjust(Side::Local, &ScoreField::CurrentSetPoints, 1)
                .unwrap();
        }
        let ScoreVariant::Sets {
            sets,
            current_set,
            current_set_points,
        } = score
        else {
            panic!("kind changed");
        };
        assert_eq!(sets, Default::default());
        assert_eq!(current_set, 1);
        assert_eq!(current_set_points[Side::Local], 25);
    }

    #[test]
    fn test_current_set_stays_at_least_one() {
        let score = ScoreVariant::new(ScoreKind::Sets);
        let score = score.adjust(Side::Local, &ScoreField::CurrentSet, -3).unwrap();
        let ScoreVariant::Sets { current_set, .. } = score else {
            panic!("kind changed");
        };
        assert_eq!(current_set, 1);
    }

    #[test]
    fn test_field_mismatch() {
        let score = ScoreVariant::new(ScoreKind::Goals);
        assert_eq!(
            score.adjust(Side::Local, &ScoreField::Tries, 1),
            Err(ScoreError::FieldMismatch {
                field: ScoreField::Tries,
                kind: ScoreKind::Goals,
            })
        );
    }

    #[test]
    fn test_toggle_cone() {
        let score = ScoreVariant::new(ScoreKind::TowerTouchball);
        let score = score.toggle_cone(Side::Visitor, 2).unwrap();
        let ScoreVariant::TowerTouchball { cones, .. } = &score else {
            panic!("kind changed");
        };
        assert_eq!(cones[Side::Visitor], [false, false, true]);
        assert_eq!(cones[Side::Local], [false, false, false]);

        let score = score.toggle_cone(Side::Visitor, 2).unwrap();
        let ScoreVariant::TowerTouchball { cones, .. } = &score else {
            panic!("kind changed");
        };
        assert_eq!(cones[Side::Visitor], [false, false, false]);
    }

    #[test]
    fn test_toggle_cone_bounds() {
        let score = ScoreVariant::new(ScoreKind::TowerTouchball);
        assert_eq!(
            score.toggle_cone(Side::Local, 3),
            Err(ScoreError::InvalidConeIndex(3))
        );
        assert_eq!(
            ScoreVariant::new(ScoreKind::Goals).toggle_cone(Side::Local, 0),
            Err(ScoreError::NoCones(ScoreKind::Goals))
        );
    }

    #[test]
    fn test_generic_counters() {
        let score = ScoreVariant::new(ScoreKind::Generic);
        let laps = ScoreField::Custom("laps_local".to_string());
        let score = score.adjust(Side::Local, &laps, 2).unwrap();
        let score = score.adjust(Side::Local, &laps, -5).unwrap();
        let ScoreVariant::Generic { values } = &score else {
            panic!("kind changed");
        };
        assert_eq!(values.get("laps_local"), Some(&0));
        assert_eq!(values.get("missing_key"), None);
    }

    #[test]
    fn test_generic_counter_saturates_at_the_top() {
        let score = ScoreVariant::Generic {
            values: BTreeMap::from([("laps".to_string(), i64::MAX)]),
        };
        let laps = ScoreField::Custom("laps".to_string());
        let score = score.adjust(Side::Local, &laps, 1).unwrap();
        let ScoreVariant::Generic { values } = &score else {
            panic!("kind changed");
        };
        assert_eq!(values.get("laps"), Some(&i64::MAX));
    }

    #[test]
    fn test_range_check() {
        for kind in all::<ScoreKind>() {
            assert!(ScoreVariant::new(kind).is_within_range());
        }

        let negative = ScoreVariant::Generic {
            values: BTreeMap::from([("laps".to_string(), -5)]),
        };
        assert!(!negative.is_within_range());

        let zero_set = ScoreVariant::Sets {
            sets: Default::default(),
            current_set: 0,
            current_set_points: Default::default(),
        };
        assert!(!zero_set.is_within_range());
    }
}
