use crate::bundles::SideBundle;
use serde::{Deserialize, Serialize};

/// Ratings run from 0 to 10 inclusive.
pub const MAX_RATING: u8 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefereeRating {
    pub knowledge: u8,
    pub game_management: u8,
    pub support: u8,
}

impl RefereeRating {
    fn clamped(self) -> Self {
        Self {
            knowledge: self.knowledge.min(MAX_RATING),
            game_management: self.game_management.min(MAX_RATING),
            support: self.support.min(MAX_RATING),
        }
    }

    fn is_within_range(self) -> bool {
        self.knowledge <= MAX_RATING
            && self.game_management <= MAX_RATING
            && self.support <= MAX_RATING
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrowdRating {
    pub cheering: u8,
    pub respect: u8,
    pub participation: u8,
}

impl CrowdRating {
    fn clamped(self) -> Self {
        Self {
            cheering: self.cheering.min(MAX_RATING),
            respect: self.respect.min(MAX_RATING),
            participation: self.participation.min(MAX_RATING),
        }
    }

    fn is_within_range(self) -> bool {
        self.cheering <= MAX_RATING
            && self.respect <= MAX_RATING
            && self.participation <= MAX_RATING
    }
}

/// Educational evaluation of a match. Pure data; every rating is optional
/// until the operator fills it in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub fair_play: SideBundle<Option<u8>>,
    pub referee: Option<RefereeRating>,
    pub crowd: SideBundle<Option<CrowdRating>>,
}

/// A partial evaluation edit. `None` fields leave the stored value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationUpdate {
    pub fair_play: SideBundle<Option<u8>>,
    pub referee: Option<RefereeRating>,
    pub crowd: SideBundle<Option<CrowdRating>>,
}

impl Evaluation {
    /// Shallow-merges `update` over `self`, clamping every incoming rating
    /// to [`MAX_RATING`].
    pub fn merged(&self, update: &EvaluationUpdate) -> Self {
        let mut next = *self;
        for (side, rating) in update.fair_play.iter() {
            if let Some(rating) = *rating {
                next.fair_play[side] = Some(rating.min(MAX_RATING));
            }
        }
        if let Some(referee) = update.referee {
            next.referee = Some(referee.clamped());
        }
        for (side, rating) in update.crowd.iter() {
            if let Some(rating) = rating {
                next.crowd[side] = Some(rating.clamped());
            }
        }
        next
    }

    /// Whether every present rating is within 0-10. Decoded payloads are
    /// checked against this before they are accepted.
    pub fn is_within_range(&self) -> bool {
        self.fair_play
            .iter()
            .all(|(_, r)| r.is_none_or(|r| r <= MAX_RATING))
            && self.referee.is_none_or(RefereeRating::is_within_range)
            && self
                .crowd
                .iter()
                .all(|(_, r)| r.is_none_or(CrowdRating::is_within_range))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::side::Side;

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let eval = Evaluation::default().merged(&EvaluationUpdate {
            fair_play: SideBundle {
                local: Some(8),
                visitor: None,
            },
            ..Default::default()
        });
        assert_eq!(eval.fair_play[Side::Local], Some(8));
        assert_eq!(eval.fair_play[Side::Visitor], None);
        assert_eq!(eval.referee, None);

        let eval = eval.merged(&EvaluationUpdate {
            referee: Some(RefereeRating {
                knowledge: 7,
                game_management: 9,
                support: 6,
            }),
            ..Default::default()
        });
        assert_eq!(eval.fair_play[Side::Local], Some(8));
        assert!(eval.referee.is_some());
    }

    #[test]
    fn test_merge_clamps_ratings() {
        let eval = Evaluation::default().merged(&EvaluationUpdate {
            fair_play: SideBundle {
                local: Some(14),
                visitor: Some(10),
            },
            crowd: SideBundle {
                local: Some(CrowdRating {
                    cheering: 11,
                    respect: 3,
                    participation: 200,
                }),
                visitor: None,
            },
            ..Default::default()
        });
        assert_eq!(eval.fair_play[Side::Local], Some(MAX_RATING));
        assert_eq!(eval.fair_play[Side::Visitor], Some(10));
        assert_eq!(
            eval.crowd[Side::Local],
            Some(CrowdRating {
                cheering: MAX_RATING,
                respect: 3,
                participation: MAX_RATING,
            })
        );
        assert!(eval.is_within_range());
    }

    #[test]
    fn test_range_check() {
        let mut eval = Evaluation::default();
        assert!(eval.is_within_range());
        eval.fair_play[Side::Visitor] = Some(11);
        assert!(!eval.is_within_range());
    }
}
