use crate::side::Side;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PARTICIPANTS: usize = 2;
pub const MAX_PARTICIPANTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Local,
    Visitor,
    Referee,
    HomeCrowd,
    AwayCrowd,
}

impl Role {
    /// The two roles that every roster must fill exactly once.
    pub fn is_required(self) -> bool {
        matches!(self, Self::Local | Self::Visitor)
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Self::Local => Some(Side::Local),
            Self::Visitor => Some(Side::Visitor),
            Self::Referee | Self::HomeCrowd | Self::AwayCrowd => None,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Local => write!(f, "Local"),
            Self::Visitor => write!(f, "Visitor"),
            Self::Referee => write!(f, "Referee"),
            Self::HomeCrowd => write!(f, "Home Crowd"),
            Self::AwayCrowd => write!(f, "Away Crowd"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("A match needs at least {MIN_PARTICIPANTS} participants, got {0}")]
    TooFewParticipants(usize),
    #[error("A match allows at most {MAX_PARTICIPANTS} participants, got {0}")]
    TooManyParticipants(usize),
    #[error("A match needs exactly one {0} participant")]
    MissingRole(Role),
    #[error("Only one {0} participant is allowed")]
    DuplicateRole(Role),
}

/// Checks the roster shape: size 2-5, exactly one `Local` and one `Visitor`.
/// Non-required roles may repeat as long as the total stays within bounds.
pub fn validate_roster(participants: &[Participant]) -> Result<(), RosterError> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(RosterError::TooFewParticipants(participants.len()));
    }
    if participants.len() > MAX_PARTICIPANTS {
        return Err(RosterError::TooManyParticipants(participants.len()));
    }

    for role in [Role::Local, Role::Visitor] {
        match participants.iter().filter(|p| p.role == role).count() {
            0 => return Err(RosterError::MissingRole(role)),
            1 => {}
            _ => return Err(RosterError::DuplicateRole(role)),
        }
    }

    Ok(())
}
