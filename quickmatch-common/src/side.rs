use derivative::Derivative;
use serde::{Deserialize, Serialize};

#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[derivative(Default)]
    Local,
    Visitor,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Local => Self::Visitor,
            Self::Visitor => Self::Local,
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Local => write!(f, "Local"),
            Self::Visitor => write!(f, "Visitor"),
        }
    }
}
