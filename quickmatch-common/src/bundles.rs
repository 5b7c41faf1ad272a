use crate::side::Side;
use core::ops::{Index, IndexMut};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A pair of values, one per side of the match.
#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideBundle<T> {
    pub local: T,
    pub visitor: T,
}

impl<T> SideBundle<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        self.into_iter()
    }
}

impl<T> Index<Side> for SideBundle<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        match side {
            Side::Local => &self.local,
            Side::Visitor => &self.visitor,
        }
    }
}

impl<T> IndexMut<Side> for SideBundle<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        match side {
            Side::Local => &mut self.local,
            Side::Visitor => &mut self.visitor,
        }
    }
}

impl<T: Display> Display for SideBundle<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Local: {}, Visitor: {}", self.local, self.visitor)
    }
}

pub struct SideBundleIterator<'a, T> {
    bundle: &'a SideBundle<T>,
    index: usize,
}

impl<'a, T> Iterator for SideBundleIterator<'a, T> {
    type Item = (Side, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let value = match self.index {
            0 => (Side::Local, &self.bundle.local),
            1 => (Side::Visitor, &self.bundle.visitor),
            _ => return None,
        };

        self.index += 1;
        Some(value)
    }
}

impl<'a, T> IntoIterator for &'a SideBundle<T> {
    type Item = (Side, &'a T);
    type IntoIter = SideBundleIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        SideBundleIterator {
            bundle: self,
            index: 0,
        }
    }
}
