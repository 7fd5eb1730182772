//! Points-to sets
//!
//! Sorted-vector representation of a set of abstract objects:
//! - Contains: O(log n) binary search
//! - Union / difference: O(n + m) merge
//! - Iteration: ascending object id, which keeps propagation order
//!   deterministic
//!
//! Sets handed to the solver only ever grow.

use super::abstract_object::ObjId;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PointsToSet {
    elements: Vec<ObjId>,
}

impl PointsToSet {
    #[inline]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    #[inline]
    pub fn singleton(obj: ObjId) -> Self {
        Self {
            elements: vec![obj],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn contains(&self, obj: ObjId) -> bool {
        self.elements.binary_search(&obj).is_ok()
    }

    /// Returns true if `obj` was not already present
    pub fn insert(&mut self, obj: ObjId) -> bool {
        match self.elements.binary_search(&obj) {
            Ok(_) => false,
            Err(pos) => {
                self.elements.insert(pos, obj);
                true
            }
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = ObjId> + '_ {
        self.elements.iter().copied()
    }

    /// Elements of `self` missing from `other`
    pub fn difference(&self, other: &PointsToSet) -> PointsToSet {
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.elements.len() {
            if j >= other.elements.len() {
                out.extend_from_slice(&self.elements[i..]);
                break;
            }
            match self.elements[i].cmp(&other.elements[j]) {
                Ordering::Less => {
                    out.push(self.elements[i]);
                    i += 1;
                }
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                Ordering::Greater => j += 1,
            }
        }
        PointsToSet { elements: out }
    }

    /// In-place union. Returns true if `self` grew.
    pub fn union_with(&mut self, other: &PointsToSet) -> bool {
        if other.is_empty() {
            return false;
        }
        if self.is_empty() {
            self.elements = other.elements.clone();
            return true;
        }

        let mut merged = Vec::with_capacity(self.elements.len() + other.elements.len());
        let (mut i, mut j) = (0, 0);
        while i < self.elements.len() && j < other.elements.len() {
            match self.elements[i].cmp(&other.elements[j]) {
                Ordering::Less => {
                    merged.push(self.elements[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(other.elements[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push(self.elements[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.elements[i..]);
        merged.extend_from_slice(&other.elements[j..]);

        let grew = merged.len() > self.elements.len();
        self.elements = merged;
        grew
    }

    pub fn is_subset(&self, other: &PointsToSet) -> bool {
        self.len() <= other.len() && self.iter().all(|o| other.contains(o))
    }

    pub fn intersects(&self, other: &PointsToSet) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.elements.len() && j < other.elements.len() {
            match self.elements[i].cmp(&other.elements[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => return true,
            }
        }
        false
    }

    pub fn as_slice(&self) -> &[ObjId] {
        &self.elements
    }
}

impl FromIterator<ObjId> for PointsToSet {
    fn from_iter<I: IntoIterator<Item = ObjId>>(iter: I) -> Self {
        let mut elements: Vec<ObjId> = iter.into_iter().collect();
        elements.sort_unstable();
        elements.dedup();
        Self { elements }
    }
}

impl<'a> IntoIterator for &'a PointsToSet {
    type Item = &'a ObjId;
    type IntoIter = std::slice::Iter<'a, ObjId>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
