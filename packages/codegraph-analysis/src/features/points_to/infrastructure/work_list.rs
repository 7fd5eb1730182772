//! Work list of pending points-to propagations
//!
//! FIFO queue of `(pointer, objects)` entries. Entries for the same pointer
//! are not merged; `propagate` computes the delta against the current set,
//! so stale entries cost one difference and nothing else.

use super::pointer_flow_graph::PointerId;
use crate::features::points_to::domain::PointsToSet;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct WorkList {
    entries: VecDeque<(PointerId, PointsToSet)>,
}

impl WorkList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_entry(&mut self, pointer: PointerId, pts: PointsToSet) {
        self.entries.push_back((pointer, pts));
    }

    #[inline]
    pub fn poll_entry(&mut self) -> Option<(PointerId, PointsToSet)> {
        self.entries.pop_front()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::points_to::domain::ObjId;

    #[test]
    fn test_fifo_order() {
        let mut wl = WorkList::new();
        wl.add_entry(PointerId::new(1), PointsToSet::singleton(ObjId(0)));
        wl.add_entry(PointerId::new(0), PointsToSet::singleton(ObjId(1)));

        assert_eq!(wl.len(), 2);
        assert_eq!(wl.poll_entry().map(|(p, _)| p), Some(PointerId::new(1)));
        assert_eq!(wl.poll_entry().map(|(p, _)| p), Some(PointerId::new(0)));
        assert!(wl.poll_entry().is_none());
        assert!(wl.is_empty());
    }
}
