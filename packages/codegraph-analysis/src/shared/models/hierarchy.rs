//! Class hierarchy oracle
//!
//! Inverse edges (subclass, subinterface, implementor) are indexed once at
//! program build time. Every walk is iterative with a visited set, so a
//! malformed cyclic hierarchy cannot overflow the stack or loop forever.

use super::ir::{ClassId, MethodId};
use super::program::{Class, Program};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    direct_subclasses: FxHashMap<ClassId, Vec<ClassId>>,
    direct_subinterfaces: FxHashMap<ClassId, Vec<ClassId>>,
    direct_implementors: FxHashMap<ClassId, Vec<ClassId>>,
}

impl ClassHierarchy {
    pub(crate) fn new(classes: &[Class]) -> Self {
        let mut hierarchy = Self::default();
        for class in classes {
            if let Some(sup) = class.super_class {
                hierarchy
                    .direct_subclasses
                    .entry(sup)
                    .or_default()
                    .push(class.id);
            }
            for &iface in &class.interfaces {
                let index = if class.is_interface {
                    &mut hierarchy.direct_subinterfaces
                } else {
                    &mut hierarchy.direct_implementors
                };
                index.entry(iface).or_default().push(class.id);
            }
        }
        hierarchy
    }

    pub fn direct_subclasses_of(&self, class: ClassId) -> &[ClassId] {
        self.direct_subclasses
            .get(&class)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn direct_subinterfaces_of(&self, iface: ClassId) -> &[ClassId] {
        self.direct_subinterfaces
            .get(&iface)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn direct_implementors_of(&self, iface: ClassId) -> &[ClassId] {
        self.direct_implementors
            .get(&iface)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `class` and every transitive subclass, subinterface and implementor,
    /// in BFS order
    pub fn subtypes_of(&self, class: ClassId) -> Vec<ClassId> {
        let mut visited = FxHashSet::default();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([class]);

        while let Some(c) = queue.pop_front() {
            if !visited.insert(c) {
                continue;
            }
            order.push(c);
            queue.extend(self.direct_subclasses_of(c));
            queue.extend(self.direct_subinterfaces_of(c));
            queue.extend(self.direct_implementors_of(c));
        }
        order
    }
}

impl Program {
    /// Runtime dispatch: the first non-abstract method with `subsignature`
    /// declared in `class` or one of its superclasses.
    pub fn dispatch(&self, class: ClassId, subsignature: &str) -> Option<MethodId> {
        let mut visited = FxHashSet::default();
        let mut current = Some(class);
        while let Some(c) = current {
            if !visited.insert(c) {
                break;
            }
            let class = self.class(c);
            if let Some(m) = class.declared_method(subsignature) {
                if !self.method(m).is_abstract {
                    return Some(m);
                }
            }
            current = class.super_class;
        }
        None
    }

    /// Symbolic resolution for static calls: the first method with
    /// `subsignature` found walking superclasses from `class`.
    pub fn resolve_method(&self, class: ClassId, subsignature: &str) -> Option<MethodId> {
        let mut visited = FxHashSet::default();
        let mut current = Some(class);
        while let Some(c) = current {
            if !visited.insert(c) {
                break;
            }
            let class = self.class(c);
            if let Some(m) = class.declared_method(subsignature) {
                return Some(m);
            }
            current = class.super_class;
        }
        None
    }

    /// Whether `sub` is `sup` or inherits from it through superclasses or
    /// interfaces
    pub fn is_subtype(&self, sub: ClassId, sup: ClassId) -> bool {
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::from([sub]);
        while let Some(c) = queue.pop_front() {
            if c == sup {
                return true;
            }
            if !visited.insert(c) {
                continue;
            }
            let class = self.class(c);
            queue.extend(class.super_class);
            queue.extend(class.interfaces.iter().copied());
        }
        false
    }
}
