//! Abstract heap objects
//!
//! Concrete heap addresses are abstracted to allocation sites (or, under
//! the type-based heap model, to types). Objects are immutable and live for
//! the whole analysis run.

use crate::shared::models::{StmtRef, Type};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for abstract objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjId(pub u32);

impl ObjId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "o{}", self.0)
    }
}

/// Position of the `x = new T` statement that created an object
pub type AllocSite = StmtRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Obj {
    pub id: ObjId,
    /// First allocation site mapped to this object
    pub site: AllocSite,
    pub ty: Type,
}

impl fmt::Display for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[new@{}]", self.id, self.site)
    }
}

/// Arena handing out dense object ids
#[derive(Debug, Default, Clone)]
pub struct ObjectFactory {
    objects: Vec<Obj>,
}

impl ObjectFactory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn create(&mut self, site: AllocSite, ty: Type) -> ObjId {
        let id = ObjId(self.objects.len() as u32);
        self.objects.push(Obj { id, site, ty });
        id
    }

    #[inline]
    pub fn get(&self, id: ObjId) -> &Obj {
        &self.objects[id.index()]
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.objects.len()
    }

    pub fn objects(&self) -> &[Obj] {
        &self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{ClassId, MethodId};

    #[test]
    fn test_factory_assigns_dense_ids() {
        let mut factory = ObjectFactory::new();
        let a = factory.create(StmtRef::new(MethodId(0), 0), Type::Class(ClassId(1)));
        let b = factory.create(StmtRef::new(MethodId(0), 3), Type::Class(ClassId(1)));

        assert_eq!(a, ObjId(0));
        assert_eq!(b, ObjId(1));
        assert_eq!(factory.count(), 2);
        assert_eq!(factory.get(b).site.index, 3);
        assert_eq!(factory.get(a).to_string(), "o0[new@m0@0]");
    }
}
