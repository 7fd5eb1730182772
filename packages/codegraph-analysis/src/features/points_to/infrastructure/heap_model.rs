//! Heap models
//!
//! - `AllocationSiteHeapModel`: one object per `new` statement (default)
//! - `TypeBasedHeapModel`: one object per allocated type; coarser but
//!   bounds the object count by the number of types

use crate::features::points_to::domain::{AllocSite, Obj, ObjId, ObjectFactory};
use crate::features::points_to::ports::HeapModel;
use crate::shared::models::Type;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct AllocationSiteHeapModel {
    factory: ObjectFactory,
    by_site: FxHashMap<AllocSite, ObjId>,
}

impl AllocationSiteHeapModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeapModel for AllocationSiteHeapModel {
    fn obj(&mut self, site: AllocSite, ty: &Type) -> ObjId {
        if let Some(&id) = self.by_site.get(&site) {
            return id;
        }
        let id = self.factory.create(site, ty.clone());
        self.by_site.insert(site, id);
        id
    }

    fn object(&self, id: ObjId) -> &Obj {
        self.factory.get(id)
    }

    fn objects(&self) -> &[Obj] {
        self.factory.objects()
    }
}

#[derive(Debug, Default)]
pub struct TypeBasedHeapModel {
    factory: ObjectFactory,
    by_type: FxHashMap<Type, ObjId>,
}

impl TypeBasedHeapModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeapModel for TypeBasedHeapModel {
    fn obj(&mut self, site: AllocSite, ty: &Type) -> ObjId {
        if let Some(&id) = self.by_type.get(ty) {
            return id;
        }
        let id = self.factory.create(site, ty.clone());
        self.by_type.insert(ty.clone(), id);
        id
    }

    fn object(&self, id: ObjId) -> &Obj {
        self.factory.get(id)
    }

    fn objects(&self) -> &[Obj] {
        self.factory.objects()
    }
}
