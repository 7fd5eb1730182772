//! Ports (Interfaces) for Points-to Analysis
//!
//! The solver is generic over the heap abstraction so that allocation-site
//! and type-based object naming plug in without touching the fixpoint loop.

use crate::features::points_to::domain::{AllocSite, Obj, ObjId};
use crate::shared::models::Type;

/// Heap-abstraction oracle: maps an allocation to an abstract object.
///
/// Implementations must be deterministic: the same `(site, ty)` always
/// yields the same object.
///
/// # Example (Generic - Zero-cost)
/// ```ignore
/// fn fresh<H: HeapModel>(heap: &mut H, site: AllocSite, ty: &Type) -> ObjId {
///     heap.obj(site, ty)
/// }
/// ```
pub trait HeapModel {
    fn obj(&mut self, site: AllocSite, ty: &Type) -> ObjId;

    fn object(&self, id: ObjId) -> &Obj;

    /// All objects created so far, indexed by id
    fn objects(&self) -> &[Obj];
}
