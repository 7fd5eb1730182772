//! Statement builders
//!
//! Short constructors for the IR statements the fixtures are written in.

use codegraph_analysis::shared::models::{
    Access, BinaryExp, BinaryOp, CallKind, ClassId, Exp, FieldId, InvokeExp, MethodRef, Stmt,
    Type, VarId,
};

/// `lhs = new C()`
pub fn new_obj(lhs: VarId, class: ClassId) -> Stmt {
    Stmt::Assign { lhs, rhs: Exp::New(Type::Class(class)) }
}

/// `lhs = rhs`
pub fn copy(lhs: VarId, rhs: VarId) -> Stmt {
    Stmt::Assign { lhs, rhs: Exp::Var(rhs) }
}

/// `lhs = value`
pub fn int(lhs: VarId, value: i32) -> Stmt {
    Stmt::Assign { lhs, rhs: Exp::IntLiteral(value) }
}

/// `lhs = a op b`
pub fn binary(lhs: VarId, op: BinaryOp, a: VarId, b: VarId) -> Stmt {
    Stmt::Assign { lhs, rhs: Exp::Binary(BinaryExp::new(op, a, b)) }
}

/// `lhs = base.field`
pub fn load(lhs: VarId, base: VarId, field: FieldId) -> Stmt {
    Stmt::Assign { lhs, rhs: Exp::FieldAccess { base: Some(base), field } }
}

/// `base.field = rhs`
pub fn store(base: VarId, field: FieldId, rhs: VarId) -> Stmt {
    Stmt::Store { target: Access::Field { base: Some(base), field }, rhs }
}

/// `lhs = new T[]`
pub fn new_array(lhs: VarId, elem: Type) -> Stmt {
    Stmt::Assign { lhs, rhs: Exp::New(Type::array_of(elem)) }
}

/// `lhs = base[index]`
pub fn array_load(lhs: VarId, base: VarId, index: VarId) -> Stmt {
    Stmt::Assign { lhs, rhs: Exp::ArrayAccess { base, index } }
}

/// `base[index] = rhs`
pub fn array_store(base: VarId, index: VarId, rhs: VarId) -> Stmt {
    Stmt::Store { target: Access::Array { base, index }, rhs }
}

/// `if (a op b) goto target`
pub fn if_goto(op: BinaryOp, a: VarId, b: VarId, target: usize) -> Stmt {
    Stmt::If { cond: BinaryExp::new(op, a, b), target }
}

/// `[lhs =] C.subsig(args)`
pub fn call_static(lhs: Option<VarId>, class: ClassId, subsig: &str, args: Vec<VarId>) -> Stmt {
    Stmt::Invoke { lhs, call: InvokeExp::new_static(MethodRef::new(class, subsig), args) }
}

/// `[lhs =] recv.subsig(args)` with `recv` declared as `class`
pub fn call_virtual(
    lhs: Option<VarId>,
    recv: VarId,
    class: ClassId,
    subsig: &str,
    args: Vec<VarId>,
) -> Stmt {
    Stmt::Invoke {
        lhs,
        call: InvokeExp::new_instance(CallKind::Virtual, MethodRef::new(class, subsig), recv, args),
    }
}

pub fn ret(value: Option<VarId>) -> Stmt {
    Stmt::Return { value }
}
