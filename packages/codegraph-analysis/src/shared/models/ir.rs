//! Three-address IR consumed by the analyses
//!
//! Every entity lives in an arena owned by [`Program`](super::program::Program)
//! and is addressed by a `u32` handle. Statements are a tagged sum type so
//! that every analysis dispatches with a single `match`.
//!
//! Per-variable use indices (`VarUses`) are precomputed when a body is built:
//! the pointer analysis needs "all field stores whose base is `v`" every time
//! `v` gains a new object, so the lookup must be O(1).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Handle of a class or interface
    ClassId,
    "c"
);
define_id!(
    /// Handle of a method
    MethodId,
    "m"
);
define_id!(
    /// Handle of a field
    FieldId,
    "f"
);
define_id!(
    /// Handle of a local variable (unique across the whole program)
    VarId,
    "v"
);

/// A statement position: `index`-th statement of `method`'s body.
///
/// Used as allocation-site and call-site identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StmtRef {
    pub method: MethodId,
    pub index: usize,
}

impl StmtRef {
    #[inline]
    pub fn new(method: MethodId, index: usize) -> Self {
        Self { method, index }
    }
}

impl fmt::Display for StmtRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.method, self.index)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveType),
    Class(ClassId),
    Array(Box<Type>),
    /// Type of the `null` literal
    Null,
}

impl Type {
    pub const INT: Type = Type::Primitive(PrimitiveType::Int);
    pub const BOOLEAN: Type = Type::Primitive(PrimitiveType::Boolean);

    pub fn array_of(elem: Type) -> Self {
        Type::Array(Box::new(elem))
    }

    /// Whether a variable of this type can hold an `int` value.
    ///
    /// `long`, `float` and `double` are excluded: constant propagation only
    /// tracks 32-bit integral values.
    pub fn can_hold_int(&self) -> bool {
        matches!(
            self,
            Type::Primitive(
                PrimitiveType::Byte
                    | PrimitiveType::Short
                    | PrimitiveType::Int
                    | PrimitiveType::Char
                    | PrimitiveType::Boolean
            )
        )
    }

    pub fn is_reference(&self) -> bool {
        !matches!(self, Type::Primitive(_))
    }

    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            Type::Class(c) => Some(*c),
            _ => None,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Expressions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    // condition
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    // shift
    Shl,
    Shr,
    Ushr,
    // bitwise
    And,
    Or,
    Xor,
}

impl BinaryOp {
    /// Division and remainder may throw on a zero divisor
    #[inline]
    pub fn is_division(self) -> bool {
        matches!(self, BinaryOp::Div | BinaryOp::Rem)
    }

    #[inline]
    pub fn is_condition(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Ushr => ">>>",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
        }
    }
}

/// `lhs op rhs`, both operands are variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryExp {
    pub op: BinaryOp,
    pub lhs: VarId,
    pub rhs: VarId,
}

impl BinaryExp {
    pub fn new(op: BinaryOp, lhs: VarId, rhs: VarId) -> Self {
        Self { op, lhs, rhs }
    }
}

/// Right-hand side of an assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exp {
    Var(VarId),
    IntLiteral(i32),
    NullLiteral,
    Binary(BinaryExp),
    Neg(VarId),
    Cast { ty: Type, var: VarId },
    InstanceOf { var: VarId, ty: Type },
    /// Allocation; the statement position is the allocation site
    New(Type),
    /// `base.field`, or `T.field` when `base` is `None`
    FieldAccess { base: Option<VarId>, field: FieldId },
    ArrayAccess { base: VarId, index: VarId },
    ArrayLength(VarId),
}

impl Exp {
    fn vars(&self, out: &mut Vec<VarId>) {
        match self {
            Exp::Var(v) | Exp::Neg(v) | Exp::ArrayLength(v) => out.push(*v),
            Exp::Binary(b) => out.extend([b.lhs, b.rhs]),
            Exp::Cast { var, .. } | Exp::InstanceOf { var, .. } => out.push(*var),
            Exp::FieldAccess { base, .. } => out.extend(*base),
            Exp::ArrayAccess { base, index } => out.extend([*base, *index]),
            Exp::IntLiteral(_) | Exp::NullLiteral | Exp::New(_) => {}
        }
    }
}

/// Left-hand side of a store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    Field { base: Option<VarId>, field: FieldId },
    Array { base: VarId, index: VarId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CallKind {
    Static,
    Special,
    Virtual,
    Interface,
    Dynamic,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::Static => "STATIC",
            CallKind::Special => "SPECIAL",
            CallKind::Virtual => "VIRTUAL",
            CallKind::Interface => "INTERFACE",
            CallKind::Dynamic => "DYNAMIC",
        }
    }
}

/// Symbolic reference to a method: declaring class + subsignature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub class: ClassId,
    pub subsignature: String,
}

impl MethodRef {
    pub fn new(class: ClassId, subsignature: impl Into<String>) -> Self {
        Self {
            class,
            subsignature: subsignature.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvokeExp {
    pub kind: CallKind,
    pub method_ref: MethodRef,
    /// `None` for static and dynamic calls
    pub receiver: Option<VarId>,
    pub args: Vec<VarId>,
}

impl InvokeExp {
    pub fn new_static(method_ref: MethodRef, args: Vec<VarId>) -> Self {
        Self {
            kind: CallKind::Static,
            method_ref,
            receiver: None,
            args,
        }
    }

    pub fn new_instance(
        kind: CallKind,
        method_ref: MethodRef,
        receiver: VarId,
        args: Vec<VarId>,
    ) -> Self {
        Self {
            kind,
            method_ref,
            receiver: Some(receiver),
            args,
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == CallKind::Static
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Statements
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Jump targets are statement indices within the same body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stmt {
    Assign { lhs: VarId, rhs: Exp },
    Store { target: Access, rhs: VarId },
    Invoke { lhs: Option<VarId>, call: InvokeExp },
    If { cond: BinaryExp, target: usize },
    Goto { target: usize },
    Switch { var: VarId, cases: Vec<(i32, usize)>, default: usize },
    Return { value: Option<VarId> },
    Nop,
}

impl Stmt {
    /// Variable defined by this statement, if any
    pub fn def(&self) -> Option<VarId> {
        match self {
            Stmt::Assign { lhs, .. } => Some(*lhs),
            Stmt::Invoke { lhs, .. } => *lhs,
            _ => None,
        }
    }

    /// Variables read by this statement
    pub fn uses(&self) -> Vec<VarId> {
        let mut out = Vec::new();
        match self {
            Stmt::Assign { rhs, .. } => rhs.vars(&mut out),
            Stmt::Store { target, rhs } => {
                match target {
                    Access::Field { base, .. } => out.extend(*base),
                    Access::Array { base, index } => out.extend([*base, *index]),
                }
                out.push(*rhs);
            }
            Stmt::Invoke { call, .. } => {
                out.extend(call.receiver);
                out.extend(call.args.iter().copied());
            }
            Stmt::If { cond, .. } => out.extend([cond.lhs, cond.rhs]),
            Stmt::Switch { var, .. } => out.push(*var),
            Stmt::Return { value } => out.extend(*value),
            Stmt::Goto { .. } | Stmt::Nop => {}
        }
        out
    }

    /// Statements that define a variable (assignments and invokes with a result)
    #[inline]
    pub fn is_definition(&self) -> bool {
        self.def().is_some()
    }

    /// Explicit jump targets (fall-through excluded)
    pub fn jump_targets(&self) -> Vec<usize> {
        match self {
            Stmt::If { target, .. } | Stmt::Goto { target } => vec![*target],
            Stmt::Switch { cases, default, .. } => cases
                .iter()
                .map(|&(_, t)| t)
                .chain(std::iter::once(*default))
                .collect(),
            _ => Vec::new(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Method bodies
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Statement indices where a variable appears as base or receiver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarUses {
    /// `v.f = y`
    pub store_fields: Vec<usize>,
    /// `x = v.f`
    pub load_fields: Vec<usize>,
    /// `v[i] = y`
    pub store_arrays: Vec<usize>,
    /// `x = v[i]`
    pub load_arrays: Vec<usize>,
    /// `v.m(...)`
    pub invokes: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct MethodBody {
    pub this: Option<VarId>,
    pub params: Vec<VarId>,
    pub stmts: Vec<Stmt>,
    return_vars: Vec<VarId>,
    var_uses: FxHashMap<VarId, VarUses>,
}

impl MethodBody {
    pub fn new(this: Option<VarId>, params: Vec<VarId>, stmts: Vec<Stmt>) -> Self {
        let mut return_vars = Vec::new();
        let mut var_uses: FxHashMap<VarId, VarUses> = FxHashMap::default();

        for (i, stmt) in stmts.iter().enumerate() {
            match stmt {
                Stmt::Assign { rhs, .. } => match rhs {
                    Exp::FieldAccess { base: Some(b), .. } => {
                        var_uses.entry(*b).or_default().load_fields.push(i)
                    }
                    Exp::ArrayAccess { base, .. } => {
                        var_uses.entry(*base).or_default().load_arrays.push(i)
                    }
                    _ => {}
                },
                Stmt::Store { target, .. } => match target {
                    Access::Field { base: Some(b), .. } => {
                        var_uses.entry(*b).or_default().store_fields.push(i)
                    }
                    Access::Array { base, .. } => {
                        var_uses.entry(*base).or_default().store_arrays.push(i)
                    }
                    Access::Field { base: None, .. } => {}
                },
                Stmt::Invoke { call, .. } => {
                    if let Some(r) = call.receiver {
                        var_uses.entry(r).or_default().invokes.push(i);
                    }
                }
                Stmt::Return { value: Some(v) } => {
                    if !return_vars.contains(v) {
                        return_vars.push(*v);
                    }
                }
                _ => {}
            }
        }

        Self {
            this,
            params,
            stmts,
            return_vars,
            var_uses,
        }
    }

    #[inline]
    pub fn stmt(&self, index: usize) -> Option<&Stmt> {
        self.stmts.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    /// Variables returned by `return v` statements, in first-seen order
    #[inline]
    pub fn return_vars(&self) -> &[VarId] {
        &self.return_vars
    }

    #[inline]
    pub fn uses_of(&self, var: VarId) -> Option<&VarUses> {
        self.var_uses.get(&var)
    }

    /// Indices of all invoke statements
    pub fn call_sites(&self) -> impl Iterator<Item = usize> + '_ {
        self.stmts
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Stmt::Invoke { .. }))
            .map(|(i, _)| i)
    }
}
