//! Shared models

mod hierarchy;
pub mod ir;
mod program;

pub use hierarchy::ClassHierarchy;
pub use ir::{
    Access, BinaryExp, BinaryOp, CallKind, ClassId, Exp, FieldId, InvokeExp, MethodBody,
    MethodId, MethodRef, PrimitiveType, Stmt, StmtRef, Type, VarId, VarUses,
};
pub use program::{Class, Field, Method, Program, ProgramBuilder, Var};
