//! Intraprocedural constant propagation
//!
//! Forward analysis over a method's CFG. Parameters that can hold an int
//! start as `NAC`; every other variable starts as `UNDEF`. Only
//! int-holding variables (byte, short, int, char, boolean) are tracked.

use crate::errors::Result;
use crate::features::constant_propagation::domain::{CpFact, Value};
use crate::features::data_flow::{Cfg, DataflowAnalysis, DataflowResult, DataflowSolver, NodeId};
use crate::shared::models::{BinaryOp, Exp, MethodId, Program, Stmt, VarId};

pub struct ConstantPropagation<'p> {
    program: &'p Program,
}

impl<'p> ConstantPropagation<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self { program }
    }

    /// Build the method's CFG and solve to fixpoint
    pub fn analyze(&self, method: MethodId) -> Result<(Cfg, DataflowResult<NodeId, CpFact>)> {
        let cfg = Cfg::build(self.program, method)?;
        let result = DataflowSolver::new(self, &cfg).solve();
        Ok((cfg, result))
    }

    pub(crate) fn can_hold_int(&self, var: VarId) -> bool {
        self.program.var(var).ty.can_hold_int()
    }

    /// Fact with every int-holding parameter of `method` set to NAC
    pub(crate) fn params_as_nac(&self, method: MethodId) -> CpFact {
        self.program
            .params(method)
            .iter()
            .filter(|&&p| self.can_hold_int(p))
            .map(|&p| (p, Value::Nac))
            .collect()
    }

    /// Statement transfer shared by the intra- and interprocedural variants
    pub(crate) fn transfer_stmt(&self, node: NodeId, input: &CpFact, output: &mut CpFact) -> bool {
        let stmt = node
            .stmt_index()
            .and_then(|i| self.program.stmt(node.method, i));

        match stmt {
            Some(Stmt::Assign { lhs, rhs }) if self.can_hold_int(*lhs) => {
                let mut new_out = input.clone();
                new_out.update(*lhs, Self::evaluate(rhs, input));
                output.copy_from(&new_out)
            }
            Some(Stmt::Invoke { lhs: Some(lhs), .. }) if self.can_hold_int(*lhs) => {
                let mut new_out = input.clone();
                new_out.update(*lhs, Value::Nac);
                output.copy_from(&new_out)
            }
            _ => output.copy_from(input),
        }
    }

    /// Value of `exp` under `fact`
    pub fn evaluate(exp: &Exp, fact: &CpFact) -> Value {
        match exp {
            Exp::Var(v) => fact.get(*v),
            Exp::IntLiteral(i) => Value::Constant(*i),
            Exp::Binary(b) => Self::evaluate_binary(b.op, fact.get(b.lhs), fact.get(b.rhs)),
            _ => Value::Nac,
        }
    }

    /// `lhs op rhs` with 32-bit two's-complement semantics.
    ///
    /// Division or remainder by a known zero is `UNDEF`, checked before
    /// anything else, so `NAC / 0` is `UNDEF` too.
    pub fn evaluate_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Value {
        if op.is_division() && rhs == Value::Constant(0) {
            return Value::Undef;
        }
        let (a, b) = match (lhs, rhs) {
            (Value::Nac, _) | (_, Value::Nac) => return Value::Nac,
            (Value::Constant(a), Value::Constant(b)) => (a, b),
            _ => return Value::Undef,
        };

        let result = match op {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Div => a.wrapping_div(b),
            BinaryOp::Rem => a.wrapping_rem(b),
            BinaryOp::Eq => (a == b) as i32,
            BinaryOp::Ne => (a != b) as i32,
            BinaryOp::Lt => (a < b) as i32,
            BinaryOp::Gt => (a > b) as i32,
            BinaryOp::Le => (a <= b) as i32,
            BinaryOp::Ge => (a >= b) as i32,
            // shift distance uses the low 5 bits
            BinaryOp::Shl => a.wrapping_shl(b as u32),
            BinaryOp::Shr => a.wrapping_shr(b as u32),
            BinaryOp::Ushr => (a as u32).wrapping_shr(b as u32) as i32,
            BinaryOp::And => a & b,
            BinaryOp::Or => a | b,
            BinaryOp::Xor => a ^ b,
        };
        Value::Constant(result)
    }
}

impl DataflowAnalysis<NodeId> for ConstantPropagation<'_> {
    type Fact = CpFact;

    fn is_forward(&self) -> bool {
        true
    }

    fn new_boundary_fact(&self, node: NodeId) -> CpFact {
        self.params_as_nac(node.method)
    }

    fn new_initial_fact(&self) -> CpFact {
        CpFact::new()
    }

    fn meet_into(&self, fact: &CpFact, target: &mut CpFact) {
        fact.meet_into(target);
    }

    fn transfer_node(&self, node: NodeId, input: &CpFact, output: &mut CpFact) -> bool {
        self.transfer_stmt(node, input, output)
    }
}
