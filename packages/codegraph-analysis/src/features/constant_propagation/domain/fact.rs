//! Constant-propagation fact: variable → [`Value`]
//!
//! Variables absent from the map are `Undef`; storing `Undef` removes the
//! entry, so two facts are equal iff they agree on every variable.

use super::value::Value;
use crate::shared::models::VarId;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpFact {
    values: FxHashMap<VarId, Value>,
}

impl CpFact {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, var: VarId) -> Value {
        self.values.get(&var).copied().unwrap_or(Value::Undef)
    }

    /// Returns true if the stored value changed
    pub fn update(&mut self, var: VarId, value: Value) -> bool {
        let old = if value.is_undef() {
            self.values.remove(&var)
        } else {
            self.values.insert(var, value)
        };
        old.unwrap_or(Value::Undef) != value
    }

    pub fn remove(&mut self, var: VarId) {
        self.values.remove(&var);
    }

    /// Overwrite with `other`; returns true if `self` changed
    pub fn copy_from(&mut self, other: &CpFact) -> bool {
        if self == other {
            false
        } else {
            self.values.clone_from(&other.values);
            true
        }
    }

    /// Pointwise meet of `self` into `target`
    pub fn meet_into(&self, target: &mut CpFact) {
        for (&var, &value) in &self.values {
            let met = value.meet(target.get(var));
            target.update(var, met);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarId, Value)> + '_ {
        self.values.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Ordered snapshot, for reports and stable comparisons
    pub fn to_sorted(&self) -> BTreeMap<VarId, Value> {
        self.values.iter().map(|(&k, &v)| (k, v)).collect()
    }
}

impl FromIterator<(VarId, Value)> for CpFact {
    fn from_iter<I: IntoIterator<Item = (VarId, Value)>>(iter: I) -> Self {
        let mut fact = CpFact::new();
        for (var, value) in iter {
            fact.update(var, value);
        }
        fact
    }
}
