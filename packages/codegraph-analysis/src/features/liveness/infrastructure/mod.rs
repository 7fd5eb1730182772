pub mod live_variable;

pub use live_variable::{LiveVariableAnalysis, LiveVars};
