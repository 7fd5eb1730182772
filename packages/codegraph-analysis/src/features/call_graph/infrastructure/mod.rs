//! Call graph builders

pub mod cha_builder;

pub use cha_builder::ChaBuilder;
