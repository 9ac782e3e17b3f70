//! The engine-facing boundary: schema types and document emission.

pub mod emitter;
pub mod schema;

// Re-export schema and emitter types
pub use emitter::{emit_document, render, write_config, EmitSettings};
pub use schema::{
    ComplexModifications, Condition, FromEvent, FromModifiers, GlobalSettings, KarabinerConfig,
    Manipulator, Profile, Rule, RuleEntry, SetVariable, ToEvent,
};
