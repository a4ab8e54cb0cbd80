//! Command handling for the shorthand language.
//!
//! ```text
//! token → alias resolution → registry lookup → validation → ResolvedCommand
//! ```
//!
//! The registry is built once and never mutated; validation is pure apart
//! from asking the agent whether it knows a color name.

mod alias;
mod registry;
mod validate;

pub use alias::{resolve_alias, AliasTable};
pub use registry::{command_registry, Action, ArgKind, Arity, CommandRegistry, CommandSpec, RegistryError};
pub use validate::{resolve_unit, validate, CommandUnit, Invocation, ResolvedCommand};

/// Parse a real number argument. Non-finite values are not numbers here.
pub fn parse_real(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}
