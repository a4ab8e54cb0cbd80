//! Compact shorthand commands for turtle-style drawing agents.
//!
//! ```text
//! "f 100, l 90, f 100" → split → resolve aliases → validate all → execute in order
//! ```
//!
//! A batch either runs completely or, if any command is malformed, not at
//! all. The drawing itself is delegated to a [`DrawingAgent`].

pub mod agent;
pub mod color;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

pub use agent::{AgentError, AngleUnit, ColorScale, ColorTarget, DrawingAgent, HeadlessTurtle};
pub use color::{resolve_color, ColorArg, ColorValue};
pub use command::{command_registry, resolve_alias};
pub use engine::{run, split_units, BatchPhase, Interpreter};
pub use error::{ShortcutError, SyntaxError, SyntaxErrorKind};
