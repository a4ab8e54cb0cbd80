//! Batch engine: runs a batch of shorthand commands against an agent.
//!
//! ```text
//! Normalizing → ValidatingAll → Executing → Done
//!                            ↘ Failed
//! ```
//!
//! Every unit is validated before any unit executes, so a malformed command
//! anywhere in a batch leaves the agent untouched.

use parking_lot::Mutex;

use crate::agent::DrawingAgent;
use crate::command::{command_registry, resolve_unit, CommandRegistry, CommandUnit, ResolvedCommand};
use crate::error::{ShortcutError, SyntaxError};

/// Where a running batch is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Normalizing,
    ValidatingAll,
    Executing,
    Done,
    Failed,
}

/// Join the inputs with commas, treat newlines as commas, and split into
/// non-empty command units in order.
pub fn split_units<S: AsRef<str>>(inputs: &[S]) -> Vec<CommandUnit> {
    let joined = inputs.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
    joined
        .replace('\n', ",")
        .split(',')
        .filter_map(CommandUnit::parse)
        .collect()
}

/// Runs batches against a command registry.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'r> {
    registry: &'r CommandRegistry,
}

impl Default for Interpreter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter<'static> {
    /// An interpreter over the built-in commands.
    pub fn new() -> Self {
        Self::with_registry(command_registry())
    }
}

impl<'r> Interpreter<'r> {
    pub fn with_registry(registry: &'r CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r CommandRegistry {
        self.registry
    }

    /// Validate a batch without executing anything.
    ///
    /// Stops at the first invalid unit, left to right.
    pub fn check<S: AsRef<str>>(
        &self,
        agent: &dyn DrawingAgent,
        inputs: &[S],
    ) -> Result<Vec<ResolvedCommand<'r>>, SyntaxError> {
        let units = split_units(inputs);
        tracing::debug!(phase = ?BatchPhase::Normalizing, units = units.len(), "batch split");
        self.validate_all(agent, &units)
    }

    /// Validate and then execute a batch, returning how many commands ran.
    ///
    /// On a syntax error nothing executes. If the agent fails part-way
    /// through execution the error is returned as-is and the commands before
    /// it stay applied.
    pub fn run<S: AsRef<str>>(
        &self,
        agent: &mut dyn DrawingAgent,
        inputs: &[S],
    ) -> Result<usize, ShortcutError> {
        let resolved = match self.check(&*agent, inputs) {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::debug!(phase = ?BatchPhase::Failed, error = %err, "batch rejected");
                return Err(err.into());
            }
        };

        tracing::debug!(phase = ?BatchPhase::Executing, commands = resolved.len(), "executing batch");
        let mut executed = 0;
        for command in &resolved {
            tracing::trace!(code = command.spec.code, "execute");
            if let Err(err) = command.execute(agent) {
                tracing::warn!(
                    phase = ?BatchPhase::Failed,
                    code = command.spec.code,
                    executed,
                    error = %err,
                    "agent failed mid-batch"
                );
                return Err(err.into());
            }
            executed += 1;
        }

        tracing::debug!(phase = ?BatchPhase::Done, executed, "batch complete");
        Ok(executed)
    }

    /// Like [`Interpreter::run`], holding `agent`'s lock for the whole batch
    /// so no other caller can interleave with it.
    pub fn run_locked<A: DrawingAgent, S: AsRef<str>>(
        &self,
        agent: &Mutex<A>,
        inputs: &[S],
    ) -> Result<usize, ShortcutError> {
        let mut agent = agent.lock();
        self.run(&mut *agent, inputs)
    }

    fn validate_all(
        &self,
        agent: &dyn DrawingAgent,
        units: &[CommandUnit],
    ) -> Result<Vec<ResolvedCommand<'r>>, SyntaxError> {
        tracing::debug!(phase = ?BatchPhase::ValidatingAll, "validating batch");
        units
            .iter()
            .map(|unit| resolve_unit(unit, self.registry, agent))
            .collect()
    }
}

/// Run a batch against `agent` with the built-in commands.
///
/// ```
/// use turtlesc::{run, HeadlessTurtle};
///
/// let mut turtle = HeadlessTurtle::new();
/// assert_eq!(run(&mut turtle, &["f 100, l 90", "f 100"]).unwrap(), 3);
/// ```
pub fn run<S: AsRef<str>>(agent: &mut dyn DrawingAgent, inputs: &[S]) -> Result<usize, ShortcutError> {
    Interpreter::new().run(agent, inputs)
}
