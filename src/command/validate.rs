//! Argument validation: command unit → resolved, ready-to-run command.

use crate::agent::{AgentResult, ColorTarget, DrawingAgent};
use crate::color::{apply_color, ColorArg, ColorTokenError};
use crate::command::parse_real;
use crate::command::registry::{Action, ArgKind, CommandRegistry, CommandSpec};
use crate::error::{SyntaxError, SyntaxErrorKind};

/// Named animation speeds and their numeric equivalents.
const SPEED_NAMES: &[(&str, f64)] = &[
    ("fastest", 0.0),
    ("fast", 10.0),
    ("normal", 6.0),
    ("slow", 3.0),
    ("slowest", 1.0),
];

/// One instruction of a batch, e.g. `"f 100"`.
///
/// Only [`CommandUnit::parse`] builds one, so there is always a command token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandUnit {
    raw: String,
    tokens: Vec<String>,
}

impl CommandUnit {
    /// Tokenize one unit. Returns `None` for blank text.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text.trim();
        let tokens: Vec<String> = raw.split_whitespace().map(String::from).collect();
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    /// The unit text, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whitespace-separated tokens, command first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The command token as written.
    pub fn command(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> Vec<&str> {
        self.tokens[1..].iter().map(String::as_str).collect()
    }
}

/// A validated call, with its arguments already parsed.
#[derive(Debug, Clone)]
pub enum Invocation {
    Zero(fn(&mut dyn DrawingAgent) -> AgentResult),
    One(fn(&mut dyn DrawingAgent, f64) -> AgentResult, f64),
    Two(fn(&mut dyn DrawingAgent, f64, f64) -> AgentResult, f64, f64),
    Integer(fn(&mut dyn DrawingAgent, i64) -> AgentResult, i64),
    OptionalInteger(fn(&mut dyn DrawingAgent, Option<i64>) -> AgentResult, Option<i64>),
    Color(ColorTarget, ColorArg),
}

/// A command unit that passed validation.
#[derive(Debug, Clone)]
pub struct ResolvedCommand<'r> {
    pub spec: &'r CommandSpec,
    pub invocation: Invocation,
}

impl ResolvedCommand<'_> {
    /// Invoke the command on `agent`.
    pub fn execute(&self, agent: &mut dyn DrawingAgent) -> AgentResult {
        match &self.invocation {
            Invocation::Zero(action) => action(agent),
            Invocation::One(action, n) => action(agent, *n),
            Invocation::Two(action, a, b) => action(agent, *a, *b),
            Invocation::Integer(action, n) => action(agent, *n),
            Invocation::OptionalInteger(action, n) => action(agent, *n),
            Invocation::Color(target, color) => apply_color(agent, *target, color),
        }
    }
}

/// Resolve the unit's command token and validate its arguments.
pub fn resolve_unit<'r>(
    unit: &CommandUnit,
    registry: &'r CommandRegistry,
    agent: &dyn DrawingAgent,
) -> Result<ResolvedCommand<'r>, SyntaxError> {
    let code = registry.aliases().resolve(unit.command());
    let spec = registry.get(&code).ok_or_else(|| {
        SyntaxError::new(SyntaxErrorKind::UnknownCommand, &unit.raw, unit.command())
    })?;
    let invocation = validate(spec, unit, agent)?;
    Ok(ResolvedCommand { spec, invocation })
}

/// Check the unit's argument tokens against `spec` and parse them.
///
/// `agent` is only asked whether it knows a color name.
pub fn validate(
    spec: &CommandSpec,
    unit: &CommandUnit,
    agent: &dyn DrawingAgent,
) -> Result<Invocation, SyntaxError> {
    let args = unit.args();
    let error = |kind, token: &str| SyntaxError::new(kind, &unit.raw, token);
    let missing = || error(SyntaxErrorKind::MissingArgument, unit.command());

    match spec.action {
        Action::Zero(action) => match args.first() {
            Some(extra) => Err(error(SyntaxErrorKind::TooManyArguments, *extra)),
            None => Ok(Invocation::Zero(action)),
        },
        Action::One(kind, action) => match args.as_slice() {
            [] => Err(missing()),
            [token] => Ok(Invocation::One(action, parse_arg(kind, token, unit)?)),
            [_, extra, ..] => Err(error(SyntaxErrorKind::TooManyArguments, *extra)),
        },
        Action::Two(action) => match args.as_slice() {
            [] | [_] => Err(missing()),
            [a, b] => Ok(Invocation::Two(
                action,
                parse_arg(ArgKind::Real, a, unit)?,
                parse_arg(ArgKind::Real, b, unit)?,
            )),
            [_, _, extra, ..] => Err(error(SyntaxErrorKind::TooManyArguments, *extra)),
        },
        Action::Integer(action) => match args.as_slice() {
            [] => Err(missing()),
            [token] => Ok(Invocation::Integer(action, parse_integer(token, unit)?)),
            [_, extra, ..] => Err(error(SyntaxErrorKind::TooManyArguments, *extra)),
        },
        Action::OptionalInteger(action) => match args.as_slice() {
            [] => Ok(Invocation::OptionalInteger(action, None)),
            [token] => Ok(Invocation::OptionalInteger(
                action,
                Some(parse_integer(token, unit)?),
            )),
            [_, extra, ..] => Err(error(SyntaxErrorKind::TooManyArguments, *extra)),
        },
        Action::Color(target) => {
            let color = match ColorArg::from_tokens(&args) {
                Ok(color) => color,
                Err(ColorTokenError::Count(0)) => return Err(missing()),
                Err(ColorTokenError::Count(2)) => {
                    return Err(error(SyntaxErrorKind::InvalidColor, &args.join(" ")))
                }
                Err(ColorTokenError::Count(_)) => {
                    return Err(error(SyntaxErrorKind::TooManyArguments, args[3]))
                }
                Err(ColorTokenError::NotANumber(token)) => {
                    return Err(error(SyntaxErrorKind::NotANumber, &token))
                }
            };
            if let ColorArg::Named(name) = &color {
                if !agent.accepts_color(name) {
                    return Err(error(SyntaxErrorKind::InvalidColor, args[0]));
                }
            }
            Ok(Invocation::Color(target, color))
        }
    }
}

fn parse_arg(kind: ArgKind, token: &str, unit: &CommandUnit) -> Result<f64, SyntaxError> {
    let error = |kind| SyntaxError::new(kind, &unit.raw, token);
    match kind {
        ArgKind::Real => parse_real(token).ok_or_else(|| error(SyntaxErrorKind::NotANumber)),
        ArgKind::NonNegative => {
            let value = parse_real(token).ok_or_else(|| error(SyntaxErrorKind::NotANumber))?;
            if value < 0.0 {
                return Err(error(SyntaxErrorKind::Negative));
            }
            Ok(value)
        }
        ArgKind::Speed => {
            let lowered = token.to_lowercase();
            SPEED_NAMES
                .iter()
                .find(|(name, _)| *name == lowered)
                .map(|(_, value)| *value)
                .or_else(|| parse_real(token))
                .ok_or_else(|| error(SyntaxErrorKind::NotANumber))
        }
    }
}

fn parse_integer(token: &str, unit: &CommandUnit) -> Result<i64, SyntaxError> {
    token.parse::<i64>().map_err(|_| {
        let kind = if parse_real(token).is_some() {
            SyntaxErrorKind::NotAnInteger
        } else {
            SyntaxErrorKind::NotANumber
        };
        SyntaxError::new(kind, &unit.raw, token)
    })
}
