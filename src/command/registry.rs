//! Command registry: single source of truth for every shorthand command.

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

use crate::agent::{AgentResult, AngleUnit, ColorTarget, DrawingAgent};
use crate::command::alias::AliasTable;

/// How many argument tokens a command takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No arguments (e.g. `pu`).
    Zero,
    /// Exactly one number (e.g. `f 100`).
    One,
    /// Exactly two numbers (e.g. `g 10 20`).
    Two,
    /// A color: one name/hex token or three numbers (e.g. `pc red`).
    Color,
    /// Nothing or one number (e.g. `css`, `css 2`).
    ZeroOrOne,
}

/// What a single real-valued argument token must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Any finite real number.
    Real,
    /// A finite real number ≥ 0.
    NonNegative,
    /// A number, or one of `fastest fast normal slow slowest`.
    Speed,
}

/// What a command does to the agent, typed by its arguments.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    Zero(fn(&mut dyn DrawingAgent) -> AgentResult),
    One(ArgKind, fn(&mut dyn DrawingAgent, f64) -> AgentResult),
    /// Two finite reals.
    Two(fn(&mut dyn DrawingAgent, f64, f64) -> AgentResult),
    /// One signed whole number, passed through without going via `f64`.
    Integer(fn(&mut dyn DrawingAgent, i64) -> AgentResult),
    /// Nothing or one signed whole number.
    OptionalInteger(fn(&mut dyn DrawingAgent, Option<i64>) -> AgentResult),
    Color(ColorTarget),
}

/// A single command definition.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Canonical code (e.g. "f").
    pub code: &'static str,
    /// Long names that resolve to `code` (e.g. "forward").
    pub aliases: &'static [&'static str],
    pub action: Action,
    /// Human-readable description (for help text).
    pub description: &'static str,
}

impl CommandSpec {
    pub fn arity(&self) -> Arity {
        match self.action {
            Action::Zero(_) => Arity::Zero,
            Action::One(..) | Action::Integer(_) => Arity::One,
            Action::Two(_) => Arity::Two,
            Action::OptionalInteger(_) => Arity::ZeroOrOne,
            Action::Color(_) => Arity::Color,
        }
    }

    /// Usage line, e.g. `g X Y`.
    pub fn usage(&self) -> String {
        match self.arity() {
            Arity::Zero => self.code.to_string(),
            Arity::One => format!("{} N", self.code),
            Arity::Two => format!("{} X Y", self.code),
            Arity::ZeroOrOne => format!("{} [N]", self.code),
            Arity::Color => format!("{} RGB", self.code),
        }
    }
}

/// Errors that can occur when building a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Command code '{code}' is defined twice")]
    DuplicateCode { code: String },

    #[error("Name '{name}' refers to both '{first}' and '{second}'")]
    AmbiguousName {
        name: String,
        first: String,
        second: String,
    },
}

/// Immutable lookup table of commands, by canonical code and by alias.
#[derive(Debug)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
    by_code: HashMap<&'static str, usize>,
    aliases: AliasTable,
}

impl CommandRegistry {
    /// Build a registry, rejecting duplicate codes and overlapping names.
    pub fn from_commands(commands: Vec<CommandSpec>) -> Result<Self, RegistryError> {
        let mut by_code = HashMap::with_capacity(commands.len());
        for (index, spec) in commands.iter().enumerate() {
            if by_code.insert(spec.code, index).is_some() {
                return Err(RegistryError::DuplicateCode {
                    code: spec.code.to_string(),
                });
            }
        }

        let mut aliases = AliasTable::new();
        for spec in &commands {
            for &alias in spec.aliases {
                if let Some(&owner) = by_code.get(alias) {
                    if commands[owner].code != spec.code {
                        return Err(RegistryError::AmbiguousName {
                            name: alias.to_string(),
                            first: commands[owner].code.to_string(),
                            second: spec.code.to_string(),
                        });
                    }
                }
                aliases.insert(alias, spec.code)?;
            }
        }

        Ok(Self {
            commands,
            by_code,
            aliases,
        })
    }

    /// Look up a command by canonical code.
    pub fn get(&self, code: &str) -> Option<&CommandSpec> {
        self.by_code.get(code).map(|&index| &self.commands[index])
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

static REGISTRY: LazyLock<CommandRegistry> = LazyLock::new(|| {
    CommandRegistry::from_commands(builtin_commands()).expect("built-in command table is consistent")
});

/// The process-wide registry of built-in commands.
pub fn command_registry() -> &'static CommandRegistry {
    &REGISTRY
}

/// Face `degrees` (measured in degrees whatever the agent's angle unit) and
/// move `distance`. The agent's angle unit is restored afterwards.
fn walk_towards(agent: &mut dyn DrawingAgent, degrees: f64, distance: f64) -> AgentResult {
    let unit = agent.angle_unit()?;
    let mut agent = scopeguard::guard(agent, move |agent| agent.set_angle_unit(unit));
    agent.set_angle_unit(AngleUnit::Degrees);
    agent.set_heading(degrees)?;
    agent.forward(distance)
}

fn builtin_commands() -> Vec<CommandSpec> {
    vec![
        // === Movement ===
        CommandSpec {
            code: "f",
            aliases: &["forward"],
            action: Action::One(ArgKind::Real, |agent, n| agent.forward(n)),
            description: "Move forward N units",
        },
        CommandSpec {
            code: "b",
            aliases: &["backward"],
            action: Action::One(ArgKind::Real, |agent, n| agent.backward(n)),
            description: "Move backward N units",
        },
        CommandSpec {
            code: "l",
            aliases: &["left"],
            action: Action::One(ArgKind::Real, |agent, n| agent.left(n)),
            description: "Turn left by N",
        },
        CommandSpec {
            code: "r",
            aliases: &["right"],
            action: Action::One(ArgKind::Real, |agent, n| agent.right(n)),
            description: "Turn right by N",
        },
        CommandSpec {
            code: "g",
            aliases: &["goto"],
            action: Action::Two(|agent, x, y| agent.goto(x, y)),
            description: "Move to (X, Y)",
        },
        CommandSpec {
            code: "x",
            aliases: &["setx"],
            action: Action::One(ArgKind::Real, |agent, x| agent.set_x(x)),
            description: "Set the x coordinate",
        },
        CommandSpec {
            code: "y",
            aliases: &["sety"],
            action: Action::One(ArgKind::Real, |agent, y| agent.set_y(y)),
            description: "Set the y coordinate",
        },
        CommandSpec {
            code: "sh",
            aliases: &["setheading"],
            action: Action::One(ArgKind::Real, |agent, n| agent.set_heading(n)),
            description: "Set the heading",
        },
        CommandSpec {
            code: "cir",
            aliases: &["circle"],
            action: Action::One(ArgKind::Real, |agent, n| agent.circle(n)),
            description: "Draw a circle of radius N",
        },
        CommandSpec {
            code: "h",
            aliases: &["home"],
            action: Action::Zero(|agent| agent.home()),
            description: "Return to the origin, facing east",
        },
        // === Cardinal directions (always degrees) ===
        CommandSpec {
            code: "n",
            aliases: &["north"],
            action: Action::One(ArgKind::Real, |agent, n| walk_towards(agent, 90.0, n)),
            description: "Face north and move N units",
        },
        CommandSpec {
            code: "s",
            aliases: &["south"],
            action: Action::One(ArgKind::Real, |agent, n| walk_towards(agent, 270.0, n)),
            description: "Face south and move N units",
        },
        CommandSpec {
            code: "e",
            aliases: &["east"],
            action: Action::One(ArgKind::Real, |agent, n| walk_towards(agent, 0.0, n)),
            description: "Face east and move N units",
        },
        CommandSpec {
            code: "w",
            aliases: &["west"],
            action: Action::One(ArgKind::Real, |agent, n| walk_towards(agent, 180.0, n)),
            description: "Face west and move N units",
        },
        CommandSpec {
            code: "nw",
            aliases: &["northwest"],
            action: Action::One(ArgKind::Real, |agent, n| walk_towards(agent, 135.0, n)),
            description: "Face northwest and move N units",
        },
        CommandSpec {
            code: "ne",
            aliases: &["northeast"],
            action: Action::One(ArgKind::Real, |agent, n| walk_towards(agent, 45.0, n)),
            description: "Face northeast and move N units",
        },
        CommandSpec {
            code: "sw",
            aliases: &["southwest"],
            action: Action::One(ArgKind::Real, |agent, n| walk_towards(agent, 225.0, n)),
            description: "Face southwest and move N units",
        },
        CommandSpec {
            code: "se",
            aliases: &["southeast"],
            action: Action::One(ArgKind::Real, |agent, n| walk_towards(agent, 315.0, n)),
            description: "Face southeast and move N units",
        },
        // === Pen and fill ===
        CommandSpec {
            code: "pd",
            aliases: &["pendown"],
            action: Action::Zero(|agent| agent.pen_down()),
            description: "Put the pen down",
        },
        CommandSpec {
            code: "pu",
            aliases: &["penup"],
            action: Action::Zero(|agent| agent.pen_up()),
            description: "Lift the pen",
        },
        CommandSpec {
            code: "ps",
            aliases: &["pensize"],
            action: Action::One(ArgKind::Real, |agent, n| agent.pen_size(n)),
            description: "Set the pen width",
        },
        CommandSpec {
            code: "bf",
            aliases: &["begin_fill"],
            action: Action::Zero(|agent| agent.begin_fill()),
            description: "Start a filled shape",
        },
        CommandSpec {
            code: "ef",
            aliases: &["end_fill"],
            action: Action::Zero(|agent| agent.end_fill()),
            description: "Fill the shape drawn since begin_fill",
        },
        // === Colors ===
        CommandSpec {
            code: "pc",
            aliases: &["pencolor"],
            action: Action::Color(ColorTarget::Pen),
            description: "Set the pen color",
        },
        CommandSpec {
            code: "fc",
            aliases: &["fillcolor"],
            action: Action::Color(ColorTarget::Fill),
            description: "Set the fill color",
        },
        CommandSpec {
            code: "bc",
            aliases: &["bgcolor"],
            action: Action::Color(ColorTarget::Background),
            description: "Set the background color",
        },
        // === Canvas ===
        CommandSpec {
            code: "st",
            aliases: &["stamp"],
            action: Action::Zero(|agent| agent.stamp().map(|_| ())),
            description: "Stamp the turtle shape",
        },
        CommandSpec {
            code: "cs",
            aliases: &["clearstamp"],
            action: Action::Integer(|agent, id| agent.clear_stamp(id)),
            description: "Delete the stamp with id N",
        },
        CommandSpec {
            code: "css",
            aliases: &["clearstamps"],
            action: Action::OptionalInteger(|agent, n| agent.clear_stamps(n)),
            description: "Delete all stamps, the first N, or the last -N",
        },
        CommandSpec {
            code: "dot",
            aliases: &[],
            action: Action::One(ArgKind::NonNegative, |agent, n| agent.dot(n)),
            description: "Draw a dot of diameter N",
        },
        CommandSpec {
            code: "c",
            aliases: &["clear"],
            action: Action::Zero(|agent| agent.clear()),
            description: "Erase the drawing, keep the turtle",
        },
        CommandSpec {
            code: "undo",
            aliases: &[],
            action: Action::Zero(|agent| agent.undo()),
            description: "Undo the last action",
        },
        CommandSpec {
            code: "reset",
            aliases: &[],
            action: Action::Zero(|agent| agent.reset()),
            description: "Erase the drawing and reset the turtle",
        },
        // === Animation ===
        CommandSpec {
            code: "speed",
            aliases: &[],
            action: Action::One(ArgKind::Speed, |agent, n| agent.speed(n)),
            description: "Set the animation speed (0-10 or fastest/fast/normal/slow/slowest)",
        },
        CommandSpec {
            code: "t",
            aliases: &["tracer"],
            action: Action::Two(|agent, frames, delay| agent.tracer(frames, delay)),
            description: "Only draw every Nth update, with a delay",
        },
        CommandSpec {
            code: "u",
            aliases: &["update"],
            action: Action::Zero(|agent| agent.update()),
            description: "Force a screen update",
        },
        CommandSpec {
            code: "show",
            aliases: &[],
            action: Action::Zero(|agent| agent.show()),
            description: "Show the turtle",
        },
        CommandSpec {
            code: "hide",
            aliases: &[],
            action: Action::Zero(|agent| agent.hide()),
            description: "Hide the turtle",
        },
        CommandSpec {
            code: "sleep",
            aliases: &[],
            action: Action::One(ArgKind::NonNegative, |agent, seconds| agent.pause(seconds)),
            description: "Pause for N seconds",
        },
        // === Window events ===
        CommandSpec {
            code: "bye",
            aliases: &[],
            action: Action::Zero(|agent| agent.bye()),
            description: "Close the drawing window",
        },
        CommandSpec {
            code: "done",
            aliases: &[],
            action: Action::Zero(|agent| agent.done()),
            description: "Hand control to the window event loop",
        },
        CommandSpec {
            code: "exitonclick",
            aliases: &[],
            action: Action::Zero(|agent| agent.exit_on_click()),
            description: "Close the window on the next click",
        },
    ]
}
