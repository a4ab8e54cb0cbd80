//! Color arguments: parsing, resolution against a color scale, and the
//! temporary scale switch used when an RGB triple does not fit the agent's
//! current scale.

use serde::Serialize;

use crate::agent::{AgentResult, ColorScale, ColorTarget, DrawingAgent};

/// A color as handed to the agent, relative to its current scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorValue {
    Named(String),
    Rgb(f64, f64, f64),
}

impl ColorValue {
    /// Drop the fractional part of every RGB component.
    fn truncated(self) -> Self {
        match self {
            ColorValue::Rgb(r, g, b) => ColorValue::Rgb(r.trunc(), g.trunc(), b.trunc()),
            named => named,
        }
    }
}

/// A color argument as written, before any scale is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorArg {
    /// Anything that is not a hex code; the agent decides if it exists.
    Named(String),
    /// `rrggbb`, with or without a leading `#`.
    Hex(u8, u8, u8),
    /// Three numbers, taken verbatim.
    Triple(f64, f64, f64),
}

/// Why a token sequence is not a color argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorTokenError {
    /// Neither one token nor three.
    Count(usize),
    /// One of the three triple components is not a number.
    NotANumber(String),
}

impl ColorArg {
    /// Parse the argument tokens of a color command.
    pub fn from_tokens(tokens: &[&str]) -> Result<Self, ColorTokenError> {
        match tokens {
            [single] => Ok(Self::from_single(single)),
            [r, g, b] => Ok(ColorArg::Triple(
                parse_component(r)?,
                parse_component(g)?,
                parse_component(b)?,
            )),
            other => Err(ColorTokenError::Count(other.len())),
        }
    }

    /// Parse a single-token color: a hex code or a name.
    pub fn from_single(token: &str) -> Self {
        let token = token.strip_prefix('#').unwrap_or(token).to_lowercase();
        match decode_hex(&token) {
            Some((r, g, b)) => ColorArg::Hex(r, g, b),
            None => ColorArg::Named(token),
        }
    }

    /// The value to hand to an agent whose scale is `scale`.
    pub fn resolve(&self, scale: ColorScale) -> ColorValue {
        match self {
            ColorArg::Named(name) => ColorValue::Named(name.clone()),
            ColorArg::Hex(r, g, b) => {
                let [r, g, b] = [*r, *g, *b].map(|c| match scale {
                    ColorScale::Fractional => f64::from(c) / 255.0,
                    ColorScale::Integer => f64::from(c),
                });
                ColorValue::Rgb(r, g, b)
            }
            ColorArg::Triple(r, g, b) => ColorValue::Rgb(*r, *g, *b),
        }
    }

    /// The scale to switch to while applying this color, if the agent's
    /// current one cannot express it. Only triples ever switch.
    pub fn negotiate(&self, current: ColorScale) -> Option<ColorScale> {
        let ColorArg::Triple(r, g, b) = self else {
            return None;
        };
        let components = [*r, *g, *b];
        match current {
            ColorScale::Integer if components.iter().all(|c| (0.0..=1.0).contains(c)) => {
                Some(ColorScale::Fractional)
            }
            ColorScale::Fractional if components.iter().any(|c| *c > 1.0) => {
                Some(ColorScale::Integer)
            }
            _ => None,
        }
    }
}

/// Resolve color tokens against `scale` without touching any agent.
pub fn resolve_color(tokens: &[&str], scale: ColorScale) -> Result<ColorValue, ColorTokenError> {
    ColorArg::from_tokens(tokens).map(|arg| arg.resolve(scale))
}

/// Apply `color` to `target`, switching the agent's color scale for the
/// duration of the call when the triple needs it.
///
/// The original scale is restored on every exit path, including when the
/// agent rejects the color.
pub fn apply_color(agent: &mut dyn DrawingAgent, target: ColorTarget, color: &ColorArg) -> AgentResult {
    let current = agent.color_scale();
    let Some(temporary) = color.negotiate(current) else {
        return agent.set_color(target, &color.resolve(current));
    };

    tracing::trace!(from = %current, to = %temporary, "temporarily switching color scale");
    let mut agent = scopeguard::guard(agent, move |agent| agent.set_color_scale(current));
    agent.set_color_scale(temporary);

    let mut value = color.resolve(temporary);
    if temporary == ColorScale::Integer {
        value = value.truncated();
    }
    agent.set_color(target, &value)
}

fn parse_component(token: &str) -> Result<f64, ColorTokenError> {
    crate::command::parse_real(token).ok_or_else(|| ColorTokenError::NotANumber(token.to_string()))
}

fn decode_hex(token: &str) -> Option<(u8, u8, u8)> {
    if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&token[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
