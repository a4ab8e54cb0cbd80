//! The drawing agent the interpreter drives.
//!
//! The interpreter never keeps drawing state of its own: position, heading,
//! pen, fill and colors all live behind [`DrawingAgent`]. Any turtle-style
//! backend can be plugged in by implementing the trait; [`HeadlessTurtle`]
//! is an in-memory implementation used by the CLI and the tests.

mod headless;

pub use headless::{HeadlessTurtle, Segment, StoredColor, TurtleOptions, TurtleState};

use std::f64::consts::TAU;
use std::time::Duration;

use scopeguard::ScopeGuard;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorValue;

/// Errors an agent can raise while executing a call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    /// The agent does not know the named color.
    #[error("unknown color name `{0}`")]
    UnknownColor(String),

    /// An RGB triple is out of range for the agent's current color scale.
    #[error("bad color sequence ({r}, {g}, {b}) for color scale {scale}")]
    BadColorSequence {
        r: f64,
        g: f64,
        b: f64,
        scale: ColorScale,
    },

    /// The agent refused an argument.
    #[error("invalid argument to {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },
}

pub type AgentResult<T = ()> = Result<T, AgentError>;

/// Numeric range the agent expects for RGB components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScale {
    /// Components in `0.0..=1.0`.
    #[default]
    Fractional,
    /// Components in `0..=255`.
    Integer,
}

impl ColorScale {
    /// Largest component value in this scale.
    pub fn max(self) -> f64 {
        match self {
            ColorScale::Fractional => 1.0,
            ColorScale::Integer => 255.0,
        }
    }
}

impl std::fmt::Display for ColorScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorScale::Fractional => write!(f, "1.0"),
            ColorScale::Integer => write!(f, "255"),
        }
    }
}

/// Unit the agent interprets angles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

/// Which of the agent's colors a color command sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Pen,
    Fill,
    Background,
}

const DETECTION_TOLERANCE: f64 = 1e-9;

/// Sleep the current thread for a (non-negative, finite) number of seconds.
pub fn sleep_seconds(seconds: f64) -> AgentResult {
    let duration =
        Duration::try_from_secs_f64(seconds).map_err(|e| AgentError::InvalidArgument {
            operation: "pause",
            reason: e.to_string(),
        })?;
    std::thread::sleep(duration);
    Ok(())
}

/// A stateful turtle-style drawing agent.
///
/// Implementations are single-owner: the interpreter takes `&mut self` for
/// the whole batch and never calls into an agent from more than one thread.
pub trait DrawingAgent {
    // === Movement ===
    fn forward(&mut self, distance: f64) -> AgentResult;
    fn backward(&mut self, distance: f64) -> AgentResult;
    fn left(&mut self, angle: f64) -> AgentResult;
    fn right(&mut self, angle: f64) -> AgentResult;
    fn goto(&mut self, x: f64, y: f64) -> AgentResult;
    fn set_x(&mut self, x: f64) -> AgentResult;
    fn set_y(&mut self, y: f64) -> AgentResult;
    fn set_heading(&mut self, angle: f64) -> AgentResult;
    fn circle(&mut self, radius: f64) -> AgentResult;
    fn home(&mut self) -> AgentResult;

    /// Current heading, in the agent's current angle unit.
    fn heading(&self) -> f64;

    /// Switch the unit used to interpret and report angles.
    fn set_angle_unit(&mut self, unit: AngleUnit);

    // === Pen and fill ===
    fn pen_up(&mut self) -> AgentResult;
    fn pen_down(&mut self) -> AgentResult;
    fn pen_size(&mut self, width: f64) -> AgentResult;
    fn begin_fill(&mut self) -> AgentResult;
    fn end_fill(&mut self) -> AgentResult;

    // === Colors ===
    fn set_color(&mut self, target: ColorTarget, color: &ColorValue) -> AgentResult;
    fn color_scale(&self) -> ColorScale;
    fn set_color_scale(&mut self, scale: ColorScale);

    /// Whether `name` is a color this agent would accept.
    ///
    /// Must not change any state; the interpreter calls it while validating.
    fn accepts_color(&self, name: &str) -> bool;

    // === Canvas ===
    /// Stamp a copy of the turtle shape, returning the stamp id.
    fn stamp(&mut self) -> AgentResult<i64>;
    fn clear_stamp(&mut self, id: i64) -> AgentResult;
    /// `None` clears every stamp, `Some(n)` the first `n`, `Some(-n)` the last `n`.
    fn clear_stamps(&mut self, count: Option<i64>) -> AgentResult;
    fn dot(&mut self, size: f64) -> AgentResult;
    fn undo(&mut self) -> AgentResult;
    fn clear(&mut self) -> AgentResult;
    fn reset(&mut self) -> AgentResult;

    // === Animation ===
    fn speed(&mut self, speed: f64) -> AgentResult;
    fn tracer(&mut self, frames: f64, delay: f64) -> AgentResult;
    fn update(&mut self) -> AgentResult;
    fn show(&mut self) -> AgentResult;
    fn hide(&mut self) -> AgentResult;

    /// Block the caller for `seconds`.
    fn pause(&mut self, seconds: f64) -> AgentResult {
        sleep_seconds(seconds)
    }

    // === Window events ===
    fn bye(&mut self) -> AgentResult {
        Ok(())
    }

    fn done(&mut self) -> AgentResult {
        Ok(())
    }

    fn exit_on_click(&mut self) -> AgentResult {
        Ok(())
    }

    /// Find out which angle unit the agent is in.
    ///
    /// Agents expose no direct query, so the default runs
    /// [`detect_angle_unit`]. Agents that track their unit should override
    /// this with a plain read.
    fn angle_unit(&mut self) -> AgentResult<AngleUnit> {
        detect_angle_unit(self)
    }
}

/// Work out an agent's angle unit from how it turns.
///
/// Turns left by 1 in the current unit, forces radians, turns right by 1 and
/// compares headings: if they match, the agent was already in radians. The
/// heading and unit are put back on every exit path, but the heading IS
/// mutated in between, so this must not race with any other heading change
/// on the same agent.
pub fn detect_angle_unit<A: DrawingAgent + ?Sized>(agent: &mut A) -> AgentResult<AngleUnit> {
    let original = agent.heading();
    agent.left(1.0)?;
    agent.set_angle_unit(AngleUnit::Radians);

    // Read in radians, the nudge already tells the two units apart. That is
    // the unit restored if anything below fails.
    let fallback = unit_from_drift(agent.heading() - (original + 1.0));
    let mut agent = scopeguard::guard(agent, move |agent| {
        agent.set_angle_unit(fallback);
        if let Err(err) = agent.set_heading(original) {
            tracing::warn!(error = %err, "failed to restore heading after angle unit detection");
        }
    });

    agent.right(1.0)?;
    let unit = unit_from_drift(agent.heading() - original);

    let agent = ScopeGuard::into_inner(agent);
    agent.set_angle_unit(unit);
    agent.set_heading(original)?;
    tracing::trace!(?unit, "detected agent angle unit");
    Ok(unit)
}

fn unit_from_drift(drift: f64) -> AngleUnit {
    let drift = drift.rem_euclid(TAU);
    if drift < DETECTION_TOLERANCE || TAU - drift < DETECTION_TOLERANCE {
        AngleUnit::Radians
    } else {
        AngleUnit::Degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_degrees() {
        let mut turtle = HeadlessTurtle::new();
        turtle.set_heading(42.0).unwrap();
        assert_eq!(detect_angle_unit(&mut turtle).unwrap(), AngleUnit::Degrees);
        assert!((turtle.heading() - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_detects_radians() {
        let mut turtle = HeadlessTurtle::new();
        turtle.set_angle_unit(AngleUnit::Radians);
        turtle.set_heading(1.5).unwrap();
        assert_eq!(detect_angle_unit(&mut turtle).unwrap(), AngleUnit::Radians);
        assert!((turtle.heading() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_detects_radians_at_zero_heading() {
        let mut turtle = HeadlessTurtle::new();
        turtle.set_angle_unit(AngleUnit::Radians);
        assert_eq!(detect_angle_unit(&mut turtle).unwrap(), AngleUnit::Radians);
    }

    #[test]
    fn test_detection_agrees_with_known_unit() {
        let cases = [
            (AngleUnit::Degrees, 180.0),
            (AngleUnit::Degrees, 359.5),
            (AngleUnit::Radians, 6.0),
        ];
        for (unit, heading) in cases {
            let mut turtle = HeadlessTurtle::new();
            turtle.set_angle_unit(unit);
            turtle.set_heading(heading).unwrap();
            assert_eq!(detect_angle_unit(&mut turtle).unwrap(), turtle.angle_unit().unwrap());
        }
    }

    #[test]
    fn test_sleep_seconds_rejects_negative() {
        assert!(matches!(
            sleep_seconds(-1.0),
            Err(AgentError::InvalidArgument { operation: "pause", .. })
        ));
        assert!(sleep_seconds(0.0).is_ok());
    }

    #[test]
    fn test_color_scale_max() {
        assert_eq!(ColorScale::Fractional.max(), 1.0);
        assert_eq!(ColorScale::Integer.max(), 255.0);
    }
}
