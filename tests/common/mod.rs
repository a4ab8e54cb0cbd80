//! Shared test utilities: a spy agent that records every call it receives.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::sync::Arc;
use turtlesc::agent::AgentResult;
use turtlesc::{AgentError, AngleUnit, ColorScale, ColorTarget, ColorValue, DrawingAgent};

/// One recorded agent call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Forward(f64),
    Backward(f64),
    Left(f64),
    Right(f64),
    Goto(f64, f64),
    SetX(f64),
    SetY(f64),
    SetHeading(f64),
    Circle(f64),
    Home,
    SetAngleUnit(AngleUnit),
    PenUp,
    PenDown,
    PenSize(f64),
    BeginFill,
    EndFill,
    SetColor(ColorTarget, ColorValue),
    SetColorScale(ColorScale),
    Stamp,
    ClearStamp(i64),
    ClearStamps(Option<i64>),
    Dot(f64),
    Undo,
    Clear,
    Reset,
    Speed(f64),
    Tracer(f64, f64),
    Update,
    Show,
    Hide,
    Pause(f64),
    Bye,
    Done,
    ExitOnClick,
}

impl Call {
    /// The single numeric argument of a one-number call.
    pub fn number(&self) -> Option<f64> {
        match self {
            Call::Forward(n)
            | Call::Backward(n)
            | Call::Left(n)
            | Call::Right(n)
            | Call::SetX(n)
            | Call::SetY(n)
            | Call::SetHeading(n)
            | Call::Circle(n)
            | Call::PenSize(n)
            | Call::Dot(n)
            | Call::Speed(n)
            | Call::Pause(n) => Some(*n),
            Call::ClearStamp(id) => Some(*id as f64),
            _ => None,
        }
    }
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// A [`DrawingAgent`] that records calls and keeps just enough state
/// (heading, angle unit, color scale) for unit detection and scale negotiation to work.
pub struct SpyAgent {
    calls: CallLog,
    scale: ColorScale,
    unit: AngleUnit,
    heading_degrees: f64,
    known_colors: Vec<String>,
    rejected_color: Option<String>,
    fail_set_color: bool,
    fail_right: bool,
}

impl Default for SpyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SpyAgent {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            scale: ColorScale::Fractional,
            unit: AngleUnit::Degrees,
            heading_degrees: 0.0,
            known_colors: ["red", "green", "blue", "black", "white"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            rejected_color: None,
            fail_set_color: false,
            fail_right: false,
        }
    }

    pub fn with_scale(mut self, scale: ColorScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_angle_unit(mut self, unit: AngleUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Accept `name` while validating but refuse it when it is applied.
    pub fn rejecting(mut self, name: &str) -> Self {
        self.known_colors.push(name.to_string());
        self.rejected_color = Some(name.to_string());
        self
    }

    /// Make every `set_color` call fail.
    pub fn failing_set_color(mut self) -> Self {
        self.fail_set_color = true;
        self
    }

    /// Make every `right` call fail without turning.
    pub fn failing_right(mut self) -> Self {
        self.fail_right = true;
        self
    }

    /// Shared handle to the call log.
    pub fn log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn current_unit(&self) -> AngleUnit {
        self.unit
    }

    fn record(&self, call: Call) -> AgentResult {
        self.calls.lock().push(call);
        Ok(())
    }

    fn to_degrees(&self, angle: f64) -> f64 {
        match self.unit {
            AngleUnit::Degrees => angle,
            AngleUnit::Radians => angle.to_degrees(),
        }
    }
}

impl DrawingAgent for SpyAgent {
    fn forward(&mut self, distance: f64) -> AgentResult {
        self.record(Call::Forward(distance))
    }

    fn backward(&mut self, distance: f64) -> AgentResult {
        self.record(Call::Backward(distance))
    }

    fn left(&mut self, angle: f64) -> AgentResult {
        self.heading_degrees = (self.heading_degrees + self.to_degrees(angle)).rem_euclid(360.0);
        self.record(Call::Left(angle))
    }

    fn right(&mut self, angle: f64) -> AgentResult {
        if self.fail_right {
            self.record(Call::Right(angle))?;
            return Err(AgentError::InvalidArgument {
                operation: "right",
                reason: "spy configured to fail".into(),
            });
        }
        self.heading_degrees = (self.heading_degrees - self.to_degrees(angle)).rem_euclid(360.0);
        self.record(Call::Right(angle))
    }

    fn goto(&mut self, x: f64, y: f64) -> AgentResult {
        self.record(Call::Goto(x, y))
    }

    fn set_x(&mut self, x: f64) -> AgentResult {
        self.record(Call::SetX(x))
    }

    fn set_y(&mut self, y: f64) -> AgentResult {
        self.record(Call::SetY(y))
    }

    fn set_heading(&mut self, angle: f64) -> AgentResult {
        self.heading_degrees = self.to_degrees(angle).rem_euclid(360.0);
        self.record(Call::SetHeading(angle))
    }

    fn circle(&mut self, radius: f64) -> AgentResult {
        self.record(Call::Circle(radius))
    }

    fn home(&mut self) -> AgentResult {
        self.heading_degrees = 0.0;
        self.record(Call::Home)
    }

    fn heading(&self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.heading_degrees,
            AngleUnit::Radians => self.heading_degrees.to_radians(),
        }
    }

    fn set_angle_unit(&mut self, unit: AngleUnit) {
        self.unit = unit;
        self.calls.lock().push(Call::SetAngleUnit(unit));
    }

    fn pen_up(&mut self) -> AgentResult {
        self.record(Call::PenUp)
    }

    fn pen_down(&mut self) -> AgentResult {
        self.record(Call::PenDown)
    }

    fn pen_size(&mut self, width: f64) -> AgentResult {
        self.record(Call::PenSize(width))
    }

    fn begin_fill(&mut self) -> AgentResult {
        self.record(Call::BeginFill)
    }

    fn end_fill(&mut self) -> AgentResult {
        self.record(Call::EndFill)
    }

    fn set_color(&mut self, target: ColorTarget, color: &ColorValue) -> AgentResult {
        self.record(Call::SetColor(target, color.clone()))?;
        if self.fail_set_color {
            return Err(AgentError::InvalidArgument {
                operation: "set_color",
                reason: "spy configured to fail".into(),
            });
        }
        match (color, &self.rejected_color) {
            (ColorValue::Named(name), Some(rejected)) if name == rejected => {
                Err(AgentError::UnknownColor(name.clone()))
            }
            _ => Ok(()),
        }
    }

    fn color_scale(&self) -> ColorScale {
        self.scale
    }

    fn set_color_scale(&mut self, scale: ColorScale) {
        self.scale = scale;
        self.calls.lock().push(Call::SetColorScale(scale));
    }

    fn accepts_color(&self, name: &str) -> bool {
        self.known_colors.iter().any(|known| known == name)
    }

    fn stamp(&mut self) -> AgentResult<i64> {
        self.record(Call::Stamp)?;
        Ok(1)
    }

    fn clear_stamp(&mut self, id: i64) -> AgentResult {
        self.record(Call::ClearStamp(id))
    }

    fn clear_stamps(&mut self, count: Option<i64>) -> AgentResult {
        self.record(Call::ClearStamps(count))
    }

    fn dot(&mut self, size: f64) -> AgentResult {
        self.record(Call::Dot(size))
    }

    fn undo(&mut self) -> AgentResult {
        self.record(Call::Undo)
    }

    fn clear(&mut self) -> AgentResult {
        self.record(Call::Clear)
    }

    fn reset(&mut self) -> AgentResult {
        self.heading_degrees = 0.0;
        self.record(Call::Reset)
    }

    fn speed(&mut self, speed: f64) -> AgentResult {
        self.record(Call::Speed(speed))
    }

    fn tracer(&mut self, frames: f64, delay: f64) -> AgentResult {
        self.record(Call::Tracer(frames, delay))
    }

    fn update(&mut self) -> AgentResult {
        self.record(Call::Update)
    }

    fn show(&mut self) -> AgentResult {
        self.record(Call::Show)
    }

    fn hide(&mut self) -> AgentResult {
        self.record(Call::Hide)
    }

    fn pause(&mut self, seconds: f64) -> AgentResult {
        self.record(Call::Pause(seconds))
    }

    fn bye(&mut self) -> AgentResult {
        self.record(Call::Bye)
    }

    fn done(&mut self) -> AgentResult {
        self.record(Call::Done)
    }

    fn exit_on_click(&mut self) -> AgentResult {
        self.record(Call::ExitOnClick)
    }
}

/// Assert two points are equal to within rounding error.
pub fn assert_near(actual: (f64, f64), expected: (f64, f64)) {
    let close = (actual.0 - expected.0).abs() < 1e-6 && (actual.1 - expected.1).abs() < 1e-6;
    assert!(close, "expected {:?}, got {:?}", expected, actual);
}
