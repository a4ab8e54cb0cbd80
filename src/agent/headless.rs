//! In-memory turtle with no window.
//!
//! Tracks everything a real turtle would (position, heading, pen, fill,
//! colors, stamps, the trail of drawn segments) so batches can be run and
//! inspected without a display.

use serde::Serialize;

use crate::agent::{
    sleep_seconds, AgentError, AgentResult, AngleUnit, ColorScale, ColorTarget, DrawingAgent,
};
use crate::color::ColorValue;

/// Maximum number of undo steps kept.
const UNDO_DEPTH: usize = 1000;

/// Color names the headless turtle understands (a subset of the X11 table).
const NAMED_COLORS: &[&str] = &[
    "aqua", "aquamarine", "azure", "beige", "bisque", "black", "blue", "blueviolet", "brown",
    "burlywood", "cadetblue", "chartreuse", "chocolate", "coral", "cornflowerblue", "cornsilk",
    "crimson", "cyan", "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen",
    "darkgrey", "darkkhaki", "darkmagenta", "darkorange", "darkred", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dodgerblue", "firebrick", "forestgreen", "fuchsia", "gainsboro",
    "gold", "goldenrod", "gray", "green", "greenyellow", "grey", "honeydew", "hotpink",
    "indianred", "indigo", "ivory", "khaki", "lavender", "lawngreen", "lemonchiffon",
    "lightblue", "lightcoral", "lightcyan", "lightgray", "lightgreen", "lightgrey", "lightpink",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mintcream", "mistyrose",
    "navy", "navyblue", "olive", "olivedrab", "orange", "orangered", "orchid", "palegreen",
    "pink", "plum", "powderblue", "purple", "red", "rosybrown", "royalblue", "salmon",
    "sandybrown", "seagreen", "sienna", "silver", "skyblue", "slateblue", "slategray", "snow",
    "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet",
    "wheat", "white", "whitesmoke", "yellow", "yellowgreen",
];

/// Start-up settings for a [`HeadlessTurtle`].
#[derive(Debug, Clone, PartialEq)]
pub struct TurtleOptions {
    pub color_scale: ColorScale,
    pub angle_unit: AngleUnit,
    /// When false, `pause` returns immediately.
    pub pause: bool,
    /// Longer pauses are clamped to this many seconds.
    pub max_pause_seconds: f64,
}

impl Default for TurtleOptions {
    fn default() -> Self {
        Self {
            color_scale: ColorScale::Fractional,
            angle_unit: AngleUnit::Degrees,
            pause: true,
            max_pause_seconds: 60.0,
        }
    }
}

/// A color as stored: names verbatim, RGB normalised to `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredColor {
    Named(String),
    Rgb([f64; 3]),
}

impl StoredColor {
    fn in_scale(&self, scale: ColorScale) -> ColorValue {
        match self {
            StoredColor::Named(name) => ColorValue::Named(name.clone()),
            StoredColor::Rgb(rgb) => {
                let [r, g, b] = rgb.map(|c| match scale {
                    ColorScale::Fractional => c,
                    ColorScale::Integer => (c * 255.0).round(),
                });
                ColorValue::Rgb(r, g, b)
            }
        }
    }
}

/// A line drawn while the pen was down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub width: f64,
    pub color: StoredColor,
}

/// Everything undo can roll back, plus the canvas contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurtleState {
    pub x: f64,
    pub y: f64,
    /// Heading in degrees, counter-clockwise from east, in `0.0..360.0`.
    pub heading: f64,
    pub pen_down: bool,
    pub pen_size: f64,
    pub filling: bool,
    pub visible: bool,
    pub speed: u8,
    pub tracer: (f64, f64),
    pub pen_color: StoredColor,
    pub fill_color: StoredColor,
    pub background: StoredColor,
    pub stamps: Vec<i64>,
    pub dots: usize,
    pub trail: Vec<Segment>,
}

impl TurtleState {
    fn initial(background: StoredColor) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            pen_down: true,
            pen_size: 1.0,
            filling: false,
            visible: true,
            speed: 3,
            tracer: (1.0, 10.0),
            pen_color: StoredColor::Named("black".into()),
            fill_color: StoredColor::Named("black".into()),
            background,
            stamps: Vec::new(),
            dots: 0,
            trail: Vec::new(),
        }
    }
}

/// A [`DrawingAgent`] that keeps all of its state in memory.
#[derive(Debug, Clone)]
pub struct HeadlessTurtle {
    state: TurtleState,
    history: Vec<TurtleState>,
    options: TurtleOptions,
    color_scale: ColorScale,
    angle_unit: AngleUnit,
    next_stamp: i64,
}

impl Default for HeadlessTurtle {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessTurtle {
    pub fn new() -> Self {
        Self::with_options(TurtleOptions::default())
    }

    pub fn with_options(options: TurtleOptions) -> Self {
        Self {
            state: TurtleState::initial(StoredColor::Named("white".into())),
            history: Vec::new(),
            color_scale: options.color_scale,
            angle_unit: options.angle_unit,
            options,
            next_stamp: 1,
        }
    }

    pub fn state(&self) -> &TurtleState {
        &self.state
    }

    pub fn position(&self) -> (f64, f64) {
        (self.state.x, self.state.y)
    }

    /// Heading in degrees, whatever the current angle unit.
    pub fn heading_degrees(&self) -> f64 {
        self.state.heading
    }

    pub fn is_down(&self) -> bool {
        self.state.pen_down
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn color(&self, target: ColorTarget) -> ColorValue {
        let stored = match target {
            ColorTarget::Pen => &self.state.pen_color,
            ColorTarget::Fill => &self.state.fill_color,
            ColorTarget::Background => &self.state.background,
        };
        stored.in_scale(self.color_scale)
    }

    /// Number of steps `undo` can still roll back.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    fn checkpoint(&mut self) {
        if self.history.len() == UNDO_DEPTH {
            self.history.remove(0);
        }
        self.history.push(self.state.clone());
    }

    fn to_degrees(&self, angle: f64) -> f64 {
        match self.angle_unit {
            AngleUnit::Degrees => angle,
            AngleUnit::Radians => angle.to_degrees(),
        }
    }

    fn rotate(&mut self, degrees: f64) {
        self.state.heading = (self.state.heading + degrees).rem_euclid(360.0);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if self.state.pen_down {
            self.state.trail.push(Segment {
                from: (self.state.x, self.state.y),
                to: (x, y),
                width: self.state.pen_size,
                color: self.state.pen_color.clone(),
            });
        }
        self.state.x = x;
        self.state.y = y;
    }

    fn advance(&mut self, distance: f64) {
        let radians = self.state.heading.to_radians();
        let x = self.state.x + distance * radians.cos();
        let y = self.state.y + distance * radians.sin();
        self.move_to(x, y);
    }

    fn store_color(&self, color: &ColorValue) -> AgentResult<StoredColor> {
        match color {
            ColorValue::Named(name) => {
                if !self.accepts_color(name) {
                    return Err(AgentError::UnknownColor(name.clone()));
                }
                Ok(StoredColor::Named(name.to_lowercase()))
            }
            ColorValue::Rgb(r, g, b) => {
                let max = self.color_scale.max();
                let in_range = [*r, *g, *b].iter().all(|c| (0.0..=max).contains(c));
                if !in_range {
                    return Err(AgentError::BadColorSequence {
                        r: *r,
                        g: *g,
                        b: *b,
                        scale: self.color_scale,
                    });
                }
                Ok(StoredColor::Rgb([r / max, g / max, b / max]))
            }
        }
    }
}

impl DrawingAgent for HeadlessTurtle {
    fn forward(&mut self, distance: f64) -> AgentResult {
        self.checkpoint();
        self.advance(distance);
        Ok(())
    }

    fn backward(&mut self, distance: f64) -> AgentResult {
        self.forward(-distance)
    }

    fn left(&mut self, angle: f64) -> AgentResult {
        self.checkpoint();
        let degrees = self.to_degrees(angle);
        self.rotate(degrees);
        Ok(())
    }

    fn right(&mut self, angle: f64) -> AgentResult {
        self.left(-angle)
    }

    fn goto(&mut self, x: f64, y: f64) -> AgentResult {
        self.checkpoint();
        self.move_to(x, y);
        Ok(())
    }

    fn set_x(&mut self, x: f64) -> AgentResult {
        let y = self.state.y;
        self.goto(x, y)
    }

    fn set_y(&mut self, y: f64) -> AgentResult {
        let x = self.state.x;
        self.goto(x, y)
    }

    fn set_heading(&mut self, angle: f64) -> AgentResult {
        self.checkpoint();
        self.state.heading = self.to_degrees(angle).rem_euclid(360.0);
        Ok(())
    }

    fn circle(&mut self, radius: f64) -> AgentResult {
        self.checkpoint();
        // Regular polygon approximation, ending back where it started.
        let steps = 1 + (11.0 + radius.abs() / 6.0).min(59.0) as usize;
        let mut turn = 360.0 / steps as f64;
        let mut side = 2.0 * radius * (turn / 2.0).to_radians().sin();
        if radius < 0.0 {
            side = -side;
            turn = -turn;
        }
        self.rotate(turn / 2.0);
        for _ in 0..steps {
            self.advance(side);
            self.rotate(turn);
        }
        self.rotate(-turn / 2.0);
        Ok(())
    }

    fn home(&mut self) -> AgentResult {
        self.checkpoint();
        self.move_to(0.0, 0.0);
        self.state.heading = 0.0;
        Ok(())
    }

    fn heading(&self) -> f64 {
        match self.angle_unit {
            AngleUnit::Degrees => self.state.heading,
            AngleUnit::Radians => self.state.heading.to_radians(),
        }
    }

    fn set_angle_unit(&mut self, unit: AngleUnit) {
        self.angle_unit = unit;
    }

    /// Read straight from state; probing would leave snapshots on the undo stack.
    fn angle_unit(&mut self) -> AgentResult<AngleUnit> {
        Ok(self.angle_unit)
    }

    fn pen_up(&mut self) -> AgentResult {
        self.checkpoint();
        self.state.pen_down = false;
        Ok(())
    }

    fn pen_down(&mut self) -> AgentResult {
        self.checkpoint();
        self.state.pen_down = true;
        Ok(())
    }

    fn pen_size(&mut self, width: f64) -> AgentResult {
        self.checkpoint();
        self.state.pen_size = width;
        Ok(())
    }

    fn begin_fill(&mut self) -> AgentResult {
        self.checkpoint();
        self.state.filling = true;
        Ok(())
    }

    fn end_fill(&mut self) -> AgentResult {
        self.checkpoint();
        self.state.filling = false;
        Ok(())
    }

    fn set_color(&mut self, target: ColorTarget, color: &ColorValue) -> AgentResult {
        let stored = self.store_color(color)?;
        match target {
            ColorTarget::Pen => {
                self.checkpoint();
                self.state.pen_color = stored;
            }
            ColorTarget::Fill => {
                self.checkpoint();
                self.state.fill_color = stored;
            }
            // The background belongs to the screen, not the turtle's undo buffer.
            ColorTarget::Background => self.state.background = stored,
        }
        Ok(())
    }

    fn color_scale(&self) -> ColorScale {
        self.color_scale
    }

    fn set_color_scale(&mut self, scale: ColorScale) {
        self.color_scale = scale;
    }

    fn accepts_color(&self, name: &str) -> bool {
        NAMED_COLORS.contains(&name.to_lowercase().as_str())
    }

    fn stamp(&mut self) -> AgentResult<i64> {
        self.checkpoint();
        let id = self.next_stamp;
        self.next_stamp += 1;
        self.state.stamps.push(id);
        Ok(id)
    }

    fn clear_stamp(&mut self, id: i64) -> AgentResult {
        self.state.stamps.retain(|stamp| *stamp != id);
        Ok(())
    }

    fn clear_stamps(&mut self, count: Option<i64>) -> AgentResult {
        let stamps = &mut self.state.stamps;
        match count {
            None => stamps.clear(),
            Some(n) if n >= 0 => {
                let n = (n as usize).min(stamps.len());
                stamps.drain(..n);
            }
            Some(n) => {
                let keep = stamps.len().saturating_sub(n.unsigned_abs() as usize);
                stamps.truncate(keep);
            }
        }
        Ok(())
    }

    fn dot(&mut self, _size: f64) -> AgentResult {
        self.checkpoint();
        self.state.dots += 1;
        Ok(())
    }

    fn undo(&mut self) -> AgentResult {
        if let Some(previous) = self.history.pop() {
            self.state = previous;
        }
        Ok(())
    }

    fn clear(&mut self) -> AgentResult {
        self.state.trail.clear();
        self.state.stamps.clear();
        self.state.dots = 0;
        self.history.clear();
        Ok(())
    }

    fn reset(&mut self) -> AgentResult {
        let background = self.state.background.clone();
        self.state = TurtleState::initial(background);
        self.history.clear();
        Ok(())
    }

    fn speed(&mut self, speed: f64) -> AgentResult {
        self.state.speed = if speed > 0.5 && speed < 10.5 {
            speed.round() as u8
        } else {
            0
        };
        Ok(())
    }

    fn tracer(&mut self, frames: f64, delay: f64) -> AgentResult {
        self.state.tracer = (frames, delay);
        Ok(())
    }

    fn update(&mut self) -> AgentResult {
        Ok(())
    }

    fn show(&mut self) -> AgentResult {
        self.state.visible = true;
        Ok(())
    }

    fn hide(&mut self) -> AgentResult {
        self.state.visible = false;
        Ok(())
    }

    fn pause(&mut self, seconds: f64) -> AgentResult {
        if !self.options.pause {
            tracing::trace!(seconds, "pause disabled, skipping");
            return Ok(());
        }
        let mut seconds = seconds;
        if seconds > self.options.max_pause_seconds {
            tracing::warn!(
                requested = seconds,
                max = self.options.max_pause_seconds,
                "pause clamped"
            );
            seconds = self.options.max_pause_seconds;
        }
        sleep_seconds(seconds)
    }
}
