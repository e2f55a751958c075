//! Rendering: turns laid-out rungs into backend-neutral draw commands.
//!
//! This module never recomputes layout. It reads a [`RungLayout`] and emits
//! wires first, then each instruction's symbol, so symbols paint over the
//! wires they sit on. The [`crate::svg`] module serializes the result.

use serde::Serialize;

use crate::geometry::{Point, Rect};
use crate::layout::{Placement, RungLayout};
use crate::symbol;

/// Stroke color for wires, rails and outlines.
pub const WIRE_COLOR: &str = "#2c3e50";

/// Stroke width for wires and rails.
pub const WIRE_WIDTH: f64 = 2.0;

/// Horizontal anchor for text commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A single drawing primitive in diagram coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        a: Point,
        b: Point,
        stroke: &'static str,
        width: f64,
    },
    Rect {
        rect: Rect,
        fill: &'static str,
        stroke: Option<&'static str>,
        corner_radius: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: &'static str,
        stroke: &'static str,
    },
    /// `at` is the text baseline point.
    Text {
        at: Point,
        text: String,
        font_size: f64,
        anchor: TextAnchor,
        bold: bool,
        color: &'static str,
    },
}

impl DrawCommand {
    /// A wire-colored line.
    #[must_use]
    pub fn wire(a: Point, b: Point) -> Self {
        Self::Line { a, b, stroke: WIRE_COLOR, width: WIRE_WIDTH }
    }
}

/// One rung's canvas size and its draw commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

/// Draw commands for one rung: every wire, then every instruction symbol.
#[must_use]
pub fn render_rung(layout: &RungLayout) -> Vec<DrawCommand> {
    let mut commands: Vec<DrawCommand> = layout.wires.iter().map(|w| DrawCommand::wire(w.a, w.b)).collect();
    for placed in &layout.instructions {
        commands.extend(symbol::draw(&placed.instruction, placed.rect));
    }
    commands
}

/// Draw every rung of a placement, in program order.
#[must_use]
pub fn render(placement: &Placement) -> Vec<Drawing> {
    let drawings: Vec<Drawing> = placement
        .rungs
        .iter()
        .map(|rung| Drawing { width: rung.width, height: rung.height, commands: render_rung(rung) })
        .collect();
    tracing::debug!(
        rungs = drawings.len(),
        commands = drawings.iter().map(|d| d.commands.len()).sum::<usize>(),
        "rendered ladder program"
    );
    drawings
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
