//! Instruction symbols, keyed by mnemonic.
//!
//! [`draw`] turns one placed instruction into draw commands confined to its
//! box. Dispatch goes through [`Symbol::for_mnemonic`], which normalizes
//! case, so `xic` and `XIC` draw the same contact.

use crate::ast::Instruction;
use crate::geometry::{Point, Rect};
use crate::render::{DrawCommand, TextAnchor, WIRE_COLOR};

pub const XIC_FILL: &str = "#e3f2fd";
pub const XIO_FILL: &str = "#fff3e0";
pub const OTE_FILL: &str = "#e8f5e9";
pub const COMPARE_FILL: &str = "#f3e5f5";
pub const DEFAULT_FILL: &str = "#f8f9fa";

/// Secondary text color for operands.
pub const TAG_COLOR: &str = "#666";

/// Half the gap between the two bars of a contact.
const CONTACT_HALF_GAP: f64 = 10.0;
/// Coil circle radius.
const COIL_RADIUS: f64 = 10.0;
/// Corner radius of generic and comparison boxes.
const BOX_CORNER_RADIUS: f64 = 4.0;
const LABEL_FONT_SIZE: f64 = 9.0;
const BOX_FONT_SIZE: f64 = 12.0;

/// Comparison operator drawn in the lower row of a comparison box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Ge,
    Gt,
    Le,
    Lt,
    Ne,
    Eq,
}

impl CompareOp {
    /// Symbol shown between the operands; `None` leaves the slot blank.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Gt => Some(">"),
            Self::Lt => Some("<"),
            Self::Eq => Some("="),
            Self::Ge | Self::Le | Self::Ne => None,
        }
    }
}

/// Visual family of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// `XIC`: examine if closed.
    NormallyOpen,
    /// `XIO`: examine if open.
    NormallyClosed,
    /// `OTE`: output energize.
    Coil,
    Compare(CompareOp),
    /// Any other mnemonic: a labelled box.
    Generic,
}

impl Symbol {
    #[must_use]
    pub fn for_mnemonic(mnemonic: &str) -> Self {
        match mnemonic.to_ascii_uppercase().as_str() {
            "XIC" => Self::NormallyOpen,
            "XIO" => Self::NormallyClosed,
            "OTE" => Self::Coil,
            "GE" => Self::Compare(CompareOp::Ge),
            "GT" => Self::Compare(CompareOp::Gt),
            "LE" => Self::Compare(CompareOp::Le),
            "LT" => Self::Compare(CompareOp::Lt),
            "NE" => Self::Compare(CompareOp::Ne),
            "EQ" => Self::Compare(CompareOp::Eq),
            _ => Self::Generic,
        }
    }
}

/// Background fill for a mnemonic.
#[must_use]
pub fn fill_color(mnemonic: &str) -> &'static str {
    match Symbol::for_mnemonic(mnemonic) {
        Symbol::NormallyOpen => XIC_FILL,
        Symbol::NormallyClosed => XIO_FILL,
        Symbol::Coil => OTE_FILL,
        Symbol::Compare(_) => COMPARE_FILL,
        Symbol::Generic => DEFAULT_FILL,
    }
}

/// Draw commands for `instruction` inside `rect`.
#[must_use]
pub fn draw(instruction: &Instruction, rect: Rect) -> Vec<DrawCommand> {
    let fill = fill_color(&instruction.kind);
    let mut out = Vec::new();
    match Symbol::for_mnemonic(&instruction.kind) {
        Symbol::NormallyOpen => contact(&mut out, instruction, rect, fill, false),
        Symbol::NormallyClosed => contact(&mut out, instruction, rect, fill, true),
        Symbol::Coil => coil(&mut out, instruction, rect, fill),
        Symbol::Compare(op) => compare(&mut out, instruction, rect, op, fill),
        Symbol::Generic => generic(&mut out, instruction, rect, fill),
    }
    out
}

// =============================================================================
// SHAPES
// =============================================================================

/// Unoutlined fill behind wire-style symbols.
fn background(out: &mut Vec<DrawCommand>, rect: Rect, fill: &'static str) {
    out.push(DrawCommand::Rect { rect, fill, stroke: None, corner_radius: 0.0 });
}

fn contact(out: &mut Vec<DrawCommand>, instruction: &Instruction, rect: Rect, fill: &'static str, closed: bool) {
    background(out, rect, fill);
    let c = rect.center();
    let gap = CONTACT_HALF_GAP.min(rect.width / 4.0);
    let half_bar = rect.height / 4.0;

    out.push(DrawCommand::wire(Point::new(rect.x, c.y), Point::new(c.x - gap, c.y)));
    out.push(DrawCommand::wire(Point::new(c.x + gap, c.y), Point::new(rect.right(), c.y)));
    for bar_x in [c.x - gap, c.x + gap] {
        out.push(DrawCommand::wire(Point::new(bar_x, c.y - half_bar), Point::new(bar_x, c.y + half_bar)));
    }
    if closed {
        out.push(DrawCommand::wire(
            Point::new(c.x - gap, c.y + half_bar),
            Point::new(c.x + gap, c.y - half_bar),
        ));
    }
    labels(out, instruction, rect);
}

fn coil(out: &mut Vec<DrawCommand>, instruction: &Instruction, rect: Rect, fill: &'static str) {
    background(out, rect, fill);
    let c = rect.center();
    let radius = COIL_RADIUS.min(rect.width / 4.0).min(rect.height / 4.0);

    out.push(DrawCommand::wire(Point::new(rect.x, c.y), Point::new(c.x - radius, c.y)));
    out.push(DrawCommand::wire(Point::new(c.x + radius, c.y), Point::new(rect.right(), c.y)));
    out.push(DrawCommand::Circle { center: c, radius, fill: OTE_FILL, stroke: WIRE_COLOR });
    labels(out, instruction, rect);
}

/// Tag above the symbol, mnemonic below it.
fn labels(out: &mut Vec<DrawCommand>, instruction: &Instruction, rect: Rect) {
    let cx = rect.center().x;
    let size = LABEL_FONT_SIZE.min(rect.height / 4.0);
    out.push(text(Point::new(cx, rect.y + size), &instruction.tag, size, false, WIRE_COLOR));
    out.push(text(Point::new(cx, rect.bottom() - 1.0), &instruction.kind, size, false, TAG_COLOR));
}

fn compare(out: &mut Vec<DrawCommand>, instruction: &Instruction, rect: Rect, op: CompareOp, fill: &'static str) {
    let c = rect.center();
    let size = LABEL_FONT_SIZE.min(rect.height / 4.0);
    let top_y = rect.y + rect.height / 4.0 + size / 2.0;
    let bottom_y = rect.y + rect.height * 3.0 / 4.0 + size / 2.0;

    out.push(DrawCommand::Rect { rect, fill, stroke: Some(WIRE_COLOR), corner_radius: BOX_CORNER_RADIUS });
    out.push(DrawCommand::wire(Point::new(rect.x, c.y), Point::new(rect.right(), c.y)));
    out.push(text(Point::new(c.x, top_y), &instruction.kind, size, true, WIRE_COLOR));

    let mut operands = instruction.tag.split(',').map(str::trim);
    let a = operands.next().unwrap_or_default();
    let b = operands.next().unwrap_or_default();
    out.push(text(Point::new(rect.x + rect.width / 4.0, bottom_y), a, size, false, TAG_COLOR));
    if let Some(label) = op.label() {
        out.push(text(Point::new(c.x, bottom_y), label, size, true, WIRE_COLOR));
    }
    out.push(text(Point::new(rect.x + rect.width * 3.0 / 4.0, bottom_y), b, size, false, TAG_COLOR));
}

fn generic(out: &mut Vec<DrawCommand>, instruction: &Instruction, rect: Rect, fill: &'static str) {
    let c = rect.center();
    let size = BOX_FONT_SIZE.min(rect.height / 3.0);

    out.push(DrawCommand::Rect { rect, fill, stroke: Some(WIRE_COLOR), corner_radius: BOX_CORNER_RADIUS });
    out.push(text(Point::new(c.x, c.y - rect.height / 8.0), &instruction.kind, size, true, WIRE_COLOR));
    out.push(text(Point::new(c.x, c.y + rect.height * 3.0 / 8.0), &instruction.tag, size, false, TAG_COLOR));
}

fn text(at: Point, text: &str, font_size: f64, bold: bool, color: &'static str) -> DrawCommand {
    DrawCommand::Text { at, text: text.to_owned(), font_size, anchor: TextAnchor::Middle, bold, color }
}

#[cfg(test)]
#[path = "symbol_test.rs"]
mod tests;
