//! Layout engine: converts a parsed [`Program`] into per-rung geometry.
//!
//! Each rung gets its own canvas. The main rail runs at `base_height / 2`;
//! side branches stack below it, one branch pitch apart. Inputs are placed
//! left to right from the left power rail, the output is right-aligned
//! against the right power rail, and series wires join everything on the
//! main rail.
//!
//! Input-side branch paths are left-aligned at the tee and extend their
//! trailing wire to the join. Output-side paths are centered between tee
//! and join.

use serde::Serialize;

use crate::ast::{BranchGroup, Input, Instruction, Output, Program, Rung};
use crate::config::LayoutConfig;
use crate::geometry::{Point, Rect};

/// Geometry for a whole program, one entry per rung in program order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub rungs: Vec<RungLayout>,
}

/// Geometry for one rung.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RungLayout {
    pub width: f64,
    pub height: f64,
    /// Vertical position of the main rail.
    pub main_y: f64,
    pub instructions: Vec<PlacedInstruction>,
    pub wires: Vec<Wire>,
}

/// An instruction and the box it is drawn in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedInstruction {
    pub instruction: Instruction,
    pub rect: Rect,
    pub side: Side,
    /// 0 for the main rail, `k` for the k-th side branch.
    pub row: usize,
}

/// Which side of the rung an instruction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Input,
    Output,
}

/// A straight wiring segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wire {
    pub kind: WireKind,
    pub a: Point,
    pub b: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WireKind {
    /// Left or right power rail.
    Rail,
    /// Horizontal wire on the main rail.
    Series,
    /// Horizontal wire on a side branch row.
    Branch,
    /// Vertical split from the main rail down to the side branches.
    Tee,
    /// Vertical rejoin from the side branches back up to the main rail.
    Join,
}

impl RungLayout {
    /// Wires of one kind, in emission order.
    pub fn wires_of(&self, kind: WireKind) -> impl Iterator<Item = &Wire> {
        self.wires.iter().filter(move |w| w.kind == kind)
    }
}

/// Lay out a program with the default geometry.
#[must_use]
pub fn layout(program: &Program) -> Placement {
    layout_with(program, &LayoutConfig::default())
}

/// Lay out a program with explicit geometry.
#[must_use]
pub fn layout_with(program: &Program, config: &LayoutConfig) -> Placement {
    let rungs: Vec<RungLayout> = program.rungs.iter().map(|rung| layout_rung(rung, config)).collect();
    tracing::debug!(rungs = rungs.len(), "laid out ladder program");
    Placement { rungs }
}

/// Lay out a single rung.
#[must_use]
pub fn layout_rung(rung: &Rung, config: &LayoutConfig) -> RungLayout {
    let mut builder = Builder::new(config, rung.branch_depth());

    match &rung.inputs {
        None => {}
        Some(Input::Series(instrs)) => builder.series(instrs, Side::Input),
        Some(Input::Branched(group)) => builder.input_group(group),
    }

    let right_rail_x = match &rung.output {
        Some(output) => builder.cursor() + builder.output_width(output) + config.h_gap,
        None => builder.cursor(),
    };
    let width = (right_rail_x + config.rail_inset).max(config.min_width);

    let placed = builder.finish(width, rung.output.as_ref());
    tracing::trace!(
        width = placed.width,
        height = placed.height,
        instructions = placed.instructions.len(),
        wires = placed.wires.len(),
        "laid out rung"
    );
    placed
}

// =============================================================================
// BUILDER
// =============================================================================

struct Builder<'a> {
    config: &'a LayoutConfig,
    main_y: f64,
    height: f64,
    /// Where the main-rail wire currently ends.
    wire_x: f64,
    instructions: Vec<PlacedInstruction>,
    wires: Vec<Wire>,
}

impl<'a> Builder<'a> {
    fn new(config: &'a LayoutConfig, branch_depth: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let height = config.base_height + branch_depth as f64 * config.branch_pitch;
        let main_y = config.base_height / 2.0;
        let wires = vec![Wire {
            kind: WireKind::Rail,
            a: Point::new(config.rail_inset, 0.0),
            b: Point::new(config.rail_inset, height),
        }];
        Self { config, main_y, height, wire_x: config.rail_inset, instructions: Vec::new(), wires }
    }

    /// Left edge of the next element on the main rail.
    fn cursor(&self) -> f64 {
        self.wire_x + self.config.h_gap
    }

    fn row_y(&self, row: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let offset = row as f64 * self.config.branch_pitch;
        self.main_y + offset
    }

    /// Tee-to-join width of a parallel block whose longest path has `longest` boxes.
    fn block_width(&self, longest: usize) -> f64 {
        2.0 * self.config.h_gap + self.config.span(longest)
    }

    fn output_width(&self, output: &Output) -> f64 {
        match output {
            Output::Single(_) => self.config.box_width,
            Output::Branched(group) => self.output_group_width(group),
        }
    }

    fn output_group_width(&self, group: &BranchGroup) -> f64 {
        if !group.has_side_branches() {
            return self.config.span(group.main_branch.len() + group.series_after_branches.len());
        }
        #[allow(clippy::cast_precision_loss)]
        let after = group.series_after_branches.len() as f64 * self.config.pitch();
        self.block_width(group.longest_path()) + after
    }

    fn wire(&mut self, kind: WireKind, a: Point, b: Point) {
        self.wires.push(Wire { kind, a, b });
    }

    fn place(&mut self, instruction: &Instruction, x: f64, row: usize, side: Side) -> Rect {
        let y = self.row_y(row) - self.config.box_height / 2.0;
        let rect = Rect::new(x, y, self.config.box_width, self.config.box_height);
        self.instructions.push(PlacedInstruction { instruction: instruction.clone(), rect, side, row });
        rect
    }

    /// Place instructions on the main rail at the cursor.
    fn series(&mut self, instrs: &[Instruction], side: Side) {
        let start_x = self.cursor();
        self.series_from(instrs.iter(), start_x, side);
    }

    /// Place instructions on the main rail starting at `start_x`, wiring each
    /// one to the end of the current main-rail wire.
    fn series_from<'i>(&mut self, instrs: impl Iterator<Item = &'i Instruction>, start_x: f64, side: Side) {
        let y = self.main_y;
        let mut x = start_x;
        for instr in instrs {
            self.wire(WireKind::Series, Point::new(self.wire_x, y), Point::new(x, y));
            let rect = self.place(instr, x, 0, side);
            self.wire_x = rect.right();
            x = rect.right() + self.config.h_gap;
        }
    }

    fn input_group(&mut self, group: &BranchGroup) {
        if !group.has_side_branches() {
            self.series(&group.main_branch, Side::Input);
            self.series(&group.series_after_branches, Side::Input);
            return;
        }

        let tee_x = self.cursor();
        let join_x = tee_x + self.block_width(group.longest_path());
        let start_x = tee_x + self.config.h_gap;
        self.parallel_block(group, tee_x, join_x, Side::Input, |_| start_x);
        self.series(&group.series_after_branches, Side::Input);
    }

    fn output_group(&mut self, group: &BranchGroup, right_rail_x: f64) {
        let width = self.output_group_width(group);
        let tee_x = right_rail_x - self.config.h_gap - width;

        if !group.has_side_branches() {
            let instrs = group.main_branch.iter().chain(&group.series_after_branches);
            self.series_from(instrs, tee_x, Side::Output);
            return;
        }

        let block_w = self.block_width(group.longest_path());
        let join_x = tee_x + block_w;
        let config = self.config;
        self.parallel_block(group, tee_x, join_x, Side::Output, |len| {
            tee_x + (block_w - config.span(len)) / 2.0
        });
        self.series(&group.series_after_branches, Side::Output);
    }

    /// Draw a tee, every path of `group`, and a join. `start_of` gives the
    /// first box position for a path of the given length.
    fn parallel_block(
        &mut self,
        group: &BranchGroup,
        tee_x: f64,
        join_x: f64,
        side: Side,
        start_of: impl Fn(usize) -> f64,
    ) {
        let main_y = self.main_y;
        let last_y = self.row_y(group.side_branches.len());

        self.wire(WireKind::Series, Point::new(self.wire_x, main_y), Point::new(tee_x, main_y));
        self.wire(WireKind::Tee, Point::new(tee_x, main_y), Point::new(tee_x, last_y));
        self.wire(WireKind::Join, Point::new(join_x, main_y), Point::new(join_x, last_y));

        for (row, path) in group.paths().enumerate() {
            self.path(path, row, tee_x, join_x, start_of(path.len()), side);
        }
        self.wire_x = join_x;
    }

    /// One branch path on `row`: tee wire, boxes, then a trailing wire to the join.
    fn path(&mut self, instrs: &[Instruction], row: usize, tee_x: f64, join_x: f64, start_x: f64, side: Side) {
        let y = self.row_y(row);
        let kind = if row == 0 { WireKind::Series } else { WireKind::Branch };

        let mut wire_x = tee_x;
        let mut box_x = start_x;
        for instr in instrs {
            self.wire(kind, Point::new(wire_x, y), Point::new(box_x, y));
            let rect = self.place(instr, box_x, row, side);
            wire_x = rect.right();
            box_x = rect.right() + self.config.h_gap;
        }
        self.wire(kind, Point::new(wire_x, y), Point::new(join_x, y));
    }

    fn finish(mut self, width: f64, output: Option<&Output>) -> RungLayout {
        let right_rail_x = width - self.config.rail_inset;
        let main_y = self.main_y;

        match output {
            None => {}
            Some(Output::Single(instr)) => {
                let x = right_rail_x - self.config.h_gap - self.config.box_width;
                self.series_from(std::iter::once(instr), x, Side::Output);
            }
            Some(Output::Branched(group)) => self.output_group(group, right_rail_x),
        }

        self.wire(WireKind::Series, Point::new(self.wire_x, main_y), Point::new(right_rail_x, main_y));
        self.wire(WireKind::Rail, Point::new(right_rail_x, 0.0), Point::new(right_rail_x, self.height));

        RungLayout {
            width,
            height: self.height,
            main_y,
            instructions: self.instructions,
            wires: self.wires,
        }
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
