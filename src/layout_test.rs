//! Tests for the layout engine.
#![allow(clippy::float_cmp)]

use super::*;
use crate::parse::parse;

fn lay_out(text: &str) -> RungLayout {
    let mut placement = layout(&parse(text).unwrap());
    assert_eq!(placement.rungs.len(), 1);
    placement.rungs.remove(0)
}

fn rect_of(layout: &RungLayout, tag: &str) -> Rect {
    layout
        .instructions
        .iter()
        .find(|p| p.instruction.tag == tag)
        .map(|p| p.rect)
        .unwrap()
}

fn segments(layout: &RungLayout, kind: WireKind) -> Vec<(f64, f64, f64, f64)> {
    layout.wires_of(kind).map(|w| (w.a.x, w.a.y, w.b.x, w.b.y)).collect()
}

fn ote(tag: &str) -> Instruction {
    Instruction::new("OTE", tag)
}

fn side_branches(count: usize) -> Rung {
    let group = BranchGroup {
        main_branch: vec![Instruction::new("XIC", "M")],
        side_branches: (0..count).map(|i| vec![Instruction::new("XIC", format!("S{i}"))]).collect(),
        series_after_branches: Vec::new(),
    };
    Rung { inputs: Some(Input::Branched(group)), output: Some(Output::Single(ote("Q"))) }
}

// =============================================================================
// SERIES
// =============================================================================

#[test]
fn layout_plain_series_positions() {
    let l = lay_out("XIC(A)XIC(B)OTE(C)");
    assert_eq!(l.width, 800.0);
    assert_eq!(l.height, 180.0);
    assert_eq!(l.main_y, 90.0);
    assert_eq!(rect_of(&l, "A"), Rect::new(50.0, 70.0, 100.0, 40.0));
    assert_eq!(rect_of(&l, "B"), Rect::new(180.0, 70.0, 100.0, 40.0));
    assert_eq!(rect_of(&l, "C"), Rect::new(650.0, 70.0, 100.0, 40.0));
    assert_eq!(
        segments(&l, WireKind::Series),
        vec![(20.0, 90.0, 50.0, 90.0), (150.0, 90.0, 180.0, 90.0), (280.0, 90.0, 650.0, 90.0), (750.0, 90.0, 780.0, 90.0)]
    );
}

#[test]
fn layout_power_rails_span_canvas() {
    let l = lay_out("XIC(A)OTE(B)");
    assert_eq!(segments(&l, WireKind::Rail), vec![(20.0, 0.0, 20.0, 180.0), (780.0, 0.0, 780.0, 180.0)]);
}

#[test]
fn layout_output_only_wires_rails_to_box() {
    let l = lay_out("OTE(A)");
    assert_eq!(l.instructions.len(), 1);
    assert_eq!(l.instructions[0].side, Side::Output);
    assert_eq!(segments(&l, WireKind::Series), vec![(20.0, 90.0, 650.0, 90.0), (750.0, 90.0, 780.0, 90.0)]);
}

#[test]
fn layout_empty_rung_wires_rails_together() {
    let l = layout_rung(&Rung { inputs: None, output: None }, &LayoutConfig::default());
    assert!(l.instructions.is_empty());
    assert_eq!(l.height, 180.0);
    assert_eq!(segments(&l, WireKind::Series), vec![(20.0, 90.0, 780.0, 90.0)]);
}

#[test]
fn layout_long_rung_widens_canvas() {
    let text = "XIC(A0)XIC(A1)XIC(A2)XIC(A3)XIC(A4)XIC(A5)XIC(A6)XIC(A7)XIC(A8)XIC(A9)OTE(Q)";
    let l = lay_out(text);
    assert_eq!(l.width, 1500.0);
    assert_eq!(rect_of(&l, "A9").right(), 1320.0);
    assert_eq!(rect_of(&l, "Q").x, 1350.0);
}

// =============================================================================
// INPUT BRANCHES
// =============================================================================

#[test]
fn layout_input_branch_is_left_aligned() {
    let l = lay_out("[XIC(A)XIC(B)XIC(C),XIO(D)]OTE(Q)");
    assert_eq!(l.height, 260.0);

    let a = rect_of(&l, "A");
    let d = rect_of(&l, "D");
    assert_eq!(a.x, 80.0);
    assert_eq!(d.x, a.x);
    assert_eq!(d.y, 150.0);
    assert_eq!(rect_of(&l, "C").x, 340.0);

    assert_eq!(segments(&l, WireKind::Tee), vec![(50.0, 90.0, 50.0, 170.0)]);
    assert_eq!(segments(&l, WireKind::Join), vec![(470.0, 90.0, 470.0, 170.0)]);
    // The short branch extends its trailing wire to the join.
    assert_eq!(segments(&l, WireKind::Branch), vec![(50.0, 170.0, 80.0, 170.0), (180.0, 170.0, 470.0, 170.0)]);
}

#[test]
fn layout_side_branches_stack_one_pitch_apart() {
    let l = layout_rung(&side_branches(3), &LayoutConfig::default());
    let ys: Vec<f64> = ["S0", "S1", "S2"].iter().map(|t| rect_of(&l, t).y + 20.0).collect();
    assert_eq!(ys, vec![170.0, 250.0, 330.0]);
    let rows: Vec<usize> = l.instructions.iter().filter(|p| p.side == Side::Input).map(|p| p.row).collect();
    assert_eq!(rows, vec![0, 1, 2, 3]);
    assert_eq!(segments(&l, WireKind::Tee), vec![(50.0, 90.0, 50.0, 330.0)]);
}

#[test]
fn layout_series_after_branches_follows_join() {
    let l = lay_out("[XIC(A),XIC(B)]XIO(C)OTE(D)");
    let join = segments(&l, WireKind::Join)[0];
    assert_eq!(join.0, 210.0);
    assert_eq!(rect_of(&l, "C").x, 240.0);
    assert_eq!(rect_of(&l, "C").y, 70.0);
}

#[test]
fn layout_group_without_side_branches_draws_as_series() {
    let l = lay_out("[XIC(A)XIC(B)]OTE(C)");
    assert_eq!(l.wires_of(WireKind::Tee).count(), 0);
    assert_eq!(l.wires_of(WireKind::Join).count(), 0);
    assert_eq!(rect_of(&l, "A").x, 50.0);
    assert_eq!(rect_of(&l, "B").x, 180.0);
    assert_eq!(l.height, 180.0);
}

// =============================================================================
// OUTPUT BRANCHES
// =============================================================================

#[test]
fn layout_output_branch_paths_are_centered() {
    let group = BranchGroup {
        main_branch: vec![ote("B"), ote("C")],
        side_branches: vec![vec![ote("D")]],
        series_after_branches: Vec::new(),
    };
    let rung = Rung {
        inputs: Some(Input::Series(vec![Instruction::new("XIC", "A")])),
        output: Some(Output::Branched(group)),
    };
    let l = layout_rung(&rung, &LayoutConfig::default());

    assert_eq!(segments(&l, WireKind::Tee), vec![(460.0, 90.0, 460.0, 170.0)]);
    assert_eq!(segments(&l, WireKind::Join), vec![(750.0, 90.0, 750.0, 170.0)]);
    assert_eq!(rect_of(&l, "B").x, 490.0);
    assert_eq!(rect_of(&l, "D").x, 555.0);

    let main_center = f64::midpoint(rect_of(&l, "B").x, rect_of(&l, "C").right());
    assert_eq!(rect_of(&l, "D").center().x, main_center);
}

#[test]
fn layout_multi_output_rung_from_text() {
    let l = lay_out("[XIC(A)][OTE(B),OTE(C)]");
    assert_eq!(l.height, 260.0);
    let b = rect_of(&l, "B");
    let c = rect_of(&l, "C");
    assert_eq!(b.x, c.x);
    assert_eq!(c.y - b.y, 80.0);
    assert_eq!(l.instructions.iter().filter(|p| p.side == Side::Output).count(), 2);
    // The join feeds the right rail.
    let last_series = segments(&l, WireKind::Series).last().copied().unwrap();
    assert_eq!(last_series.2, 780.0);
}

#[test]
fn layout_taller_side_drives_height() {
    let input = BranchGroup {
        main_branch: vec![Instruction::new("XIC", "A")],
        side_branches: vec![vec![Instruction::new("XIC", "B")]],
        series_after_branches: Vec::new(),
    };
    let output = BranchGroup {
        main_branch: vec![ote("X")],
        side_branches: vec![vec![ote("Y")], vec![ote("Z")]],
        series_after_branches: Vec::new(),
    };
    let rung = Rung { inputs: Some(Input::Branched(input)), output: Some(Output::Branched(output)) };
    let l = layout_rung(&rung, &LayoutConfig::default());
    assert_eq!(l.height, 340.0);
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn layout_adding_side_branch_adds_one_pitch() {
    let cfg = LayoutConfig::default();
    for count in 0..5 {
        let before = layout_rung(&side_branches(count), &cfg).height;
        let after = layout_rung(&side_branches(count + 1), &cfg).height;
        assert_eq!(after - before, cfg.branch_pitch);
    }
}

#[test]
fn layout_is_deterministic() {
    let program = parse("[XIC(A)XIC(B),XIO(C)]XIC(D)OTE(E); [XIC(F)][OTE(G),OTE(H)]; OTE(Z)").unwrap();
    assert_eq!(layout(&program), layout(&program));
}

#[test]
fn layout_boxes_stay_on_canvas_and_never_overlap() {
    let program = parse(
        "[XIC(A)XIC(B)XIC(C),XIO(D),XIC(E)XIC(F)]XIC(G)OTE(H); \
         [XIC(A)][XIO(B)][XIC(C)][OTE(D),OTE(E),OTE(F)]; \
         XIC(A)XIC(B)XIC(C)XIC(D)XIC(E)XIC(F)XIC(G)OTE(H)",
    )
    .unwrap();
    for l in layout(&program).rungs {
        assert!(l.height >= 180.0);
        let canvas = Rect::new(0.0, 0.0, l.width, l.height);
        for (i, p) in l.instructions.iter().enumerate() {
            assert!(canvas.contains(Point::new(p.rect.x, p.rect.y)));
            assert!(canvas.contains(Point::new(p.rect.right(), p.rect.bottom())));
            for q in &l.instructions[i + 1..] {
                assert!(!p.rect.overlaps(&q.rect), "{:?} overlaps {:?}", p.instruction, q.instruction);
            }
        }
    }
}

#[test]
fn layout_respects_custom_geometry() {
    let cfg = LayoutConfig {
        box_width: 60.0,
        box_height: 30.0,
        h_gap: 10.0,
        branch_pitch: 50.0,
        rail_inset: 5.0,
        base_height: 100.0,
        min_width: 300.0,
    };
    let program = parse("[XIC(A),XIC(B)]OTE(C)").unwrap();
    let l = layout_with(&program, &cfg).rungs.remove(0);
    assert_eq!(l.height, 150.0);
    assert_eq!(l.main_y, 50.0);
    assert_eq!(rect_of(&l, "A"), Rect::new(25.0, 35.0, 60.0, 30.0));
    assert_eq!(rect_of(&l, "B").y, 85.0);
    assert_eq!(rect_of(&l, "C").x, 300.0 - 5.0 - 10.0 - 60.0);
}
