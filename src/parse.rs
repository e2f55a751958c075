//! Rung parser for the compact ladder notation.
//!
//! Input is a `;`-separated list of rungs. Each rung is classified into one
//! of three shapes, tried in order:
//!
//! 1. adjacent bracket groups, `[...][...]`: every group is a parallel path,
//!    and the final group doubles as the output container when no call
//!    follows it;
//! 2. a single leading branch block, `[a,b]c OTE(x)`;
//! 3. a plain series of calls with no brackets, the last of which is the output.
//!
//! Any trailing call is accepted as the output whatever its mnemonic.
//! Brackets nest one level only. A bracket group preceded by calls, or
//! separated from the leading block by calls, is rejected.

use std::ops::Range;

use crate::ast::{BranchGroup, Input, Instruction, Output, Program, Rung};
use crate::error::ParseError;
use crate::instruction::parse_calls;

/// Parse ladder text into a [`Program`].
///
/// # Errors
///
/// Returns [`ParseError::NoRungsFound`] if the text holds no rung, or the
/// first rung-scoped error encountered. No partial program is returned.
pub fn parse(input: &str) -> Result<Program, ParseError> {
    let sources: Vec<&str> = input.split(';').map(str::trim).filter(|r| !r.is_empty()).collect();
    if sources.is_empty() {
        return Err(ParseError::NoRungsFound);
    }

    let rungs = sources
        .into_iter()
        .map(parse_rung)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rungs = rungs.len(), "parsed ladder program");
    Ok(Program { rungs })
}

/// Parse one rung (no `;`).
///
/// # Errors
///
/// Returns the rung-scoped [`ParseError`] describing why the rung is malformed.
pub fn parse_rung(rung: &str) -> Result<Rung, ParseError> {
    let rung = rung.trim();
    let segments = split_segments(rung)?;

    let groups = segments.iter().filter(|s| s.is_group()).count();
    let parsed = if has_adjacent_groups(&segments) {
        tracing::trace!(rung, groups, "multi-group rung");
        if !segments.first().is_some_and(Segment::is_group) {
            return Err(ParseError::MisplacedBranchBlock { rung: rung.to_owned() });
        }
        parse_multi_group(rung, &segments)?
    } else {
        match segments.first() {
            Some(Segment::Group { outer, inner }) if groups == 1 => {
                tracing::trace!(rung, "single-group rung");
                parse_single_group(rung, outer, inner)?
            }
            _ if groups == 0 => parse_series(rung)?,
            _ => return Err(ParseError::MisplacedBranchBlock { rung: rung.to_owned() }),
        }
    };

    if parsed.inputs.is_none() && parsed.output.is_none() {
        return Err(ParseError::EmptyRung { rung: rung.to_owned() });
    }
    Ok(parsed)
}

// =============================================================================
// SHAPES
// =============================================================================

fn parse_series(rung: &str) -> Result<Rung, ParseError> {
    let mut calls = parse_calls(rung)?;
    let Some(output) = calls.pop() else {
        return Err(ParseError::NoInstructionsFound { rung: rung.to_owned() });
    };
    let inputs = if calls.is_empty() { None } else { Some(Input::Series(calls)) };
    Ok(Rung { inputs, output: Some(Output::Single(output)) })
}

fn parse_single_group(rung: &str, outer: &Range<usize>, inner: &Range<usize>) -> Result<Rung, ParseError> {
    let paths = branch_paths(rung, &rung[inner.clone()])?;
    let mut trailing = parse_calls(&rung[outer.end..])?;

    let Some(output) = trailing.pop() else {
        // Nothing follows the block, so the block holds the outputs.
        return Ok(Rung { inputs: None, output: outputs_from(paths.into_iter().flatten().collect()) });
    };

    let mut paths = paths.into_iter();
    let main_branch = paths.next().unwrap_or_default();
    let group = BranchGroup { main_branch, side_branches: paths.collect(), series_after_branches: trailing };
    Ok(Rung { inputs: Some(Input::Branched(group)), output: Some(Output::Single(output)) })
}

fn parse_multi_group(rung: &str, segments: &[Segment]) -> Result<Rung, ParseError> {
    let groups: Vec<&Range<usize>> = segments
        .iter()
        .filter_map(|s| match s {
            Segment::Group { inner, .. } => Some(inner),
            Segment::Text(_) => None,
        })
        .collect();

    // Loose calls between groups sit in series after the parallel block.
    let mut loose = Vec::new();
    let mut trailing = Vec::new();
    let mut seen_groups = 0;
    for segment in segments {
        match segment {
            Segment::Group { .. } => seen_groups += 1,
            Segment::Text(span) if seen_groups == groups.len() => trailing.extend(parse_calls(&rung[span.clone()])?),
            Segment::Text(span) => loose.extend(parse_calls(&rung[span.clone()])?),
        }
    }

    let (input_groups, output) = if let Some(output) = trailing.pop() {
        loose.extend(trailing);
        (groups.as_slice(), Some(Output::Single(output)))
    } else {
        match groups.split_last() {
            Some((container, rest)) => {
                let outputs = branch_paths(rung, &rung[(*container).clone()])?;
                (rest, outputs_from(outputs.into_iter().flatten().collect()))
            }
            None => (groups.as_slice(), None),
        }
    };

    let mut paths = Vec::new();
    for inner in input_groups {
        paths.extend(branch_paths(rung, &rung[(*inner).clone()])?);
    }

    Ok(Rung { inputs: collapse_inputs(paths, loose), output })
}

/// One path collapses to a flat series; several become a branch group.
fn collapse_inputs(paths: Vec<Vec<Instruction>>, series_after: Vec<Instruction>) -> Option<Input> {
    let mut paths = paths.into_iter();
    let Some(mut main_branch) = paths.next() else {
        return if series_after.is_empty() { None } else { Some(Input::Series(series_after)) };
    };

    let side_branches: Vec<Vec<Instruction>> = paths.collect();
    if side_branches.is_empty() {
        main_branch.extend(series_after);
        return Some(Input::Series(main_branch));
    }

    Some(Input::Branched(BranchGroup { main_branch, side_branches, series_after_branches: series_after }))
}

/// One output stays single; several become a group of singleton side branches.
fn outputs_from(outputs: Vec<Instruction>) -> Option<Output> {
    let mut outputs = outputs.into_iter();
    let first = outputs.next()?;
    let side_branches: Vec<Vec<Instruction>> = outputs.map(|o| vec![o]).collect();
    if side_branches.is_empty() {
        return Some(Output::Single(first));
    }
    Some(Output::Branched(BranchGroup { main_branch: vec![first], side_branches, series_after_branches: Vec::new() }))
}

/// Split a branch block's content into paths. Every path must hold at least one call.
fn branch_paths(rung: &str, content: &str) -> Result<Vec<Vec<Instruction>>, ParseError> {
    let mut paths = Vec::new();
    for entry in split_branch_entries(content) {
        let calls = parse_calls(entry)?;
        if calls.is_empty() {
            return Err(ParseError::EmptyBranchBlock { rung: rung.to_owned() });
        }
        paths.push(calls);
    }
    Ok(paths)
}

/// Split on commas that are not inside call parentheses.
fn split_branch_entries(content: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, b) in content.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                entries.push(content[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(content[start..].trim());
    entries
}

// =============================================================================
// SEGMENTS
// =============================================================================

/// A top-level piece of a rung: a bracket group or the free text between groups.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// `outer` includes the brackets, `inner` excludes them.
    Group { outer: Range<usize>, inner: Range<usize> },
    Text(Range<usize>),
}

impl Segment {
    fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }
}

/// Split a rung into bracket groups and non-blank text runs.
///
/// Brackets inside call parentheses (array tags such as `Data[3]`) are not
/// structural and are skipped.
fn split_segments(rung: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut paren_depth = 0usize;
    let mut open: Option<usize> = None;
    let mut text_start = 0;

    for (i, b) in rung.bytes().enumerate() {
        match b {
            b'(' => paren_depth += 1,
            b')' => paren_depth = paren_depth.saturating_sub(1),
            b'[' if paren_depth == 0 => {
                if open.is_some() {
                    return Err(ParseError::NestedBranchesUnsupported { rung: rung.to_owned() });
                }
                push_text(rung, text_start..i, &mut segments);
                open = Some(i);
            }
            b']' if paren_depth == 0 => {
                let Some(start) = open.take() else {
                    return Err(ParseError::UnmatchedBracket { rung: rung.to_owned() });
                };
                let end = i + 1;
                segments.push(Segment::Group { outer: start..end, inner: start + 1..i });
                text_start = end;
            }
            _ => {}
        }
    }

    if open.is_some() {
        return Err(ParseError::UnmatchedBracket { rung: rung.to_owned() });
    }
    push_text(rung, text_start..rung.len(), &mut segments);
    Ok(segments)
}

fn push_text(rung: &str, span: Range<usize>, segments: &mut Vec<Segment>) {
    if !rung[span.clone()].trim().is_empty() {
        segments.push(Segment::Text(span));
    }
}

fn has_adjacent_groups(segments: &[Segment]) -> bool {
    segments.windows(2).any(|pair| pair[0].is_group() && pair[1].is_group())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
