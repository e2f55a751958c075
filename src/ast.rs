//! Program model for parsed ladder rungs.

use serde::{Deserialize, Serialize};

/// A parsed ladder program: rungs in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Program {
    pub rungs: Vec<Rung>,
}

/// One complete circuit between the two power rails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rung {
    /// Conditions gating the output. `None` wires the left rail straight to the output.
    pub inputs: Option<Input>,
    pub output: Option<Output>,
}

/// A single instruction call such as `XIC(Start)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Mnemonic as written, e.g. `XIC`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw operand text between the parentheses. May hold a comma-separated
    /// operand list for comparison instructions.
    pub tag: String,
}

impl Instruction {
    #[must_use]
    pub fn new(kind: impl Into<String>, tag: impl Into<String>) -> Self {
        Self { kind: kind.into(), tag: tag.into() }
    }
}

/// Parallel instruction paths that rejoin at a single point.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BranchGroup {
    /// Path drawn inline with the enclosing rail.
    pub main_branch: Vec<Instruction>,
    /// Additional paths drawn below the main rail, in order.
    pub side_branches: Vec<Vec<Instruction>>,
    /// Series instructions immediately after the rejoin point.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub series_after_branches: Vec<Instruction>,
}

impl BranchGroup {
    /// Instruction count of the longest path; the rejoin point sits after it.
    #[must_use]
    pub fn longest_path(&self) -> usize {
        self.paths().map(<[Instruction]>::len).max().unwrap_or(0)
    }

    /// Main branch first, then every side branch.
    pub fn paths(&self) -> impl Iterator<Item = &[Instruction]> {
        std::iter::once(self.main_branch.as_slice()).chain(self.side_branches.iter().map(Vec::as_slice))
    }

    #[must_use]
    pub fn has_side_branches(&self) -> bool {
        !self.side_branches.is_empty()
    }
}

/// Input side of a rung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    Series(Vec<Instruction>),
    Branched(BranchGroup),
}

impl Input {
    /// Number of side branches stacked below the main rail.
    #[must_use]
    pub fn side_branch_count(&self) -> usize {
        match self {
            Self::Series(_) => 0,
            Self::Branched(group) => group.side_branches.len(),
        }
    }
}

/// Output side of a rung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    Single(Instruction),
    Branched(BranchGroup),
}

impl Output {
    #[must_use]
    pub fn side_branch_count(&self) -> usize {
        match self {
            Self::Single(_) => 0,
            Self::Branched(group) => group.side_branches.len(),
        }
    }
}

impl Rung {
    /// Side branches on whichever side stacks taller; drives the canvas height.
    #[must_use]
    pub fn branch_depth(&self) -> usize {
        let inputs = self.inputs.as_ref().map_or(0, Input::side_branch_count);
        let output = self.output.as_ref().map_or(0, Output::side_branch_count);
        inputs.max(output)
    }
}
