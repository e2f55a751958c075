//! Parse error taxonomy.
//!
//! Every error is batch-fatal: one malformed rung rejects the whole input.
//! Rung-scoped variants carry the offending rung text so callers can show it.

/// Error returned by [`crate::parse`] and [`crate::instruction::parse_instruction`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input held no non-empty rung after splitting on `;`.
    #[error("no rungs found in input")]
    NoRungsFound,

    /// A `[` without a matching `]`, or a stray `]`.
    #[error("unmatched bracket in rung: {rung}")]
    UnmatchedBracket { rung: String },

    /// A bracket group opened inside another bracket group.
    #[error("nested branches are not supported: {rung}")]
    NestedBranchesUnsupported { rung: String },

    /// A bracket group that neither opens the rung nor sits next to another
    /// group, such as `XIC(A)[XIC(B),XIC(C)]OTE(D)`.
    #[error("branch block must open the rung: {rung}")]
    MisplacedBranchBlock { rung: String },

    /// A branch block with an empty entry or no instructions at all.
    #[error("empty branch block in rung: {rung}")]
    EmptyBranchBlock { rung: String },

    /// A token that is not of the form `name(args)`.
    #[error("malformed instruction `{token}`")]
    MalformedInstruction { token: String },

    /// No call-shaped token anywhere in the rung.
    #[error("no instructions found in rung: {rung}")]
    NoInstructionsFound { rung: String },

    /// Neither inputs nor an output could be resolved.
    #[error("rung has neither inputs nor output: {rung}")]
    EmptyRung { rung: String },
}

impl ParseError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoRungsFound => "E_NO_RUNGS_FOUND",
            Self::UnmatchedBracket { .. } => "E_UNMATCHED_BRACKET",
            Self::NestedBranchesUnsupported { .. } => "E_NESTED_BRANCHES",
            Self::MisplacedBranchBlock { .. } => "E_MISPLACED_BRANCH_BLOCK",
            Self::EmptyBranchBlock { .. } => "E_EMPTY_BRANCH_BLOCK",
            Self::MalformedInstruction { .. } => "E_MALFORMED_INSTRUCTION",
            Self::NoInstructionsFound { .. } => "E_NO_INSTRUCTIONS",
            Self::EmptyRung { .. } => "E_EMPTY_RUNG",
        }
    }

    /// The rung text that caused the error, when the error is rung-scoped.
    #[must_use]
    pub fn rung(&self) -> Option<&str> {
        match self {
            Self::UnmatchedBracket { rung }
            | Self::NestedBranchesUnsupported { rung }
            | Self::MisplacedBranchBlock { rung }
            | Self::EmptyBranchBlock { rung }
            | Self::NoInstructionsFound { rung }
            | Self::EmptyRung { rung } => Some(rung),
            Self::NoRungsFound | Self::MalformedInstruction { .. } => None,
        }
    }
}
