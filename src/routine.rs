//! Routine source: named routines holding rung text.
//!
//! The export format is a JSON document of programs, each holding routines,
//! each holding rung records:
//!
//! ```json
//! { "programs": [ { "name": "Main", "routines": [
//!     { "name": "Pumps", "rungs": [ { "number": "0", "text": "XIC(Run)OTE(Pump);" } ] }
//! ] } ] }
//! ```
//!
//! Routines are addressed by their qualified name `Program.Routine`.

use serde::{Deserialize, Serialize};

use crate::ast::Program;
use crate::error::ParseError;
use crate::parse::parse;

#[derive(Debug, thiserror::Error)]
pub enum RoutineError {
    #[error("invalid routine file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown routine: {0}")]
    UnknownRoutine(String),
    #[error("routine {routine} has {len} rungs; index {index} is out of range")]
    RungOutOfRange { routine: String, index: usize, len: usize },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// One rung as exported: optional display number and the rung text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RungRecord {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl RungRecord {
    /// Display label: the exported number, else the 1-based position.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        match &self.number {
            Some(number) => number.clone(),
            None => (index + 1).to_string(),
        }
    }
}

/// A routine addressed by its qualified `Program.Routine` name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routine {
    pub name: String,
    pub rungs: Vec<RungRecord>,
}

/// Anything that can list routines and hand out rung text.
pub trait RoutineSource {
    /// All routines, in source order.
    fn routines(&self) -> &[Routine];

    fn routine(&self, name: &str) -> Option<&Routine> {
        self.routines().iter().find(|r| r.name == name)
    }

    /// The rung record at `index` within the named routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::UnknownRoutine`] or [`RoutineError::RungOutOfRange`].
    fn rung(&self, name: &str, index: usize) -> Result<&RungRecord, RoutineError> {
        let routine = self.routine(name).ok_or_else(|| RoutineError::UnknownRoutine(name.to_owned()))?;
        routine.rungs.get(index).ok_or_else(|| RoutineError::RungOutOfRange {
            routine: name.to_owned(),
            index,
            len: routine.rungs.len(),
        })
    }

    /// Parse the selected rung's text.
    ///
    /// # Errors
    ///
    /// Returns a lookup error, or [`RoutineError::Parse`] if the text is malformed.
    fn parse_rung(&self, name: &str, index: usize) -> Result<Program, RoutineError> {
        let record = self.rung(name, index)?;
        Ok(parse(record.text.trim())?)
    }
}

/// Routines loaded from a JSON export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutineIndex {
    routines: Vec<Routine>,
}

#[derive(Deserialize)]
struct ExportFile {
    #[serde(default)]
    programs: Vec<ExportProgram>,
}

#[derive(Deserialize)]
struct ExportProgram {
    name: String,
    #[serde(default)]
    routines: Vec<ExportRoutine>,
}

#[derive(Deserialize)]
struct ExportRoutine {
    name: String,
    #[serde(default)]
    rungs: Vec<RungRecord>,
}

impl RoutineIndex {
    /// Load an export document.
    ///
    /// A qualified name seen twice keeps its first routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Json`] for malformed or mistyped JSON.
    pub fn from_json(json: &str) -> Result<Self, RoutineError> {
        let file: ExportFile = serde_json::from_str(json)?;
        let mut routines: Vec<Routine> = Vec::new();
        for program in file.programs {
            for routine in program.routines {
                let name = format!("{}.{}", program.name, routine.name);
                if routines.iter().any(|r| r.name == name) {
                    tracing::warn!(routine = %name, "skipping duplicate routine");
                    continue;
                }
                routines.push(Routine { name, rungs: routine.rungs });
            }
        }
        tracing::debug!(routines = routines.len(), "loaded routine index");
        Ok(Self { routines })
    }
}

impl RoutineSource for RoutineIndex {
    fn routines(&self) -> &[Routine] {
        &self.routines
    }
}

#[cfg(test)]
#[path = "routine_test.rs"]
mod tests;
