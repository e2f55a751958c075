//! Ladder-logic rung notation parser and diagram layout engine.
//!
//! Text such as `[XIC(Start),XIC(Seal)]XIO(Stop)OTE(Motor);` is parsed into a
//! [`Program`] of rungs, each with optional inputs (a series or a branch
//! group) and an output (a single instruction or a branch group). The layout
//! engine then places every instruction box, power rail and tee/join wire on
//! a per-rung canvas. Rendering is separate: [`render`] turns a placement into
//! backend-neutral draw commands and [`svg`] serializes those.
//!
//! Every pass is a pure function of its arguments; nothing is cached between
//! calls.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`instruction`] | Single `NAME(args)` tokens and the call scanner |
//! | [`parse`] | Rung text to [`Program`], including branch classification |
//! | [`ast`] | Program model types |
//! | [`layout`] | Program to per-rung geometry |
//! | [`symbol`] | Per-mnemonic instruction symbols |
//! | [`render`] | Placement to draw commands |
//! | [`svg`] | Draw commands to SVG text |
//! | [`geometry`] | `Point` and `Rect` |
//! | [`config`] | Layout geometry constants and overrides |
//! | [`routine`] | Routine exports holding rung text |
//! | [`error`] | Parse error taxonomy |

pub mod ast;
pub mod config;
pub mod error;
pub mod geometry;
pub mod instruction;
pub mod layout;
pub mod parse;
pub mod render;
pub mod routine;
pub mod svg;
pub mod symbol;

pub use ast::{BranchGroup, Input, Instruction, Output, Program, Rung};
pub use config::LayoutConfig;
pub use error::ParseError;
pub use layout::{Placement, RungLayout, layout, layout_with};
pub use parse::parse;
