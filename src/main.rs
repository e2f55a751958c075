use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use ladderview::routine::{RoutineError, RoutineIndex, RoutineSource};
use ladderview::{LayoutConfig, ParseError, Program, layout_with, parse, render, svg};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config file {path}: {source}")]
    Config { path: String, source: serde_json::Error },
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{code}: {0}", code = .0.error_code())]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Routine(#[from] RoutineError),
}

#[derive(Parser, Debug)]
#[command(name = "ladderview", about = "Parse, lay out and render ladder-logic rungs")]
struct Cli {
    /// JSON file with layout geometry; `LADDER_*` variables override it.
    #[arg(long, env = "LADDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parsed program as JSON.
    Parse {
        /// Rung text file; `-` or absent reads stdin.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the laid-out geometry as JSON.
    Layout {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Render the rungs as SVG or as draw-command JSON.
    Render {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,
        /// Write here instead of stdout. Removed if rendering fails.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the routines in an export, or render one of their rungs.
    Routines {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        routine: Option<String>,
        /// Zero-based rung index within the routine.
        #[arg(long, requires = "routine")]
        rung: Option<usize>,
        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Parse { input } => {
            let program = parse(&read_input(input.as_deref())?)?;
            print_json(&program)
        }
        Command::Layout { input } => {
            let program = parse(&read_input(input.as_deref())?)?;
            print_json(&layout_with(&program, &config))
        }
        Command::Render { input, format, output } => {
            let rendered = read_input(input.as_deref())
                .and_then(|text| Ok(parse(&text)?))
                .and_then(|program| render_program(&program, &config, format, &[]));
            finish(rendered, output.as_deref())
        }
        Command::Routines { file, routine, rung, format, output } => {
            let index = RoutineIndex::from_json(&std::fs::read_to_string(&file)?)?;
            match (routine, rung) {
                (None, _) => emit(None, &list_routines(&index, None)?),
                (Some(name), None) => emit(None, &list_routines(&index, Some(&name))?),
                (Some(name), Some(rung)) => {
                    let rendered = index
                        .parse_rung(&name, rung)
                        .and_then(|program| Ok((index.rung(&name, rung)?.label(rung), program)))
                        .map_err(CliError::from)
                        .and_then(|(label, program)| render_program(&program, &config, format, &[label]));
                    finish(rendered, output.as_deref())
                }
            }
        }
    }
}

/// Geometry from `--config` when given, then `LADDER_*` overrides.
fn load_config(path: Option<&Path>) -> Result<LayoutConfig, CliError> {
    let Some(path) = path else {
        return Ok(LayoutConfig::from_env());
    };
    let json = std::fs::read_to_string(path)?;
    let config = LayoutConfig::from_json(&json)
        .map_err(|source| CliError::Config { path: path.display().to_string(), source })?;
    tracing::debug!(path = %path.display(), "loaded layout config");
    Ok(config.with_overrides(&std::env::var))
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// `labels` captions the SVG rungs; missing labels fall back to position.
fn render_program(
    program: &Program,
    config: &LayoutConfig,
    format: Format,
    labels: &[String],
) -> Result<String, CliError> {
    let drawings = render::render(&layout_with(program, config));
    match format {
        Format::Svg => Ok(svg::document_svg(&drawings, labels)),
        Format::Json => Ok(serde_json::to_string_pretty(&drawings)? + "\n"),
    }
}

fn list_routines(index: &RoutineIndex, only: Option<&str>) -> Result<String, CliError> {
    let routines = match only {
        Some(name) => {
            let routine = index.routine(name).ok_or_else(|| RoutineError::UnknownRoutine(name.to_owned()))?;
            std::slice::from_ref(routine)
        }
        None => index.routines(),
    };

    let mut out = String::new();
    for routine in routines {
        out.push_str(&routine.name);
        out.push('\n');
        for (i, rung) in routine.rungs.iter().enumerate() {
            out.push_str(&format!("  [{i}] Rung {}: {}\n", rung.label(i), rung.text.trim()));
        }
    }
    Ok(out)
}

/// Write a rendered result, or clear a stale output file when rendering failed.
fn finish(rendered: Result<String, CliError>, output: Option<&Path>) -> Result<(), CliError> {
    match rendered {
        Ok(text) => emit(output, &text),
        Err(err) => {
            if let Some(path) = output {
                remove_stale(path);
            }
            Err(err)
        }
    }
}

fn emit(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}

fn remove_stale(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::info!(path = %path.display(), "removed stale output"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => tracing::warn!(path = %path.display(), error = %err, "could not remove stale output"),
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
