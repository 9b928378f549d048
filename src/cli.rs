//! Command-line front end over [`AppState`].
//!
//! Every invocation works against the state it is handed; the binary starts
//! from an empty one, so state lasts for a single process.

use std::io::Write;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::models::job::{Job, JobStatus};
use crate::models::nesting::{DieLineQuantity, NestingOptions, NestingResult, SheetSizeRange};
use crate::models::sheet::{Margins, Sheet, SheetSpec};
use crate::services::nesting::{self, NestingError};
use crate::services::registry::RegistryError;

#[derive(Debug, Parser)]
#[command(name = "label-jobs", version)]
#[command(about = "Job Management System for Label and Packaging")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Render output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new job
    Create {
        /// Unique job identifier
        job_id: String,
        /// Job description
        description: String,
    },
    /// List all jobs
    List {
        /// Filter by status
        #[arg(long, value_parser = status_parser())]
        status: Option<JobStatus>,
    },
    /// Show job details
    Show {
        /// Job identifier
        job_id: String,
    },
    /// Add label to job
    AddLabel {
        /// Job identifier
        job_id: String,
        /// Label to add
        label: String,
    },
    /// Remove label from job
    RemoveLabel {
        /// Job identifier
        job_id: String,
        /// Label to remove
        label: String,
    },
    /// Set packaging type
    SetPackaging {
        /// Job identifier
        job_id: String,
        /// Type of packaging
        packaging_type: String,
    },
    /// Update job status
    UpdateStatus {
        /// Job identifier
        job_id: String,
        /// New status
        #[arg(value_parser = status_parser())]
        status: JobStatus,
    },
    /// Delete a job
    Delete {
        /// Job identifier
        job_id: String,
    },
    /// Show job counts per status
    Stats,
    /// Manage print sheets
    Sheet {
        #[command(subcommand)]
        command: SheetCommand,
    },
    /// Gang die lines onto a sheet and report utilization and waste
    Nest(NestArgs),
    /// Search a range of sheet sizes for the best fit of all die lines
    NestAuto(NestAutoArgs),
}

#[derive(Debug, Subcommand)]
pub enum SheetCommand {
    /// Create a sheet
    Create(SheetArgs),
    /// List sheets
    List,
    /// Show sheet details
    Show {
        /// Sheet identifier
        sheet_id: Uuid,
    },
    /// Replace a sheet's dimensions, margins and material
    Update {
        /// Sheet identifier
        sheet_id: Uuid,
        #[command(flatten)]
        sheet: SheetArgs,
    },
    /// Delete a sheet
    Delete {
        /// Sheet identifier
        sheet_id: Uuid,
    },
}

#[derive(Debug, Clone, Args)]
pub struct MarginArgs {
    /// Top margin (mm)
    #[arg(long, default_value_t = 0.0)]
    pub margin_top: f64,
    /// Bottom margin (mm)
    #[arg(long, default_value_t = 0.0)]
    pub margin_bottom: f64,
    /// Left margin (mm)
    #[arg(long, default_value_t = 0.0)]
    pub margin_left: f64,
    /// Right margin (mm)
    #[arg(long, default_value_t = 0.0)]
    pub margin_right: f64,
}

impl From<&MarginArgs> for Margins {
    fn from(args: &MarginArgs) -> Self {
        Margins {
            top: args.margin_top,
            bottom: args.margin_bottom,
            left: args.margin_left,
            right: args.margin_right,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SheetArgs {
    /// Sheet name
    pub name: String,
    /// Sheet width (mm)
    pub width: f64,
    /// Sheet height (mm)
    pub height: f64,
    #[command(flatten)]
    pub margins: MarginArgs,
    /// Sheet material
    #[arg(long, default_value = "")]
    pub material: String,
}

impl From<&SheetArgs> for SheetSpec {
    fn from(args: &SheetArgs) -> Self {
        SheetSpec {
            name: args.name.clone(),
            width: args.width,
            height: args.height,
            margins: Margins::from(&args.margins),
            material: args.material.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct NestArgs {
    /// Sheet width (mm)
    #[arg(long)]
    pub width: f64,
    /// Sheet height (mm)
    #[arg(long)]
    pub height: f64,
    #[command(flatten)]
    pub margins: MarginArgs,
    /// Gap kept after every die line (mm)
    #[arg(long, default_value_t = NestingOptions::default().spacing)]
    pub spacing: f64,
    /// Die line bounding box and copy count, e.g. 120x80:4
    #[arg(long = "die-line", value_name = "WxH[:QTY]", value_parser = parse_die_line, required = true)]
    pub die_lines: Vec<DieLineArg>,
}

#[derive(Debug, Clone, Args)]
pub struct NestAutoArgs {
    /// Smallest sheet width to try (mm)
    #[arg(long)]
    pub min_width: f64,
    /// Largest sheet width to try (mm)
    #[arg(long)]
    pub max_width: f64,
    /// Smallest sheet height to try (mm)
    #[arg(long)]
    pub min_height: f64,
    /// Largest sheet height to try (mm)
    #[arg(long)]
    pub max_height: f64,
    /// Gap kept after every die line (mm)
    #[arg(long, default_value_t = NestingOptions::default().spacing)]
    pub spacing: f64,
    /// Die line bounding box and copy count, e.g. 120x80:4
    #[arg(long = "die-line", value_name = "WxH[:QTY]", value_parser = parse_die_line, required = true)]
    pub die_lines: Vec<DieLineArg>,
}

/// `WxH[:QTY]` die line from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct DieLineArg {
    pub label: String,
    pub width: f64,
    pub height: f64,
    pub quantity: u32,
}

fn parse_die_line(value: &str) -> Result<DieLineArg, String> {
    let (size, quantity) = match value.split_once(':') {
        Some((size, qty)) => {
            let quantity = qty
                .parse::<u32>()
                .map_err(|e| format!("invalid quantity '{qty}': {e}"))?;
            (size, quantity)
        }
        None => (value, 1),
    };
    let (width, height) = size
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{size}'"))?;
    let dimension = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid dimension '{s}': {e}"))
    };

    Ok(DieLineArg {
        label: size.to_string(),
        width: dimension(width)?,
        height: dimension(height)?,
        quantity,
    })
}

fn status_parser() -> impl TypedValueParser<Value = JobStatus> {
    PossibleValuesParser::new(JobStatus::iter().map(<&'static str>::from))
        .try_map(|value| value.parse::<JobStatus>())
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Nesting(#[from] NestingError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Execute one parsed command against `state`, writing results to `out`.
pub fn run<W: Write>(cli: &Cli, state: &mut AppState, out: &mut W) -> Result<(), CliError> {
    let printer = Printer { json: cli.json };
    let registry = &mut state.jobs;

    match &cli.command {
        Command::Create {
            job_id,
            description,
        } => {
            let job = registry.create(job_id.as_str(), description.as_str())?;
            if printer.json {
                return printer.write_json(out, &*job);
            }
            writeln!(out, "Created job: {}", job.job_id())?;
            writeln!(out, "Description: {}", job.description())?;
            writeln!(out, "Status: {}", job.status())?;
        }

        Command::List { status } => {
            let jobs = registry.list(*status);
            tracing::debug!(status = ?status, matched = jobs.len(), "Listing jobs");
            if printer.json {
                return printer.write_json(out, &jobs);
            }
            if jobs.is_empty() {
                writeln!(out, "No jobs found")?;
            } else {
                writeln!(out, "Total jobs: {}", jobs.len())?;
                for job in jobs {
                    write_summary(out, job)?;
                }
            }
        }

        Command::Show { job_id } => match registry.get(job_id) {
            Some(job) if printer.json => printer.write_json(out, job)?,
            Some(job) => write_detail(out, job)?,
            None => printer.not_found(out, &format!("Job {job_id}"))?,
        },

        Command::AddLabel { job_id, label } => {
            let Some(job) = registry.get_mut(job_id) else {
                return printer.not_found(out, &format!("Job {job_id}"));
            };
            let added = job.add_label(label.as_str());
            tracing::info!(job_id = %job_id, label = %label, added, "Add label");
            if printer.json {
                return printer.write_json(out, &*job);
            }
            writeln!(out, "Added label '{label}' to job {job_id}")?;
        }

        Command::RemoveLabel { job_id, label } => {
            let Some(job) = registry.get_mut(job_id) else {
                return printer.not_found(out, &format!("Job {job_id}"));
            };
            let removed = job.remove_label(label);
            tracing::info!(job_id = %job_id, label = %label, removed, "Remove label");
            if printer.json {
                return printer.write_json(out, &*job);
            }
            writeln!(out, "Removed label '{label}' from job {job_id}")?;
        }

        Command::SetPackaging {
            job_id,
            packaging_type,
        } => {
            let Some(job) = registry.get_mut(job_id) else {
                return printer.not_found(out, &format!("Job {job_id}"));
            };
            job.set_packaging_type(packaging_type.as_str());
            tracing::info!(job_id = %job_id, packaging_type = %packaging_type, "Set packaging type");
            if printer.json {
                return printer.write_json(out, &*job);
            }
            writeln!(out, "Set packaging type to '{packaging_type}' for job {job_id}")?;
        }

        Command::UpdateStatus { job_id, status } => {
            let Some(job) = registry.get_mut(job_id) else {
                return printer.not_found(out, &format!("Job {job_id}"));
            };
            job.update_status(*status);
            tracing::info!(job_id = %job_id, status = %status, "Updated job status");
            if printer.json {
                return printer.write_json(out, &*job);
            }
            writeln!(out, "Updated job {job_id} status to {status}")?;
        }

        Command::Delete { job_id } => {
            let deleted = registry.delete(job_id);
            if printer.json {
                return printer.write_json(out, &json!({ "job_id": job_id, "deleted": deleted }));
            }
            if deleted {
                writeln!(out, "Deleted job {job_id}")?;
            } else {
                printer.not_found(out, &format!("Job {job_id}"))?;
            }
        }

        Command::Stats => {
            let counts = registry.status_counts();
            if printer.json {
                let by_status: serde_json::Map<String, serde_json::Value> = counts
                    .iter()
                    .map(|(status, n)| (status.to_string(), json!(n)))
                    .collect();
                return printer.write_json(
                    out,
                    &json!({ "total": registry.count(None), "by_status": by_status }),
                );
            }
            writeln!(out, "Total jobs: {}", registry.count(None))?;
            for (status, n) in counts {
                writeln!(out, "{status}: {n}")?;
            }
        }

        Command::Sheet { command } => run_sheet(command, state, &printer, out)?,

        Command::Nest(args) => run_nest(args, state, &printer, out)?,

        Command::NestAuto(args) => run_nest_auto(args, state, &printer, out)?,
    }

    Ok(())
}

fn run_sheet<W: Write>(
    command: &SheetCommand,
    state: &mut AppState,
    printer: &Printer,
    out: &mut W,
) -> Result<(), CliError> {
    let sheets = &mut state.sheets;

    match command {
        SheetCommand::Create(args) => {
            let sheet = sheets.create(SheetSpec::from(args));
            if printer.json {
                return printer.write_json(out, sheet);
            }
            writeln!(out, "Created sheet: {}", sheet.id)?;
            write_sheet_fields(out, sheet)?;
        }

        SheetCommand::List => {
            let all = sheets.list();
            if printer.json {
                return printer.write_json(out, all);
            }
            if all.is_empty() {
                writeln!(out, "No sheets found")?;
            } else {
                writeln!(out, "Total sheets: {}", all.len())?;
                for sheet in all {
                    writeln!(
                        out,
                        "{}: {} ({} x {}, {})",
                        sheet.id,
                        sheet.name,
                        sheet.width,
                        sheet.height,
                        material_text(sheet)
                    )?;
                }
            }
        }

        SheetCommand::Show { sheet_id } => match sheets.get(*sheet_id) {
            Some(sheet) if printer.json => printer.write_json(out, sheet)?,
            Some(sheet) => {
                writeln!(out, "Sheet ID: {}", sheet.id)?;
                write_sheet_fields(out, sheet)?;
                writeln!(out, "Created: {}", sheet.created_at)?;
            }
            None => printer.not_found(out, &format!("Sheet {sheet_id}"))?,
        },

        SheetCommand::Update { sheet_id, sheet } => {
            match sheets.update(*sheet_id, SheetSpec::from(sheet)) {
                Some(sheet) if printer.json => printer.write_json(out, sheet)?,
                Some(_) => writeln!(out, "Updated sheet {sheet_id}")?,
                None => printer.not_found(out, &format!("Sheet {sheet_id}"))?,
            }
        }

        SheetCommand::Delete { sheet_id } => {
            let deleted = sheets.delete(*sheet_id);
            if printer.json {
                return printer.write_json(out, &json!({ "sheet_id": sheet_id, "deleted": deleted }));
            }
            if deleted {
                writeln!(out, "Deleted sheet {sheet_id}")?;
            } else {
                printer.not_found(out, &format!("Sheet {sheet_id}"))?;
            }
        }
    }

    Ok(())
}

fn run_nest<W: Write>(
    args: &NestArgs,
    state: &mut AppState,
    printer: &Printer,
    out: &mut W,
) -> Result<(), CliError> {
    let sheet_id = state
        .sheets
        .create(SheetSpec {
            name: "Nest".to_string(),
            width: args.width,
            height: args.height,
            margins: Margins::from(&args.margins),
            material: String::new(),
        })
        .id;

    let requested = register_die_lines(state, &args.die_lines);

    let Some(sheet) = state.sheets.get(sheet_id) else {
        return printer.not_found(out, &format!("Sheet {sheet_id}"));
    };
    let options = NestingOptions {
        spacing: args.spacing,
    };
    let result = nesting::optimize_layout(sheet, &state.die_lines, &requested, &options)?;

    if printer.json {
        return printer.write_json(out, &result);
    }
    write_nesting(out, state, sheet, &result)?;
    Ok(())
}

fn run_nest_auto<W: Write>(
    args: &NestAutoArgs,
    state: &mut AppState,
    printer: &Printer,
    out: &mut W,
) -> Result<(), CliError> {
    let requested = register_die_lines(state, &args.die_lines);
    let range = SheetSizeRange {
        min_width: args.min_width,
        max_width: args.max_width,
        min_height: args.min_height,
        max_height: args.max_height,
    };
    let options = NestingOptions {
        spacing: args.spacing,
    };
    let (sheet, result) =
        nesting::optimize_sheet_size(&state.die_lines, &requested, &range, &options)?;

    if printer.json {
        return printer.write_json(out, &json!({ "sheet": sheet, "result": result }));
    }
    write_nesting(out, state, &sheet, &result)?;
    Ok(())
}

/// Die lines exist only for this invocation, named after their `WxH` text.
fn register_die_lines(state: &mut AppState, die_lines: &[DieLineArg]) -> Vec<DieLineQuantity> {
    die_lines
        .iter()
        .map(|d| DieLineQuantity {
            die_line_id: state.die_lines.create(d.label.as_str(), d.width, d.height).id,
            quantity: d.quantity,
        })
        .collect()
}

struct Printer {
    json: bool,
}

impl Printer {
    fn write_json<W: Write, T: serde::Serialize + ?Sized>(
        &self,
        out: &mut W,
        value: &T,
    ) -> Result<(), CliError> {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
        Ok(())
    }

    /// `what` names the missing record, e.g. "Job JOB001".
    fn not_found<W: Write>(&self, out: &mut W, what: &str) -> Result<(), CliError> {
        tracing::debug!(record = %what, "Record not found");
        let message = format!("{what} not found");
        if self.json {
            return self.write_json(out, &json!({ "error": message }));
        }
        writeln!(out, "{message}")?;
        Ok(())
    }
}

fn labels_text(job: &Job) -> String {
    if job.labels().is_empty() {
        "None".to_string()
    } else {
        job.labels().join(", ")
    }
}

fn packaging_text(job: &Job) -> &str {
    job.packaging_type().unwrap_or("Not set")
}

fn material_text(sheet: &Sheet) -> &str {
    if sheet.material.is_empty() {
        "Not set"
    } else {
        &sheet.material
    }
}

fn write_summary<W: Write>(out: &mut W, job: &Job) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}:", job.job_id())?;
    writeln!(out, "  Status: {}", job.status())?;
    writeln!(out, "  Description: {}", job.description())?;
    writeln!(out, "  Labels: {}", labels_text(job))?;
    writeln!(out, "  Packaging: {}", packaging_text(job))
}

fn write_detail<W: Write>(out: &mut W, job: &Job) -> std::io::Result<()> {
    writeln!(out, "Job ID: {}", job.job_id())?;
    writeln!(out, "Description: {}", job.description())?;
    writeln!(out, "Status: {}", job.status())?;
    writeln!(out, "Labels: {}", labels_text(job))?;
    writeln!(out, "Packaging: {}", packaging_text(job))?;
    writeln!(out, "Created: {}", job.created_at())?;
    writeln!(out, "Updated: {}", job.updated_at())
}

fn write_sheet_fields<W: Write>(out: &mut W, sheet: &Sheet) -> std::io::Result<()> {
    let m = &sheet.margins;
    writeln!(out, "Name: {}", sheet.name)?;
    writeln!(out, "Size: {} x {}", sheet.width, sheet.height)?;
    writeln!(
        out,
        "Margins: top {}, bottom {}, left {}, right {}",
        m.top, m.bottom, m.left, m.right
    )?;
    writeln!(out, "Material: {}", material_text(sheet))
}

fn write_nesting<W: Write>(
    out: &mut W,
    state: &AppState,
    sheet: &Sheet,
    result: &NestingResult,
) -> std::io::Result<()> {
    let requested = result.placements.len() + result.unplaced;
    writeln!(out, "Sheet: {} x {}", sheet.width, sheet.height)?;
    writeln!(out, "Placed: {} of {}", result.placements.len(), requested)?;
    for placement in &result.placements {
        let name = state
            .die_lines
            .get(placement.die_line_id)
            .map_or("?", |d| d.name.as_str());
        writeln!(out, "  {name} at ({}, {})", placement.x, placement.y)?;
    }
    writeln!(out, "Used area: {:.1}", result.used_area)?;
    writeln!(out, "Total area: {:.1}", result.total_area)?;
    writeln!(out, "Utilization: {:.2}%", result.utilization)?;
    writeln!(out, "Waste: {:.2}%", result.waste_percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::registry::JobRegistry;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("label-jobs").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_status() {
        let cli = parse(&["update-status", "JOB001", "in_progress"]).unwrap();
        match cli.command {
            Command::UpdateStatus { job_id, status } => {
                assert_eq!(job_id, "JOB001");
                assert_eq!(status, JobStatus::InProgress);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!(parse(&["update-status", "JOB001", "shipped"]).is_err());
        assert!(parse(&["list", "--status", "in-progress"]).is_err());
    }

    #[test]
    fn test_every_status_accepted() {
        for status in JobStatus::iter() {
            let name = status.to_string();
            let cli = parse(&["update-status", "JOB001", name.as_str()]).unwrap();
            assert!(matches!(cli.command, Command::UpdateStatus { status: s, .. } if s == status));
        }
    }

    #[test]
    fn test_list_status_filter_and_global_json() {
        let cli = parse(&["list", "--status", "completed", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::List {
                status: Some(JobStatus::Completed)
            }
        ));
    }

    #[test]
    fn test_missing_subcommand_shows_help() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn test_parse_die_line() {
        assert_eq!(
            parse_die_line("120x80:4").unwrap(),
            DieLineArg {
                label: "120x80".to_string(),
                width: 120.0,
                height: 80.0,
                quantity: 4,
            }
        );
        assert_eq!(parse_die_line("50.5X20").unwrap().quantity, 1);
        assert!(parse_die_line("120").is_err());
        assert!(parse_die_line("120xabc").is_err());
        assert!(parse_die_line("120x80:-1").is_err());
    }

    #[test]
    fn test_nest_requires_die_line() {
        assert!(parse(&["nest", "--width", "100", "--height", "100"]).is_err());
        let cli = parse(&[
            "nest", "--width", "100", "--height", "100", "--die-line", "50x50:2", "--die-line",
            "10x10",
        ])
        .unwrap();
        match cli.command {
            Command::Nest(args) => {
                assert_eq!(args.die_lines.len(), 2);
                assert_eq!(args.spacing, 5.0);
                assert_eq!(args.margins.margin_top, 0.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_labels_and_packaging_placeholders() {
        let mut registry = JobRegistry::new();
        let job = registry.create("JOB001", "Package 100 units").unwrap();
        assert_eq!(labels_text(job), "None");
        assert_eq!(packaging_text(job), "Not set");

        job.add_label("urgent");
        job.add_label("fragile");
        job.set_packaging_type("cardboard_box");
        assert_eq!(labels_text(job), "urgent, fragile");
        assert_eq!(packaging_text(job), "cardboard_box");
    }
}
