use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Color, Table};
use tracing::{info, info_span};

use ligand_cli::load::{load_input, source_names};
use ligand_core::{PipelineReport, list_parameters, run, select_parameter};
use ligand_ingest::{export_prefix, read_sheet};
use ligand_model::PipelineOptions;
use ligand_output::{ExportSet, export_tables};

use crate::cli::{ColumnArgs, MergeArgs, ParametersArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::MergeResult;

pub fn run_merge(args: &MergeArgs) -> Result<MergeResult> {
    let options = pipeline_options(&args.columns);
    let prefix = export_prefix(&source_names(&args.sdf_files));
    let merge_span = info_span!("merge_command", prefix = %prefix);
    let _merge_guard = merge_span.enter();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.sdf_files));

    // =========================================================================
    // Stage 1: Load inputs and run the merge
    // =========================================================================
    let mut input = load_input(&args.sdf_files, args.pharmacology.as_deref());
    if let Some(parameter) = &args.parameter {
        input = input.with_parameter(parameter.as_str());
    }
    let report = run(&input, &options);

    // =========================================================================
    // Stage 2: Export
    // =========================================================================
    let mut exported = Vec::new();
    if args.dry_run {
        info!("dry run: skipping export");
    } else if !report.aborted() {
        let set = ExportSet {
            prefix: &prefix,
            full: report.full_table.as_ref(),
            measurement: report
                .selected_parameter
                .as_deref()
                .zip(report.measurement_table.as_ref()),
        };
        exported = export_tables(set, &output_dir)
            .with_context(|| format!("export tables to {}", output_dir.display()))?;
    }
    if let Some(path) = &args.report {
        write_report(&report, path)?;
    }

    Ok(MergeResult {
        prefix,
        output_dir,
        dry_run: args.dry_run,
        exported,
        report,
    })
}

pub fn run_parameters(args: &ParametersArgs) -> Result<()> {
    let options = pipeline_options(&args.columns);
    let path = &args.pharmacology;
    let grid = read_sheet(path)
        .with_context(|| format!("read pharmacology sheet {}", path.display()))?;
    let Some(parameters) = list_parameters(&grid, &options) else {
        bail!(
            "no row starting with '{}' found in {}",
            options.sheet_identifier_label,
            path.display()
        );
    };
    if parameters.is_empty() {
        println!("No '{}' values found.", options.parameter_column);
        return Ok(());
    }
    let default = select_parameter(&parameters, None, &options);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Parameter"), header_cell("Default")]);
    apply_table_style(&mut table);
    for parameter in &parameters {
        let marker = if default.as_ref() == Some(parameter) {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![Cell::new(parameter), marker]);
    }
    println!("{table}");
    Ok(())
}

fn pipeline_options(columns: &ColumnArgs) -> PipelineOptions {
    PipelineOptions::new()
        .with_identifier_property(columns.identifier_property.as_str())
        .with_display_name_property(columns.display_name_property.as_str())
        .with_sheet_identifier_label(columns.sheet_label.as_str())
        .with_preferred_parameter(columns.preferred_parameter.as_str())
}

fn default_output_dir(sdf_files: &[PathBuf]) -> PathBuf {
    sdf_files
        .first()
        .and_then(|path| path.parent())
        .unwrap_or_else(|| Path::new("."))
        .join("output")
}

fn write_report(report: &PipelineReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    info!(path = %path.display(), "wrote run report");
    Ok(())
}
