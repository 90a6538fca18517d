//! # Analyze CLI — Run an assessment over a set of documents.
//!
//! ```bash
//! # Dashboard invocation: documents as a JSON array of paths.
//! otcc analyze --assessment-id a-42 --output-dir out \
//!     --documents '["docs/ot_policy.pdf", "docs/network_diagram.docx"]'
//!
//! # Ad-hoc: positional files and/or a whole directory.
//! otcc analyze --output-dir out --detailed docs/backup_procedure.md --directory evidence/
//! ```
//!
//! Progress is written to stdout as one JSON object per line:
//!
//! ```text
//! {"progress":10,"status":"Analyzing document 1 of 2"}
//! {"progress":45,"status":"Analyzing document 2 of 2"}
//! {"progress":80,"status":"Generating assessment results"}
//! {"progress":90,"status":"Preparing recommendations"}
//! {"progress":100,"status":"Assessment complete"}
//! ```
//!
//! A malformed `--documents` value prints
//! `{"error": "...", "status": "Failed"}` and exits 1 before any document is
//! read or any file written.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use otcc_assess::AssessmentSession;
use otcc_catalog::ControlCatalog;
use otcc_core::OtccError;
use otcc_extract::FileTextExtractor;

use crate::config::CliConfig;

/// Summary report file name.
pub const RESULTS_FILE: &str = "results.json";
/// Detailed export file name.
pub const DETAILS_FILE: &str = "assessment_details.json";

/// Analyze subcommand arguments.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// JSON array of document paths.
    #[arg(long)]
    pub documents: Option<String>,

    /// Directory whose supported files are all analyzed.
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Document files to analyze.
    pub files: Vec<PathBuf>,

    /// Directory receiving results.json (and assessment_details.json).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Identifier recorded in the report. Defaults to a random UUID.
    #[arg(long)]
    pub assessment_id: Option<String>,

    /// Also write the detailed per-control export.
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Serialize)]
struct ProgressEvent<'a> {
    progress: u8,
    status: &'a str,
}

#[derive(Serialize)]
struct FailureEvent<'a> {
    error: &'a str,
    status: &'static str,
}

fn emit<W: Write, T: Serialize>(out: &mut W, event: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn progress<W: Write>(out: &mut W, progress: u8, status: &str) -> Result<()> {
    emit(out, &ProgressEvent { progress, status })
}

/// Progress percentage while analyzing document `index` of `total`.
///
/// Spans 10 (first document) up to, but not including, 80.
pub fn document_progress(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 10;
    }
    (10.0 + index as f64 / total as f64 * 70.0) as u8
}

/// Parse the `--documents` value as a JSON array of paths.
pub fn parse_document_list(raw: &str) -> Result<Vec<PathBuf>, OtccError> {
    serde_json::from_str::<Vec<PathBuf>>(raw).map_err(|e| {
        let reason = if e.is_data() {
            "documents parameter must be a JSON array of file paths"
        } else {
            "Invalid JSON in documents parameter"
        };
        OtccError::InvalidDocumentList(reason.to_string())
    })
}

/// Execute the analyze subcommand, writing progress to stdout.
pub fn run_analyze(args: &AnalyzeArgs, catalog: &ControlCatalog, config: &CliConfig) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_analyze_to(args, catalog, config, &mut out)
}

/// Execute the analyze subcommand, writing progress to `out`.
pub fn run_analyze_to<W: Write>(
    args: &AnalyzeArgs,
    catalog: &ControlCatalog,
    config: &CliConfig,
    out: &mut W,
) -> Result<u8> {
    let mut documents: Vec<PathBuf> = match args.documents.as_deref().map(parse_document_list) {
        Some(Ok(list)) => list,
        Some(Err(e)) => {
            let message = match &e {
                OtccError::InvalidDocumentList(reason) => reason.clone(),
                other => other.to_string(),
            };
            emit(
                out,
                &FailureEvent {
                    error: &message,
                    status: "Failed",
                },
            )?;
            return Ok(1);
        }
        None => Vec::new(),
    };
    documents.extend(args.files.iter().cloned());

    if args.documents.is_none() && args.files.is_empty() && args.directory.is_none() {
        anyhow::bail!("no documents given: use --documents, --directory, or positional files");
    }

    let output_dir = args
        .output_dir
        .as_deref()
        .or(config.output_dir.as_deref())
        .context("--output-dir is required (or set output_dir in the config file)")?;
    let assessment_id = args
        .assessment_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let detailed = args.detailed || config.detailed_export;

    tracing::info!(
        assessment_id = %assessment_id,
        catalog = catalog.name(),
        documents = documents.len(),
        "starting assessment"
    );

    let mut session = AssessmentSession::new(catalog.clone())?;
    let extractor = FileTextExtractor::new();

    let total = documents.len();
    for (i, path) in documents.iter().enumerate() {
        progress(
            out,
            document_progress(i, total),
            &format!("Analyzing document {} of {}", i + 1, total),
        )?;
        session.analyze_document(path, None, &extractor);
    }

    if let Some(dir) = &args.directory {
        progress(
            out,
            document_progress(total, total.max(1)).min(79),
            &format!("Analyzing directory {}", dir.display()),
        )?;
        session
            .analyze_directory(dir, &extractor)
            .with_context(|| format!("failed to analyze directory: {}", dir.display()))?;
    }

    progress(out, 80, "Generating assessment results")?;
    session.generate_assessment();

    progress(out, 90, "Preparing recommendations")?;
    let report = session.report(&assessment_id);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;
    write_json(&output_dir.join(RESULTS_FILE), &report)?;
    if detailed {
        let export = session.detailed_export()?;
        write_json(&output_dir.join(DETAILS_FILE), &export)?;
    }

    tracing::info!(
        assessment_id = %assessment_id,
        overall = report.overall_score,
        status = %report.compliance_status,
        documents = report.documents_analyzed,
        "assessment complete"
    );
    progress(out, 100, "Assessment complete")?;
    Ok(0)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
