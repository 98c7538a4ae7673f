//! Batch driver: discover schema documents under a root, run each one
//! through parse → validate → emit, and write the artifact next to its
//! source.
//!
//! Documents never share state. A failure in one (bad schema or I/O) is
//! recorded on its [`DocumentReport`] and the batch moves on.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::emit::{emit, EmitOptions};
use crate::parser::{parse_str, ParseOutcome};
use crate::validate::ValidationRules;

pub const DEFAULT_EXTENSION: &str = "adt";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "cs";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub root: PathBuf,
    pub extension: String,
    pub output_extension: String,
    pub rules: ValidationRules,
    pub emit: EmitOptions,
    pub dry_run: bool,
}

impl BatchSettings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            rules: ValidationRules::default(),
            emit: EmitOptions::default(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    /// `written` is false on a dry run.
    Generated { output: PathBuf, variants: Vec<String>, written: bool },
    /// The schema itself was rejected.
    Aborted { reason: String },
    /// Reading or writing failed.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub source: PathBuf,
    pub diagnostics: Vec<String>,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub generated: usize,
    pub aborted: usize,
    pub failed: usize,
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    fn from_documents(documents: Vec<DocumentReport>) -> Self {
        let mut report = BatchReport::default();
        for doc in &documents {
            match doc.status {
                DocumentStatus::Generated { .. } => report.generated += 1,
                DocumentStatus::Aborted { .. } => report.aborted += 1,
                DocumentStatus::Failed { .. } => report.failed += 1,
            }
        }
        report.documents = documents;
        report
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

/// Recursively find `*.<extension>` under `root`, sorted.
pub fn discover(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let base = glob::Pattern::escape(&root.to_string_lossy());
    let pattern = format!("{base}/**/*.{extension}");
    let mut out = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("invalid discovery pattern `{pattern}`"))? {
        let path = entry.context("failed to read directory entry during discovery")?;
        if path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Render every document in parallel, fail any whose output path is claimed
/// more than once, then write the rest.
pub fn run(settings: &BatchSettings) -> Result<BatchReport> {
    let paths = discover(&settings.root, &settings.extension)?;
    info!(root = %settings.root.display(), count = paths.len(), "discovered schema documents");

    let mut rendered = paths
        .par_iter()
        .map(|path| render(path, settings))
        .collect::<Vec<_>>();
    reject_shared_outputs(&mut rendered);

    let documents = rendered
        .into_par_iter()
        .map(|doc| commit(doc, settings.dry_run))
        .collect::<Vec<_>>();

    Ok(BatchReport::from_documents(documents))
}

/// One document on its own, with no check against other documents' outputs.
pub fn process_document(path: &Path, settings: &BatchSettings) -> DocumentReport {
    commit(render(path, settings), settings.dry_run)
}

// ————————————————————————————————————————————————————————————————————————————
// RENDER / COMMIT
// ————————————————————————————————————————————————————————————————————————————

/// A document taken through parse and emit but not yet written.
struct Rendered {
    report: DocumentReport,
    text: Option<String>,   // `Some` only while the status is `Generated`
}

fn render(path: &Path, settings: &BatchSettings) -> Rendered {
    debug!(source = %path.display(), "processing");

    let source = match fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
    {
        Ok(source) => source,
        Err(err) => return Rendered { report: failed(path, Vec::new(), err), text: None },
    };

    let report = parse_str(&source).with_rules(&settings.rules);
    for diagnostic in &report.diagnostics {
        warn!(source = %path.display(), "{diagnostic}");
    }
    let diagnostics = report.diagnostics.iter().map(ToString::to_string).collect();

    let schema = match report.outcome {
        ParseOutcome::Completed(schema) => schema,
        ParseOutcome::Aborted(reason) => {
            error!(source = %path.display(), "{reason}");
            let report = DocumentReport {
                source: path.to_path_buf(),
                diagnostics,
                status: DocumentStatus::Aborted { reason: reason.to_string() },
            };
            return Rendered { report, text: None };
        }
    };

    let text = emit(&schema, &settings.emit);
    let report = DocumentReport {
        source: path.to_path_buf(),
        diagnostics,
        status: DocumentStatus::Generated {
            output: output_path(path, schema.name(), &settings.output_extension),
            variants: schema.variants().iter().map(|v| v.name().to_string()).collect(),
            written: false,
        },
    };
    Rendered { report, text: Some(text) }
}

/// Every document that would write to an already-claimed path fails, the
/// first claimant included.
fn reject_shared_outputs(rendered: &mut [Rendered]) {
    let mut claims: BTreeMap<PathBuf, Vec<usize>> = BTreeMap::new();
    for (index, doc) in rendered.iter().enumerate() {
        if let DocumentStatus::Generated { output, .. } = &doc.report.status {
            claims.entry(output.clone()).or_default().push(index);
        }
    }

    for (output, claimants) in claims {
        if claimants.len() < 2 {
            continue;
        }
        let sources = claimants
            .iter()
            .map(|&index| rendered[index].report.source.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        for index in claimants {
            let doc = &mut rendered[index];
            let source = doc.report.source.clone();
            let diagnostics = std::mem::take(&mut doc.report.diagnostics);
            let err = anyhow!("{} is the output of more than one document ({sources})", output.display());
            doc.report = failed(&source, diagnostics, err);
            doc.text = None;
        }
    }
}

fn commit(rendered: Rendered, dry_run: bool) -> DocumentReport {
    let Rendered { mut report, text } = rendered;
    let Some(text) = text else { return report };
    let DocumentStatus::Generated { output, written, .. } = &mut report.status else { return report };

    if !dry_run {
        if let Err(err) = fs::write(&*output, text)
            .with_context(|| format!("failed to write {}", output.display()))
        {
            return failed(&report.source, report.diagnostics, err);
        }
        *written = true;
    }
    info!(source = %report.source.display(), output = %output.display(), dry_run, "generated");
    report
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `<dir of source>/<SchemaName>.<ext>`
fn output_path(source: &Path, schema_name: &str, extension: &str) -> PathBuf {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{schema_name}.{extension}"))
}

fn failed(path: &Path, diagnostics: Vec<String>, err: anyhow::Error) -> DocumentReport {
    error!(source = %path.display(), "{err:#}");
    DocumentReport {
        source: path.to_path_buf(),
        diagnostics,
        status: DocumentStatus::Failed { reason: format!("{err:#}") },
    }
}
