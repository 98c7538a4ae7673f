//! Minimal CLI: discover → parse → emit, one C# file per schema document.
use std::path::PathBuf;
use anyhow::Context;
use clap::{Args, Parser};
use colored::Colorize;

use crate::batch::{BatchReport, BatchSettings, DocumentStatus, DEFAULT_EXTENSION, DEFAULT_OUTPUT_EXTENSION};
use crate::emit::{EmitOptions, DEFAULT_PRINTER};
use crate::validate::ValidationRules;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate C# tagged-union class hierarchies from `.adt` schema documents
#[derive(Parser, Debug)]
#[command(name = "adtgen", version)]
pub struct CommandLineInterface {
    /// root directory to search recursively (defaults to the working directory)
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// schema file extension to look for
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// extension of the generated files
    #[arg(long, default_value = DEFAULT_OUTPUT_EXTENSION)]
    output_extension: String,

    #[command(flatten)]
    emit_settings: EmitSettings,

    #[command(flatten)]
    rule_settings: RuleSettings,

    /// parse and generate, but write nothing
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// write a JSON report of every processed document
    #[arg(long)]
    report: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Args, Debug, Clone)]
struct EmitSettings {
    /// wrap generated code in this namespace
    #[arg(long)]
    namespace: Option<String>,

    /// expression called as `<printer>(this)` by the generated ToString()
    #[arg(long, default_value = DEFAULT_PRINTER)]
    printer: String,
}

#[derive(Args, Debug, Clone)]
struct RuleSettings {
    /// reject schemas that declare no variants
    #[arg(long, default_value_t = false)]
    require_variants: bool,

    /// reject schemas that repeat a variant name
    #[arg(long, default_value_t = false)]
    unique_variant_names: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        // debug path
        if self.no_op {
            eprintln!("{self:#?}");
            return Ok(())
        }

        let settings = self.batch_settings()?;
        let report = crate::batch::run(&settings)?;
        print_summary(&report);

        if let Some(out) = self.report.as_ref() {
            let json = serde_json::to_string_pretty(&report)?;
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, json)
                .with_context(|| format!("failed to write report {}", out.display()))?;
        }
        Ok(())
    }

    fn batch_settings(&self) -> anyhow::Result<BatchSettings> {
        let root = match self.root.clone() {
            Some(root) => root,
            None => std::env::current_dir().context("failed to resolve the working directory")?,
        };
        Ok(BatchSettings {
            root,
            extension: self.extension.trim_start_matches('.').to_string(),
            output_extension: self.output_extension.trim_start_matches('.').to_string(),
            rules: ValidationRules {
                require_variants: self.rule_settings.require_variants,
                unique_variant_names: self.rule_settings.unique_variant_names,
            },
            emit: EmitOptions {
                namespace: self.emit_settings.namespace.clone(),
                printer: self.emit_settings.printer.clone(),
            },
            dry_run: self.dry_run,
        })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn print_summary(report: &BatchReport) {
    for doc in &report.documents {
        let source = doc.source.display();
        match &doc.status {
            DocumentStatus::Generated { output, written: true, .. } => {
                eprintln!("{} {source} → {}", "✓".green(), output.display());
            }
            DocumentStatus::Generated { output, written: false, .. } => {
                eprintln!("{} {source} → {} (dry run)", "✓".green(), output.display());
            }
            DocumentStatus::Aborted { reason } => {
                eprintln!("{} {source}: {reason}", "✗".red());
            }
            DocumentStatus::Failed { reason } => {
                eprintln!("{} {source}: {reason}", "✗".red().bold());
            }
        }
        for diagnostic in &doc.diagnostics {
            eprintln!("  {} {diagnostic}", "!".yellow());
        }
    }
    let totals = format!(
        "{} generated, {} aborted, {} failed",
        report.generated, report.aborted, report.failed
    );
    if report.aborted + report.failed == 0 {
        eprintln!("{}", totals.green());
    } else {
        eprintln!("{}", totals.yellow());
    }
}
