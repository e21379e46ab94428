//! `glorpi validate` and `glorpi fix`

use super::input::load_project;
use super::output::print_json;
use anyhow::{bail, Context, Result};
use clap::Args;
use glorpi_core::{apply_fix, validate_prompt, Project, Severity, ValidationIssue};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project file (`-` for stdin)
    pub project: PathBuf,
}

#[derive(Args, Debug)]
pub struct FixArgs {
    /// Project file (`-` for stdin)
    pub project: PathBuf,
    /// Issue id to fix; repeatable
    #[arg(long = "issue", required_unless_present = "all")]
    pub issues: Vec<String>,
    /// Apply every auto-fixable issue
    #[arg(long)]
    pub all: bool,
    /// Write the fixed project here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

fn print_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        println!("No issues found.");
        return;
    }
    for issue in issues {
        let marker = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warn ",
            Severity::Info => "info ",
        };
        let fixable = if issue.auto_fixable { " [fixable]" } else { "" };
        println!("{marker} {}: {}{fixable}", issue.id, issue.title);
        println!("      {}", issue.description);
        if let Some(suggestion) = &issue.suggestion {
            println!("      suggestion: {suggestion}");
        }
    }
}

pub fn run_validate(args: ValidateArgs, json: bool) -> Result<()> {
    let project = load_project(&args.project)?;
    let issues = validate_prompt(&project.blocks);

    if json {
        print_json(&issues)?;
    } else {
        print_issues(&issues);
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    if errors > 0 {
        bail!("{errors} blocking issue(s) found");
    }
    Ok(())
}

/// Apply fixes one at a time, re-validating in between so block-scoped ids
/// stay current.
fn fix_project(mut project: Project, wanted: &[String], all: bool) -> Result<(Project, Vec<String>)> {
    let mut applied = Vec::new();
    loop {
        let issues = validate_prompt(&project.blocks);
        let next = issues.iter().find(|issue| {
            issue.auto_fixable
                && !applied.contains(&issue.id)
                && (all || wanted.contains(&issue.id))
        });
        let Some(issue) = next else { break };
        let Some(blocks) = apply_fix(issue, &project.blocks) else {
            bail!("Issue {} has no automatic fix", issue.id);
        };
        info!(issue = %issue.id, "Applied fix");
        applied.push(issue.id.clone());
        project.blocks = blocks;
    }

    if let Some(missing) = wanted.iter().find(|id| !applied.contains(id)) {
        bail!("Issue {missing} was not found or cannot be fixed automatically");
    }
    Ok((project, applied))
}

pub fn run_fix(args: FixArgs) -> Result<()> {
    let project = load_project(&args.project)?;
    let (fixed, applied) = fix_project(project, &args.issues, args.all)?;

    let text = serde_json::to_string_pretty(&fixed).context("Failed to serialize project")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Applied {} fix(es), wrote {}", applied.len(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
