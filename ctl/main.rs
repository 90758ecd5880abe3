#![forbid(unsafe_code)]

//! `portfolio-ctl`: offline companion for `portfolio-site`.
//!
//! Inspects and validates case study tables without starting the server.
//! Reads the table compiled into the binary unless `--content` points at
//! a JSON file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use portfolio_site::content::{CaseStudySummary, ContentRepository};
use portfolio_site::models::case_study::CaseStudy;
use portfolio_site::{AppError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "portfolio-ctl",
    about = "Inspect and validate portfolio content tables",
    version,
    long_about = None
)]
struct Cli {
    /// JSON content table to read instead of the embedded one.
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List case studies in declaration order.
    List {
        /// Skip entries marked as coming soon.
        #[arg(long)]
        published: bool,
        /// Only entries carrying this tag (case-insensitive).
        #[arg(long)]
        tag: Option<String>,
    },

    /// Print every slug.
    Slugs,

    /// Print one case study as JSON.
    Show {
        /// Exact, case-sensitive slug.
        slug: String,
    },

    /// Validate the table and print counts.
    Check,
}

fn main() -> ExitCode {
    let args = Cli::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<()> {
    let repo = match &args.content {
        Some(path) => ContentRepository::load_from_path(path)?,
        None => ContentRepository::embedded()?,
    };

    match &args.command {
        Command::List { published, tag } => {
            let studies: Vec<&CaseStudy> = match tag {
                Some(tag) => repo.list_by_tag(tag),
                None => repo.list_all().iter().collect(),
            };
            for study in studies
                .into_iter()
                .filter(|study| !*published || study.is_published())
            {
                println!("{}", list_line(&CaseStudySummary::from(study)));
            }
        }
        Command::Slugs => {
            for slug in repo.slugs() {
                println!("{slug}");
            }
        }
        Command::Show { slug } => {
            let study = repo
                .get_by_slug(slug)
                .ok_or_else(|| AppError::NotFound(format!("no case study with slug {slug}")))?;
            let json = serde_json::to_string_pretty(study)
                .map_err(|err| AppError::Content(format!("failed to render {slug}: {err}")))?;
            println!("{json}");
        }
        Command::Check => {
            println!(
                "ok: {} case studies, {} published",
                repo.len(),
                repo.list_published().len()
            );
        }
    }

    Ok(())
}

fn list_line(summary: &CaseStudySummary) -> String {
    let marker = if summary.coming_soon {
        " (coming soon)"
    } else {
        ""
    };
    format!(
        "{:<16} {:<12} {}{marker}",
        summary.slug, summary.category, summary.title
    )
}
