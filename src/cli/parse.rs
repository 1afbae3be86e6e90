use std::path::PathBuf;

use clap::Parser;
use coursebook::{Options, ingest};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Parse scraped section pages and write catalog records")]
pub struct Parse {
    /// Directory of scraped section documents
    #[arg(long, short)]
    input: PathBuf,

    /// Directory to write Courses.json, Sections.json and Professors.json to
    #[arg(long, short)]
    output: PathBuf,

    /// Configuration file (defaults to config.toml in the input directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write output without checking record integrity
    #[arg(long)]
    skip_validation: bool,
}

impl Parse {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let options = Options {
            input: self.input,
            output: self.output,
            config: self.config,
            skip_validation: self.skip_validation,
        };
        let summary = ingest::run(&options)?;

        println!(
            "{}",
            format!(
                "Wrote {} courses, {} sections and {} professors to {}",
                summary.courses,
                summary.sections,
                summary.professors,
                options.output.display()
            )
            .success()
        );
        if summary.skipped_documents > 0 {
            println!(
                "{}",
                format!(
                    "Skipped {} unreadable documents (run with -v for details)",
                    summary.skipped_documents
                )
                .warning()
            );
        }
        Ok(())
    }
}
