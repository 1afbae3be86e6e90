use std::path::PathBuf;

use clap::Parser;
use coursebook::{domain::validation, ingest};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Check scraped records for duplicates and dangling references")]
pub struct Validate {
    /// Directory of scraped section documents
    #[arg(long, short)]
    input: PathBuf,

    /// Configuration file (defaults to config.toml in the input directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Validate {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let config = ingest::load_config(&self.input, self.config.as_deref())?;
        let (mut registry, skipped) = ingest::build_registry(&self.input, &config)?;
        ingest::parse_requisites(&mut registry, &config);

        let issues: Vec<String> = validation::issues(&registry)
            .iter()
            .map(ToString::to_string)
            .collect();

        match self.output {
            OutputFormat::Table => {
                println!(
                    "Checked {} courses, {} sections and {} professors",
                    registry.course_count(),
                    registry.section_count(),
                    registry.professor_count()
                );
                if skipped > 0 {
                    println!("{}", format!("Skipped {skipped} unreadable documents").dim());
                }
                if issues.is_empty() {
                    println!("\n{}", "Records are consistent (0 issues)".success());
                } else {
                    println!("\n{}", format!("{} issues found:", issues.len()).warning());
                    for issue in &issues {
                        println!("  • {issue}");
                    }
                }
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "courses": registry.course_count(),
                    "sections": registry.section_count(),
                    "professors": registry.professor_count(),
                    "skipped_documents": skipped,
                    "issues": issues,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }

        if !issues.is_empty() {
            std::process::exit(2);
        }
        Ok(())
    }
}
