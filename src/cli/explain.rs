use std::{fmt::Write as _, path::PathBuf};

use clap::Parser;
use coursebook::{
    Collection, ParseEnv, Registry, Requirement, ingest,
    requisite::{self, RequisiteKind, Requisites},
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Parse one piece of requisite text and show the result")]
pub struct Explain {
    /// Requisite text, e.g. "Prerequisite: CS 1337 with a grade of C or better."
    text: String,

    /// Directory of scraped section documents to resolve course codes against
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Configuration file (defaults to config.toml in the input directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog year preferred when resolving course codes, e.g. 23
    #[arg(long, default_value = "")]
    catalog_year: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Explain {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let (registry, config) = match &self.input {
            Some(input) => {
                let config = ingest::load_config(input, self.config.as_deref())?;
                let (registry, _) = ingest::build_registry(input, &config)?;
                (registry, config)
            }
            None => {
                let config = ingest::load_config(&PathBuf::from("."), self.config.as_deref())?;
                (Registry::new(), config)
            }
        };
        let env = ParseEnv {
            registry: &registry,
            catalog_year: &self.catalog_year,
            default_grade: config.default_minimum_grade(),
        };

        // Text without a category label is read as a single requisite list.
        let mut requisites = requisite::parse_requisites(&self.text, env);
        if RequisiteKind::ALL
            .iter()
            .all(|kind| kind.text_in(&self.text).is_none())
        {
            requisites.prerequisites = requisite::parse_requisite_text(&self.text, env);
        }

        match self.output {
            OutputFormat::Pretty => print!("{}", outline(&requisites)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&requisites)?),
        }
        Ok(())
    }
}

fn outline(requisites: &Requisites) -> String {
    let categories = [
        ("Prerequisite or corequisite", &requisites.co_or_pre_requisites),
        ("Prerequisites", &requisites.prerequisites),
        ("Corequisites", &requisites.corequisites),
    ];
    let mut out = String::new();
    for (title, collection) in categories {
        if let Some(collection) = collection {
            let _ = writeln!(out, "{}", title.label());
            write_collection(&mut out, collection, 1);
        }
    }
    if out.is_empty() {
        out.push_str(&"No requisites found\n".dim());
    }
    out
}

fn write_collection(out: &mut String, collection: &Collection, depth: usize) {
    let count = collection.options.len();
    let rule = if collection.required == count {
        "all of".to_string()
    } else if collection.required == 1 {
        "any of".to_string()
    } else {
        format!("{} of {count}", collection.required)
    };
    let _ = writeln!(
        out,
        "{}{} {}",
        "  ".repeat(depth),
        rule,
        collection.name.dim()
    );
    for option in &collection.options {
        write_requirement(out, option, depth + 1);
    }
}

fn write_requirement(out: &mut String, requirement: &Requirement, depth: usize) {
    let indent = "  ".repeat(depth);
    let line = match requirement {
        Requirement::Collection(collection) => {
            write_collection(out, collection, depth);
            return;
        }
        Requirement::Choice { choices } => {
            let _ = writeln!(out, "{indent}only one of");
            for option in &choices.options {
                write_requirement(out, option, depth + 1);
            }
            return;
        }
        Requirement::Hours {
            minimum,
            maximum,
            options,
        } => {
            let range = match (minimum, maximum) {
                (Some(min), Some(max)) => format!("{min}-{max}"),
                (Some(min), None) => format!("at least {min}"),
                (None, Some(max)) => format!("at most {max}"),
                (None, None) => "some".to_string(),
            };
            let _ = writeln!(out, "{indent}hours: {range}");
            for option in options {
                write_requirement(out, option, depth + 1);
            }
            return;
        }
        Requirement::Course {
            class_reference,
            minimum_grade,
        } => format!("course {class_reference} (grade {minimum_grade} or better)"),
        Requirement::Section { section_reference } => format!("section {section_reference}"),
        Requirement::Exam {
            exam_reference,
            minimum_score,
        } => format!("exam {exam_reference} (score {minimum_score})"),
        Requirement::Major { major } => format!("major: {major}"),
        Requirement::Minor { minor } => format!("minor: {minor}"),
        Requirement::Gpa { minimum, subset } if subset.is_empty() => format!("GPA {minimum}"),
        Requirement::Gpa { minimum, subset } => format!("GPA {minimum} in {subset}"),
        Requirement::Consent { granter } => format!("consent of {granter}"),
        Requirement::Other { description, .. } => format!("other: {}", description.warning()),
        Requirement::Limit { max_hours } => format!("at most {max_hours} hours"),
        Requirement::Core {
            core_flag,
            hours: Some(hours),
        } => format!("{hours} hours in core {core_flag}"),
        Requirement::Core {
            core_flag,
            hours: None,
        } => format!("core {core_flag} completed"),
        Requirement::Throwaway => return,
    };
    let _ = writeln!(out, "{indent}{line}");
}
