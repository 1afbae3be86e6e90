mod explain;
mod parse;
mod terminal;
mod validate;

use clap::ArgAction;
use explain::Explain;
use parse::Parse;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run()
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Parse scraped section pages into course, section and professor records
    Parse(Parse),

    /// Check record integrity without writing output
    ///
    /// Exits with status 2 if any issue is found.
    Validate(Validate),

    /// Parse one piece of requisite text and print the requirement tree
    Explain(Explain),
}

impl Command {
    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Parse(command) => command.run()?,
            Self::Validate(command) => command.run()?,
            Self::Explain(command) => command.run()?,
        }
        Ok(())
    }
}
