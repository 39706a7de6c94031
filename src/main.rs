use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use fundview::cli::{handle_report_command, OutputFormat, OutputOptions, ReportCommands, ReportContext};
use fundview::config::{FundviewPaths, Settings};

#[derive(Parser)]
#[command(
    name = "fundview",
    author = "Kaylee Beyene",
    version,
    about = "Budget dashboard view models from the command line",
    long_about = "fundview derives dashboard-ready views from budgeting data: \
                  category shares, donut chart geometry, budget progress status, \
                  randomized monthly distributions and paged transaction tables."
)]
struct Cli {
    /// Settings file to use instead of the platform config directory
    #[arg(long, global = true, env = "FUNDVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Stdout rendering
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write an export file instead (.csv, .json, .yaml)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config {
        /// Write the resolved settings to the config directory
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    fundview::init_tracing();

    let cli = Cli::parse();

    // The platform config dir is only resolved when no settings file is given
    let (paths, settings_file, settings) = match &cli.config {
        Some(path) => (None, path.clone(), Settings::load_from(path)?),
        None => {
            let paths = FundviewPaths::new()?;
            let settings = Settings::load(&paths)?;
            let file = paths.settings_file();
            (Some(paths), file, settings)
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let ctx = ReportContext::new(&settings, OutputOptions::new(cli.format, cli.output));
            handle_report_command(&ctx, cmd, &mut out)?;
        }
        Some(Commands::Config { init }) => {
            if init {
                match &paths {
                    Some(paths) => settings.save(paths)?,
                    None => settings.save_to(&settings_file)?,
                }
                writeln!(out, "Settings written to: {}", settings_file.display())?;
            }
            writeln!(out, "fundview Configuration")?;
            writeln!(out, "======================")?;
            writeln!(out, "Settings file: {}", settings_file.display())?;
            writeln!(out)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&settings)?)?;
        }
        None => {
            writeln!(out, "fundview - budget dashboard view models")?;
            writeln!(out)?;
            writeln!(out, "Run 'fundview --help' for usage information.")?;
        }
    }

    out.flush()?;
    Ok(())
}
