mod logging;
mod report;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use oee_core::{config::data_dir, DashboardConfig, DashboardSession, SessionLogRepository};
use tracing::debug;

#[derive(Parser)]
#[command(name = "oee")]
#[command(about = "Overall Equipment Effectiveness dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compute OEE for one shift (usage: calc planned:480 down:60 cycle:0.5 total:800 good:780)
    Calc {
        /// Shift inputs as key:value; omitted keys use the configured defaults
        args: Vec<String>,
        /// Append the result to the session log
        #[arg(long)]
        save: bool,
        /// Date to file the entry under (today, yesterday, -3d, fri, 2025-01-31)
        #[arg(long, allow_hyphen_values = true)]
        date: Option<String>,
        /// Write the session log as CSV to this path
        #[arg(long, requires = "save")]
        export: Option<PathBuf>,
    },
    /// Open the Terminal User Interface
    Tui {
        /// Initial shift inputs as key:value
        args: Vec<String>,
        /// Initial log date
        #[arg(long, allow_hyphen_values = true)]
        date: Option<String>,
    },
}

fn new_session(
    config: &DashboardConfig,
    args: &[String],
    date: Option<&str>,
) -> Result<DashboardSession<SessionLogRepository>> {
    let mut session = DashboardSession::from_config(config);
    if !args.is_empty() {
        session.update_inputs(&args.join(" "))?;
    }
    if let Some(d) = date {
        session.select_log_date(d)?;
    }
    Ok(session)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Calc { args, save, date, export }) => {
            logging::init_stderr();
            let config = DashboardConfig::load()?;
            debug!(?config, "loaded config");

            let mut session = new_session(&config, &args, date.as_deref())?;
            report::show_kpis(session.inputs(), session.result(), &config.thresholds);

            if save {
                let entry = session.save();
                println!("Saved entry for {}", entry.date.format("%Y-%m-%d"));
                report::show_log(session.entries());
            }

            if let Some(path) = export {
                match session.export_to(&path)? {
                    Some(p) => println!("Exported {} rows to {}", session.entries().len(), p.display()),
                    None => println!("No data available yet."),
                }
            }
        },
        Some(Commands::Tui { args, date }) => run_tui(&args, date.as_deref())?,
        None => run_tui(&[], None)?,
    }
    Ok(())
}

fn run_tui(args: &[String], date: Option<&str>) -> Result<()> {
    logging::init_file(&data_dir()?)?;
    let config = DashboardConfig::load()?;
    let session = new_session(&config, args, date)?;
    tui::run(session, config.export_file)
}
