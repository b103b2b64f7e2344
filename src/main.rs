use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use kadaical_core::{AcademicYear, FeedConfig, Grade, generate_feed};

#[derive(Parser)]
#[command(name = "kadaical")]
#[command(about = "Generate per-grade iCalendar feeds from yearly CSV schedules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one grade's feed to stdout or a file
    Generate {
        /// Academic year (e.g., "2024"); defaults to the current one
        #[arg(short, long)]
        year: Option<String>,

        /// Grade 0-7 (0 = all grades)
        #[arg(short, long)]
        grade: Option<String>,

        /// Directory with one <year>.csv per academic year
        /// (defaults to schedule_dir from config)
        #[arg(long)]
        schedule_dir: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            year,
            grade,
            schedule_dir,
            output,
        } => cmd_generate(year, grade, schedule_dir, output),
    }
}

fn cmd_generate(
    year: Option<String>,
    grade: Option<String>,
    schedule_dir: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = FeedConfig::load()?;
    let schedule_dir = schedule_dir.unwrap_or(config.schedule_dir);

    let year = AcademicYear::from_param(year.as_deref(), Local::now().date_naive());
    let grade = Grade::from_param(grade.as_deref());

    let ics = generate_feed(&schedule_dir, year, grade)
        .with_context(|| format!("generating the {year} feed for {grade}"))?;

    match output {
        Some(path) => {
            fs::write(&path, &ics)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {} ({} feed for {})", path.display(), year, grade);
        }
        None => print!("{ics}"),
    }

    Ok(())
}
