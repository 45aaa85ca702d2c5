#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use grafik::{io, open_roster, stem_collisions, CalendarExporter, ParserConfig, ScheduleParser};
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_LOG_FILE: &str = "grafik.log";

/// Convertit un tableau de service mensuel en un fichier .ics par employé
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Classeur du tableau de service (xls, xlsx, ods)
    roster: PathBuf,

    /// Configuration JSON (disposition, mois, horaires)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dossier de sortie des fichiers .ics
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Export CSV de toutes les gardes (optionnel)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Affiche les calendriers sans rien écrire
    #[arg(long)]
    dry_run: bool,

    /// Journal (ouvert en ajout)
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// -v debug, -vv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[cfg(feature = "logging")]
fn init_logging(path: &std::path::Path, verbosity: u8) -> Result<()> {
    use std::fs::OpenOptions;
    use std::sync::Mutex;
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("grafik={level},grafik_cli={level}")));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help / --version passent par stdout et ne sont pas journalisés
            if err.use_stderr() {
                #[cfg(feature = "logging")]
                let _ = init_logging(std::path::Path::new(DEFAULT_LOG_FILE), 0);
                info!(kind = ?err.kind(), "invalid command line, no roster processed");
            }
            err.exit();
        }
    };

    #[cfg(feature = "logging")]
    init_logging(&cli.log_file, cli.verbose)?;

    info!(roster = %cli.roster.display(), "program started");

    let config = match &cli.config {
        Some(path) => ParserConfig::from_json_file(path)?,
        None => ParserConfig::default(),
    };
    let sheet = open_roster(&cli.roster)
        .with_context(|| format!("loading roster {}", cli.roster.display()))?;
    let parser = ScheduleParser::new(config);
    let schedule = parser.parse(&sheet)?;
    let config = parser.config();

    println!(
        "Schedule {:04}-{:02}: {} employee(s)",
        schedule.header.year(),
        schedule.header.month(),
        schedule.employees.len()
    );
    for employee in &schedule.employees {
        println!("{employee}");
    }

    if let Some(path) = &cli.csv {
        if cli.dry_run {
            info!(path = %path.display(), "dry run, CSV report not written");
        } else {
            io::export_shifts_csv(path, &schedule.employees, &config.shifts)?;
        }
    }

    for (stem, rows) in stem_collisions(&schedule.employees) {
        warn!(stem = stem.as_str(), ?rows, "several employees share one calendar file");
        eprintln!("warning: rows {rows:?} all export to {stem}.ics, only the last one is kept");
    }

    let exporter = CalendarExporter::new(&config.shifts, &config.export);
    let mut written = 0usize;
    for employee in &schedule.employees {
        if cli.dry_run {
            if !employee.shifts.is_empty() {
                print!("{}", exporter.render(&exporter.events(employee), Utc::now()));
            }
            continue;
        }
        if exporter.export_to_dir(employee, &cli.out_dir)?.is_some() {
            written += 1;
        }
    }

    if !cli.dry_run {
        println!("{written} calendar(s) written to {}", cli.out_dir.display());
    }
    info!(written, "program ended");
    Ok(())
}
