use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, CatalogService, Clock, EntryService, PreferenceService, ProgressService,
};
use storage::repository::Storage;
use storage::seed::seed_sample;
use study_core::countdown::default_exam_date;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStore { raw: String },
    InvalidDbUrl { raw: String },
    InvalidDataDir { raw: String },
    InvalidExamDate { raw: String },
    InvalidDays { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStore { raw } => {
                write!(f, "invalid --store value (expected local or sqlite): {raw}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidDataDir { raw } => write!(f, "invalid --data-dir value: {raw}"),
            ArgsError::InvalidExamDate { raw } => {
                write!(f, "invalid --exam-date value (expected YYYY-MM-DD): {raw}")
            }
            ArgsError::InvalidDays { raw } => write!(f, "invalid --days value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    exam_date: NaiveDate,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn exam_date(&self) -> NaiveDate {
        self.exam_date
    }

    fn entries(&self) -> Arc<EntryService> {
        self.services.entries()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn preferences(&self) -> Arc<PreferenceService> {
        self.services.preferences()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreKind {
    Local,
    Sqlite,
}

impl StoreKind {
    fn parse(raw: &str) -> Result<Self, ArgsError> {
        match raw.trim() {
            "local" => Ok(Self::Local),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ArgsError::InvalidStore {
                raw: raw.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Args {
    store: StoreKind,
    db_url: String,
    data_dir: PathBuf,
    exam_date: NaiveDate,
    days: u32,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--store local|sqlite] [--db <sqlite_url>]");
    eprintln!("                           [--data-dir <path>] [--exam-date YYYY-MM-DD]");
    eprintln!("  cargo run -p app -- seed [--store local|sqlite] [--db <sqlite_url>]");
    eprintln!("                           [--data-dir <path>] [--days <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --store sqlite");
    eprintln!("  --db sqlite://study.sqlite3");
    eprintln!("  --data-dir ./study-data");
    eprintln!("  --exam-date 2025-03-15");
    eprintln!("  --days 7");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_STORE, STUDY_DB_URL, STUDY_DATA_DIR, STUDY_EXAM_DATE, RUST_LOG");
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        let store = match std::env::var("STUDY_STORE") {
            Ok(raw) => StoreKind::parse(&raw)?,
            Err(_) => StoreKind::Sqlite,
        };
        let db_url = std::env::var("STUDY_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://study.sqlite3".into(), normalize_sqlite_url);
        let data_dir = std::env::var("STUDY_DATA_DIR")
            .ok()
            .map_or_else(|| PathBuf::from("study-data"), PathBuf::from);
        let exam_date = match std::env::var("STUDY_EXAM_DATE") {
            Ok(raw) => parse_date(&raw).ok_or(ArgsError::InvalidExamDate { raw })?,
            Err(_) => default_exam_date(),
        };

        Ok(Self {
            store,
            db_url,
            data_dir,
            exam_date,
            days: 7,
        })
    }

    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_env()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => {
                    let value = require_value(args, "--store")?;
                    parsed.store = StoreKind::parse(&value)?;
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--data-dir" => {
                    let value = require_value(args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataDir { raw: value });
                    }
                    parsed.data_dir = PathBuf::from(value);
                }
                "--exam-date" if cmd == Command::Ui => {
                    let value = require_value(args, "--exam-date")?;
                    parsed.exam_date = parse_date(&value)
                        .ok_or_else(|| ArgsError::InvalidExamDate { raw: value.clone() })?;
                }
                "--days" if cmd == Command::Seed => {
                    let value = require_value(args, "--days")?;
                    parsed.days = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidDays { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn open_services(
    args: &Args,
    clock: Clock,
) -> Result<AppServices, Box<dyn std::error::Error>> {
    let services = match args.store {
        StoreKind::Sqlite => {
            prepare_sqlite_file(&args.db_url)?;
            info!(db = %args.db_url, "opening sqlite store");
            AppServices::new_sqlite(&args.db_url, clock).await?
        }
        StoreKind::Local => {
            info!(dir = %args.data_dir.display(), "opening local store");
            AppServices::new_local(&args.data_dir, clock).await?
        }
    };
    Ok(services)
}

async fn open_storage(args: &Args) -> Result<Storage, Box<dyn std::error::Error>> {
    let storage = match args.store {
        StoreKind::Sqlite => {
            prepare_sqlite_file(&args.db_url)?;
            Storage::sqlite(&args.db_url).await?
        }
        StoreKind::Local => Storage::local(&args.data_dir).await?,
    };
    Ok(storage)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    let clock = Clock::default_clock();

    match cmd {
        Command::Ui => {
            let services = open_services(&parsed, clock).await?;
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                exam_date: parsed.exam_date,
            });
            let context = build_app_context(&app);

            // Some tao setups default to always-on-top.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("TUS Çalışma Takibi")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let storage = open_storage(&parsed).await?;
            let appended = seed_sample(&storage, clock.today(), parsed.days).await?;
            println!(
                "Seeded catalog and {appended} study records over {} days",
                parsed.days
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
