mod telemetry;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, IdentityProvider, ProgressService};
use tracing::info;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://nurse.sqlite3";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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
}

impl UiApp for DesktopApp {
    fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        self.services.identity()
    }

    fn progress_service(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  NURSE_DB_URL, NURSE_LOG, NURSE_LOG_FORMAT (pretty|json)");
}

impl Args {
    fn parse(
        env_db_url: Option<String>,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Parsed, ArgsError> {
        let mut db_url = env_db_url
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { db_url }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
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

    let path = std::path::Path::new(path);
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(std::env::var("NURSE_DB_URL").ok(), &mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    telemetry::init_tracing();

    // Open + migrate SQLite before the window exists so startup failures surface on stderr.
    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url).await?;
    info!(db_url = %args.db_url, "launching desktop app");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Nurse Gamification Challenge")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(env: Option<&str>, args: &[&str]) -> Result<Parsed, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(env.map(str::to_string), &mut iter)
    }

    #[test]
    fn defaults_to_local_database() {
        assert_eq!(
            parse(None, &[]).unwrap(),
            Parsed::Run(Args {
                db_url: DEFAULT_DB_URL.to_string()
            })
        );
    }

    #[test]
    fn flag_overrides_environment() {
        let parsed = parse(Some("sqlite:///tmp/env.sqlite3"), &["--db", "sqlite::memory:"]).unwrap();
        assert_eq!(
            parsed,
            Parsed::Run(Args {
                db_url: "sqlite::memory:".to_string()
            })
        );
    }

    #[test]
    fn environment_url_is_used_without_flag() {
        let parsed = parse(Some("sqlite:///tmp/env.sqlite3"), &[]).unwrap();
        assert_eq!(
            parsed,
            Parsed::Run(Args {
                db_url: "sqlite:///tmp/env.sqlite3".to_string()
            })
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            parse(None, &["--db"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--db" }
        );
        assert_eq!(
            parse(None, &["--db", "  "]).unwrap_err(),
            ArgsError::InvalidDbUrl {
                raw: "  ".to_string()
            }
        );
        assert_eq!(
            parse(None, &["--deck"]).unwrap_err(),
            ArgsError::UnknownArg("--deck".to_string())
        );
        assert_eq!(parse(None, &["-h"]).unwrap(), Parsed::Help);
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("sqlite:data/nurse.sqlite3".to_string());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/nurse.sqlite3"), "{url}");
    }
}
