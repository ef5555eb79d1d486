//! Command line interface.

use crate::state::AppState;
use anyhow::Context;
use clap::{Parser, Subcommand};
use didscope_core::{format_phone_number, AppConfig, BulkUploadResult, Timestamp};
use didscope_report::{
    read_phone_numbers, render_health, render_table, single_notice, write_csv, BulkSummary,
    Notice, NoticeLevel,
};
use std::path::PathBuf;
use tokio::net::TcpListener;

/// DIDScope - phone number reputation and health scoring
#[derive(Parser, Debug)]
#[command(name = "didscope")]
#[command(
    version,
    about = "Check phone number reputation, STIR/SHAKEN attestation and spam risk",
    after_help = "\
Examples:
  didscope serve                              Start the HTTP API on the configured address
  didscope serve --bind 0.0.0.0:8080          Start the HTTP API on a custom address
  didscope check 5551234567                   Check one number and show its health analysis
  didscope check --file numbers.csv           Check every number found in a CSV file
  didscope check --file numbers.csv --export-dir .   Also write a CSV report
  didscope check 5551234567 --json            JSON output for scripting"
)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "DIDSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Check numbers from the command line or a CSV file
    Check {
        /// Phone numbers to check
        numbers: Vec<String>,

        /// CSV file to extract numbers from
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Directory to write a CSV report into
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Load configuration for a CLI run.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let Some(path) = path else {
        return AppConfig::load_with_env().context("failed to load config");
    };
    let mut config = AppConfig::load_from(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    config.apply_env_overrides(|name| std::env::var(name).ok());
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Serve { bind } => {
            let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
            let listener = TcpListener::bind(&bind_addr)
                .await
                .with_context(|| format!("failed to bind {bind_addr}"))?;
            let state = AppState::new(config).context("failed to build provider chain")?;
            let plan = state.service.route_plan();
            tracing::info!(
                providers = ?state.service.chain().provider_ids(),
                window_size = plan.window_size,
                max_items = plan.max_items,
                "provider chain ready"
            );
            crate::serve(listener, state).await
        }
        Commands::Check {
            numbers,
            file,
            export_dir,
            json,
        } => run_check(config, numbers, file, export_dir, json).await,
    }
}

async fn run_check(
    config: AppConfig,
    numbers: Vec<String>,
    file: Option<PathBuf>,
    export_dir: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let mut inputs = numbers;
    if let Some(path) = &file {
        inputs.extend(read_phone_numbers(path)?);
    }
    anyhow::ensure!(
        !inputs.is_empty(),
        "no phone numbers given; pass numbers or --file"
    );

    let phone_numbers: Vec<String> = inputs.iter().map(|n| format_phone_number(n)).collect();
    let client_window = config.batching.client_window_size;
    let state = AppState::new(config).context("failed to build provider chain")?;

    let records = if phone_numbers.len() == 1 {
        vec![state.service.check(&phone_numbers[0]).await]
    } else {
        eprintln!("Checking {} numbers...", phone_numbers.len());
        state
            .service
            .check_in_chunks(phone_numbers, client_window, |done, total| {
                eprintln!("Processed {done} of {total} numbers...");
            })
            .await
    };

    if json {
        let result = BulkUploadResult::new(records.len(), records.clone());
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_table(&records));
        if let [record] = records.as_slice() {
            println!();
            print!("{}", render_health(record));
            print_notices(&[single_notice(record)]);
        } else {
            print_notices(&BulkSummary::from_records(&records).notices());
        }
    }

    if let Some(dir) = export_dir {
        let path = write_csv(&dir, &records, &Timestamp::now())?;
        eprintln!("Results exported to {}", path.display());
    }

    Ok(())
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warn",
            NoticeLevel::Error => "alert",
        };
        eprintln!("[{tag}] {}", notice.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_command() {
        let cli = Cli::parse_from([
            "didscope",
            "check",
            "5551234567",
            "(555) 987-6543",
            "--export-dir",
            "/tmp",
            "--json",
        ]);
        match cli.command {
            Commands::Check {
                numbers,
                export_dir,
                json,
                file,
            } => {
                assert_eq!(numbers, vec!["5551234567", "(555) 987-6543"]);
                assert_eq!(export_dir, Some(PathBuf::from("/tmp")));
                assert!(json);
                assert!(file.is_none());
            }
            Commands::Serve { .. } => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_serve_command() {
        let cli = Cli::parse_from(["didscope", "serve", "--bind", "0.0.0.0:8080"]);
        assert!(matches!(
            cli.command,
            Commands::Serve { bind: Some(ref b) } if b == "0.0.0.0:8080"
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[batching]\nclient_window_size = 4\n").expect("write config");

        let config = load_config(Some(&path)).expect("load config");
        assert_eq!(config.batching.client_window_size, 4);
        assert_eq!(config.batching.route_window_size, 5);
    }
}
