//! Session analysis command-line tool.
//!
//! ```text
//! formcheck [FILE|-]...     analyze recorded sessions (stdin when no file given)
//! formcheck --schema        print the JSON schema of the report
//! ```
//!
//! One input prints one report; several inputs are analyzed in parallel and
//! printed as an array in argument order. Logs go to stderr.

use std::io::Read;

use anyhow::{bail, Context};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use formcheck_analytics::{analyze, analyze_batch, AnalyzeOptions};
use formcheck_models::{AnalyticsResult, Session};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--schema") {
        let schema = schemars::schema_for!(AnalyticsResult);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }
    if let Some(flag) = args.iter().find(|a| a.starts_with("--")) {
        bail!("unknown option {}", flag);
    }

    let options = AnalyzeOptions::from_env();
    info!(?options, "Analysis options");

    let inputs = if args.is_empty() {
        vec!["-".to_string()]
    } else {
        args
    };

    let sessions = inputs
        .iter()
        .map(|input| load_session(input))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if let [session] = sessions.as_slice() {
        let report = analyze(session, &options)
            .with_context(|| format!("failed to analyze {}", inputs[0]))?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut reports = Vec::with_capacity(sessions.len());
    let mut failed = 0usize;
    for (input, result) in inputs.iter().zip(analyze_batch(&sessions, &options)) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                error!(input = %input, error = %e, "Session analysis failed");
                failed += 1;
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    if failed > 0 {
        bail!("{} of {} sessions failed", failed, inputs.len());
    }
    Ok(())
}

/// Read a session from a file path, or from stdin for `-`.
fn load_session(input: &str) -> anyhow::Result<Session> {
    let json = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read session from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?
    };

    serde_json::from_str(&json).with_context(|| format!("invalid session JSON in {}", input))
}

/// Colored output for dev, JSON when `LOG_FORMAT=json`.
fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("formcheck=info".parse()?)
        .add_directive("formcheck_analytics=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}
