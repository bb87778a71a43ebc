//! CLI entry point for depwitness.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `depwitness-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use depwitness_app::{
    format_explanation, format_not_found, run_explain, run_generate, run_graph, run_verify,
    runtime_error_report, update_config_assertions, verdict_exit_code, write_report, write_text,
    ExplainOutput, WitnessInput,
};
use depwitness_settings::Overrides;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "depwitness",
    version,
    about = "Pin and verify content digests of resolved build dependencies"
)]
struct Cli {
    /// Resolution snapshot exported by the host build.
    #[arg(long, default_value = "build/depwitness/snapshot.json")]
    snapshot: Utf8PathBuf,

    /// Path to depwitness config TOML.
    #[arg(long, default_value = "depwitness.toml")]
    config: Utf8PathBuf,

    /// Root for relative artifact paths (defaults to the snapshot's directory).
    #[arg(long)]
    cache_root: Option<Utf8PathBuf>,

    /// Extra comma-separated configurations to exclude (`name` or `project:name`).
    #[arg(long)]
    exclude: Vec<String>,

    /// Fail when configurations resolve the same artifact to different content.
    #[arg(long)]
    fail_on_conflict: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify pinned digests against the resolved artifacts.
    Verify {
        /// Where to write the JSON receipt.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },

    /// Print assertions for every direct module dependency.
    Generate {
        /// Rewrite the `verify` list in the config file instead of printing.
        #[arg(long)]
        write: bool,
    },

    /// Print every configuration with its superconfigurations and pinned dependencies.
    Graph {
        /// Where to write the report (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a failure code with remediation guidance.
    Explain {
        /// The code (e.g., "checksum_mismatch") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Exit code 2 means verification failed; usage errors must not look like one.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    match &cli.cmd {
        Commands::Verify { report_out } => cmd_verify(&cli, report_out.as_deref()),
        Commands::Generate { write } => cmd_generate(&cli, *write),
        Commands::Graph { output } => cmd_graph(&cli, output.as_deref()),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        exclude: cli.exclude.clone(),
        fail_on_conflict: cli.fail_on_conflict.then_some(true),
    }
}

/// Read the config file; a missing file means defaults.
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(config = %path, "config file not found; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {path}")),
    }
}

fn cmd_verify(cli: &Cli, report_out: Option<&Utf8Path>) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config(&cli.config)?;
        let output = run_verify(WitnessInput {
            snapshot_path: &cli.snapshot,
            artifact_root: cli.cache_root.as_deref(),
            config_text: &cfg_text,
            overrides: overrides(cli),
        })?;

        if let Some(path) = report_out {
            write_report(path, &output.report).context("write report json")?;
        }

        match &output.error {
            Some(err) => eprintln!("depwitness: dependency verification failed: {err}"),
            None => println!(
                "depwitness: verified {} assertion(s) against {} dependencies of {}",
                output.report.data.assertions_checked,
                output.report.data.dependencies_hashed,
                output.report.data.project
            ),
        }
        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(path) = report_out {
                let report = runtime_error_report(&format!("{err:#}"));
                let _ = write_report(path, &report);
            }
            eprintln!("depwitness error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_generate(cli: &Cli, write: bool) -> anyhow::Result<()> {
    let cfg_text = read_config(&cli.config)?;
    let output = run_generate(WitnessInput {
        snapshot_path: &cli.snapshot,
        artifact_root: cli.cache_root.as_deref(),
        config_text: &cfg_text,
        overrides: overrides(cli),
    })?;

    if write {
        let updated = update_config_assertions(&cfg_text, &output.assertions)?;
        write_text(&cli.config, &updated).context("write config")?;
        eprintln!(
            "depwitness: wrote {} assertion(s) to {}",
            output.assertions.len(),
            cli.config
        );
    } else {
        print!("{}", output.block);
    }
    Ok(())
}

fn cmd_graph(cli: &Cli, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = run_graph(WitnessInput {
        snapshot_path: &cli.snapshot,
        artifact_root: cli.cache_root.as_deref(),
        config_text: "",
        overrides: overrides(cli),
    })?;

    match output {
        Some(path) => write_text(path, &report).context("write graph report")?,
        None => print!("{report}"),
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_codes,
        } => {
            eprint!("{}", format_not_found(&identifier, available_codes));
            std::process::exit(1);
        }
    }
}
