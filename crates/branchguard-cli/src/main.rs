//! CLI entry point for branchguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `branchguard-app` crate.

mod logging;

use anyhow::Context;
use branchguard_app::{
    build_document, connect, default_error_log_path, exit_code, parse_report_json, run_audit,
    write_error_log, write_output, write_text, AuditInput,
};
use branchguard_render::render_markdown;
use branchguard_settings::{OutputFormat, Overrides};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "branchguard",
    version,
    about = "Branch protection policy auditor for Azure DevOps"
)]
struct Cli {
    /// Path to branchguard config TOML (missing file is allowed).
    #[arg(long, global = true, default_value = "branchguard.toml")]
    config: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit every project, repository and branch and write a report.
    Audit(AuditArgs),

    /// Render a PDF or Markdown report from a saved JSON report.
    Render {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Output format: pdf or markdown.
        #[arg(long, default_value = "pdf")]
        format: String,

        /// Where to write the output (markdown prints to stdout if not specified).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct AuditArgs {
    /// Azure DevOps organization name (e.g. 'myorg').
    #[arg(long)]
    org: Option<String>,

    /// Azure DevOps personal access token.
    #[arg(long, env = "AZURE_DEVOPS_EXT_PAT", hide_env_values = true)]
    pat: Option<String>,

    /// Output file (default: azure_devops_branch_policy_report.<ext>).
    #[arg(long, short)]
    output: Option<Utf8PathBuf>,

    /// Output format: pdf, markdown or json.
    #[arg(long)]
    format: Option<String>,

    /// Service root, e.g. https://dev.azure.com.
    #[arg(long)]
    base_url: Option<String>,

    /// REST API version sent with every request.
    #[arg(long)]
    api_version: Option<String>,

    /// Per-request timeout in seconds (default: none).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Abort on the first failed request instead of reporting it.
    #[arg(long)]
    fail_fast: bool,

    /// Where to write failed requests (default: <output stem>.errors.log).
    #[arg(long)]
    error_log: Option<Utf8PathBuf>,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    match cli.cmd {
        Commands::Audit(ref args) => cmd_audit(&cli, args),
        Commands::Render {
            ref report,
            ref format,
            ref output,
        } => cmd_render(report, format, output.as_ref()),
    }
}

fn cmd_audit(cli: &Cli, args: &AuditArgs) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = if cli.config.exists() {
            std::fs::read_to_string(&cli.config)
                .with_context(|| format!("read config: {}", cli.config))?
        } else {
            String::new()
        };
        let cfg = if cfg_text.trim().is_empty() {
            branchguard_settings::AuditConfigV1::default()
        } else {
            branchguard_settings::parse_config_toml(&cfg_text).context("parse config")?
        };

        let overrides = Overrides {
            organization: args.org.clone(),
            base_url: args.base_url.clone(),
            api_version: args.api_version.clone(),
            timeout_secs: args.timeout_secs,
            on_error: args.fail_fast.then(|| "abort".to_string()),
            format: args.format.clone(),
            output: args.output.as_ref().map(|p| p.to_string()),
        };
        let effective = branchguard_settings::resolve_config(cfg, overrides)
            .context("resolve config")?
            .effective;
        debug!(
            organization = %effective.organization,
            base_url = %effective.base_url,
            format = effective.format.extension(),
            output = %effective.output,
            "resolved config"
        );

        let client = connect(&effective, args.pat.as_deref().unwrap_or_default())?;
        let report = run_audit(
            &client,
            AuditInput {
                organization: &effective.organization,
                on_error: effective.on_error,
            },
        )?;

        let output = Utf8PathBuf::from(&effective.output);
        write_output(&report, effective.format, &output)?;

        let log_path = args
            .error_log
            .clone()
            .unwrap_or_else(|| default_error_log_path(&output));
        if write_error_log(&report, &log_path)? {
            eprintln!(
                "branchguard: {} request(s) failed; report written to {} with error markers, details in {}",
                report.all_errors().len(),
                output,
                log_path
            );
        }

        Ok(exit_code(&report))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("branchguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_render(
    report_path: &Utf8PathBuf,
    format: &str,
    output: Option<&Utf8PathBuf>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<()> {
        let report_text = std::fs::read_to_string(report_path)
            .with_context(|| format!("read report: {}", report_path))?;
        let report = parse_report_json(&report_text)?;

        match OutputFormat::parse(format)? {
            OutputFormat::Markdown => {
                let md = render_markdown(&build_document(&report));
                if let Some(out_path) = output {
                    write_text(out_path, &md).context("write markdown output")?;
                } else {
                    print!("{}", md);
                }
            }
            OutputFormat::Pdf => {
                let default_path = Utf8PathBuf::from(format!(
                    "{}.pdf",
                    branchguard_settings::DEFAULT_OUTPUT_STEM
                ));
                let out_path = output.unwrap_or(&default_path);
                write_output(&report, OutputFormat::Pdf, out_path)?;
            }
            OutputFormat::Json => {
                anyhow::bail!("render accepts pdf or markdown; the input is already json")
            }
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("branchguard error: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}
