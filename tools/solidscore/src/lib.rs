pub mod classify;
pub mod compose;
pub mod config;
pub mod context;
pub mod errors;
pub mod finding;
pub mod html_report;
pub mod logging;
pub mod principle;
pub mod publish;
pub mod render;
pub mod report;
pub mod runtime;
pub mod scoring;

use clap::{error::ErrorKind, Parser};
use config::{absolutize_path, load_config, CliOverrides};
use context::{resolve_run_context, EnvMap};
use errors::SolidscoreError;
use finding::Finding;
use logging::append_run_log;
use publish::CommentClient;
use runtime::ProductionRuntime;
use scoring::ScoreAggregator;
use serde_json::json;

#[derive(Debug, Clone, Parser)]
#[command(name = "solidscore")]
#[command(about = "Scores a static-analysis report against the SOLID principles and comments the result on the pull request")]
pub struct Cli {
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
    #[arg(long)]
    pub report: Option<std::path::PathBuf>,
    #[arg(long)]
    pub max_findings: Option<u32>,
    #[arg(long)]
    pub html_report: Option<std::path::PathBuf>,
    #[arg(long)]
    pub json_report: Option<std::path::PathBuf>,
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

pub fn run() -> Result<i32, SolidscoreError> {
    let args = std::env::args_os().collect::<Vec<_>>();
    let env = std::env::vars_os().collect::<Vec<_>>();
    let cwd = std::env::current_dir().map_err(|e| SolidscoreError::Io(e.to_string()))?;
    let runtime = ProductionRuntime::new();
    run_with_runtime(&args, &env, &cwd, &runtime)
}

pub fn run_with_runtime(
    args: &[std::ffi::OsString],
    env: &[(std::ffi::OsString, std::ffi::OsString)],
    cwd: &std::path::Path,
    runtime: &ProductionRuntime,
) -> Result<i32, SolidscoreError> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{error}");
                return Ok(0);
            }
            _ => return Err(SolidscoreError::Cli(error.to_string())),
        },
    };

    let env_map = env_to_map(env);

    let overrides = CliOverrides {
        config_path: cli.config.clone(),
        report_path: cli.report.clone(),
        max_findings: cli.max_findings,
        html_report: cli.html_report.clone(),
        json_report: cli.json_report.clone(),
        dry_run: cli.dry_run,
    };

    let cfg = load_config(&overrides, runtime.file_system.as_ref())?;
    let context = resolve_run_context(&env_map)?;

    let report_path = absolutize_path(cwd, &cfg.report.path);
    let raw = report::load_report(runtime.file_system.as_ref(), &report_path)?;
    let findings: Vec<Finding> = raw.results.iter().map(finding::normalize).collect();

    let mut aggregator = ScoreAggregator::new(&cfg.scoring);
    for item in &findings {
        let principles = classify::classify(item);
        aggregator.apply(item, &principles);
    }
    let summary = aggregator.finish();

    let lines = render::render_findings(&findings, cfg.rendering.max_findings as usize);
    let body = compose::compose_comment(&summary, &lines, &context.artifact_url());

    if let Some(path) = &cfg.artifacts.html_path {
        html_report::write_html_report(
            runtime.file_system.as_ref(),
            &absolutize_path(cwd, path),
            &findings,
        )?;
    }
    if let Some(path) = &cfg.artifacts.json_path {
        html_report::write_json_report(
            runtime.file_system.as_ref(),
            &absolutize_path(cwd, path),
            &findings,
        )?;
    }

    runtime.terminal.write_line(&format!(
        "scored {} findings: overall {}",
        summary.finding_count, summary.overall
    ))?;

    if overrides.dry_run || !cfg.publish.enabled {
        runtime.terminal.write_line(&body)?;
        return Ok(0);
    }

    let client = CommentClient::new(
        runtime.process_runner.as_ref(),
        &cfg.publish.api_base,
        &cfg.publish.user_agent,
    );
    // Best-effort: the score is already computed, so a failed publish is logged
    // and swallowed rather than failing the run.
    match client.create_pr_comment(&context, &body) {
        Ok(()) => {
            runtime.terminal.write_line(&format!(
                "comment published to {}/{}#{}",
                context.owner, context.repo, context.pr_number
            ))?;
        }
        Err(error) => {
            append_run_log(
                "warn",
                "publish.comment.swallowed",
                json!({ "error": error.to_string() }),
            );
            runtime
                .terminal
                .write_line(&format!("comment publish failed (ignored): {error}"))?;
        }
    }

    Ok(0)
}

fn env_to_map(env: &[(std::ffi::OsString, std::ffi::OsString)]) -> EnvMap {
    let mut map = EnvMap::new();
    for (key, value) in env {
        if let (Some(key), Some(value)) = (key.to_str(), value.to_str()) {
            map.insert(key.to_string(), value.to_string());
        }
    }
    map
}
