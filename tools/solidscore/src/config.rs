use crate::errors::SolidscoreError;
use crate::runtime::FileSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub max_findings: Option<u32>,
    pub html_report: Option<PathBuf>,
    pub json_report: Option<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub scoring: ScoringConfig,
    pub rendering: RenderingConfig,
    pub publish: PublishConfig,
    pub artifacts: ArtifactsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoringConfig {
    pub principle_deduction: i64,
    pub severity_penalty: i64,
    pub high_severity: Vec<String>,
    pub score_floor: Option<i64>,
}

impl ScoringConfig {
    pub fn is_high_severity(&self, severity: &str) -> bool {
        self.high_severity
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(severity))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderingConfig {
    pub max_findings: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublishConfig {
    pub enabled: bool,
    pub api_base: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactsConfig {
    pub html_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report: ReportConfig {
                path: PathBuf::from("semgrep-results.json"),
            },
            scoring: ScoringConfig {
                principle_deduction: 10,
                severity_penalty: 1,
                high_severity: vec!["ERROR".to_string(), "CRITICAL".to_string()],
                score_floor: None,
            },
            rendering: RenderingConfig { max_findings: 5 },
            publish: PublishConfig {
                enabled: true,
                api_base: "https://api.github.com".to_string(),
                user_agent: "solidscore-comment-bot".to_string(),
            },
            artifacts: ArtifactsConfig {
                html_path: None,
                json_path: None,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialAppConfig {
    report: Option<PartialReportConfig>,
    scoring: Option<PartialScoringConfig>,
    rendering: Option<PartialRenderingConfig>,
    publish: Option<PartialPublishConfig>,
    artifacts: Option<PartialArtifactsConfig>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialReportConfig {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialScoringConfig {
    principle_deduction: Option<i64>,
    severity_penalty: Option<i64>,
    high_severity: Option<Vec<String>>,
    score_floor: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialRenderingConfig {
    max_findings: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialPublishConfig {
    enabled: Option<bool>,
    api_base: Option<String>,
    user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialArtifactsConfig {
    html_path: Option<PathBuf>,
    json_path: Option<PathBuf>,
}

pub fn load_config(
    overrides: &CliOverrides,
    fs: &dyn FileSystem,
) -> Result<AppConfig, SolidscoreError> {
    let mut cfg = AppConfig::default();

    if let Some(path) = &overrides.config_path {
        let file_contents = fs.read_to_string(path)?;
        let partial: PartialAppConfig = toml::from_str(&file_contents)
            .map_err(|e| SolidscoreError::ConfigParse(e.to_string()))?;
        merge_partial_config(&mut cfg, partial);
    }

    apply_cli_overrides(&mut cfg, overrides);
    validate_config(&cfg)?;
    Ok(cfg)
}

fn merge_partial_config(cfg: &mut AppConfig, partial: PartialAppConfig) {
    if let Some(report) = partial.report {
        if let Some(path) = report.path {
            cfg.report.path = path;
        }
    }

    if let Some(scoring) = partial.scoring {
        if let Some(value) = scoring.principle_deduction {
            cfg.scoring.principle_deduction = value;
        }
        if let Some(value) = scoring.severity_penalty {
            cfg.scoring.severity_penalty = value;
        }
        if let Some(value) = scoring.high_severity {
            cfg.scoring.high_severity = value;
        }
        if let Some(value) = scoring.score_floor {
            cfg.scoring.score_floor = Some(value);
        }
    }

    if let Some(rendering) = partial.rendering {
        if let Some(value) = rendering.max_findings {
            cfg.rendering.max_findings = value;
        }
    }

    if let Some(publish) = partial.publish {
        if let Some(value) = publish.enabled {
            cfg.publish.enabled = value;
        }
        if let Some(value) = publish.api_base {
            cfg.publish.api_base = value;
        }
        if let Some(value) = publish.user_agent {
            cfg.publish.user_agent = value;
        }
    }

    if let Some(artifacts) = partial.artifacts {
        if let Some(value) = artifacts.html_path {
            cfg.artifacts.html_path = Some(value);
        }
        if let Some(value) = artifacts.json_path {
            cfg.artifacts.json_path = Some(value);
        }
    }
}

fn apply_cli_overrides(cfg: &mut AppConfig, overrides: &CliOverrides) {
    if let Some(path) = &overrides.report_path {
        cfg.report.path = path.clone();
    }
    if let Some(max_findings) = overrides.max_findings {
        cfg.rendering.max_findings = max_findings;
    }
    if let Some(path) = &overrides.html_report {
        cfg.artifacts.html_path = Some(path.clone());
    }
    if let Some(path) = &overrides.json_report {
        cfg.artifacts.json_path = Some(path.clone());
    }
}

fn validate_config(cfg: &AppConfig) -> Result<(), SolidscoreError> {
    if cfg.scoring.principle_deduction <= 0 {
        return Err(SolidscoreError::InvalidConfig(
            "scoring.principle_deduction must be greater than zero".to_string(),
        ));
    }
    if cfg.scoring.severity_penalty < 0 {
        return Err(SolidscoreError::InvalidConfig(
            "scoring.severity_penalty must not be negative".to_string(),
        ));
    }
    if cfg
        .scoring
        .high_severity
        .iter()
        .any(|entry| entry.trim().is_empty())
    {
        return Err(SolidscoreError::InvalidConfig(
            "scoring.high_severity entries must be non-empty".to_string(),
        ));
    }
    if cfg.rendering.max_findings == 0 {
        return Err(SolidscoreError::InvalidConfig(
            "rendering.max_findings must be greater than zero".to_string(),
        ));
    }
    if cfg.publish.enabled {
        if cfg.publish.api_base.trim().is_empty() {
            return Err(SolidscoreError::InvalidConfig(
                "publish.api_base must be set when publishing is enabled".to_string(),
            ));
        }
        if cfg.publish.user_agent.trim().is_empty() {
            return Err(SolidscoreError::InvalidConfig(
                "publish.user_agent must be set when publishing is enabled".to_string(),
            ));
        }
    }
    Ok(())
}

pub fn absolutize_path(base: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        base.join(value)
    }
}
