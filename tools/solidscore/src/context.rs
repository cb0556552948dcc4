use crate::errors::SolidscoreError;
use crate::logging::append_run_log;
use serde_json::json;
use std::collections::BTreeMap;

pub type EnvMap = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    pub run_id: String,
    pub token: String,
}

impl RunContext {
    pub fn artifact_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/actions/runs/{}",
            self.owner, self.repo, self.run_id
        )
    }
}

// Everything here is supplied by the invoking CI environment; a missing value
// is a fatal precondition, not something the pipeline can repair.
pub fn resolve_run_context(env: &EnvMap) -> Result<RunContext, SolidscoreError> {
    let repository = require_var(env, "GITHUB_REPOSITORY")?;
    let (owner, repo) = repository.split_once('/').ok_or_else(|| {
        SolidscoreError::Context(format!(
            "GITHUB_REPOSITORY must look like owner/name, got {repository}"
        ))
    })?;
    let pr_number = require_var(env, "PR_NUMBER")?.parse::<u64>().map_err(|_| {
        SolidscoreError::Context("PR_NUMBER must be a positive integer".to_string())
    })?;
    let run_id = require_var(env, "GITHUB_RUN_ID")?;
    let token = require_var(env, "GITHUB_TOKEN")?;

    append_run_log(
        "info",
        "context.resolved",
        json!({
            "owner": owner,
            "repo": repo,
            "pr_number": pr_number,
            "run_id": run_id
        }),
    );

    Ok(RunContext {
        owner: owner.to_string(),
        repo: repo.to_string(),
        pr_number,
        run_id,
        token,
    })
}

fn require_var(env: &EnvMap, key: &str) -> Result<String, SolidscoreError> {
    env.get(key)
        .filter(|value| !value.trim().is_empty())
        .cloned()
        .ok_or_else(|| SolidscoreError::Context(format!("{key} is not set")))
}

#[cfg(test)]
mod tests {
    use super::{resolve_run_context, EnvMap};
    use crate::errors::SolidscoreError;

    fn full_env() -> EnvMap {
        let mut env = EnvMap::new();
        env.insert("GITHUB_REPOSITORY".to_string(), "acme/widgets".to_string());
        env.insert("PR_NUMBER".to_string(), "7".to_string());
        env.insert("GITHUB_RUN_ID".to_string(), "123456".to_string());
        env.insert("GITHUB_TOKEN".to_string(), "ghs_secret".to_string());
        env
    }

    #[test]
    fn full_environment_resolves() {
        let ctx = resolve_run_context(&full_env()).expect("resolve");
        assert_eq!(ctx.owner, "acme");
        assert_eq!(ctx.repo, "widgets");
        assert_eq!(ctx.pr_number, 7);
        assert_eq!(
            ctx.artifact_url(),
            "https://github.com/acme/widgets/actions/runs/123456"
        );
    }

    #[test]
    fn each_missing_variable_is_fatal() {
        for key in ["GITHUB_REPOSITORY", "PR_NUMBER", "GITHUB_RUN_ID", "GITHUB_TOKEN"] {
            let mut env = full_env();
            env.remove(key);
            let err = resolve_run_context(&env).expect_err("must fail");
            assert!(matches!(err, SolidscoreError::Context(_)), "{key}");
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut env = full_env();
        env.insert("GITHUB_TOKEN".to_string(), "  ".to_string());
        assert!(resolve_run_context(&env).is_err());
    }

    #[test]
    fn repository_without_a_slash_is_rejected() {
        let mut env = full_env();
        env.insert("GITHUB_REPOSITORY".to_string(), "acme".to_string());
        assert!(resolve_run_context(&env).is_err());
    }

    #[test]
    fn non_numeric_pr_number_is_rejected() {
        let mut env = full_env();
        env.insert("PR_NUMBER".to_string(), "seven".to_string());
        assert!(resolve_run_context(&env).is_err());
    }
}
