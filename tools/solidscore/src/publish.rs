use crate::context::RunContext;
use crate::errors::SolidscoreError;
use crate::logging::append_run_log;
use crate::runtime::{ProcessRequest, ProcessRunner};
use serde_json::json;

pub struct CommentClient<'a> {
    runner: &'a dyn ProcessRunner,
    api_base: String,
    user_agent: String,
}

impl<'a> CommentClient<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        api_base: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            api_base: api_base.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn create_pr_comment(
        &self,
        ctx: &RunContext,
        body: &str,
    ) -> Result<(), SolidscoreError> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base, ctx.owner, ctx.repo, ctx.pr_number
        );
        let payload = serde_json::to_string(&json!({ "body": body }))
            .map_err(|e| SolidscoreError::Process(format!("comment payload: {e}")))?;

        append_run_log(
            "info",
            "publish.comment.started",
            json!({
                "url": url,
                "pr_number": ctx.pr_number,
                "body_bytes": body.len()
            }),
        );

        let out = self.runner.run(ProcessRequest {
            program: "curl".to_string(),
            args: vec![
                "--silent".to_string(),
                "--show-error".to_string(),
                "--fail-with-body".to_string(),
                "--request".to_string(),
                "POST".to_string(),
                "--url".to_string(),
                url.clone(),
                "--header".to_string(),
                format!("Authorization: Bearer {}", ctx.token),
                "--header".to_string(),
                "Accept: application/vnd.github+json".to_string(),
                "--header".to_string(),
                "Content-Type: application/json".to_string(),
                "--header".to_string(),
                format!("User-Agent: {}", self.user_agent),
                "--data".to_string(),
                payload,
            ],
            cwd: None,
        })?;

        if out.exit_code != 0 {
            append_run_log(
                "error",
                "publish.comment.failed",
                json!({
                    "url": url,
                    "exit_code": out.exit_code,
                    "stderr": out.stderr,
                    "stdout": out.stdout
                }),
            );
            return Err(SolidscoreError::Process(format!(
                "comment post failed: {}",
                out.stderr
            )));
        }

        append_run_log(
            "info",
            "publish.comment.succeeded",
            json!({ "url": url }),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CommentClient;
    use crate::context::RunContext;
    use crate::errors::SolidscoreError;
    use crate::runtime::{FakeProcessRunner, ProcessOutput};

    fn ctx() -> RunContext {
        RunContext {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            pr_number: 7,
            run_id: "123456".to_string(),
            token: "ghs_secret".to_string(),
        }
    }

    #[test]
    fn posts_one_curl_request_with_auth_and_client_identity() {
        let runner = FakeProcessRunner::default();
        runner.push_response(Ok(ProcessOutput {
            exit_code: 0,
            stdout: "{\"id\": 1}".to_string(),
            stderr: String::new(),
        }));

        let client = CommentClient::new(&runner, "https://api.github.com", "solidscore-comment-bot");
        client
            .create_pr_comment(&ctx(), "**Estimated SOLID Score:** 96")
            .expect("publish");

        let requests = runner.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.program, "curl");
        assert!(request
            .args
            .contains(&"https://api.github.com/repos/acme/widgets/issues/7/comments".to_string()));
        assert!(request
            .args
            .contains(&"Authorization: Bearer ghs_secret".to_string()));
        assert!(request
            .args
            .contains(&"User-Agent: solidscore-comment-bot".to_string()));
        let payload = request.args.last().expect("payload arg");
        assert_eq!(
            payload,
            "{\"body\":\"**Estimated SOLID Score:** 96\"}"
        );
    }

    #[test]
    fn body_is_json_escaped_in_the_payload() {
        let runner = FakeProcessRunner::default();
        runner.push_response(Ok(ProcessOutput {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        }));

        let client = CommentClient::new(&runner, "https://api.github.com", "bot");
        client
            .create_pr_comment(&ctx(), "line one\nline \"two\"")
            .expect("publish");

        let requests = runner.requests();
        let payload = requests[0].args.last().expect("payload arg");
        assert_eq!(payload, "{\"body\":\"line one\\nline \\\"two\\\"\"}");
    }

    #[test]
    fn non_zero_curl_exit_is_a_process_error() {
        let runner = FakeProcessRunner::default();
        runner.push_response(Ok(ProcessOutput {
            exit_code: 22,
            stdout: String::new(),
            stderr: "HTTP 401".to_string(),
        }));

        let client = CommentClient::new(&runner, "https://api.github.com", "bot");
        let err = client
            .create_pr_comment(&ctx(), "body")
            .expect_err("must fail");
        assert!(matches!(err, SolidscoreError::Process(_)));
    }
}
