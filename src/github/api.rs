//! reqwest-backed GitHub REST client.
//!
//! Talks to the three endpoints the pipeline needs: the PR files listing,
//! review comments, and issue comments. The base URL is injectable so
//! tests can point at a local server instead of `api.github.com`.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::GithubSettings;
use crate::constants;
use crate::models::ChangedFile;

use super::{HostError, PostOutcome, PullRequestHost};

/// GitHub REST API client bound to one pull request.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    owner: String,
    repo: String,
    pr_number: u64,
    commit_sha: String,
}

impl GithubClient {
    /// Build a client from resolved settings.
    ///
    /// Fails when the repository is not of the form `owner/name`.
    pub fn new(settings: &GithubSettings) -> Result<Self, HostError> {
        let (owner, repo) = settings
            .repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
            .ok_or_else(|| HostError::InvalidRepository(settings.repository.clone()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            pr_number: settings.pr_number,
            commit_sha: settings.commit_sha.clone(),
        })
    }

    fn url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{tail}",
            self.base_url, self.owner, self.repo
        )
    }

    /// Apply the headers GitHub requires on every request.
    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", constants::APP_NAME)
    }

    /// Map a comment-creation response to an outcome.
    async fn comment_outcome(response: reqwest::Response) -> Result<PostOutcome, HostError> {
        match response.status() {
            StatusCode::CREATED => Ok(PostOutcome::Created),
            StatusCode::UNPROCESSABLE_ENTITY => Ok(PostOutcome::LineNotInDiff),
            StatusCode::FORBIDDEN => Ok(PostOutcome::RateLimited),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<no body>".to_string());
                Err(HostError::Api {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl PullRequestHost for GithubClient {
    async fn list_changed_files(&self) -> Result<Vec<ChangedFile>, HostError> {
        let url = self.url(&format!("pulls/{}/files", self.pr_number));
        let response = self.request(self.http.get(&url)).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(HostError::Api { status, body });
        }

        Ok(response.json::<Vec<ChangedFile>>().await?)
    }

    async fn post_line_comment(
        &self,
        filename: &str,
        line: u32,
        body: &str,
    ) -> Result<PostOutcome, HostError> {
        let url = self.url(&format!("pulls/{}/comments", self.pr_number));
        let payload = serde_json::json!({
            "body": body,
            "commit_id": self.commit_sha,
            "path": filename,
            "line": line,
            "side": "RIGHT",
        });

        let response = self
            .request(self.http.post(&url))
            .json(&payload)
            .send()
            .await?;
        Self::comment_outcome(response).await
    }

    async fn post_summary_comment(&self, body: &str) -> Result<PostOutcome, HostError> {
        let url = self.url(&format!("issues/{}/comments", self.pr_number));
        let payload = serde_json::json!({ "body": body });

        let response = self
            .request(self.http.post(&url))
            .json(&payload)
            .send()
            .await?;
        Self::comment_outcome(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(repository: &str) -> GithubSettings {
        GithubSettings {
            token: "ghp_test".to_string(),
            repository: repository.to_string(),
            pr_number: 42,
            commit_sha: "abc1234".to_string(),
            api_url: "https://api.github.com/".to_string(),
        }
    }

    #[test]
    fn new_splits_owner_and_repo() {
        let client = GithubClient::new(&settings("octo/reviewed")).unwrap();
        assert_eq!(client.owner, "octo");
        assert_eq!(client.repo, "reviewed");
        // Trailing slash on the base URL is normalized away.
        assert_eq!(client.base_url, "https://api.github.com");
    }

    #[test]
    fn new_rejects_malformed_repository() {
        for bad in ["norepo", "/leading", "trailing/", ""] {
            let result = GithubClient::new(&settings(bad));
            assert!(
                matches!(result, Err(HostError::InvalidRepository(_))),
                "accepted: {bad}"
            );
        }
    }

    #[test]
    fn url_builds_pr_endpoints() {
        let client = GithubClient::new(&settings("octo/reviewed")).unwrap();
        assert_eq!(
            client.url("pulls/42/files"),
            "https://api.github.com/repos/octo/reviewed/pulls/42/files"
        );
        assert_eq!(
            client.url("issues/42/comments"),
            "https://api.github.com/repos/octo/reviewed/issues/42/comments"
        );
    }
}
