// src/alert/github.rs
use super::Issue;
use crate::checker::USER_AGENT;
use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("Request to GitHub failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

#[derive(Serialize)]
struct CreateIssue<'a> {
    title: &'a str,
    body: &'a str,
}

/// Minimal client for the GitHub issues API.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self, GitHubError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub async fn create_issue(&self, owner: &str, repo: &str, issue: &Issue) -> Result<(), GitHubError> {
        let url = format!("{}/repos/{}/{}/issues", self.api_url, owner, repo);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .json(&CreateIssue {
                title: &issue.title,
                body: &issue.body,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Api { status, body });
        }

        info!("Issue created in {}/{}", owner, repo);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn issue() -> Issue {
        Issue {
            title: "🚨 Uptime Alert".to_string(),
            body: "site down".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_issue_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/acme/status/issues")
            .match_header("authorization", "Bearer secret")
            .match_header("accept", "application/vnd.github+json")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "🚨 Uptime Alert",
                "body": "site down",
            })))
            .with_status(201)
            .with_body(r#"{"number": 1}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(format!("{}/", server.url()), "secret").unwrap();
        client.create_issue("acme", "status", &issue()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/repos/acme/status/issues")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let client = GitHubClient::new(server.url(), "secret").unwrap();
        let err = client
            .create_issue("acme", "status", &issue())
            .await
            .unwrap_err();

        match err {
            GitHubError::Api { status, body } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
