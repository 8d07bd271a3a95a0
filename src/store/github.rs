//! GitHub repository contents as a store.
//!
//! Versioned reads and all writes go through the contents API (the blob `sha`
//! is the version token). Raw reads go through the raw-content host, which is
//! faster and CDN-cached but has no token.

use super::{RemoteStore, StoreError, StoreErrorKind, VersionedContent};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_VERSION: &str = "2022-11-28";

pub struct GithubStore {
    client: Client,
    api_url: String,
    raw_url: String,
    repo: String,
    branch: String,
    token: String,
    author: String,
}

#[derive(Deserialize)]
struct ContentsResponse {
    #[serde(rename = "type")]
    kind: String,
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Serialize)]
struct Committer<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct PutRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    committer: Committer<'a>,
}

#[derive(Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Deserialize)]
struct PutContent {
    sha: String,
}

impl GithubStore {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            api_url: cfg.github_api_url.trim_end_matches('/').to_string(),
            raw_url: cfg.github_raw_url.trim_end_matches('/').to_string(),
            repo: cfg.github_repo.trim().to_string(),
            branch: cfg.github_branch.clone(),
            token: cfg.github_token.clone(),
            author: cfg.author.clone(),
        })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.api_url,
            self.repo,
            path.trim_start_matches('/')
        )
    }

    fn raw_file_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.raw_url,
            self.repo,
            self.branch,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req
            .header(USER_AGENT, concat!("staffledger/", env!("CARGO_PKG_VERSION")))
            .header("X-GitHub-Api-Version", API_VERSION);
        if self.token.is_empty() {
            req
        } else {
            req.header(AUTHORIZATION, format!("Bearer {}", self.token))
        }
    }

    fn send(&self, path: &str, req: RequestBuilder) -> Result<Response, StoreError> {
        let resp = self
            .authorized(req)
            .send()
            .map_err(|e| StoreError::new(StoreErrorKind::Network, path, e.to_string()))?;

        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        Err(classify(status, path, &body))
    }
}

/// Map an unsuccessful contents-API status to a store error.
fn classify(status: StatusCode, path: &str, body: &str) -> StoreError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect());

    let kind = match status {
        StatusCode::NOT_FOUND => StoreErrorKind::NotFound,
        // 409: sha mismatch; 422: sha missing for an existing file
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => StoreErrorKind::Conflict,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreErrorKind::Unauthorized,
        other => StoreErrorKind::Http(other.as_u16()),
    };
    StoreError::new(kind, path, format!("HTTP {}: {}", status.as_u16(), detail))
}

fn decode_content(path: &str, resp: ContentsResponse) -> Result<VersionedContent, StoreError> {
    if resp.kind != "file" {
        return Err(StoreError::new(
            StoreErrorKind::Decode,
            path,
            format!("expected a file, found '{}'", resp.kind),
        ));
    }
    // files over 1 MB come back without inline content
    if resp.encoding == "none" {
        return Err(StoreError::new(
            StoreErrorKind::Decode,
            path,
            "file is too large for the contents API (over 1 MB); prune applied requests",
        ));
    }
    if resp.encoding != "base64" {
        return Err(StoreError::new(
            StoreErrorKind::Decode,
            path,
            format!("unsupported content encoding '{}'", resp.encoding),
        ));
    }

    // the API wraps base64 at 60 columns
    let packed: String = resp.content.split_whitespace().collect();
    let bytes = STANDARD
        .decode(packed)
        .map_err(|e| StoreError::new(StoreErrorKind::Decode, path, e.to_string()))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| StoreError::new(StoreErrorKind::Decode, path, e.to_string()))?;

    Ok(VersionedContent {
        content,
        version: resp.sha,
    })
}

impl RemoteStore for GithubStore {
    fn read_versioned(&self, path: &str) -> Result<VersionedContent, StoreError> {
        let req = self
            .client
            .get(self.contents_url(path))
            .query(&[("ref", self.branch.as_str())])
            .header(ACCEPT, "application/vnd.github+json");
        let resp = self.send(path, req)?;

        let body: ContentsResponse = resp
            .json()
            .map_err(|e| StoreError::new(StoreErrorKind::Decode, path, e.to_string()))?;
        decode_content(path, body)
    }

    fn read_raw(&self, path: &str) -> Result<String, StoreError> {
        let req = self.client.get(self.raw_file_url(path));
        let resp = self.send(path, req)?;
        resp.text()
            .map_err(|e| StoreError::new(StoreErrorKind::Network, path, e.to_string()))
    }

    fn write(
        &self,
        path: &str,
        content: &str,
        expected: Option<&str>,
        message: &str,
    ) -> Result<String, StoreError> {
        let body = PutRequest {
            message,
            content: STANDARD.encode(content.as_bytes()),
            branch: &self.branch,
            sha: expected,
            committer: Committer {
                name: &self.author,
                email: "staffledger@users.noreply.github.com",
            },
        };

        let req = self
            .client
            .put(self.contents_url(path))
            .header(ACCEPT, "application/vnd.github+json")
            .json(&body);
        let resp = self.send(path, req)?;

        let out: PutResponse = resp
            .json()
            .map_err(|e| StoreError::new(StoreErrorKind::Decode, path, e.to_string()))?;
        Ok(out.content.sha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        let p = "data/pending_requests.json";
        assert!(classify(StatusCode::NOT_FOUND, p, "").is_not_found());
        assert!(classify(StatusCode::CONFLICT, p, r#"{"message":"sha mismatch"}"#).is_conflict());
        assert!(classify(StatusCode::UNPROCESSABLE_ENTITY, p, "").is_conflict());
        assert_eq!(
            classify(StatusCode::FORBIDDEN, p, "").kind,
            StoreErrorKind::Unauthorized
        );
        assert_eq!(
            classify(StatusCode::BAD_GATEWAY, p, "").kind,
            StoreErrorKind::Http(502)
        );
    }

    #[test]
    fn error_message_comes_from_api_body() {
        let e = classify(
            StatusCode::CONFLICT,
            "a.json",
            r#"{"message":"a.json does not match abc"}"#,
        );
        assert!(e.message.contains("does not match"));
    }

    #[test]
    fn decodes_wrapped_base64() {
        let encoded = STANDARD.encode(r#"[{"employeeId":1,"name":"A","title":"B"}]"#);
        let wrapped = format!("{}\n{}\n", &encoded[..20], &encoded[20..]);
        let out = decode_content(
            "e.json",
            ContentsResponse {
                kind: "file".into(),
                sha: "deadbeef".into(),
                content: wrapped,
                encoding: "base64".into(),
            },
        )
        .unwrap();
        assert_eq!(out.version, "deadbeef");
        assert!(out.content.contains("employeeId"));
    }

    #[test]
    fn rejects_directories() {
        let err = decode_content(
            "data",
            ContentsResponse {
                kind: "dir".into(),
                sha: "x".into(),
                content: String::new(),
                encoding: String::new(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::Decode);
    }

    #[test]
    fn oversized_file_is_reported_as_such() {
        let err = decode_content(
            "data/pending_requests.json",
            ContentsResponse {
                kind: "file".into(),
                sha: "x".into(),
                content: String::new(),
                encoding: "none".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::Decode);
        assert!(err.message.contains("too large"));
    }

    fn put_body(sha: Option<&str>) -> serde_json::Value {
        serde_json::to_value(PutRequest {
            message: "INSERT request #1 (employee 5)",
            content: STANDARD.encode("[]"),
            branch: "main",
            sha,
            committer: Committer {
                name: "staffledger",
                email: "staffledger@users.noreply.github.com",
            },
        })
        .unwrap()
    }

    #[test]
    fn create_body_has_no_sha() {
        let body = put_body(None);
        assert!(body.get("sha").is_none());
        assert_eq!(body["branch"], "main");
        assert_eq!(body["content"], "W10=");
        assert_eq!(body["committer"]["name"], "staffledger");
    }

    #[test]
    fn update_body_carries_the_read_sha() {
        let body = put_body(Some("3d21ec53"));
        assert_eq!(body["sha"], "3d21ec53");
        assert_eq!(body["message"], "INSERT request #1 (employee 5)");
    }
}
