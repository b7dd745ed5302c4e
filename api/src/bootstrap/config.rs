use std::env;
use std::time::Duration;

use crate::application::services::registration::RetryPolicy;
use crate::domain::papers::paper::{SubjectId, WorkspaceId};

const DEV_DIRECTORY_KEY: &str = "development-directory-key";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub service_name: String,
    pub public_base_url: String,
    pub frontend_url: Option<String>,
    pub directory_url: String,
    pub directory_api_key: String,
    pub registration: RetryPolicy,
    pub workspace_members: Vec<(WorkspaceId, SubjectId)>,
    pub site_members: Vec<SubjectId>,
    pub seed_sample_papers: bool,
    pub body_limit_bytes: usize,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8083);
        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "Ku Research".into());
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .and_then(|v| normalize_base_url(&v))
            .unwrap_or_else(|| format!("http://localhost:{api_port}"));
        let frontend_url = env::var("FRONTEND_URL").ok();
        let directory_url = env::var("DIRECTORY_URL")
            .ok()
            .and_then(|v| normalize_base_url(&v))
            .unwrap_or_else(|| "http://localhost:8080".into());
        let directory_api_key =
            env::var("DIRECTORY_API_KEY").unwrap_or_else(|_| DEV_DIRECTORY_KEY.into());

        let defaults = RetryPolicy::default();
        let max_attempts = env::var("REGISTRATION_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_attempts);
        let interval_secs = env::var("REGISTRATION_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.interval.as_secs());
        let timeout_secs = env::var("REGISTRATION_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.attempt_timeout.as_secs());
        if max_attempts == 0 {
            anyhow::bail!("REGISTRATION_MAX_ATTEMPTS must be at least 1");
        }
        let registration = RetryPolicy {
            max_attempts,
            interval: Duration::from_secs(interval_secs),
            attempt_timeout: Duration::from_secs(timeout_secs),
        };

        let workspace_members = parse_workspace_members(
            &env::var("WORKSPACE_MEMBERS").unwrap_or_default(),
        )?;
        let site_members = parse_site_members(&env::var("SITE_MEMBERS").unwrap_or_default())?;
        let seed_sample_papers = env::var("SEED_SAMPLE_PAPERS")
            .map(|v| !matches!(v.trim(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);
        let body_limit_bytes = env::var("BODY_LIMIT_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10 * 1024 * 1024);
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );

        if is_production
            && (directory_api_key == DEV_DIRECTORY_KEY || directory_api_key.len() < 16)
        {
            anyhow::bail!("DIRECTORY_API_KEY must be set to a strong secret in production");
        }

        Ok(Self {
            api_port,
            service_name,
            public_base_url,
            frontend_url,
            directory_url,
            directory_api_key,
            registration,
            workspace_members,
            site_members,
            seed_sample_papers,
            body_limit_bytes,
            is_production,
        })
    }
}

fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.trim_end_matches('/').to_string())
    } else {
        None
    }
}

/// Parses `"7:2,7:3"` into `(workspace, subject)` pairs.
pub fn parse_workspace_members(raw: &str) -> anyhow::Result<Vec<(WorkspaceId, SubjectId)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (workspace, subject) = entry
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("invalid workspace membership {entry:?}"))?;
            let workspace = workspace
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid workspace id in {entry:?}"))?;
            let subject = subject
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid subject id in {entry:?}"))?;
            Ok((workspace, subject))
        })
        .collect()
}

pub fn parse_site_members(raw: &str) -> anyhow::Result<Vec<SubjectId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid site member {entry:?}"))
        })
        .collect()
}
