//! Remote repository metadata gathering via the GitHub REST API.
//!
//! Produces the [`RepositoryInfo`] consumed by the analyzer: a rendered file
//! tree, the README text, and the contents of known package manifests.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{GenerationConfig, GithubConfig};
use crate::util::floor_char_boundary;

const API_TIMEOUT_SECS: u64 = 30;

/// Root-level manifest files worth feeding to the model, across ecosystems.
const MANIFEST_NAMES: &[&str] = &[
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "requirements.txt",
    "package.json",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "Gemfile",
    "composer.json",
];

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub API error {status} for {url}: {body}")]
    Api {
        status: StatusCode,
        url: String,
        body: String,
    },

    #[error("GitHub rate limit exceeded (set GITHUB_TOKEN to raise the limit)")]
    RateLimited,

    #[error("unsupported repository URL: {0}")]
    BadUrl(String),
}

/// Owner/repo pair parsed from a GitHub URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse "https://github.com/owner/repo" (optionally with a trailing
    /// slash, ".git" suffix, or extra path segments) into an owner/repo pair.
    pub fn parse(url: &str) -> Result<Self, GithubError> {
        let trimmed = url.trim().trim_end_matches('/');
        let rest = trimmed
            .strip_prefix("https://github.com/")
            .or_else(|| trimmed.strip_prefix("http://github.com/"))
            .or_else(|| trimmed.strip_prefix("github.com/"))
            .ok_or_else(|| GithubError::BadUrl(url.to_string()))?;

        let mut parts = rest.splitn(3, '/');
        let owner = parts.next().unwrap_or_default();
        let repo = parts
            .next()
            .unwrap_or_default()
            .trim_end_matches(".git");

        if owner.is_empty() || repo.is_empty() {
            return Err(GithubError::BadUrl(url.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

/// Repository material gathered for analysis. Read-only input to the
/// analyzer; constructed once per run.
#[derive(Debug, Clone, Default)]
pub struct RepositoryInfo {
    /// Blob paths, one per line, capped at `max_tree_entries`
    pub file_tree: String,
    /// Raw README text; empty when the repository has none
    pub readme_content: String,
    /// Root-level package manifests found in the tree
    pub package_files: Vec<PackageFile>,
}

#[derive(Debug, Clone)]
pub struct PackageFile {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct RepoMetadata {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

pub struct GithubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .user_agent(concat!("llmstxt-gen/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.get_token(),
        })
    }

    async fn get(&self, url: &str, accept: &str) -> Result<reqwest::Response, GithubError> {
        let mut request = self
            .client
            .get(url)
            .header("accept", accept)
            .header("x-github-api-version", "2022-11-28");
        if let Some(ref token) = self.token {
            request = request.header("authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        // GitHub reports exhausted quota as 403 with a zeroed remaining header
        if response.status() == StatusCode::FORBIDDEN
            && response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                == Some("0")
        {
            return Err(GithubError::RateLimited);
        }

        Ok(response)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GithubError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(GithubError::Api { status, url, body })
    }

    /// Fetch the repository's default branch name.
    pub async fn default_branch(&self, repo: &RepoRef) -> Result<String, GithubError> {
        let url = format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.repo);
        let response = Self::check(self.get(&url, "application/vnd.github+json").await?).await?;
        let metadata: RepoMetadata = response.json().await?;
        Ok(metadata.default_branch)
    }

    async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<TreeResponse, GithubError> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, repo.owner, repo.repo, branch
        );
        let response = Self::check(self.get(&url, "application/vnd.github+json").await?).await?;
        Ok(response.json().await?)
    }

    /// Fetch the repository README as raw text. Missing README is not an
    /// error; it returns an empty string.
    pub async fn readme(&self, repo: &RepoRef) -> Result<String, GithubError> {
        let url = format!("{}/repos/{}/{}/readme", self.api_base, repo.owner, repo.repo);
        let response = self.get(&url, "application/vnd.github.raw").await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("No README for {}", repo.url());
            return Ok(String::new());
        }
        Ok(Self::check(response).await?.text().await?)
    }

    /// Fetch a single file's raw content, or None when it doesn't exist.
    pub async fn raw_file(
        &self,
        repo: &RepoRef,
        path: &str,
    ) -> Result<Option<String>, GithubError> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, repo.owner, repo.repo, path
        );
        let response = self.get(&url, "application/vnd.github.raw").await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::check(response).await?.text().await?))
    }

    /// Gather everything the analyzer needs: file tree, README, and package
    /// manifests, with the size caps from `limits` applied.
    pub async fn fetch_repository_info(
        &self,
        repo: &RepoRef,
        limits: &GenerationConfig,
    ) -> Result<RepositoryInfo, GithubError> {
        let branch = self.default_branch(repo).await?;
        debug!("Default branch for {}: {}", repo.url(), branch);

        let tree = self.tree(repo, &branch).await?;
        if tree.truncated {
            warn!("File tree for {} was truncated by the API", repo.url());
        }

        let blobs: Vec<&str> = tree
            .tree
            .iter()
            .filter(|entry| entry.kind == "blob")
            .map(|entry| entry.path.as_str())
            .collect();

        let mut file_tree = String::new();
        for path in blobs.iter().take(limits.max_tree_entries) {
            file_tree.push_str(path);
            file_tree.push('\n');
        }
        if blobs.len() > limits.max_tree_entries {
            file_tree.push_str(&format!(
                "... ({} more files)\n",
                blobs.len() - limits.max_tree_entries
            ));
        }

        let mut readme_content = self.readme(repo).await?;
        if readme_content.len() > limits.max_readme_chars {
            let end = floor_char_boundary(&readme_content, limits.max_readme_chars);
            readme_content.truncate(end);
        }

        let mut package_files = Vec::new();
        for name in MANIFEST_NAMES {
            if !blobs.iter().any(|path| path == name) {
                continue;
            }
            if let Some(mut content) = self.raw_file(repo, name).await? {
                if content.len() > limits.max_package_file_chars {
                    let end = floor_char_boundary(&content, limits.max_package_file_chars);
                    content.truncate(end);
                }
                package_files.push(PackageFile {
                    path: name.to_string(),
                    content,
                });
            }
        }

        info!(
            "Gathered {} file paths, {} README chars, {} package files for {}",
            blobs.len().min(limits.max_tree_entries),
            readme_content.len(),
            package_files.len(),
            repo.url()
        );

        Ok(RepositoryInfo {
            file_tree,
            readme_content,
            package_files,
        })
    }
}
