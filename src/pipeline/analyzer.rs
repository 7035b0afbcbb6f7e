//! LLM-backed repository analyzer producing llms.txt documents.

use anyhow::Result;
use tracing::{info, warn};

use crate::github::RepositoryInfo;
use crate::llm::client::LlmClient;
use crate::llm::prompts;

/// The generated llms.txt document.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub llms_txt_content: String,
}

/// Strip markdown code fences from output (```markdown ... ``` or ```...```)
fn strip_markdown_fences(content: &str) -> String {
    let trimmed = content.trim();

    for prefix in ["```markdown", "```text", "```"] {
        if trimmed.starts_with(prefix) && trimmed.ends_with("```") && trimmed.len() > prefix.len() {
            return trimmed
                .strip_prefix(prefix)
                .and_then(|s| s.strip_suffix("```"))
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| content.to_string());
        }
    }

    content.to_string()
}

/// Check the document against the llms.txt shape. Returns human-readable
/// issues suitable for feeding back to the model.
fn validate_llms_txt(content: &str) -> Vec<String> {
    let mut issues = Vec::new();
    let trimmed = content.trim();

    if trimmed.is_empty() {
        issues.push("document is empty".to_string());
        return issues;
    }

    if !trimmed.starts_with("# ") {
        issues.push("document must start with a '# <project name>' title line".to_string());
    }

    let summary_ok = trimmed
        .lines()
        .skip(1)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.starts_with('>'))
        .unwrap_or(false);
    if !summary_ok {
        issues.push("title must be followed by a '> ...' summary blockquote".to_string());
    }

    issues
}

pub struct RepositoryAnalyzer {
    client: Box<dyn LlmClient>,
    max_retries: usize,
}

impl RepositoryAnalyzer {
    pub fn new(client: Box<dyn LlmClient>, max_retries: usize) -> Self {
        Self {
            client,
            max_retries,
        }
    }

    /// Map (repo URL, gathered repository material) to an llms.txt document.
    /// Re-prompts with validation feedback up to `max_retries` times and
    /// returns the best attempt at exhaustion.
    pub async fn analyze(&self, repo_url: &str, info: &RepositoryInfo) -> Result<AnalysisResult> {
        info!("Analyzing {}", repo_url);

        let prompt = prompts::llms_txt_prompt(repo_url, info);
        let mut content = strip_markdown_fences(&self.client.complete(&prompt).await?);

        for attempt in 0..self.max_retries {
            let issues = validate_llms_txt(&content);
            if issues.is_empty() {
                info!("Validation passed on attempt {}", attempt + 1);
                break;
            }

            warn!(
                "Validation found {} issue(s): {}",
                issues.len(),
                issues.join("; ")
            );

            if attempt == self.max_retries - 1 {
                info!("Max retries reached, returning best attempt");
                break;
            }

            let fix = prompts::fix_prompt(&content, &issues);
            content = strip_markdown_fences(&self.client.complete(&fix).await?);
        }

        Ok(AnalysisResult {
            llms_txt_content: content,
        })
    }
}
