use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Canned document returned by the mock client. Shaped like a real llms.txt
/// (H1 title, blockquote summary, link sections) so it passes validation.
const MOCK_LLMS_TXT: &str = r#"# example-project

> A small example project. This document is produced by the mock LLM client
> so the pipeline can run end to end in tests and dry runs.

## Overview

The repository contains a single library crate with a command line front end.

## Key Files

- [README.md](README.md): project introduction and quick start
- [pyproject.toml](pyproject.toml): package metadata and dependencies

## Getting Started

Install from the package index and consult the README for usage examples.
"#;

pub struct MockLlmClient;

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.contains("VALIDATION FAILED") {
            // Fix pass: return the clean document
            return Ok(MOCK_LLMS_TXT.to_string());
        }
        // Initial pass: wrap in fences the way real models sometimes do,
        // exercising the fence stripping in the analyzer
        Ok(format!("```markdown\n{}\n```", MOCK_LLMS_TXT))
    }
}
