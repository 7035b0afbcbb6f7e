//! llmstxt-gen - Generate llms.txt summaries for remote repositories
//!
//! Fetches repository metadata from GitHub (file tree, README, package
//! manifests), runs it through an LLM analyzer, and writes the resulting
//! llms.txt document. Supports multiple LLM providers (OpenAI, Anthropic,
//! Gemini, OpenAI-compatible endpoints).

pub mod cli;
pub mod config;
pub mod github;
pub mod llm;
pub mod pipeline;
pub mod util;
