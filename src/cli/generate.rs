use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use crate::config::Config;
use crate::github::{GithubClient, RepoRef};
use crate::llm::factory;
use crate::pipeline::analyzer::RepositoryAnalyzer;
use crate::util;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    repo_url: String,
    output: String,
    config_path: Option<String>,
    provider_override: Option<String>,
    model_override: Option<String>,
    base_url_override: Option<String>,
    max_retries_override: Option<usize>,
    dry_run: bool,
) -> Result<()> {
    let repo = RepoRef::parse(&repo_url)?;
    info!("Repository: {}", repo.url());
    info!("Output: {}", output);
    if let Some(ref cfg) = config_path {
        info!("Config: {}", cfg);
    }
    info!("Dry run: {}", dry_run);

    // Load config (explicit path, working directory, or user config dir)
    let mut config = Config::load_with_path(config_path)?;

    // Apply CLI overrides
    if let Some(ref provider) = provider_override {
        info!("CLI override: provider = {}", provider);
        config.llm.provider = provider.clone();
    }
    if let Some(ref model) = model_override {
        info!("CLI override: model = {}", model);
        config.llm.model = model.clone();
    }
    if let Some(ref base_url) = base_url_override {
        info!("CLI override: base_url = {}", base_url);
        config.llm.base_url = Some(base_url.clone());
    }
    if let Some(retries) = max_retries_override {
        info!("CLI override: max_retries = {}", retries);
        config.generation.max_retries = retries;
    }

    // Gather repository material
    info!("Gathering repository information...");
    let github = GithubClient::new(&config.github)?;
    let repo_info = github
        .fetch_repository_info(&repo, &config.generation)
        .await?;

    // Create LLM client via factory
    let client = factory::create_client(&config, dry_run)?;
    if dry_run {
        info!("Using mock LLM client");
    } else {
        info!("Using {} LLM provider", config.llm.provider);
    }

    // Analyze
    let analyzer = RepositoryAnalyzer::new(client, config.generation.max_retries);
    let result = analyzer.analyze(&repo.url(), &repo_info).await?;

    // Save the generated llms.txt
    fs::write(&output, &result.llms_txt_content)
        .with_context(|| format!("Failed to write {}", output))?;

    println!("Generated {}", output);
    println!("\nPreview:");
    println!(
        "{}",
        util::preview(&result.llms_txt_content, util::PREVIEW_CHARS)
    );

    Ok(())
}
