// End-to-end integration tests
// Coverage: repository gathering (mocked GitHub API) → analysis (mock LLM)
// → file write → preview property

use llmstxt_gen::cli::generate;
use llmstxt_gen::config::{Config, GenerationConfig};
use llmstxt_gen::github::{GithubClient, RepoRef};
use llmstxt_gen::llm::client::MockLlmClient;
use llmstxt_gen::pipeline::analyzer::RepositoryAnalyzer;
use llmstxt_gen::util;
use std::fs;

/// Register the four GitHub endpoints the gatherer hits for owner/repo
async fn mock_github_repo(server: &mut mockito::ServerGuard) {
    server
        .mock("GET", "/repos/owner/repo")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"default_branch": "main"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/owner/repo/git/trees/main?recursive=1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "tree": [
                    {"path": "README.md", "type": "blob"},
                    {"path": "pyproject.toml", "type": "blob"},
                    {"path": "src", "type": "tree"},
                    {"path": "src/lib.py", "type": "blob"}
                ]
            }"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/repos/owner/repo/readme")
        .with_status(200)
        .with_body("# Example\n\nAn example repository.")
        .create_async()
        .await;
    server
        .mock("GET", "/repos/owner/repo/contents/pyproject.toml")
        .with_status(200)
        .with_body("[project]\nname = \"example\"\nversion = \"1.0.0\"")
        .create_async()
        .await;
}

#[tokio::test]
async fn test_generate_end_to_end_dry_run() {
    let mut server = mockito::Server::new_async().await;
    mock_github_repo(&mut server).await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("llmstxt.toml");
    fs::write(
        &config_path,
        format!("[github]\napi_base = \"{}\"\n", server.url()),
    )
    .unwrap();
    let output_path = dir.path().join("llms.txt");

    generate::run(
        "https://github.com/owner/repo".to_string(),
        output_path.to_string_lossy().to_string(),
        Some(config_path.to_string_lossy().to_string()),
        None,
        None,
        None,
        None,
        true,
    )
    .await
    .unwrap();

    // Output file is created and non-empty
    let written = fs::read_to_string(&output_path).unwrap();
    assert!(!written.is_empty());
    assert!(written.starts_with("# example-project"));

    // The preview is a prefix of the written content
    let preview = util::preview(&written, util::PREVIEW_CHARS);
    let prefix = preview.strip_suffix("...").unwrap_or(&preview);
    assert!(written.starts_with(prefix));
}

#[tokio::test]
async fn test_generate_rejects_bad_repo_url() {
    let result = generate::run(
        "https://example.com/not/github".to_string(),
        "llms.txt".to_string(),
        None,
        None,
        None,
        None,
        None,
        true,
    )
    .await;
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("unsupported repository URL"));
}

#[tokio::test]
async fn test_gather_then_analyze_pipeline() {
    let mut server = mockito::Server::new_async().await;
    mock_github_repo(&mut server).await;

    let mut config = Config::default();
    config.github.api_base = server.url();
    config.github.token_env = None;

    let repo = RepoRef::parse("https://github.com/owner/repo").unwrap();
    let github = GithubClient::new(&config.github).unwrap();
    let info = github
        .fetch_repository_info(&repo, &GenerationConfig::default())
        .await
        .unwrap();

    assert!(info.file_tree.contains("src/lib.py"));
    assert!(info.readme_content.contains("An example repository."));
    assert_eq!(info.package_files.len(), 1);

    let analyzer = RepositoryAnalyzer::new(Box::new(MockLlmClient::new()), 3);
    let result = analyzer.analyze(&repo.url(), &info).await.unwrap();

    // Mock output is fenced on the first pass; the analyzer strips it
    assert!(result.llms_txt_content.starts_with("# example-project"));
    assert!(!result.llms_txt_content.contains("```"));
}

#[tokio::test]
async fn test_generate_surfaces_github_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/owner/repo")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("llmstxt.toml");
    fs::write(
        &config_path,
        format!("[github]\napi_base = \"{}\"\n", server.url()),
    )
    .unwrap();
    let output_path = dir.path().join("llms.txt");

    let result = generate::run(
        "https://github.com/owner/repo".to_string(),
        output_path.to_string_lossy().to_string(),
        Some(config_path.to_string_lossy().to_string()),
        None,
        None,
        None,
        None,
        true,
    )
    .await;

    assert!(result.is_err());
    // No partial output on failure
    assert!(!output_path.exists());
}
