use anyhow::{bail, Result};

use super::client::{LlmClient, MockLlmClient};
use super::client_impl::{AnthropicClient, GeminiClient, OpenAIClient};
use crate::config::Config;

/// Create an LLM client based on configuration
pub fn create_client(config: &Config, dry_run: bool) -> Result<Box<dyn LlmClient>> {
    if dry_run {
        return Ok(Box::new(MockLlmClient::new()));
    }

    let api_key = config.get_api_key()?;
    let max_tokens = config.llm.get_max_tokens();
    let model = config.llm.model.clone();

    match config.llm.provider.as_str() {
        "anthropic" => Ok(Box::new(AnthropicClient::new(api_key, model, max_tokens)?)),

        "openai" => Ok(Box::new(OpenAIClient::new(api_key, model, max_tokens)?)),

        "openai-compatible" => {
            let base_url = config
                .llm
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434/v1".to_string());

            Ok(Box::new(OpenAIClient::with_base_url(
                api_key, model, base_url, max_tokens,
            )?))
        }

        "gemini" => Ok(Box::new(GeminiClient::new(api_key, model, max_tokens)?)),

        unknown => bail!("Unknown LLM provider: {}", unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_create_mock_client_for_dry_run() {
        let config = Config::default();
        // Succeeding without panic proves mock client was created
        create_client(&config, true).unwrap();
    }

    #[test]
    #[serial]
    fn test_create_openai_client() {
        env::set_var("OPENAI_API_KEY", "test_key");
        let config = Config::default(); // Defaults to openai
        assert!(create_client(&config, false).is_ok());
        env::remove_var("OPENAI_API_KEY");
    }

    #[test]
    #[serial]
    fn test_create_anthropic_client() {
        env::set_var("LLMSTXT_TEST_FACTORY_KEY", "test_key");
        let mut config = Config::default();
        config.llm.provider = "anthropic".to_string();
        config.llm.api_key_env = Some("LLMSTXT_TEST_FACTORY_KEY".to_string());
        assert!(create_client(&config, false).is_ok());
        env::remove_var("LLMSTXT_TEST_FACTORY_KEY");
    }

    #[test]
    fn test_create_openai_compatible_client_without_key() {
        let mut config = Config::default();
        config.llm.provider = "openai-compatible".to_string();
        config.llm.api_key_env = Some("LLMSTXT_TEST_NONEXISTENT_KEY_FACTORY_1".to_string());
        config.llm.base_url = Some("http://localhost:11434/v1".to_string());
        assert!(create_client(&config, false).is_ok());
    }

    #[test]
    #[serial]
    fn test_create_gemini_client() {
        env::set_var("LLMSTXT_TEST_FACTORY_GEMINI_KEY", "test_key");
        let mut config = Config::default();
        config.llm.provider = "gemini".to_string();
        config.llm.model = "gemini-2.0-flash".to_string();
        config.llm.api_key_env = Some("LLMSTXT_TEST_FACTORY_GEMINI_KEY".to_string());
        assert!(create_client(&config, false).is_ok());
        env::remove_var("LLMSTXT_TEST_FACTORY_GEMINI_KEY");
    }

    #[test]
    #[serial]
    fn test_create_client_with_unknown_provider() {
        env::set_var("LLMSTXT_TEST_FACTORY_KEY_2", "test_key");
        let mut config = Config::default();
        config.llm.provider = "unknown_provider".to_string();
        config.llm.api_key_env = Some("LLMSTXT_TEST_FACTORY_KEY_2".to_string());
        let result = create_client(&config, false);
        assert!(result.is_err());
        assert!(result
            .err()
            .unwrap()
            .to_string()
            .contains("Unknown LLM provider"));
        env::remove_var("LLMSTXT_TEST_FACTORY_KEY_2");
    }

    #[test]
    fn test_create_client_without_api_key() {
        // Use a unique nonexistent env var to avoid races with parallel tests
        let mut config = Config::default();
        config.llm.api_key_env = Some("LLMSTXT_TEST_NONEXISTENT_KEY_FACTORY_99999".to_string());
        let result = create_client(&config, false);
        assert!(
            result.is_err(),
            "Expected error when API key is missing, but got Ok(client)"
        );
        assert!(result
            .err()
            .unwrap()
            .to_string()
            .contains("API key not found"));
    }
}
