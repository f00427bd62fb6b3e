//! Command-line and environment configuration

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use discharge_core::DischargeError;

use crate::ai::Sampling;
use crate::output::Destination;

/// Environment variable that overrides the provider's base URL
pub const BASE_URL_VAR: &str = "DISCHARGE_API_BASE_URL";

/// Hosted chat-completion service used to write the note
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// Llama 3.1 via Together.ai
    Together,
    /// OpenAI chat completions
    Openai,
    /// Anthropic Claude messages
    Anthropic,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::Together => "Together",
            Provider::Openai => "OpenAI",
            Provider::Anthropic => "Claude",
        }
    }

    pub fn api_key_var(self) -> &'static str {
        match self {
            Provider::Together => "TOGETHER_API_KEY",
            Provider::Openai => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::Together => "https://api.together.xyz/v1",
            Provider::Openai => "https://api.openai.com/v1",
            Provider::Anthropic => "https://api.anthropic.com/v1",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Together => "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo",
            Provider::Openai => "gpt-4o-mini",
            Provider::Anthropic => "claude-sonnet-4-5-20250929",
        }
    }
}

/// Generate a pet-owner discharge note from a consultation JSON file
#[derive(Debug, Parser)]
#[command(name = "discharge-notes", version)]
pub struct Cli {
    /// Path to the consultation JSON file
    pub input: PathBuf,

    /// Hosted model provider
    #[arg(long, value_enum, default_value_t = Provider::Together)]
    pub provider: Provider,

    /// Override the provider's default model
    #[arg(long)]
    pub model: Option<String>,

    /// Override the provider's API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.3)]
    pub temperature: f32,

    /// Maximum length of the generated note, in tokens
    #[arg(long, default_value_t = 1000)]
    pub max_tokens: u32,

    /// Print the note instead of writing it to the solution directory
    #[arg(long)]
    pub stdout: bool,

    /// Skip the check for `patient` and `consultation` sections
    #[arg(long)]
    pub no_strict: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// Resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub provider: Provider,
    pub base_url: String,
    pub sampling: Sampling,
    pub api_key: Option<String>,
    pub strict: bool,
    pub destination: Destination,
}

impl Config {
    /// Resolve configuration from parsed arguments and the process environment
    pub fn from_env(cli: Cli) -> Self {
        Self::resolve(cli, |name| std::env::var(name).ok())
    }

    /// Resolve configuration using `lookup` for environment variables.
    ///
    /// The API key is only read here; whether it is usable is decided by
    /// [`Config::require_api_key`] once the input has been validated.
    pub fn resolve(cli: Cli, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let provider = cli.provider;

        let base_url = cli
            .base_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()))
            .unwrap_or_else(|| provider.default_base_url().to_string());

        let destination = if cli.stdout {
            Destination::Stdout
        } else {
            Destination::SolutionDir
        };

        Self {
            input: cli.input,
            provider,
            base_url,
            sampling: Sampling {
                model: cli
                    .model
                    .unwrap_or_else(|| provider.default_model().to_string()),
                temperature: cli.temperature,
                max_tokens: cli.max_tokens,
            },
            api_key: lookup(provider.api_key_var()),
            strict: !cli.no_strict,
            destination,
        }
    }

    /// Return the provider's API key, rejecting blank or malformed values
    pub fn require_api_key(&self) -> Result<String, DischargeError> {
        let var = self.provider.api_key_var();

        let key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| DischargeError::MissingApiKey(var.to_string()))?;

        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DischargeError::MalformedApiKey(var.to_string()));
        }

        Ok(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("discharge-notes").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    fn resolve(args: &[&str], env: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::resolve(parse(args), |name| env.get(name).cloned())
    }

    #[test]
    fn defaults_to_together_strict_solution_dir() {
        let config = resolve(&["data/visit.json"], &[("TOGETHER_API_KEY", "tg-123")]);

        assert_eq!(config.input, PathBuf::from("data/visit.json"));
        assert_eq!(config.provider, Provider::Together);
        assert_eq!(config.base_url, "https://api.together.xyz/v1");
        assert_eq!(
            config.sampling.model,
            "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo"
        );
        assert_eq!(config.sampling.temperature, 0.3);
        assert_eq!(config.sampling.max_tokens, 1000);
        assert!(config.strict);
        assert_eq!(config.destination, Destination::SolutionDir);
        assert_eq!(config.require_api_key().unwrap(), "tg-123");
    }

    #[test]
    fn api_key_variable_follows_provider() {
        let env = [("TOGETHER_API_KEY", "tg"), ("OPENAI_API_KEY", "sk-openai")];

        let config = resolve(&["visit.json", "--provider", "openai"], &env);
        assert_eq!(config.require_api_key().unwrap(), "sk-openai");

        let config = resolve(&["visit.json", "--provider", "anthropic"], &env);
        match config.require_api_key() {
            Err(DischargeError::MissingApiKey(var)) => assert_eq!(var, "ANTHROPIC_API_KEY"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = resolve(&["visit.json"], &[("TOGETHER_API_KEY", "   ")]);
        let err = config.require_api_key().unwrap_err();

        assert!(matches!(err, DischargeError::MissingApiKey(_)));
        assert_eq!(
            err.to_string(),
            "API key not found. Please set TOGETHER_API_KEY in .env file"
        );
    }

    #[test]
    fn api_key_with_inner_whitespace_is_malformed() {
        let config = resolve(&["visit.json"], &[("TOGETHER_API_KEY", "tg 123")]);
        assert!(matches!(
            config.require_api_key(),
            Err(DischargeError::MalformedApiKey(_))
        ));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_from_key() {
        let config = resolve(&["visit.json"], &[("TOGETHER_API_KEY", " tg-123\n")]);
        assert_eq!(config.require_api_key().unwrap(), "tg-123");
    }

    #[test]
    fn base_url_prefers_flag_then_environment() {
        let env = [(BASE_URL_VAR, "http://localhost:9000/v1")];

        let config = resolve(&["visit.json"], &env);
        assert_eq!(config.base_url, "http://localhost:9000/v1");

        let config = resolve(&["visit.json", "--base-url", "http://127.0.0.1:1/v1"], &env);
        assert_eq!(config.base_url, "http://127.0.0.1:1/v1");
    }

    #[test]
    fn blank_base_url_flag_falls_back() {
        let config = resolve(&["visit.json", "--base-url", "  "], &[]);
        assert_eq!(config.base_url, "https://api.together.xyz/v1");

        let env = [(BASE_URL_VAR, "http://localhost:9000/v1")];
        let config = resolve(&["visit.json", "--base-url", ""], &env);
        assert_eq!(config.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn flags_override_variant_behaviour() {
        let config = resolve(
            &[
                "visit.json",
                "--stdout",
                "--no-strict",
                "--model",
                "gpt-4o",
                "--temperature",
                "0.7",
                "--max-tokens",
                "256",
            ],
            &[],
        );

        assert_eq!(config.destination, Destination::Stdout);
        assert!(!config.strict);
        assert_eq!(config.sampling.model, "gpt-4o");
        assert_eq!(config.sampling.temperature, 0.7);
        assert_eq!(config.sampling.max_tokens, 256);
    }

    #[test]
    fn input_path_is_required() {
        assert!(Cli::try_parse_from(["discharge-notes"]).is_err());
    }
}
