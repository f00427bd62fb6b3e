//! discharge-notes library crate
//!
//! Exposes the `run` pipeline and its building blocks for integration tests.
//! The actual binary entrypoint is in `main.rs`.

pub mod ai;
pub mod config;
pub mod input;
pub mod output;

use discharge_core::DischargeError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ai::{ChatClient, ClaudeClient, generate_discharge_note};
use config::{Config, Provider};
use output::Written;

/// Generate and persist one discharge note.
///
/// Input problems are reported before the API key is looked at, and no
/// request is sent unless the key is usable.
pub async fn run(config: &Config) -> Result<Written, DischargeError> {
    let data = input::load_consultation(&config.input)?;

    if config.strict {
        data.require_sections()?;
    }

    let api_key = config.require_api_key()?;

    tracing::info!(
        provider = config.provider.name(),
        model = %config.sampling.model,
        "Requesting discharge note"
    );

    let note = match config.provider {
        Provider::Together | Provider::Openai => {
            let client = ChatClient::new(
                config.provider.name(),
                &config.base_url,
                api_key,
                config.sampling.clone(),
            );
            generate_discharge_note(&client, &data).await?
        }
        Provider::Anthropic => {
            let client = ClaudeClient::new(&config.base_url, api_key, config.sampling.clone());
            generate_discharge_note(&client, &data).await?
        }
    };

    output::write_note(&config.input, &note, config.destination)
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout stays free for `--stdout` output.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
