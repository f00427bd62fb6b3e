//! Discharge note generation backed by hosted chat-completion APIs

pub mod claude;
pub mod client;
pub mod discharge;

pub use claude::ClaudeClient;
pub use client::{ChatClient, CompletionClient, CompletionError, Sampling};
pub use discharge::generate_discharge_note;
