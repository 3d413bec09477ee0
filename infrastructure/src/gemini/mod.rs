//! Gemini adapter
//!
//! Implements LlmGateway over the Gemini `generateContent` HTTP API.

pub mod config;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;
