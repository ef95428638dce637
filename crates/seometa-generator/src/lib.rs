//! SEO metadata generation: an AI path backed by a chat-completions service
//! and a deterministic local fallback.
//!
//! [`SeoGenerator::generate`] always returns usable metadata. Any failure on
//! the AI path (no credential, transport error, malformed output) is logged
//! and answered by [`generate_fallback`].

pub mod error;
pub mod fallback;
pub mod generator;
pub mod llm;
pub mod parse;
pub mod prompt;

pub use error::GenerationError;
pub use fallback::generate_fallback;
pub use generator::{Generated, GenerationSource, SeoGenerator};
pub use llm::ChatClient;
pub use parse::parse_response;
pub use prompt::{build_prompt, SYSTEM_PROMPT};
