//! AI-first generation with deterministic fallback.

use std::fmt;

use seometa_core::{AppConfig, ProductInput, SeoMetaOutput};

use crate::error::GenerationError;
use crate::fallback::generate_fallback;
use crate::llm::ChatClient;
use crate::parse::parse_response;
use crate::prompt::{build_prompt, SYSTEM_PROMPT};

/// Which path produced a [`Generated`] result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationSource {
    Ai,
    Fallback,
}

impl GenerationSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationSource::Ai => "ai",
            GenerationSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for GenerationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub output: SeoMetaOutput,
    pub source: GenerationSource,
}

/// Generates SEO metadata, preferring the AI path when a chat client is
/// configured.
///
/// Holds no per-request state; one instance is shared by all requests.
pub struct SeoGenerator {
    chat: Option<ChatClient>,
}

impl SeoGenerator {
    #[must_use]
    pub fn new(chat: Option<ChatClient>) -> Self {
        Self { chat }
    }

    /// A generator that never calls the generation service.
    #[must_use]
    pub fn fallback_only() -> Self {
        Self { chat: None }
    }

    /// Builds the generator from `config`; AI is enabled iff an API key is set.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Http`] if the chat client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        Ok(Self::new(ChatClient::from_config(config)?))
    }

    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.chat.is_some()
    }

    /// Returns metadata for `product`. Infallible.
    ///
    /// Tries [`SeoGenerator::generate_with_ai`] once; any error is logged and
    /// answered with [`generate_fallback`].
    pub async fn generate(&self, product: &ProductInput) -> Generated {
        match self.generate_with_ai(product).await {
            Ok(output) => Generated {
                output,
                source: GenerationSource::Ai,
            },
            Err(GenerationError::Unconfigured) => {
                tracing::warn!("no generation-service client configured, using fallback generator");
                Self::fallback(product)
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI generation failed, using fallback generator");
                Self::fallback(product)
            }
        }
    }

    /// Runs only the AI path: prompt, completion, validation.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Unconfigured`] when no chat client is set.
    /// - Any error from [`ChatClient::complete`] or [`parse_response`].
    pub async fn generate_with_ai(
        &self,
        product: &ProductInput,
    ) -> Result<SeoMetaOutput, GenerationError> {
        let chat = self.chat.as_ref().ok_or(GenerationError::Unconfigured)?;
        let prompt = build_prompt(product);
        let content = chat.complete(SYSTEM_PROMPT, &prompt).await?;
        tracing::debug!(model = chat.model(), content = %content, "AI response");
        parse_response(&content)
    }

    fn fallback(product: &ProductInput) -> Generated {
        Generated {
            output: generate_fallback(product),
            source: GenerationSource::Fallback,
        }
    }
}
