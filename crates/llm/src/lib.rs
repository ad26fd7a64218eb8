//! AI content generation
//!
//! `providers` holds the raw text-generation backends (Google Gemini);
//! `content` turns them into the three product-level operations used by the
//! application: description generation, marketing copy and content analysis.

pub mod content;
pub mod errors;
pub mod prompts;
pub mod providers;
pub mod schema;

pub use content::{ContentClient, ContentGenerator, DESCRIPTION_FALLBACK};
pub use errors::AiGenerationError;
pub use providers::{GeminiProvider, GenerationRequest, TextGenerator};
