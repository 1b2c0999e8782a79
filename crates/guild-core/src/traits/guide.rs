//! Text generation port used for build guides

use async_trait::async_trait;

use crate::error::DomainError;

#[async_trait]
pub trait GuideGenerator: Send + Sync {
    /// Generate text for a fully rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}
