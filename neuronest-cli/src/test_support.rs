use async_trait::async_trait;
use neuronest_agent::ChatController;
use neuronest_core::Turn;
use neuronest_providers::{ApiGateway, ChatProvider, ProviderResult};
use std::sync::Arc;

/// Provider that answers every request with a fixed text
pub struct FixedReply(pub String);

#[async_trait]
impl ChatProvider for FixedReply {
    async fn generate(&self, _turns: &[Turn]) -> ProviderResult<String> {
        Ok(self.0.clone())
    }

    fn model(&self) -> &str {
        "fixed"
    }
}

pub fn controller(reply: impl Into<String>) -> ChatController {
    ChatController::new(ApiGateway::new(Arc::new(FixedReply(reply.into()))))
}
