//! API gateway: one call per submitted turn, failures folded into turns

use futures::FutureExt;
use neuronest_core::Turn;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::base::ChatProvider;

/// Model text used when the response parses but carries no candidate text
pub const MALFORMED_FALLBACK: &str = "Sorry, I could not get a response.";

/// Model text used when the call itself fails or the body is not JSON
pub const ERROR_FALLBACK: &str = "An error occurred while fetching the response.";

/// Sends the whole conversation to a provider and always yields a model turn.
///
/// No error ever reaches the caller. A malformed payload is logged at `warn`
/// and becomes [`MALFORMED_FALLBACK`]; any other failure, including a
/// panicking provider, is logged at `error` and becomes [`ERROR_FALLBACK`].
#[derive(Clone)]
pub struct ApiGateway {
    provider: Arc<dyn ChatProvider>,
}

impl ApiGateway {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Issue exactly one request for `turns` and convert the outcome to a turn
    pub async fn complete(&self, turns: &[Turn]) -> Turn {
        debug!(
            "Requesting completion for {} turns (model: {})",
            turns.len(),
            self.provider.model()
        );

        let outcome = AssertUnwindSafe(self.provider.generate(turns))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(text)) => Turn::model(text),
            Ok(Err(e)) if e.is_malformed_response() => {
                warn!("Unexpected API response structure: {}", e);
                Turn::model(MALFORMED_FALLBACK)
            }
            Ok(Err(e)) => {
                error!("Error calling completion API: {}", e);
                Turn::model(ERROR_FALLBACK)
            }
            Err(_) => {
                error!("Completion provider panicked");
                Turn::model(ERROR_FALLBACK)
            }
        }
    }
}
