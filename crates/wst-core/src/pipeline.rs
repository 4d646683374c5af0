use anyhow::Result;

use crate::Reading;

/// Publish boundary for readings. Emission is fire-and-forget from the
/// collector's point of view; failures are logged, never fatal.
#[async_trait::async_trait]
pub trait Sink: Send + Sync {
    async fn emit(&mut self, reading: &Reading) -> Result<()>;
}
