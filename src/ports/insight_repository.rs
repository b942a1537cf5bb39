//! Insight repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insight::Insight;

/// Repository port for the per-user insight singleton.
#[async_trait]
pub trait InsightRepository: Send + Sync {
    /// Returns the cached insight, or `None` when none has been computed.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Insight>, DomainError>;

    /// Inserts or fully replaces the user's insight.
    async fn upsert(&self, insight: &Insight) -> Result<(), DomainError>;
}
