use super::types::{RitualRequest, RitualResult};
use crate::error::NetworkError;
use std::future::Future;
use std::pin::Pin;

pub type RitualFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RitualResult, NetworkError>> + Send + 'a>>;

/// Request/response contract of the remote glyph service.
///
/// Implementations issue exactly one call per `invoke`, never retry, and never
/// touch shared state. The caller decides what a failure means.
pub trait RitualService: Send + Sync {
    /// Service identifier used in logs.
    fn name(&self) -> &str;

    fn invoke<'a>(&'a self, request: RitualRequest) -> RitualFuture<'a>;
}
