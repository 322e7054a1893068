//! Remote glyph service: the only collaborator the core talks to.

pub mod glyph;
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

pub use glyph::HttpRitualClient;
pub use http_client::{build_service_client, build_service_client_with_timeout};
pub use traits::{RitualFuture, RitualService};
pub use types::{Artifact, RitualFormat, RitualKind, RitualRequest, RitualResult};
