//! Client identity generation.
//!
//! The identity is `hostname-port-uuid`: a correlation token for matching the
//! server's responses to this client's request. It is regenerated on every
//! connection-open event and never stored.

use uuid::Uuid;
use vimera_shared::ClientIdentity;

use crate::infrastructure::page::PageLocation;

pub const IDENTITY_SEPARATOR: char = '-';

pub struct IdentityGenerator;

impl IdentityGenerator {
    /// Generate an identity for the page the client runs on.
    pub fn for_page(page: &PageLocation) -> ClientIdentity {
        Self::generate(page.hostname(), page.port())
    }

    /// `port` is empty when the page uses its scheme's default port.
    pub fn generate(hostname: &str, port: &str) -> ClientIdentity {
        ClientIdentity::new(format!(
            "{hostname}{sep}{port}{sep}{random}",
            sep = IDENTITY_SEPARATOR,
            random = Uuid::new_v4()
        ))
    }
}
