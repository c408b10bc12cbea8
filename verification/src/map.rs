//! Frog → froggy id mapping.

use froglink_types::{FrogId, FroggyId};

/// Map a frog id to its froggy id.
///
/// The successor collection mirrors the legacy one one-to-one, so the
/// mapping is the identity. It stays behind this function so a lookup
/// table can replace it without touching the verification flow; the link
/// table enforces injectivity regardless.
pub fn map_froggy_id(frog_id: FrogId) -> FroggyId {
    FroggyId(frog_id.value())
}
