mod projection;

use crate::{PEER_KEY_LEN, PeerKey};

/// A distinct key per test fixture index.
pub(crate) fn key(n: u8) -> PeerKey {
    PeerKey::new([n; PEER_KEY_LEN])
}
