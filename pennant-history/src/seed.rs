//! Deterministic random streams derived from the session seed.
use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

use crate::constants::BALLOT_DOMAIN_TAG;

fn derive_stream_seed(session_seed: u64, domain_tag: &[u8], year: u16) -> [u8; 32] {
    // HMAC accepts keys of any length, so construction cannot fail here.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&session_seed.to_le_bytes()) else {
        return [0u8; 32];
    };
    mac.update(domain_tag);
    mac.update(&year.to_le_bytes());
    mac.finalize().into_bytes().into()
}

/// The vote-noise stream for one year's Hall of Fame ballot. The same
/// session seed and year always produce the same stream.
#[must_use]
pub fn ballot_rng(session_seed: u64, year: u16) -> ChaCha20Rng {
    ChaCha20Rng::from_seed(derive_stream_seed(session_seed, BALLOT_DOMAIN_TAG, year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn same_seed_and_year_replay_identically() {
        let mut a = ballot_rng(0xC0FFEE, 2024);
        let mut b = ballot_rng(0xC0FFEE, 2024);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn years_are_domain_separated() {
        let mut a = ballot_rng(0xC0FFEE, 2024);
        let mut b = ballot_rng(0xC0FFEE, 2025);
        assert_ne!(a.next_u64(), b.next_u64());
    }
}
