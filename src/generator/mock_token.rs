use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::types::{TokenInfo, TokenStatus};
use crate::utils::constants::{
    ACTIVE_PROBABILITY, ADDRESS_ALPHABET, ADDRESS_LEN, ADDRESS_PREFIX, ID_ALPHABET, ID_LEN,
    SEED_WINDOW_MS, SUPPLIES, TOKEN_TABLE,
};

/// When a generated token claims to have been deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// Live arrival, stamped with the current time.
    Now,
    /// Backfill, stamped uniformly within the last `window_ms` milliseconds.
    WithinLast { window_ms: i64 },
}

impl Deployment {
    pub fn seed_window() -> Self {
        Deployment::WithinLast {
            window_ms: SEED_WINDOW_MS,
        }
    }

    fn timestamp<R: Rng + ?Sized>(self, rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Deployment::Now => now,
            Deployment::WithinLast { window_ms } if window_ms > 0 => {
                now - Duration::milliseconds(rng.gen_range(0..window_ms))
            }
            Deployment::WithinLast { .. } => now,
        }
    }
}

pub fn generate_token<R: Rng + ?Sized>(rng: &mut R, deployment: Deployment) -> TokenInfo {
    let (name, symbol) = TOKEN_TABLE[rng.gen_range(0..TOKEN_TABLE.len())];
    let supply = SUPPLIES[rng.gen_range(0..SUPPLIES.len())];
    let status = if rng.gen_bool(ACTIVE_PROBABILITY) {
        TokenStatus::Active
    } else {
        TokenStatus::New
    };

    TokenInfo::new(
        random_id(rng),
        name.to_string(),
        symbol.to_string(),
        random_address(rng),
        random_address(rng),
        supply.to_string(),
        deployment.timestamp(rng, Utc::now()),
        status,
    )
}

/// Generates `count` backfill tokens, newest first.
pub fn generate_seed<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<TokenInfo> {
    let mut tokens: Vec<TokenInfo> = (0..count)
        .map(|_| generate_token(rng, Deployment::seed_window()))
        .collect();
    tokens.sort_by(|a, b| b.deployed_at.cmp(&a.deployed_at));
    tokens
}

pub fn random_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut addr = String::with_capacity(ADDRESS_LEN);
    addr.push(ADDRESS_PREFIX);
    addr.extend(random_chars(rng, ADDRESS_ALPHABET, ADDRESS_LEN - 1));
    addr
}

pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_chars(rng, ID_ALPHABET, ID_LEN).collect()
}

fn random_chars<'a, R: Rng + ?Sized>(
    rng: &'a mut R,
    alphabet: &'a [u8],
    len: usize,
) -> impl Iterator<Item = char> + 'a {
    (0..len).map(move |_| alphabet[rng.gen_range(0..alphabet.len())] as char)
}
