use std::collections::VecDeque;

use crate::types::TokenInfo;

/// Newest-first list of tokens capped at `capacity`. Arrivals go to the front,
/// overflow falls off the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFeed {
    tokens: VecDeque<TokenInfo>,
    capacity: usize,
}

impl TokenFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            tokens: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Builds a feed from backfilled tokens: sorted newest-first by deployment
    /// time, then cut down to the capacity.
    pub fn seeded(mut tokens: Vec<TokenInfo>, capacity: usize) -> Self {
        tokens.sort_by(|a, b| b.deployed_at.cmp(&a.deployed_at));
        tokens.truncate(capacity);
        Self {
            tokens: tokens.into(),
            capacity,
        }
    }

    /// Prepends `token` and returns how many old entries were evicted.
    pub fn push_front(&mut self, token: TokenInfo) -> usize {
        self.tokens.push_front(token);
        let evicted = self.tokens.len().saturating_sub(self.capacity);
        self.tokens.truncate(self.capacity);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn latest(&self) -> Option<&TokenInfo> {
        self.tokens.front()
    }

    pub fn get(&self, index: usize) -> Option<&TokenInfo> {
        self.tokens.get(index)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tokens.iter().any(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenInfo> {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Deployment, generate_token};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn seeded_feed_is_newest_first() {
        let mut rng = StdRng::seed_from_u64(8);
        let tokens = (0..8)
            .map(|_| generate_token(&mut rng, Deployment::seed_window()))
            .collect();
        let feed = TokenFeed::seeded(tokens, 50);
        assert_eq!(feed.len(), 8);
        let stamps: Vec<_> = feed.iter().map(|t| t.deployed_at).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn seeded_feed_respects_capacity() {
        let mut rng = StdRng::seed_from_u64(9);
        let tokens = (0..12)
            .map(|_| generate_token(&mut rng, Deployment::seed_window()))
            .collect();
        let feed = TokenFeed::seeded(tokens, 5);
        assert_eq!(feed.len(), 5);
    }

    #[test]
    fn overflow_keeps_the_most_recent_in_arrival_order() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut feed = TokenFeed::new(50);
        let mut arrived = Vec::new();
        let mut evicted = 0;
        for _ in 0..73 {
            let token = generate_token(&mut rng, Deployment::Now);
            arrived.push(token.id.clone());
            evicted += feed.push_front(token);
        }
        assert_eq!(feed.len(), 50);
        assert_eq!(evicted, 23);

        let expected: Vec<_> = arrived.iter().rev().take(50).cloned().collect();
        let actual: Vec<_> = feed.iter().map(|t| t.id.clone()).collect();
        assert_eq!(actual, expected);
        assert_eq!(feed.latest().map(|t| t.id.as_str()), arrived.last().map(String::as_str));
    }

    #[test]
    fn push_below_capacity_evicts_nothing() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut feed = TokenFeed::new(3);
        let token = generate_token(&mut rng, Deployment::Now);
        let id = token.id.clone();
        assert_eq!(feed.push_front(token), 0);
        assert!(feed.contains(&id));
        assert_eq!(feed.get(0).map(|t| t.id.as_str()), Some(id.as_str()));
        assert!(!feed.is_empty());
    }
}
