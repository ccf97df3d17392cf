mod simulator;
mod token_feed;

pub use simulator::{FeedSimulator, FeedState, LiveState};
pub use token_feed::TokenFeed;
