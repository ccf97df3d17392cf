mod token;

pub use token::{TokenInfo, TokenStatus};
