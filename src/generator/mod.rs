mod glitch;
mod mock_token;

pub use glitch::glitch_text;
pub use mock_token::{Deployment, generate_seed, generate_token};
