use std::io::{self, Write};

use tokio::signal;
use tracing::info;

use crate::feed::{FeedSimulator, FeedState};
use crate::types::TokenInfo;

/// Prints the seeded tokens and then every live arrival as one JSON line each,
/// oldest first, until Ctrl-C.
pub async fn run_headless(
    mut simulator: FeedSimulator,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut updates = simulator.subscribe();
    let initial = updates.borrow_and_update().clone();
    let seeded: Vec<&TokenInfo> = initial.tokens().iter().collect();
    print_tokens(&mut io::stdout().lock(), seeded.into_iter().rev())?;
    let mut seen = initial.arrivals();

    info!("🔍 Streaming mock deployments, press Ctrl-C to stop...");
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result?;
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                let fresh = unseen_arrivals(&state, seen);
                print_tokens(&mut io::stdout().lock(), fresh.into_iter().rev())?;
                seen = state.arrivals();
            }
        }
    }

    simulator.shutdown();
    info!("👋 Feed stopped after {} arrivals", seen);
    Ok(())
}

/// Newest-first slice of arrivals recorded after `seen`, bounded by what the
/// feed still holds.
fn unseen_arrivals(state: &FeedState, seen: u64) -> Vec<&TokenInfo> {
    let fresh = state.arrivals().saturating_sub(seen) as usize;
    state.tokens().iter().take(fresh).collect()
}

fn print_tokens<'a, W, I>(out: &mut W, tokens: I) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    W: Write,
    I: Iterator<Item = &'a TokenInfo>,
{
    for token in tokens {
        writeln!(out, "{}", serde_json::to_string(token)?)?;
    }
    out.flush()?;
    Ok(())
}
