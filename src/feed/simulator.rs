use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::feed::TokenFeed;
use crate::generator::{Deployment, generate_seed, generate_token, glitch_text};
use crate::types::TokenInfo;
use crate::utils::config::Config;
use crate::utils::constants::BASE_TITLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveState {
    Live,
    Paused,
}

/// Everything the presentation layer needs, published through a watch channel.
#[derive(Debug, Clone)]
pub struct FeedState {
    tokens: TokenFeed,
    live: bool,
    highlighted: Option<String>,
    title: String,
    arrivals: u64,
    // Bumped on every start/stop. A task only writes while its epoch is current.
    epoch: u64,
    disposed: bool,
}

impl FeedState {
    pub fn tokens(&self) -> &TokenFeed {
        &self.tokens
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn live_state(&self) -> LiveState {
        if self.live {
            LiveState::Live
        } else {
            LiveState::Paused
        }
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Live arrivals since startup, seeded tokens excluded.
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    fn record_arrival(&mut self, token: TokenInfo) -> usize {
        self.highlighted = Some(token.id.clone());
        self.arrivals += 1;
        self.tokens.push_front(token)
    }
}

#[derive(Debug, Clone, Copy)]
struct ArrivalTiming {
    min_ms: u64,
    max_ms: u64,
    flash: Duration,
}

impl ArrivalTiming {
    fn from_config(config: &Config) -> Self {
        Self {
            min_ms: config.min_interval_ms,
            max_ms: config.max_interval_ms.max(config.min_interval_ms),
            flash: config.flash_duration(),
        }
    }

    fn next_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }
}

/// Owns the feed state and the two timers that drive it: token arrivals
/// (gated by LIVE/PAUSED) and the title glitch (always on until shutdown).
pub struct FeedSimulator {
    config: Config,
    state: Arc<watch::Sender<FeedState>>,
    rng: StdRng,
    arrivals: Option<JoinHandle<()>>,
    glitch: Option<JoinHandle<()>>,
}

impl FeedSimulator {
    /// Seeds the feed without starting any timer.
    pub fn new(config: Config) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let seed = generate_seed(&mut rng, config.seed_count);
        let state = FeedState {
            tokens: TokenFeed::seeded(seed, config.max_tokens),
            live: false,
            highlighted: None,
            title: BASE_TITLE.to_string(),
            arrivals: 0,
            epoch: 0,
            disposed: false,
        };
        let (tx, _) = watch::channel(state);

        Self {
            config,
            state: Arc::new(tx),
            rng,
            arrivals: None,
            glitch: None,
        }
    }

    /// Seeds the feed and starts it LIVE with the title glitch running.
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: Config) -> Self {
        let mut simulator = Self::new(config);
        simulator.start();
        simulator.start_glitch();
        simulator
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn is_live(&self) -> bool {
        self.state.borrow().is_live()
    }

    pub fn start(&mut self) -> LiveState {
        if self.arrivals.is_some() {
            return LiveState::Live;
        }
        let disposed = self.state.borrow().disposed;
        if disposed {
            return LiveState::Paused;
        }

        let mut epoch = 0;
        self.state.send_modify(|s| {
            s.epoch += 1;
            s.live = true;
            epoch = s.epoch;
        });

        let rng = StdRng::seed_from_u64(self.rng.next_u64());
        let timing = ArrivalTiming::from_config(&self.config);
        self.arrivals = Some(tokio::spawn(run_arrivals(
            self.state.clone(),
            rng,
            timing,
            epoch,
        )));
        info!(
            "▶️  Live feed started ({}-{} ms between arrivals)",
            timing.min_ms, timing.max_ms
        );
        LiveState::Live
    }

    /// Cancels pending arrivals. Once this returns, no arrival or highlight
    /// change from the cancelled task can reach the state.
    pub fn stop(&mut self) -> LiveState {
        self.state.send_if_modified(|s| {
            if !s.live {
                return false;
            }
            s.live = false;
            s.epoch += 1;
            s.highlighted = None;
            true
        });
        if let Some(task) = self.arrivals.take() {
            task.abort();
            info!("⏸️  Live feed paused");
        }
        LiveState::Paused
    }

    pub fn toggle_live(&mut self) -> LiveState {
        if self.is_live() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Cancels every timer. The simulator stays PAUSED and ignores `start`.
    pub fn shutdown(&mut self) {
        let disposed = self.state.borrow().disposed;
        if disposed {
            return;
        }
        self.stop();
        if let Some(task) = self.glitch.take() {
            task.abort();
        }
        self.state.send_modify(|s| {
            s.disposed = true;
            s.title = BASE_TITLE.to_string();
        });
        debug!("feed simulator shut down");
    }

    fn start_glitch(&mut self) {
        if self.glitch.is_some() {
            return;
        }
        let rng = StdRng::seed_from_u64(self.rng.next_u64());
        self.glitch = Some(tokio::spawn(run_glitch(
            self.state.clone(),
            rng,
            self.config.glitch_interval(),
            self.config.glitch_revert(),
        )));
    }
}

impl Drop for FeedSimulator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_arrivals(
    state: Arc<watch::Sender<FeedState>>,
    mut rng: StdRng,
    timing: ArrivalTiming,
    epoch: u64,
) {
    let mut flash: Option<(String, Instant)> = None;

    loop {
        let next_arrival = time::sleep(timing.next_delay(&mut rng));
        tokio::pin!(next_arrival);

        loop {
            let flash_deadline = flash.as_ref().map(|(_, at)| *at);
            tokio::select! {
                _ = &mut next_arrival => break,
                _ = time::sleep_until(flash_deadline.unwrap_or_else(Instant::now)), if flash_deadline.is_some() => {
                    if let Some((id, _)) = flash.take() {
                        state.send_if_modified(|s| {
                            if s.epoch != epoch || s.highlighted.as_deref() != Some(id.as_str()) {
                                return false;
                            }
                            s.highlighted = None;
                            true
                        });
                    }
                }
            }
        }

        let token = generate_token(&mut rng, Deployment::Now);
        let mut evicted = 0;
        let accepted = state.send_if_modified(|s| {
            if s.epoch != epoch {
                return false;
            }
            evicted = s.record_arrival(token.clone());
            true
        });
        if !accepted {
            debug!(epoch, "stale arrival task exiting");
            return;
        }

        token.log_creation();
        if evicted > 0 {
            debug!(evicted, "feed at capacity, dropped oldest");
        }
        flash = Some((token.id, Instant::now() + timing.flash));
    }
}

async fn run_glitch(
    state: Arc<watch::Sender<FeedState>>,
    mut rng: StdRng,
    interval: Duration,
    revert: Duration,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    loop {
        ticker.tick().await;
        if !set_title(&state, glitch_text(&mut rng, BASE_TITLE)) {
            return;
        }
        time::sleep(revert).await;
        if !set_title(&state, BASE_TITLE.to_string()) {
            return;
        }
    }
}

/// Returns false once the simulator has been shut down.
fn set_title(state: &watch::Sender<FeedState>, title: String) -> bool {
    let mut disposed = false;
    state.send_if_modified(|s| {
        if s.disposed {
            disposed = true;
            return false;
        }
        if s.title == title {
            return false;
        }
        s.title = title;
        true
    });
    !disposed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(seed: u64) -> Config {
        Config {
            rng_seed: Some(seed),
            ..Config::default()
        }
    }

    fn ids(state: &FeedState) -> Vec<String> {
        state.tokens().iter().map(|t| t.id.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn spawn_starts_live_with_seeded_tokens() {
        let simulator = FeedSimulator::spawn(test_config(1));
        let state = simulator.snapshot();

        assert!(simulator.is_live());
        assert_eq!(state.live_state(), LiveState::Live);
        assert_eq!(state.tokens().len(), 8);
        assert_eq!(state.arrivals(), 0);
        assert_eq!(state.title(), BASE_TITLE);
        let stamps: Vec<_> = state.tokens().iter().map(|t| t.deployed_at).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn new_does_not_start_timers() {
        let simulator = FeedSimulator::new(test_config(2));
        time::sleep(Duration::from_secs(60)).await;

        let state = simulator.snapshot();
        assert!(!state.is_live());
        assert_eq!(state.arrivals(), 0);
        assert_eq!(state.title(), BASE_TITLE);
    }

    #[tokio::test(start_paused = true)]
    async fn arrival_is_prepended_and_flashed() {
        let simulator = FeedSimulator::spawn(test_config(3));
        let seeded = ids(&simulator.snapshot());
        let mut rx = simulator.subscribe();

        let state = rx.wait_for(|s| s.arrivals() == 1).await.unwrap().clone();
        let newest = state.tokens().latest().unwrap().clone();
        assert_eq!(state.tokens().len(), 9);
        assert_eq!(state.highlighted(), Some(newest.id.as_str()));
        assert_eq!(&ids(&state)[1..], seeded.as_slice());

        time::sleep(Duration::from_millis(2_001)).await;
        let state = simulator.snapshot();
        assert_eq!(state.highlighted(), None);
        assert_eq!(state.arrivals(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn arrivals_follow_the_configured_interval() {
        let simulator = FeedSimulator::spawn(test_config(4));
        time::sleep(Duration::from_secs(80)).await;

        // 3-8 s per arrival: between 10 and 26 arrivals in 80 s.
        let arrivals = simulator.snapshot().arrivals();
        assert!((10..=26).contains(&arrivals), "arrivals = {arrivals}");
    }

    #[tokio::test(start_paused = true)]
    async fn feed_is_capped_at_fifty() {
        let simulator = FeedSimulator::spawn(test_config(5));
        time::sleep(Duration::from_secs(500)).await;

        let state = simulator.snapshot();
        assert!(state.arrivals() > 50);
        assert_eq!(state.tokens().len(), 50);
        assert_eq!(state.tokens().capacity(), 50);
        let stamps: Vec<_> = state.tokens().iter().map(|t| t.deployed_at).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn paused_feed_does_not_change() {
        let mut simulator = FeedSimulator::spawn(test_config(6));
        assert_eq!(simulator.toggle_live(), LiveState::Paused);
        let before = simulator.snapshot();

        time::sleep(Duration::from_secs(120)).await;
        let after = simulator.snapshot();
        assert!(!after.is_live());
        assert_eq!(after.arrivals(), before.arrivals());
        assert_eq!(ids(&after), ids(&before));

        assert_eq!(simulator.toggle_live(), LiveState::Live);
        let mut rx = simulator.subscribe();
        let resumed = time::timeout(
            Duration::from_secs(9),
            rx.wait_for(|s| s.arrivals() > before.arrivals()),
        )
        .await;
        assert!(resumed.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_round_trips_end_live() {
        let mut simulator = FeedSimulator::spawn(test_config(7));
        for _ in 0..2 {
            assert_eq!(simulator.toggle_live(), LiveState::Paused);
            assert_eq!(simulator.toggle_live(), LiveState::Live);
        }
        assert!(simulator.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop_are_idempotent() {
        let mut simulator = FeedSimulator::spawn(test_config(8));
        assert_eq!(simulator.start(), LiveState::Live);
        assert_eq!(simulator.start(), LiveState::Live);
        assert_eq!(simulator.stop(), LiveState::Paused);
        assert_eq!(simulator.stop(), LiveState::Paused);
        assert!(!simulator.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_clears_pending_highlight() {
        let mut simulator = FeedSimulator::spawn(test_config(9));
        let mut rx = simulator.subscribe();
        rx.wait_for(|s| s.highlighted().is_some()).await.unwrap();

        simulator.stop();
        assert_eq!(simulator.snapshot().highlighted(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn title_glitches_then_reverts() {
        let simulator = FeedSimulator::spawn(test_config(10));
        let mut rx = simulator.subscribe();

        let glitched = time::timeout(
            Duration::from_secs(120),
            rx.wait_for(|s| s.title() != BASE_TITLE),
        )
        .await;
        assert!(glitched.is_ok());
        drop(glitched);

        time::sleep(Duration::from_millis(101)).await;
        assert_eq!(simulator.snapshot().title(), BASE_TITLE);
    }

    #[tokio::test(start_paused = true)]
    async fn glitch_keeps_running_while_paused() {
        let mut simulator = FeedSimulator::spawn(test_config(11));
        simulator.stop();
        let mut rx = simulator.subscribe();

        let glitched = time::timeout(
            Duration::from_secs(120),
            rx.wait_for(|s| s.title() != BASE_TITLE),
        )
        .await;
        assert!(glitched.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_every_timer() {
        let mut simulator = FeedSimulator::spawn(test_config(12));
        simulator.shutdown();
        let before = simulator.snapshot();

        time::sleep(Duration::from_secs(120)).await;
        let after = simulator.snapshot();
        assert_eq!(after.arrivals(), before.arrivals());
        assert_eq!(ids(&after), ids(&before));
        assert_eq!(after.title(), BASE_TITLE);
        assert_eq!(simulator.start(), LiveState::Paused);
        assert!(!simulator.is_live());
    }
}
