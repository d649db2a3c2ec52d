use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::errors::{AppError, AppResult};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Sliding-window run counter for a single session.
#[derive(Debug, Clone)]
pub struct RunLimiter {
    window: Duration,
    max_runs: usize,
    stamps: VecDeque<DateTime<Utc>>,
}

impl RunLimiter {
    pub fn new(window: Duration, max_runs: usize) -> Self {
        Self {
            window,
            max_runs,
            stamps: VecDeque::new(),
        }
    }

    /// Drops stamps older than one window. A stamp exactly one window old
    /// still counts.
    fn prune(&mut self, now: DateTime<Utc>) {
        let Some(cutoff) = now.checked_sub_signed(self.window) else {
            return;
        };
        while self.stamps.front().is_some_and(|t| *t < cutoff) {
            self.stamps.pop_front();
        }
    }

    pub fn allow(&mut self, now: DateTime<Utc>) -> bool {
        self.prune(now);
        self.stamps.len() < self.max_runs
    }

    pub fn record(&mut self, now: DateTime<Utc>) {
        self.stamps.push_back(now);
    }

    pub fn remaining(&mut self, now: DateTime<Utc>) -> usize {
        self.prune(now);
        self.max_runs.saturating_sub(self.stamps.len())
    }
}

/// One [`RunLimiter`] per session key; sessions never share a counter.
pub struct SessionRegistry {
    clock: Arc<dyn Clock>,
    window: Duration,
    max_runs: usize,
    sessions: Mutex<HashMap<String, RunLimiter>>,
}

impl SessionRegistry {
    pub fn new(clock: Arc<dyn Clock>, window: Duration, max_runs: usize) -> Self {
        Self {
            clock,
            window,
            max_runs,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_runs(&self) -> usize {
        self.max_runs
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Counts a run against `session`, or refuses it when the window is full.
    pub async fn begin_run(&self, session: &str) -> AppResult<()> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;

        // Sessions whose stamps have all expired carry no state worth keeping.
        if sessions.len() > 1000 {
            sessions.retain(|_, limiter| limiter.remaining(now) < limiter.max_runs);
        }

        let limiter = sessions
            .entry(session.to_string())
            .or_insert_with(|| RunLimiter::new(self.window, self.max_runs));

        if !limiter.allow(now) {
            log::warn!("Run limit reached for session {}", session);
            return Err(AppError::RateLimited(format!(
                "Hourly limit reached ({} runs). Please try again later.",
                self.max_runs
            )));
        }
        limiter.record(now);
        Ok(())
    }

    pub async fn remaining(&self, session: &str) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        sessions
            .get_mut(session)
            .map(|limiter| limiter.remaining(now))
            .unwrap_or(self.max_runs)
    }
}
