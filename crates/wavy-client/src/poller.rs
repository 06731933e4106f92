//! Repeating profile fetch that keeps a progress view current.
//!
//! A [`PollSession`] moves `Idle → Active → Stopped` and never back. While
//! active, a timer task fires every interval (first tick after one full
//! interval) and spawns one status fetch per tick. Fetches are not
//! deduplicated: if the backend is slower than the interval several can be in
//! flight, and whichever response lands last is what the view shows.
//!
//! The session stops itself when a status satisfies the completion predicate
//! or the backend answers 401. Every other failure skips the tick.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use wavy_core::{Credential, ProfileStatus};

use crate::client::ApiClient;
use crate::error::{ClientError, PollerError};

/// Where the poller gets status snapshots from.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(
        &self,
        token: &Credential,
    ) -> impl Future<Output = Result<ProfileStatus, ClientError>> + Send;
}

impl StatusSource for ApiClient {
    fn fetch_status(
        &self,
        token: &Credential,
    ) -> impl Future<Output = Result<ProfileStatus, ClientError>> + Send {
        self.get_profile(token)
    }
}

/// Externally visible lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Active,
    Stopped,
}

type UpdateFn = Box<dyn Fn(ProfileStatus) + Send + Sync>;
type UnauthorizedFn = Box<dyn Fn() + Send + Sync>;

/// State shared between the session owner, the timer task, and in-flight
/// fetches.
struct PollShared {
    /// Liveness flag. Held while a callback runs, so once `stop` has taken
    /// it no callback can start.
    live: Mutex<bool>,
    stopped: Notify,
    ticks: AtomicU64,
    on_update: UpdateFn,
    on_unauthorized: UnauthorizedFn,
}

impl PollShared {
    fn is_live(&self) -> bool {
        *self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flips liveness off. Returns `true` if this call did the flip.
    fn shut(&self) -> bool {
        let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);
        let was_live = std::mem::replace(&mut *live, false);
        drop(live);
        if was_live {
            self.stopped.notify_one();
        }
        was_live
    }

    fn apply(&self, tick: u64, result: Result<ProfileStatus, ClientError>) {
        let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);
        if !*live {
            tracing::trace!(tick, "discarding response for a stopped poll session");
            return;
        }

        match result {
            Ok(status) => {
                let complete = status.is_complete();
                let (total, processed) = (status.total_videos, status.videos_processed);
                (self.on_update)(status);
                if complete {
                    *live = false;
                    drop(live);
                    self.stopped.notify_one();
                    tracing::info!(tick, total, processed, "profile processing complete; polling stopped");
                }
            }
            Err(ClientError::Unauthorized { .. }) => {
                *live = false;
                (self.on_unauthorized)();
                drop(live);
                self.stopped.notify_one();
                tracing::warn!(tick, "credential rejected while polling; polling stopped");
            }
            Err(e) => {
                tracing::debug!(tick, error = %e, "profile poll failed; skipping tick");
            }
        }
    }
}

enum SessionState {
    Idle,
    Active {
        token: Credential,
        shared: Arc<PollShared>,
        timer: JoinHandle<()>,
    },
    Stopped,
}

/// One lifecycle of the repeating profile fetch, owned by a single page.
///
/// Dropping the session stops it. Callbacks run while the session's
/// liveness lock is held and must not call back into the session.
pub struct PollSession {
    interval: Duration,
    state: SessionState,
}

impl PollSession {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: SessionState::Idle,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn state(&self) -> PollState {
        match &self.state {
            SessionState::Idle => PollState::Idle,
            SessionState::Active { shared, .. } if shared.is_live() => PollState::Active,
            SessionState::Active { .. } | SessionState::Stopped => PollState::Stopped,
        }
    }

    /// Credential the session was started with, while it is running.
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        match &self.state {
            SessionState::Active { token, shared, .. } if shared.is_live() => Some(token),
            _ => None,
        }
    }

    /// Starts polling `source` with `token`.
    ///
    /// No fetch is issued immediately; the first tick fires after one full
    /// interval. `on_update` receives every successful status while the
    /// session is live. `on_unauthorized` runs at most once, on the first 401.
    ///
    /// # Errors
    ///
    /// - [`PollerError::AlreadyActive`] if the session is running.
    /// - [`PollerError::Finished`] if the session has stopped.
    /// - [`PollerError::ZeroInterval`] if the interval is zero.
    /// - [`PollerError::NoRuntime`] if called outside a Tokio runtime.
    pub fn start<S, U, A>(
        &mut self,
        source: Arc<S>,
        token: Credential,
        on_update: U,
        on_unauthorized: A,
    ) -> Result<(), PollerError>
    where
        S: StatusSource,
        U: Fn(ProfileStatus) + Send + Sync + 'static,
        A: Fn() + Send + Sync + 'static,
    {
        match self.state() {
            PollState::Active => return Err(PollerError::AlreadyActive),
            PollState::Stopped => return Err(PollerError::Finished),
            PollState::Idle => {}
        }
        if self.interval.is_zero() {
            return Err(PollerError::ZeroInterval);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| PollerError::NoRuntime)?;

        let shared = Arc::new(PollShared {
            live: Mutex::new(true),
            stopped: Notify::new(),
            ticks: AtomicU64::new(0),
            on_update: Box::new(on_update),
            on_unauthorized: Box::new(on_unauthorized),
        });

        let period = self.interval;
        let timer = runtime.spawn(run_timer(
            period,
            source,
            token.clone(),
            Arc::clone(&shared),
        ));

        let interval_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(interval_ms, "profile polling started");

        self.state = SessionState::Active {
            token,
            shared,
            timer,
        };
        Ok(())
    }

    /// Stops polling. Idempotent, and safe after the session stopped itself.
    ///
    /// The timer is cancelled before this returns. Fetches already in flight
    /// are left to finish, but their results are discarded.
    pub fn stop(&mut self) {
        if let SessionState::Active { shared, timer, .. } =
            std::mem::replace(&mut self.state, SessionState::Stopped)
        {
            if shared.shut() {
                tracing::debug!("profile polling stopped by owner");
            }
            timer.abort();
        }
    }
}

impl Drop for PollSession {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_timer<S: StatusSource>(
    period: Duration,
    source: Arc<S>,
    token: Credential,
    shared: Arc<PollShared>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = shared.stopped.notified() => break,
        }
        if !shared.is_live() {
            break;
        }

        let tick = shared.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(tick, "profile poll tick");

        let source = Arc::clone(&source);
        let token = token.clone();
        let shared = Arc::clone(&shared);
        tokio::spawn(async move {
            let result = source.fetch_status(&token).await;
            shared.apply(tick, result);
        });
    }
}

#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;
