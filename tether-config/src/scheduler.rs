//! Background schedulers keeping the store and its document eventually
//! consistent in each direction.
//!
//! Two independent periodic tasks share one store: reload pulls the document
//! into memory, save pushes memory back out. Neither is aware of the other's
//! cadence; the store's own locking keeps each individual operation atomic.
//! Tick failures are contained here — logged by the store, retried on the
//! next tick, never propagated to callers.

use crate::store::PathStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tether_types::BindingContext;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Reload,
    Save,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Direction::Reload => "reload",
            Direction::Save => "save",
        }
    }

    fn run(self, store: &PathStore) -> bool {
        match self {
            Direction::Reload => store.reload(),
            Direction::Save => store.save(),
        }
    }
}

#[derive(Debug)]
struct Ticker {
    store: Arc<PathStore>,
    interval_secs: u64,
    direction: Direction,
    running: Arc<AtomicBool>,
}

impl Ticker {
    fn new(store: Arc<PathStore>, interval_secs: u64, direction: Direction) -> Self {
        Self {
            store,
            interval_secs,
            direction,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    fn start(&self, ctx: &BindingContext) {
        if self.interval_secs == 0 {
            debug!("{} scheduler disabled (zero interval)", self.direction.label());
            return;
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let store = Arc::clone(&self.store);
        let running = Arc::clone(&self.running);
        let direction = self.direction;
        let period = Duration::from_secs(self.interval_secs);

        ctx.runtime().spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // An interval yields its first tick immediately; consume it so
            // the first reload/save happens one full period after start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                // Checked after the tick and before the operation: a stopped
                // scheduler fires nothing further, while an in-flight
                // operation is never interrupted.
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                let store = Arc::clone(&store);
                let ok = tokio::task::spawn_blocking(move || direction.run(&store))
                    .await
                    .unwrap_or(false);
                if !ok {
                    debug!("scheduled {} did not complete; retrying next tick", direction.label());
                }
            }
            debug!("{} scheduler stopped", direction.label());
        });
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Periodically re-reads the backing document into memory.
///
/// A failed tick (malformed document, I/O trouble) leaves the previous
/// in-memory state authoritative until a reload succeeds. Safe to start
/// against a store that has not completed a first load — the first
/// successful tick establishes baseline state.
#[derive(Debug)]
pub struct ReloadScheduler {
    ticker: Ticker,
}

impl ReloadScheduler {
    /// Binds a scheduler to a store; `interval_secs == 0` disables it.
    #[must_use]
    pub fn new(store: Arc<PathStore>, interval_secs: u64) -> Self {
        Self {
            ticker: Ticker::new(store, interval_secs, Direction::Reload),
        }
    }

    /// Registers the periodic task on the context's runtime. Idempotent.
    pub fn start(&self, ctx: &BindingContext) {
        self.ticker.start(ctx);
    }

    /// Prevents further ticks from firing. The in-flight tick, if any,
    /// completes. Idempotent.
    pub fn stop(&self) {
        self.ticker.stop();
    }

    /// Whether the scheduler is currently started.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }
}

/// Periodically writes the in-memory tree back to the document.
///
/// A failed tick is retried with the then-current tree on the next tick.
#[derive(Debug)]
pub struct SaveScheduler {
    ticker: Ticker,
}

impl SaveScheduler {
    /// Binds a scheduler to a store; `interval_secs == 0` disables it.
    #[must_use]
    pub fn new(store: Arc<PathStore>, interval_secs: u64) -> Self {
        Self {
            ticker: Ticker::new(store, interval_secs, Direction::Save),
        }
    }

    /// Registers the periodic task on the context's runtime. Idempotent.
    pub fn start(&self, ctx: &BindingContext) {
        self.ticker.start(ctx);
    }

    /// Prevents further ticks from firing. The in-flight tick, if any,
    /// completes. Idempotent.
    pub fn stop(&self) {
        self.ticker.stop();
    }

    /// Whether the scheduler is currently started.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }
}
