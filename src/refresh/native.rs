//! Native refresh scheduler: tokio intervals, one spawned task per tick.

use super::{
    refresh_coins, refresh_market, Liveness, MarketSource, RefreshConfig, RefreshEvent,
    SharedFeed,
};

use futures_util::Stream;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns the two refresh timers for one view.
///
/// Must be started inside a tokio runtime. Dropping the scheduler stops it.
pub struct RefreshScheduler {
    feed: SharedFeed,
    liveness: Liveness,
    timers: Vec<JoinHandle<()>>,
    event_rx: Arc<Mutex<mpsc::UnboundedReceiver<RefreshEvent>>>,
}

impl RefreshScheduler {
    /// Start both timers into a fresh feed. Each timer fires immediately.
    pub fn start<S>(source: Arc<S>, config: RefreshConfig) -> Self
    where
        S: MarketSource + 'static,
    {
        Self::start_with_feed(source, config, SharedFeed::new())
    }

    /// Start both timers writing into an existing feed.
    pub fn start_with_feed<S>(source: Arc<S>, config: RefreshConfig, feed: SharedFeed) -> Self
    where
        S: MarketSource + 'static,
    {
        let liveness = Liveness::default();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let coins_timer = {
            let (source, feed, liveness, tx) =
                (source.clone(), feed.clone(), liveness.clone(), event_tx.clone());
            spawn_timer(config.coins_interval(), liveness.clone(), move || {
                let (source, feed, liveness, tx) =
                    (source.clone(), feed.clone(), liveness.clone(), tx.clone());
                async move {
                    if let Some(event) = refresh_coins(source.as_ref(), &feed, &liveness).await {
                        let _ = tx.send(event);
                    }
                }
            })
        };

        let market_timer = {
            let (source, feed, liveness, tx) =
                (source, feed.clone(), liveness.clone(), event_tx);
            spawn_timer(config.market_interval(), liveness.clone(), move || {
                let (source, feed, liveness, tx) =
                    (source.clone(), feed.clone(), liveness.clone(), tx.clone());
                async move {
                    if let Some(event) = refresh_market(source.as_ref(), &feed, &liveness).await {
                        let _ = tx.send(event);
                    }
                }
            })
        };

        tracing::info!(
            coins_interval_ms = config.coins_interval_ms,
            market_interval_ms = config.market_interval_ms,
            "Refresh scheduler started"
        );

        Self {
            feed,
            liveness,
            timers: vec![coins_timer, market_timer],
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn feed(&self) -> SharedFeed {
        self.feed.clone()
    }

    pub fn is_running(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Cancel both timers. Results of fetches still in flight are dropped.
    pub fn stop(&mut self) {
        if !self.liveness.is_alive() {
            return;
        }
        self.liveness.kill();
        for timer in self.timers.drain(..) {
            timer.abort();
        }
        tracing::info!("Refresh scheduler stopped");
    }

    /// Stream of refresh events in arrival order. Ends once the scheduler is
    /// stopped and every in-flight tick has finished.
    pub fn events(&self) -> Pin<Box<dyn Stream<Item = RefreshEvent> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            &self.event_rx,
            |rx| async move {
                let mut guard = rx.lock().await;
                guard.recv().await.map(|event| (event, rx))
            },
        ))
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_timer<F, Fut>(period: Duration, liveness: Liveness, tick: F) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if !liveness.is_alive() {
                break;
            }
            // Ticks are not awaited, so a slow fetch never delays the next one.
            tokio::spawn(tick());
        }
    })
}
