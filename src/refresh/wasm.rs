//! WASM refresh scheduler: `spawn_local` tasks driven by `gloo_timers`.
//!
//! Events are delivered through an `on_event` callback since browser futures
//! are `!Send` and there is no runtime to poll a stream on.

use std::future::Future;
use std::rc::Rc;

use futures_util::future::{AbortHandle, Abortable};
use futures_util::stream::StreamExt;
use gloo_timers::future::IntervalStream;

use super::{
    refresh_coins, refresh_market, Liveness, MarketSource, RefreshConfig, RefreshEvent,
    SharedFeed,
};

/// Owns the two refresh timers for one view. Dropping it stops both.
pub struct RefreshScheduler {
    feed: SharedFeed,
    liveness: Liveness,
    timers: Vec<AbortHandle>,
}

impl RefreshScheduler {
    /// Start both timers. Each fires immediately, then on its interval.
    pub fn start<S>(
        source: Rc<S>,
        config: RefreshConfig,
        on_event: impl Fn(RefreshEvent) + 'static,
    ) -> Self
    where
        S: MarketSource + 'static,
    {
        Self::start_with_feed(source, config, SharedFeed::new(), on_event)
    }

    pub fn start_with_feed<S>(
        source: Rc<S>,
        config: RefreshConfig,
        feed: SharedFeed,
        on_event: impl Fn(RefreshEvent) + 'static,
    ) -> Self
    where
        S: MarketSource + 'static,
    {
        let liveness = Liveness::default();
        let on_event: Rc<dyn Fn(RefreshEvent)> = Rc::new(on_event);

        let coins_timer = {
            let (source, feed, liveness, on_event) =
                (source.clone(), feed.clone(), liveness.clone(), on_event.clone());
            spawn_timer(config.coins_interval_ms, liveness.clone(), move || {
                let (source, feed, liveness, on_event) =
                    (source.clone(), feed.clone(), liveness.clone(), on_event.clone());
                async move {
                    if let Some(event) = refresh_coins(source.as_ref(), &feed, &liveness).await {
                        on_event(event);
                    }
                }
            })
        };

        let market_timer = {
            let (source, feed, liveness, on_event) =
                (source, feed.clone(), liveness.clone(), on_event);
            spawn_timer(config.market_interval_ms, liveness.clone(), move || {
                let (source, feed, liveness, on_event) =
                    (source.clone(), feed.clone(), liveness.clone(), on_event.clone());
                async move {
                    if let Some(event) = refresh_market(source.as_ref(), &feed, &liveness).await {
                        on_event(event);
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
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_timer<F, Fut>(period_ms: u64, liveness: Liveness, tick: F) -> AbortHandle
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let (abort_handle, abort_reg) = AbortHandle::new_pair();
    let period_ms = u32::try_from(period_ms).unwrap_or(u32::MAX);

    let timer = async move {
        wasm_bindgen_futures::spawn_local(tick());
        let mut interval = IntervalStream::new(period_ms);
        while interval.next().await.is_some() {
            if !liveness.is_alive() {
                break;
            }
            wasm_bindgen_futures::spawn_local(tick());
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        let _ = Abortable::new(timer, abort_reg).await;
    });

    abort_handle
}
