use crate::core::{AdResult, AdSource, NativeAd};
use tokio::sync::watch;

/// What happened to a single resolution fed into [`AdLoadSequence::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Another request should be issued.
    Continue,
    /// The attempt quota is used up.
    Complete,
    /// Nothing was outstanding, or the sequence was cancelled.
    Ignored,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdLoadReport {
    pub attempts: usize,
    pub loaded: usize,
    pub failed: usize,
}

/// Bookkeeping for loading ads one request at a time.
///
/// The attempt counter bounds the sequence, not the success count: every
/// resolution, good or bad, moves it forward, so a source that always fails
/// still finishes after `quota` attempts. At most one request is outstanding.
/// Drivers that get results through callbacks can use this directly; async
/// callers should prefer [`SequentialAdLoader`].
#[derive(Debug)]
pub struct AdLoadSequence {
    quota: usize,
    attempt: usize,
    in_flight: bool,
    cancelled: bool,
    ads: Vec<NativeAd>,
    failed: usize,
}

impl AdLoadSequence {
    pub fn new(quota: usize) -> Self {
        Self {
            quota,
            attempt: 0,
            in_flight: false,
            cancelled: false,
            ads: Vec::with_capacity(quota),
            failed: 0,
        }
    }

    /// Claims the next attempt index, or `None` if the caller must not issue
    /// a request now.
    pub fn next_request(&mut self) -> Option<usize> {
        if self.cancelled || self.in_flight || self.attempt >= self.quota {
            return None;
        }
        self.in_flight = true;
        Some(self.attempt)
    }

    pub fn resolve(&mut self, result: AdResult) -> Step {
        if self.cancelled || !self.in_flight {
            tracing::debug!("Dropping ad result with no outstanding request");
            return Step::Ignored;
        }
        self.in_flight = false;

        match result {
            Ok(ad) => {
                tracing::debug!(attempt = self.attempt, "Native ad loaded: {}", ad.headline());
                self.ads.push(ad);
            }
            Err(e) => {
                tracing::warn!(
                    attempt = self.attempt,
                    code = e.code,
                    "Native ad failed to load, moving on to the next attempt: {}",
                    e.message
                );
                self.failed += 1;
            }
        }
        self.attempt += 1;

        if self.is_complete() {
            Step::Complete
        } else {
            Step::Continue
        }
    }

    /// Stops the sequence. Any result arriving afterwards is ignored.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.in_flight = false;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_complete(&self) -> bool {
        self.attempt >= self.quota
    }

    pub fn attempts(&self) -> usize {
        self.attempt
    }

    pub fn report(&self) -> AdLoadReport {
        AdLoadReport {
            attempts: self.attempt,
            loaded: self.ads.len(),
            failed: self.failed,
        }
    }

    /// Hands over the loaded ads in the order they arrived.
    pub fn finish(self) -> Vec<NativeAd> {
        self.ads
    }

    pub fn into_parts(self) -> (Vec<NativeAd>, AdLoadReport) {
        let report = self.report();
        (self.ads, report)
    }
}

pub fn cancellation() -> (CancelHandle, CancellationSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle(tx), CancellationSignal(rx))
}

#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

#[derive(Debug, Clone)]
pub struct CancellationSignal(watch::Receiver<bool>);

impl CancellationSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once cancelled. Never resolves if the handle is dropped first.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Completed(Vec<NativeAd>, AdLoadReport),
    Cancelled { attempts: usize },
}

pub struct SequentialAdLoader<A: AdSource> {
    source: A,
    quota: usize,
}

impl<A: AdSource> SequentialAdLoader<A> {
    pub fn new(source: A, quota: usize) -> Self {
        Self { source, quota }
    }

    pub fn source(&self) -> &A {
        &self.source
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    pub async fn load(&self) -> Vec<NativeAd> {
        self.load_with_report().await.0
    }

    pub async fn load_with_report(&self) -> (Vec<NativeAd>, AdLoadReport) {
        let mut sequence = AdLoadSequence::new(self.quota);

        while let Some(attempt) = sequence.next_request() {
            tracing::debug!(attempt, quota = self.quota, "Requesting native ad");
            let result = self.source.request_ad().await;
            sequence.resolve(result);
        }

        let (ads, report) = sequence.into_parts();
        tracing::info!(
            "Ad loading finished: {} loaded, {} failed, {} attempts",
            report.loaded,
            report.failed,
            report.attempts
        );
        (ads, report)
    }

    /// Like [`load`](Self::load), but gives up as soon as `signal` fires. The
    /// request in flight at that moment is dropped and its result discarded.
    pub async fn load_until_cancelled(&self, mut signal: CancellationSignal) -> LoadOutcome {
        let mut sequence = AdLoadSequence::new(self.quota);

        while let Some(attempt) = sequence.next_request() {
            tracing::debug!(attempt, quota = self.quota, "Requesting native ad");
            tokio::select! {
                biased;
                _ = signal.cancelled() => {
                    sequence.cancel();
                    tracing::info!(attempts = sequence.attempts(), "Ad loading cancelled");
                    return LoadOutcome::Cancelled {
                        attempts: sequence.attempts(),
                    };
                }
                result = self.source.request_ad() => {
                    sequence.resolve(result);
                }
            }
        }

        let (ads, report) = sequence.into_parts();
        LoadOutcome::Completed(ads, report)
    }
}
