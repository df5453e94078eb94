use crate::core::{AdLoadError, AdResult, AdSource, ConfigProvider, NativeAd};
use crate::domain::model::{AppInstallAd, ContentAd};
use crate::utils::error::{FeedError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Fetches one ad per `GET` from an ad unit endpoint.
///
/// A 2xx response carries a JSON `NativeAd`; 204 means no fill.
pub struct HttpAdSource {
    client: Client,
    endpoint: String,
}

impl HttpAdSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C, timeout: Duration) -> Result<Self> {
        let endpoint = config
            .ad_endpoint()
            .ok_or_else(|| FeedError::MissingConfigError {
                field: "ads.endpoint".to_string(),
            })?;
        Self::new(endpoint, timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AdSource for HttpAdSource {
    async fn request_ad(&self) -> AdResult {
        tracing::debug!("Requesting ad from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await.map_err(|e| {
            AdLoadError::new(AdLoadError::ERROR_CODE_NETWORK_ERROR, e.to_string())
        })?;

        let status = response.status();
        tracing::debug!("Ad server response status: {}", status);

        if status == StatusCode::NO_CONTENT {
            return Err(AdLoadError::no_fill());
        }
        if !status.is_success() {
            let code = if status.is_client_error() {
                AdLoadError::ERROR_CODE_INVALID_REQUEST
            } else {
                AdLoadError::ERROR_CODE_INTERNAL_ERROR
            };
            return Err(AdLoadError::new(code, format!("ad server returned {}", status)));
        }

        response.json::<NativeAd>().await.map_err(|e| {
            AdLoadError::new(
                AdLoadError::ERROR_CODE_INTERNAL_ERROR,
                format!("undecodable ad response: {}", e),
            )
        })
    }
}

enum Script {
    /// Fill or fail by request number, repeating.
    Pattern(Vec<bool>),
    /// Replay fixed results, then report no fill.
    Queue(Mutex<VecDeque<AdResult>>),
}

/// In-memory ad source for demos and tests.
///
/// Counts requests and remembers how many were ever in flight at once.
pub struct ScriptedAdSource {
    script: Script,
    delay: Duration,
    requests: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedAdSource {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            requests: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// `true` entries fill, `false` entries fail with no fill. Cycles.
    pub fn pattern(pattern: Vec<bool>) -> Self {
        Self::with_script(Script::Pattern(pattern))
    }

    pub fn always_fill() -> Self {
        Self::pattern(vec![true])
    }

    pub fn always_fail() -> Self {
        Self::pattern(vec![false])
    }

    pub fn alternating() -> Self {
        Self::pattern(vec![true, false])
    }

    pub fn from_results(results: Vec<AdResult>) -> Self {
        Self::with_script(Script::Queue(Mutex::new(results.into())))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_result(&self, request: usize) -> AdResult {
        match &self.script {
            Script::Pattern(pattern) => {
                let fills = !pattern.is_empty() && pattern[request % pattern.len()];
                if fills {
                    Ok(sample_ad(request))
                } else {
                    Err(AdLoadError::no_fill())
                }
            }
            Script::Queue(queue) => queue
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .pop_front()
                .unwrap_or_else(|| Err(AdLoadError::no_fill())),
        }
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AdSource for ScriptedAdSource {
    async fn request_ad(&self) -> AdResult {
        let request = self.requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.next_result(request)
    }
}

/// Placeholder creative for request number `n`, alternating between the two ad kinds.
pub fn sample_ad(n: usize) -> NativeAd {
    if n % 2 == 0 {
        NativeAd::AppInstall(AppInstallAd {
            headline: format!("Sponsored app #{}", n + 1),
            body: "Order from your favourite kitchen in two taps.".to_string(),
            call_to_action: "Install".to_string(),
            icon: "app_icon".to_string(),
            price: Some("Free".to_string()),
            store: Some("Play Store".to_string()),
            star_rating: Some(4.5),
        })
    } else {
        NativeAd::Content(ContentAd {
            headline: format!("Sponsored story #{}", n + 1),
            body: "Seasonal produce, delivered daily.".to_string(),
            call_to_action: "Learn more".to_string(),
            image: Some("produce_banner".to_string()),
            advertiser: Some("Local Farms Co.".to_string()),
            logo: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pattern_cycles() {
        let source = ScriptedAdSource::pattern(vec![true, false, false]);
        let mut fills = Vec::new();
        for _ in 0..6 {
            fills.push(source.request_ad().await.is_ok());
        }
        assert_eq!(fills, vec![true, false, false, true, false, false]);
        assert_eq!(source.requests(), 6);
        assert_eq!(source.max_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_queue_runs_dry_as_no_fill() {
        let source = ScriptedAdSource::from_results(vec![Ok(sample_ad(0))]);
        assert!(source.request_ad().await.is_ok());
        let err = source.request_ad().await.unwrap_err();
        assert_eq!(err.code, AdLoadError::ERROR_CODE_NO_FILL);
    }

    #[tokio::test]
    async fn test_queue_survives_poisoned_lock() {
        let source = std::sync::Arc::new(ScriptedAdSource::from_results(vec![Ok(sample_ad(2))]));

        let holder = std::sync::Arc::clone(&source);
        let poisoner = std::thread::spawn(move || {
            if let Script::Queue(queue) = &holder.script {
                let _guard = queue.lock().unwrap();
                panic!("poison the queue");
            }
        });
        assert!(poisoner.join().is_err());

        let ad = source.request_ad().await.unwrap();
        assert_eq!(ad.headline(), sample_ad(2).headline());
    }

    #[test]
    fn test_sample_ads_alternate_kinds() {
        assert!(matches!(sample_ad(0), NativeAd::AppInstall(_)));
        assert!(matches!(sample_ad(1), NativeAd::Content(_)));
    }
}
