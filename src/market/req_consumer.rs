use crate::market::fetcher::{fetch_or_fallback, AssetSource};
use crate::market::request::AssetListRequest;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, instrument};

// Each request runs as its own task so a slow fetch for one panel never
// delays another panel's fetch.
#[instrument(skip_all)]
pub async fn consume_asset_list_requests<S>(
    mut job_receiver: UnboundedReceiver<AssetListRequest>,
    source: S,
) where
    S: AssetSource + Clone + Send + Sync + 'static,
{
    let mut fetches = JoinSet::new();

    loop {
        tokio::select! {
            req = job_receiver.recv() => match req {
                Some(req) => {
                    debug!("Consumer fetching {} assets for panel {}", req.limit, &req.panel);
                    fetches.spawn(serve_asset_list_request(req, source.clone()));
                }
                None => break,
            },
            Some(joined) = fetches.join_next() => log_join_error(joined),
        }
    }

    debug!(
        "All asset list request senders dropped, waiting for {} fetches",
        fetches.len()
    );
    while let Some(joined) = fetches.join_next().await {
        log_join_error(joined);
    }
    debug!("Asset list consumer stopping");
}

async fn serve_asset_list_request<S: AssetSource + Sync>(req: AssetListRequest, source: S) {
    let AssetListRequest {
        panel,
        limit,
        mut resp_sender,
    } = req;

    // the panel may be torn down while the fetch is in flight
    let list = tokio::select! {
        list = fetch_or_fallback(&source, limit) => list,
        _ = resp_sender.closed() => {
            debug!("Panel {} is gone, cancelling its fetch", panel);
            return;
        }
    };

    if resp_sender.send(list).is_err() {
        debug!("Panel {} is gone, discarding fetched asset list", panel);
    }
}

fn log_join_error(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        error!("Asset list fetch task failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::asset::{Asset, AssetList, AssetSourceKind};
    use crate::market::error::MarketFetchError;
    use bigdecimal::BigDecimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::{mpsc, oneshot};
    use tokio::time::{self, Instant};

    #[derive(Clone)]
    struct OfflineSource;

    impl AssetSource for OfflineSource {
        async fn fetch_assets(&self, _limit: u32) -> Result<Vec<Asset>, MarketFetchError> {
            Err(MarketFetchError::EmptyBody)
        }
    }

    #[derive(Clone)]
    struct SlowSource {
        delay: Duration,
        completed: Arc<AtomicUsize>,
    }

    impl AssetSource for SlowSource {
        async fn fetch_assets(&self, _limit: u32) -> Result<Vec<Asset>, MarketFetchError> {
            time::sleep(self.delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Asset::new("BTC", BigDecimal::from(1), BigDecimal::from(0))])
        }
    }

    fn request(panel: &str, limit: u32) -> (AssetListRequest, oneshot::Receiver<AssetList>) {
        let (resp_sender, resp_receiver) = oneshot::channel();
        let req = AssetListRequest {
            panel: panel.to_string(),
            limit,
            resp_sender,
        };
        (req, resp_receiver)
    }

    #[tokio::test]
    async fn test_consumer_replies_with_fallback() {
        let (job_sender, job_receiver) = mpsc::unbounded_channel();
        let consumer = tokio::spawn(consume_asset_list_requests(job_receiver, OfflineSource));

        let (resp_sender, resp_receiver) = oneshot::channel();
        job_sender
            .send(AssetListRequest {
                panel: "sidebar".to_string(),
                limit: 18,
                resp_sender,
            })
            .unwrap();

        let list = resp_receiver.await.unwrap();
        assert_eq!(AssetSourceKind::Fallback, list.source);
        assert_eq!(AssetList::fallback().assets, list.assets);

        drop(job_sender);
        consumer.await.unwrap();
    }

    #[tokio::test]
    async fn test_consumer_survives_dropped_receiver() {
        let (job_sender, job_receiver) = mpsc::unbounded_channel();
        let consumer = tokio::spawn(consume_asset_list_requests(job_receiver, OfflineSource));

        let (gone_sender, gone_receiver) = oneshot::channel();
        drop(gone_receiver);
        job_sender
            .send(AssetListRequest {
                panel: "ticker".to_string(),
                limit: 15,
                resp_sender: gone_sender,
            })
            .unwrap();

        let (resp_sender, resp_receiver) = oneshot::channel();
        job_sender
            .send(AssetListRequest {
                panel: "sidebar".to_string(),
                limit: 18,
                resp_sender,
            })
            .unwrap();
        assert_eq!(6, resp_receiver.await.unwrap().len());

        drop(job_sender);
        consumer.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetches_run_concurrently() {
        let completed = Arc::new(AtomicUsize::new(0));
        let source = SlowSource {
            delay: Duration::from_secs(10),
            completed: completed.clone(),
        };
        let (job_sender, job_receiver) = mpsc::unbounded_channel();
        tokio::spawn(consume_asset_list_requests(job_receiver, source));

        let start = Instant::now();
        let (ticker_req, ticker_reply) = request("ticker", 15);
        let (sidebar_req, sidebar_reply) = request("sidebar", 18);
        job_sender.send(ticker_req).unwrap();
        job_sender.send(sidebar_req).unwrap();

        let sidebar_list = sidebar_reply.await.unwrap();
        let sidebar_elapsed = start.elapsed();
        let ticker_list = ticker_reply.await.unwrap();

        assert_eq!(AssetSourceKind::Live, sidebar_list.source);
        assert_eq!(AssetSourceKind::Live, ticker_list.source);
        assert!(sidebar_elapsed >= Duration::from_secs(10));
        assert!(sidebar_elapsed < Duration::from_secs(11));
        assert!(start.elapsed() < Duration::from_secs(11));
        assert_eq!(2, completed.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_reply_cancels_fetch() {
        let completed = Arc::new(AtomicUsize::new(0));
        let source = SlowSource {
            delay: Duration::from_secs(10),
            completed: completed.clone(),
        };
        let (job_sender, job_receiver) = mpsc::unbounded_channel();
        let consumer = tokio::spawn(consume_asset_list_requests(job_receiver, source));

        let (req, reply) = request("sidebar", 18);
        job_sender.send(req).unwrap();
        time::sleep(Duration::from_secs(1)).await;
        drop(reply);

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(0, completed.load(Ordering::SeqCst));

        drop(job_sender);
        consumer.await.unwrap();
    }
}
