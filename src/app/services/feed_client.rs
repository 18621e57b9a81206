use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::app::entities::audit_entity::AuditRecord;
use crate::app::error::{ClientError, ClientResult};

/// Table the dashboard reads from.
pub const FEED_TABLE: &str = "audit_trail";

const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Hosted real-time data feed: query-on-load plus push-style delivery of
/// insert events.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Most recent `limit` records, ordered by descending timestamp.
    async fn load_recent(&self, limit: usize) -> ClientResult<Vec<AuditRecord>>;

    /// Insert events with `timestamp > after`, delivered until the returned
    /// stream is dropped. There is no explicit unsubscribe; dropping the
    /// stream is the page-unload analogue.
    async fn subscribe(&self, after: i64) -> ClientResult<BoxStream<'static, AuditRecord>>;
}

/// REST-backed feed client. Live delivery is realized by a spawned poll loop
/// feeding a channel; the loop stops once the consumer goes away.
pub struct HttpFeedClient {
    base_url: String,
    access_key: String,
    client: Client,
}

impl HttpFeedClient {
    pub fn new(base_url: &str, access_key: &str) -> Self {
        HttpFeedClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
            client: Client::new(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, FEED_TABLE)
    }
}

async fn fetch_rows(
    client: &Client,
    url: &str,
    access_key: &str,
    query: &[(&str, String)],
) -> ClientResult<Vec<AuditRecord>> {
    let response = client
        .get(url)
        .header("apikey", access_key)
        .query(query)
        .send()
        .await?;

    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(ClientError::Service(format!(
            "feed query returned {}",
            response.status()
        )))
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn load_recent(&self, limit: usize) -> ClientResult<Vec<AuditRecord>> {
        let query = [
            ("select", "*".to_string()),
            ("order", "timestamp.desc".to_string()),
            ("limit", limit.to_string()),
        ];
        fetch_rows(&self.client, &self.table_url(), &self.access_key, &query).await
    }

    async fn subscribe(&self, after: i64) -> ClientResult<BoxStream<'static, AuditRecord>> {
        let (tx, rx) = mpsc::channel::<AuditRecord>(32);
        let client = self.client.clone();
        let url = self.table_url();
        let access_key = self.access_key.clone();

        tokio::spawn(async move {
            let mut last_seen = after;
            loop {
                tokio::time::sleep(POLL_INTERVAL).await;
                if tx.is_closed() {
                    return;
                }
                let query = [
                    ("select", "*".to_string()),
                    ("order", "timestamp.asc".to_string()),
                    ("timestamp", format!("gt.{}", last_seen)),
                ];
                let rows = match fetch_rows(&client, &url, &access_key, &query).await {
                    Ok(rows) => rows,
                    Err(e) => {
                        log::error!("feed poll failed: {}", e);
                        continue;
                    }
                };
                for row in rows {
                    if row.timestamp > last_seen {
                        last_seen = row.timestamp;
                    }
                    if tx.send(row).await.is_err() {
                        return;
                    }
                }
            }
        });

        Ok(receiver_stream(rx))
    }
}

/// Adapts an mpsc receiver into a stream the consumer loop can drive.
pub fn receiver_stream(rx: mpsc::Receiver<AuditRecord>) -> BoxStream<'static, AuditRecord> {
    stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|record| (record, rx))
    })
    .boxed()
}
