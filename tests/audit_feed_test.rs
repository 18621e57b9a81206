use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use voting_dapp_client::app::config::AppConfig;
use voting_dapp_client::app::controllers::audit_controller::{
    feed_client_from_store, AuditFeedController, MAX_ROWS,
};
use voting_dapp_client::app::entities::audit_entity::AuditRecord;
use voting_dapp_client::app::error::{ClientError, ClientResult};
use voting_dapp_client::app::services::feed_client::{receiver_stream, FeedClient};
use voting_dapp_client::app::storage::{LocalStore, FEED_ACCESS_KEY};

fn record(ts: i64) -> AuditRecord {
    AuditRecord {
        transaction_hash: format!("0x{:064x}", ts),
        event_type: "VoteCast".to_string(),
        block_number: ts as u64,
        timestamp: ts,
    }
}

struct MockFeed {
    /// Returned by `load_recent`, already in descending-timestamp order.
    initial: Vec<AuditRecord>,
    /// Live channel handed out on `subscribe`.
    events: Mutex<Option<mpsc::Receiver<AuditRecord>>>,
    subscribed_after: AtomicI64,
}

impl MockFeed {
    fn new(initial: Vec<AuditRecord>, events: mpsc::Receiver<AuditRecord>) -> Self {
        MockFeed {
            initial,
            events: Mutex::new(Some(events)),
            subscribed_after: AtomicI64::new(-1),
        }
    }
}

#[async_trait]
impl FeedClient for MockFeed {
    async fn load_recent(&self, limit: usize) -> ClientResult<Vec<AuditRecord>> {
        Ok(self.initial.iter().take(limit).cloned().collect())
    }

    async fn subscribe(&self, after: i64) -> ClientResult<BoxStream<'static, AuditRecord>> {
        self.subscribed_after.store(after, Ordering::SeqCst);
        let rx = self
            .events
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| ClientError::Service("already subscribed".to_string()))?;
        Ok(receiver_stream(rx))
    }
}

/// Ten records T1..T10, newest first, as the feed service returns them.
fn ten_descending() -> Vec<AuditRecord> {
    (1..=10).rev().map(record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn live_insert_trims_the_most_recent_initial_row() {
        let (tx, rx) = mpsc::channel(8);
        let feed = Arc::new(MockFeed::new(ten_descending(), rx));
        let mut dashboard = AuditFeedController::new(feed.clone());

        dashboard.load_initial().await.unwrap();
        assert_eq!(dashboard.view.rows.len(), MAX_ROWS);
        // Initial render via insert-at-top leaves the oldest row on top.
        assert_eq!(dashboard.view.rows[0].record.timestamp, 1);
        assert_eq!(dashboard.view.rows[9].record.timestamp, 10);

        tx.send(record(11)).await.unwrap();
        drop(tx);
        dashboard.run().await.unwrap();

        // T11 on top, T10 evicted: T11, T1..T9.
        let timestamps: Vec<i64> = dashboard
            .view
            .rows
            .iter()
            .map(|row| row.record.timestamp)
            .collect();
        assert_eq!(timestamps, vec![11, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(dashboard.view.live_count, 11);
        assert!(dashboard.view.rows[0].is_new);
        assert!(!dashboard.view.rows[1].is_new);
    }

    #[tokio::test]
    async fn counter_counts_every_insertion_independent_of_trimming() {
        let (tx, rx) = mpsc::channel(8);
        let feed = Arc::new(MockFeed::new(ten_descending(), rx));
        let mut dashboard = AuditFeedController::new(feed);

        dashboard.load_initial().await.unwrap();
        for ts in 11..=15 {
            tx.send(record(ts)).await.unwrap();
        }
        drop(tx);
        dashboard.run().await.unwrap();

        assert_eq!(dashboard.view.rows.len(), MAX_ROWS);
        assert_eq!(dashboard.view.live_count, 15);
    }

    #[tokio::test]
    async fn subscription_starts_after_the_newest_loaded_row() {
        let (tx, rx) = mpsc::channel(1);
        let feed = Arc::new(MockFeed::new(ten_descending(), rx));
        let mut dashboard = AuditFeedController::new(feed.clone());

        dashboard.load_initial().await.unwrap();
        drop(tx);
        dashboard.run().await.unwrap();

        assert_eq!(feed.subscribed_after.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn empty_feed_reports_waiting_state() {
        let (tx, rx) = mpsc::channel(1);
        let feed = Arc::new(MockFeed::new(vec![], rx));
        let mut dashboard = AuditFeedController::new(feed);

        dashboard.load_initial().await.unwrap();
        drop(tx);

        assert!(dashboard.view.rows.is_empty());
        assert_eq!(dashboard.view.live_count, 0);
        let status = dashboard.view.status.as_ref().unwrap();
        assert!(status.text.contains("No votes recorded yet"));
        assert!(!status.is_error);
    }

    #[tokio::test]
    async fn missing_access_key_is_a_configuration_error() {
        let config = AppConfig {
            backend_url: "http://127.0.0.1:8000".to_string(),
            gateway_url: "http://127.0.0.1:9545".to_string(),
            feed_url: "http://127.0.0.1:4000".to_string(),
            otp_provider_url: "http://127.0.0.1:4100".to_string(),
            app_url: "http://127.0.0.1:8080".to_string(),
            allow_mock_otp: false,
        };
        let store = LocalStore::new();

        assert!(matches!(
            feed_client_from_store(&config, &store),
            Err(ClientError::Configuration(_))
        ));

        store.set(FEED_ACCESS_KEY, "anon-key");
        assert!(feed_client_from_store(&config, &store).is_ok());
    }
}
