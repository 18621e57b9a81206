use futures::stream::StreamExt;
use std::sync::Arc;

use crate::app::config::AppConfig;
use crate::app::controllers::StatusMessage;
use crate::app::entities::audit_entity::AuditRecord;
use crate::app::error::{ClientError, ClientResult};
use crate::app::services::feed_client::{FeedClient, HttpFeedClient};
use crate::app::storage::{LocalStore, FEED_ACCESS_KEY};

/// Maximum number of rows kept on screen.
pub const MAX_ROWS: usize = 10;

/// One displayed feed row. `is_new` marks rows that arrived live.
#[derive(Debug, Clone)]
pub struct FeedRow {
    pub record: AuditRecord,
    pub is_new: bool,
}

/// Rendered state of the transparency dashboard.
#[derive(Debug, Default)]
pub struct AuditFeedView {
    /// Top-to-bottom display order; index 0 is the top row.
    pub rows: Vec<FeedRow>,
    /// Cumulative count of every row ever inserted, live and initial alike.
    /// Trimming never decrements it.
    pub live_count: u64,
    pub status: Option<StatusMessage>,
}

/// Loads the recent audit trail and appends live insert events, keeping the
/// display capped at [`MAX_ROWS`].
pub struct AuditFeedController {
    feed: Arc<dyn FeedClient>,
    last_seen: i64,
    pub view: AuditFeedView,
}

/// Builds the HTTP feed client from the stored access key. A missing key is
/// a terminal configuration error for this view.
pub fn feed_client_from_store(
    config: &AppConfig,
    store: &LocalStore,
) -> ClientResult<HttpFeedClient> {
    let access_key = store.get(FEED_ACCESS_KEY).ok_or_else(|| {
        ClientError::Configuration(
            "Feed not configured. Set your access key in local storage.".to_string(),
        )
    })?;
    Ok(HttpFeedClient::new(&config.feed_url, &access_key))
}

impl AuditFeedController {
    pub fn new(feed: Arc<dyn FeedClient>) -> Self {
        AuditFeedController {
            feed,
            last_seen: 0,
            view: AuditFeedView::default(),
        }
    }

    /// Loads the most recent rows (newest first) and renders them through the
    /// same insert-at-top path live events use.
    pub async fn load_initial(&mut self) -> ClientResult<()> {
        let records = match self.feed.load_recent(MAX_ROWS).await {
            Ok(records) => records,
            Err(e) => {
                self.view.status = Some(StatusMessage::error(format!(
                    "Error loading audit data: {}",
                    e
                )));
                return Err(e);
            }
        };

        if records.is_empty() {
            self.view.status = Some(StatusMessage::info(
                "No votes recorded yet. Waiting for live data...",
            ));
            return Ok(());
        }

        let shown = records.len();
        for record in records {
            if record.timestamp > self.last_seen {
                self.last_seen = record.timestamp;
            }
            self.insert_row(record, false);
        }
        self.view.status = Some(StatusMessage::info(format!(
            "Showing last {} transactions. Listening for new votes...",
            shown
        )));
        Ok(())
    }

    /// Subscribes from the current high-water timestamp and consumes insert
    /// events until the stream ends.
    pub async fn run(&mut self) -> ClientResult<()> {
        let mut events = self.feed.subscribe(self.last_seen).await?;
        self.view.status = Some(StatusMessage::info(
            "Connected. Listening for new votes...",
        ));

        while let Some(record) = events.next().await {
            log::info!("new audit entry: {}", record.transaction_hash);
            if record.timestamp > self.last_seen {
                self.last_seen = record.timestamp;
            }
            let ts = record.display_time();
            self.insert_row(record, true);
            self.view.status = Some(StatusMessage::info(format!(
                "LIVE - new vote detected at {}",
                ts
            )));
        }
        Ok(())
    }

    fn insert_row(&mut self, record: AuditRecord, is_new: bool) {
        self.view.rows.insert(0, FeedRow { record, is_new });
        while self.view.rows.len() > MAX_ROWS {
            self.view.rows.pop();
        }
        self.view.live_count += 1;
    }
}
