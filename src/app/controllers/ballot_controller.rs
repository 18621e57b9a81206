use std::collections::HashMap;
use std::sync::Arc;

use crate::app::controllers::StatusMessage;
use crate::app::dtos::candidate_dto::CandidateMetaDto;
use crate::app::entities::candidate_entity::{Candidate, ElectionWindow};
use crate::app::error::{ClientError, ClientResult};
use crate::app::services::backend_api::BackendApi;
use crate::app::services::contract_client::VotingContract;

/// Rendered state of the ballot page.
#[derive(Debug, Default)]
pub struct BallotView {
    pub account: Option<String>,
    pub window: Option<ElectionWindow>,
    pub rows: Vec<Candidate>,
    pub vote_enabled: bool,
    pub message: Option<StatusMessage>,
}

/// Signals the host after a successful vote; the page does a full reload to
/// pick up the new tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Reload,
}

/// Reads candidate and election-window state from the contract, merges the
/// cached REST metadata and submits votes. State lives for one page load.
pub struct BallotController {
    contract: Arc<dyn VotingContract>,
    backend: Arc<dyn BackendApi>,
    meta_cache: HashMap<u32, CandidateMetaDto>,
    selected: Option<u32>,
    pub view: BallotView,
}

impl BallotController {
    pub fn new(contract: Arc<dyn VotingContract>, backend: Arc<dyn BackendApi>) -> Self {
        BallotController {
            contract,
            backend,
            meta_cache: HashMap::new(),
            selected: None,
            view: BallotView::default(),
        }
    }

    /// Page-load sequence: wallet account, metadata prefetch, election
    /// window, candidate enumeration, vote-button gating.
    pub async fn start(&mut self) -> ClientResult<()> {
        let account = self.contract.request_account().await?;
        self.view.account = Some(account);

        // Best effort. The view falls back to on-chain-only data.
        self.load_metadata().await;

        match self.contract.get_dates().await {
            Ok((start, end)) => self.view.window = Some(ElectionWindow { start, end }),
            Err(e) => log::error!("failed to load election dates: {}", e),
        }

        let count = self.contract.get_count_candidates().await?;
        for index in 1..=count {
            let (id, name, party, vote_count) = self.contract.get_candidate(index).await?;
            let meta = self.meta_cache.get(&id);
            self.view.rows.push(Candidate {
                id,
                name,
                party,
                vote_count,
                bio: meta.and_then(|m| m.bio.clone()),
                image_url: meta.and_then(|m| m.image_url.clone()),
            });
        }

        match self.contract.check_vote().await {
            Ok(voted) => self.view.vote_enabled = !voted,
            Err(e) => log::error!("failed to check vote status: {}", e),
        }

        Ok(())
    }

    async fn load_metadata(&mut self) {
        match self.backend.fetch_candidates().await {
            Ok(list) => {
                for meta in list {
                    self.meta_cache.insert(meta.id, meta);
                }
                log::info!("candidate metadata loaded");
            }
            Err(e) => {
                log::warn!(
                    "could not fetch candidate metadata, falling back to on-chain data only: {}",
                    e
                );
            }
        }
    }

    /// Records the radio selection.
    pub fn select(&mut self, candidate_id: u32) {
        self.selected = Some(candidate_id);
    }

    pub async fn vote(&mut self) -> ClientResult<VoteOutcome> {
        let candidate_id = match self.selected {
            Some(id) => id,
            None => {
                self.view.message = Some(StatusMessage::error("Please vote for a candidate."));
                return Err(ClientError::InvalidInput(
                    "no candidate selected".to_string(),
                ));
            }
        };

        match self.contract.vote(candidate_id).await {
            Ok(()) => {
                self.view.vote_enabled = false;
                self.view.message = Some(StatusMessage::info("Voted"));
                Ok(VoteOutcome::Reload)
            }
            Err(e) => {
                log::error!("vote failed: {}", e);
                Err(e)
            }
        }
    }

    /// Admin action: registers a new candidate on-chain.
    pub async fn add_candidate(&self, name: &str, party: &str) -> ClientResult<()> {
        self.contract.add_candidate(name, party).await
    }

    /// Admin action: sets the election window. Rejects an empty or inverted
    /// window before calling out.
    pub async fn set_dates(&self, start: i64, end: i64) -> ClientResult<()> {
        if end <= start {
            return Err(ClientError::InvalidInput(
                "end date must be after start date".to_string(),
            ));
        }
        self.contract.set_dates(start, end).await
    }
}
