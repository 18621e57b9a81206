use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use voting_dapp_client::app::controllers::ballot_controller::{BallotController, VoteOutcome};
use voting_dapp_client::app::dtos::candidate_dto::CandidateMetaDto;
use voting_dapp_client::app::dtos::login_dto::{LoginResponseDto, SessionDto, VerifyOtpDto};
use voting_dapp_client::app::error::{ClientError, ClientResult};
use voting_dapp_client::app::services::backend_api::BackendApi;
use voting_dapp_client::app::services::contract_client::VotingContract;

struct MockContract {
    candidates: Vec<(u32, String, String, u64)>,
    dates: (i64, i64),
    already_voted: bool,
    vote_calls: AtomicUsize,
    set_dates_calls: AtomicUsize,
}

impl MockContract {
    fn new(candidates: Vec<(u32, String, String, u64)>) -> Self {
        MockContract {
            candidates,
            dates: (1_717_200_000, 1_718_409_600),
            already_voted: false,
            vote_calls: AtomicUsize::new(0),
            set_dates_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl VotingContract for MockContract {
    async fn request_account(&self) -> ClientResult<String> {
        Ok("0xabc0000000000000000000000000000000000001".to_string())
    }

    async fn get_count_candidates(&self) -> ClientResult<u32> {
        Ok(self.candidates.len() as u32)
    }

    async fn get_candidate(&self, index: u32) -> ClientResult<(u32, String, String, u64)> {
        self.candidates
            .get(index as usize - 1)
            .cloned()
            .ok_or_else(|| ClientError::Service("no such candidate".to_string()))
    }

    async fn add_candidate(&self, _name: &str, _party: &str) -> ClientResult<()> {
        Ok(())
    }

    async fn set_dates(&self, _start: i64, _end: i64) -> ClientResult<()> {
        self.set_dates_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_dates(&self) -> ClientResult<(i64, i64)> {
        Ok(self.dates)
    }

    async fn check_vote(&self) -> ClientResult<bool> {
        Ok(self.already_voted)
    }

    async fn vote(&self, _candidate_id: u32) -> ClientResult<()> {
        self.vote_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct MockBackend {
    metadata: ClientResult<Vec<CandidateMetaDto>>,
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn login(&self, _voter_id: &str, _password: &str) -> ClientResult<LoginResponseDto> {
        Err(ClientError::Service("not under test".to_string()))
    }

    async fn verify_otp(&self, _request: &VerifyOtpDto) -> ClientResult<SessionDto> {
        Err(ClientError::Service("not under test".to_string()))
    }

    async fn fetch_candidates(&self) -> ClientResult<Vec<CandidateMetaDto>> {
        match &self.metadata {
            Ok(list) => Ok(list.clone()),
            Err(_) => Err(ClientError::Service("metadata unavailable".to_string())),
        }
    }
}

fn two_candidates() -> Vec<(u32, String, String, u64)> {
    vec![
        (1, "Ada".to_string(), "Blue".to_string(), 4),
        (2, "Grace".to_string(), "Green".to_string(), 7),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn metadata_is_merged_only_for_matching_ids() {
        let contract = Arc::new(MockContract::new(two_candidates()));
        let backend = Arc::new(MockBackend {
            metadata: Ok(vec![CandidateMetaDto {
                id: 1,
                bio: Some("Pioneer".to_string()),
                image_url: Some("https://img.example/ada.png".to_string()),
            }]),
        });
        let mut ballot = BallotController::new(contract, backend);

        ballot.start().await.unwrap();

        assert_eq!(ballot.view.rows.len(), 2);
        assert_eq!(ballot.view.rows[0].bio.as_deref(), Some("Pioneer"));
        assert!(ballot.view.rows[1].bio.is_none());
        assert_eq!(ballot.view.rows[1].name, "Grace");
        assert_eq!(ballot.view.rows[1].vote_count, 7);
    }

    #[tokio::test]
    async fn metadata_failure_falls_back_to_on_chain_data() {
        let contract = Arc::new(MockContract::new(two_candidates()));
        let backend = Arc::new(MockBackend {
            metadata: Err(ClientError::Service("down".to_string())),
        });
        let mut ballot = BallotController::new(contract, backend);

        ballot.start().await.unwrap();

        assert_eq!(ballot.view.rows.len(), 2);
        assert!(ballot.view.rows.iter().all(|row| row.bio.is_none()));
        assert!(ballot.view.window.is_some());
        assert!(ballot.view.vote_enabled);
    }

    #[tokio::test]
    async fn voting_without_a_selection_never_reaches_the_contract() {
        let contract = Arc::new(MockContract::new(two_candidates()));
        let backend = Arc::new(MockBackend { metadata: Ok(vec![]) });
        let mut ballot = BallotController::new(contract.clone(), backend);
        ballot.start().await.unwrap();

        assert!(matches!(
            ballot.vote().await,
            Err(ClientError::InvalidInput(_))
        ));
        assert_eq!(contract.vote_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            ballot.view.message.as_ref().unwrap().text,
            "Please vote for a candidate."
        );
    }

    #[tokio::test]
    async fn successful_vote_disables_voting_and_requests_reload() {
        let contract = Arc::new(MockContract::new(two_candidates()));
        let backend = Arc::new(MockBackend { metadata: Ok(vec![]) });
        let mut ballot = BallotController::new(contract.clone(), backend);
        ballot.start().await.unwrap();

        ballot.select(2);
        let outcome = ballot.vote().await.unwrap();

        assert_eq!(outcome, VoteOutcome::Reload);
        assert!(!ballot.view.vote_enabled);
        assert_eq!(contract.vote_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn an_account_that_already_voted_gets_no_vote_button() {
        let mut contract = MockContract::new(two_candidates());
        contract.already_voted = true;
        let contract = Arc::new(contract);
        let backend = Arc::new(MockBackend { metadata: Ok(vec![]) });
        let mut ballot = BallotController::new(contract, backend);

        ballot.start().await.unwrap();

        assert!(!ballot.view.vote_enabled);
    }

    #[tokio::test]
    async fn inverted_election_window_is_rejected_locally() {
        let contract = Arc::new(MockContract::new(vec![]));
        let backend = Arc::new(MockBackend { metadata: Ok(vec![]) });
        let ballot = BallotController::new(contract.clone(), backend);

        assert!(matches!(
            ballot.set_dates(200, 100).await,
            Err(ClientError::InvalidInput(_))
        ));
        assert_eq!(contract.set_dates_calls.load(Ordering::SeqCst), 0);

        ballot.set_dates(100, 200).await.unwrap();
        assert_eq!(contract.set_dates_calls.load(Ordering::SeqCst), 1);
    }
}
