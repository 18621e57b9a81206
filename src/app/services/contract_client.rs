use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::app::error::{ClientError, ClientResult};

/// Read/write surface of the deployed voting contract. The contract's own
/// vote counting and access control live on-chain; this is only the call
/// plumbing.
#[async_trait]
pub trait VotingContract: Send + Sync {
    /// Requests wallet account access and returns the selected address.
    async fn request_account(&self) -> ClientResult<String>;

    async fn get_count_candidates(&self) -> ClientResult<u32>;

    /// Candidate tuple at `index` (1-based): id, name, party, vote count.
    async fn get_candidate(&self, index: u32) -> ClientResult<(u32, String, String, u64)>;

    async fn add_candidate(&self, name: &str, party: &str) -> ClientResult<()>;

    async fn set_dates(&self, start: i64, end: i64) -> ClientResult<()>;

    async fn get_dates(&self) -> ClientResult<(i64, i64)>;

    /// Whether the bound account has already voted.
    async fn check_vote(&self) -> ClientResult<bool>;

    async fn vote(&self, candidate_id: u32) -> ClientResult<()>;
}

/// Talks to the contract through an HTTP RPC gateway that exposes the
/// deployed instance's methods as `{method, params}` calls.
pub struct GatewayVotingContract {
    gateway_url: String,
    client: Client,
}

impl GatewayVotingContract {
    pub fn new(gateway_url: &str) -> Self {
        GatewayVotingContract {
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn call(&self, method: &str, params: Value) -> ClientResult<Value> {
        let url = format!("{}/call", self.gateway_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "method": method, "params": params }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(ClientError::Service(format!(
                "contract call {} returned {}",
                method,
                response.status()
            )))
        }
    }
}

fn field_u64(value: &Value, index: usize, method: &str) -> ClientResult<u64> {
    value
        .get(index)
        .and_then(Value::as_u64)
        .ok_or_else(|| ClientError::Service(format!("malformed {} response", method)))
}

fn field_i64(value: &Value, index: usize, method: &str) -> ClientResult<i64> {
    value
        .get(index)
        .and_then(Value::as_i64)
        .ok_or_else(|| ClientError::Service(format!("malformed {} response", method)))
}

fn field_str(value: &Value, index: usize, method: &str) -> ClientResult<String> {
    value
        .get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ClientError::Service(format!("malformed {} response", method)))
}

#[async_trait]
impl VotingContract for GatewayVotingContract {
    async fn request_account(&self) -> ClientResult<String> {
        let result = self.call("eth_requestAccounts", json!([])).await?;
        field_str(&result, 0, "eth_requestAccounts")
    }

    async fn get_count_candidates(&self) -> ClientResult<u32> {
        let result = self.call("getCountCandidates", json!([])).await?;
        Ok(field_u64(&result, 0, "getCountCandidates")? as u32)
    }

    async fn get_candidate(&self, index: u32) -> ClientResult<(u32, String, String, u64)> {
        let result = self.call("getCandidate", json!([index])).await?;
        Ok((
            field_u64(&result, 0, "getCandidate")? as u32,
            field_str(&result, 1, "getCandidate")?,
            field_str(&result, 2, "getCandidate")?,
            field_u64(&result, 3, "getCandidate")?,
        ))
    }

    async fn add_candidate(&self, name: &str, party: &str) -> ClientResult<()> {
        self.call("addCandidate", json!([name, party])).await?;
        Ok(())
    }

    async fn set_dates(&self, start: i64, end: i64) -> ClientResult<()> {
        self.call("setDates", json!([start, end])).await?;
        Ok(())
    }

    async fn get_dates(&self) -> ClientResult<(i64, i64)> {
        let result = self.call("getDates", json!([])).await?;
        Ok((
            field_i64(&result, 0, "getDates")?,
            field_i64(&result, 1, "getDates")?,
        ))
    }

    async fn check_vote(&self) -> ClientResult<bool> {
        let result = self.call("checkVote", json!([])).await?;
        result
            .get(0)
            .and_then(Value::as_bool)
            .ok_or_else(|| ClientError::Service("malformed checkVote response".to_string()))
    }

    async fn vote(&self, candidate_id: u32) -> ClientResult<()> {
        self.call("vote", json!([candidate_id])).await?;
        Ok(())
    }
}
