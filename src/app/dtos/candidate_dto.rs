use serde::{Deserialize, Serialize};

/// One row of the `GET /candidates` metadata payload. Keyed by the on-chain
/// candidate id; bio and image are both optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateMetaDto {
    pub id: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CandidatesResponseDto {
    pub candidates: Vec<CandidateMetaDto>,
}
