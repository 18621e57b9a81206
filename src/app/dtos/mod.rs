pub mod candidate_dto;
pub mod login_dto;
