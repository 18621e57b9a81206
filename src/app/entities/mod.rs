pub mod audit_entity;
pub mod candidate_entity;
pub mod session_entity;
