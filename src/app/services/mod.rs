pub mod backend_api;
pub mod contract_client;
pub mod feed_client;
pub mod otp_provider;
