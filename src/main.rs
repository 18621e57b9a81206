use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use voting_dapp_client::app::config::AppConfig;
use voting_dapp_client::app::controllers::audit_controller::{
    feed_client_from_store, AuditFeedController,
};
use voting_dapp_client::app::controllers::ballot_controller::BallotController;
use voting_dapp_client::app::controllers::login_controller::LoginController;
use voting_dapp_client::app::error::ClientResult;
use voting_dapp_client::app::services::backend_api::HttpBackendApi;
use voting_dapp_client::app::services::contract_client::GatewayVotingContract;
use voting_dapp_client::app::services::otp_provider::HttpOtpProvider;
use voting_dapp_client::app::storage::{LocalStore, FEED_ACCESS_KEY};

#[tokio::main]
async fn main() -> ClientResult<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    let store = Arc::new(LocalStore::new());
    if let Ok(key) = env::var("FEED_ACCESS_KEY") {
        store.set(FEED_ACCESS_KEY, &key);
    }

    let flow = env::args().nth(1).unwrap_or_else(|| "ballot".to_string());
    match flow.as_str() {
        "ballot" => run_ballot(&config).await,
        "login" => run_login(&config, store).await,
        "audit" => run_audit(&config, store).await,
        other => {
            eprintln!("unknown flow '{}'; expected ballot, login or audit", other);
            Ok(())
        }
    }
}

async fn run_ballot(config: &AppConfig) -> ClientResult<()> {
    let contract = Arc::new(GatewayVotingContract::new(&config.gateway_url));
    let backend = Arc::new(HttpBackendApi::new(&config.backend_url));
    let mut controller = BallotController::new(contract, backend);
    controller.start().await?;

    if let Some(account) = &controller.view.account {
        println!("Your Account: {}", account);
    }
    if let Some(window) = &controller.view.window {
        println!("Election window: {}", window.display());
    }
    for row in &controller.view.rows {
        println!(
            "[{}] {} ({}) - {} votes{}",
            row.id,
            row.name,
            row.party,
            row.vote_count,
            row.bio.as_deref().map(|b| format!(" | {}", b)).unwrap_or_default()
        );
    }
    println!("voting enabled: {}", controller.view.vote_enabled);
    Ok(())
}

async fn run_login(config: &AppConfig, store: Arc<LocalStore>) -> ClientResult<()> {
    let backend = Arc::new(HttpBackendApi::new(&config.backend_url));
    let otp = Arc::new(HttpOtpProvider::new(&config.otp_provider_url));
    let mut controller = LoginController::new(
        backend,
        otp,
        store,
        &config.app_url,
        config.allow_mock_otp,
    );

    let voter_id = prompt("Voter ID: ");
    let password = prompt("Password: ");
    if let Err(e) = controller.submit_credentials(&voter_id, &password).await {
        log::error!("credential check failed: {}", e);
    }
    if let Some(message) = &controller.message {
        println!("{}", message.text);
    }

    while controller.redirect().is_none() {
        let code = prompt("OTP code (empty to quit): ");
        if code.trim().is_empty() {
            return Ok(());
        }
        if let Err(e) = controller.submit_otp(&code).await {
            log::error!("OTP submission failed: {}", e);
        }
        if let Some(message) = &controller.message {
            println!("{}", message.text);
        }
    }

    if let Some(redirect) = controller.redirect() {
        println!("redirecting to {}", redirect.url);
    }
    Ok(())
}

async fn run_audit(config: &AppConfig, store: Arc<LocalStore>) -> ClientResult<()> {
    let feed = Arc::new(feed_client_from_store(config, &store)?);
    let mut controller = AuditFeedController::new(feed);
    controller.load_initial().await?;

    for row in &controller.view.rows {
        println!(
            "{} | {} | block {} | {}",
            row.record.short_hash(),
            row.record.event_type,
            row.record.block_number,
            row.record.display_time()
        );
    }
    if let Some(status) = &controller.view.status {
        println!("{}", status.text);
    }

    // Runs until the process is killed; there is no unsubscribe path.
    controller.run().await
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok();
    line.trim().to_string()
}
