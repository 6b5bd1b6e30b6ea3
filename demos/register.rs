//! Registers an account from the command line:
//!
//! ```sh
//! cargo run --example register -- <name> <email> <handle> <password> <password-confirmation>
//! ```

use std::env;

use anyhow::{bail, Result};
use dotenv::dotenv;
use signup_client::{
    config::DEFAULT_CONFIG_FILE, Config, Field, HttpAuthService, Registration, SubmitBlocked,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine, the variables may come from the environment.
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let values: Vec<String> = env::args().skip(1).collect();
    if values.len() != Field::ALL.len() {
        bail!(
            "Expected {} arguments: name email handle password password-confirmation",
            Field::ALL.len()
        );
    }

    let config = Config::load(DEFAULT_CONFIG_FILE)?;
    let service = HttpAuthService::from_config(&config)?;

    let mut registration = Registration::new(config.notifications);
    for (field, value) in Field::ALL.into_iter().zip(values) {
        registration.set_field(field, value);
    }

    println!("Registering at {}", service.register_url());

    match registration.submit(&service).await {
        Ok(_) => {}
        Err(SubmitBlocked::Invalid(report)) => {
            for field in report.fields() {
                println!("{field}: {}", report.message(field).unwrap_or_default());
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(notification) = registration.notification() {
        println!("{:?}: {}", notification.kind, notification.message);
        if let Some(description) = notification.description {
            println!("{description}");
        }
    }

    Ok(())
}
