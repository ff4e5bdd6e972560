//! Entrance System lookup tool.
//!
//! Loads configuration from the environment, connects to the user store and
//! prints the user registered under the barcode given as the only argument.
//!
//! ```text
//! ENTRANCE_SYSTEM__DATABASE__URL=postgres://... entrance-system JH-0001
//! ```

use std::error::Error;

use entrance_system::adapters::{connect, PostgresUserRepository};
use entrance_system::config::{AppConfig, LoggingConfig, ValidationError};
use entrance_system::ports::UserRepository;

fn init_tracing(logging: &LoggingConfig) -> Result<(), ValidationError> {
    let subscriber = tracing_subscriber::fmt().with_env_filter(logging.env_filter()?);
    if logging.use_json() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let Some(barcode) = std::env::args().nth(1) else {
        return Err("usage: entrance-system <barcode>".into());
    };

    tracing::info!(database = %config.database.redacted_url(), "Starting lookup");
    let pool = connect(&config.database).await?;
    let users = PostgresUserRepository::new(pool);

    let user = users.find_by_barcode(&barcode).await?;
    tracing::info!(user_id = %user.id, "Found user");

    println!("id:                {}", user.id);
    println!("name:              {}", user.name);
    println!("description:       {}", user.description);
    println!("barcode:           {}", user.barcode);
    println!("contact:           {}", user.contact);
    println!("remaining entries: {}", user.remaining_entries);
    println!("total entries:     {}", user.total_entries);
    println!("total stay time:   {}", user.total_stay_time);
    println!("registered at:     {}", user.registered_at);

    Ok(())
}
