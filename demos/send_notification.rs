//! Send Notification
//!
//! Builds a targeted message and a plain message, prints the JSON that
//! would be posted, and sends them when an API token is available.
//!
//! ## Usage
//!
//! ```bash
//! # Dry run: print the rendered commands
//! cargo run --example send_notification
//!
//! # Send for real
//! PUSHWOOSH_AUTH=<api token> PUSHWOOSH_APPLICATION=<app code> \
//!     RUST_LOG=pushwoosh_push=debug cargo run --example send_notification
//! ```
//!
//! `PUSHWOOSH_BASE_URL`, `PUSHWOOSH_API_VERSION`, `PUSHWOOSH_TIMEOUT_SECS`
//! and `PUSHWOOSH_DEBUG` override the client defaults.

use pushwoosh::prelude::*;
use pushwoosh::push::{EnvLoader, IosFields};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let env = EnvLoader::new(Some("PUSHWOOSH".to_string()));
    let auth = env.load_var("AUTH");
    let application = env.load_var_or("APPLICATION", "0000-0000");

    // Level 10+ players on iOS or Android who have not played for a week
    let players = ApplicationFilter::application(&application).platforms([Platform::Ios, Platform::Android]);
    let audience = players
        .intersect(TagFilter::integer("Level", Operator::Gte, 10)?)
        .subtract(TagFilter::days("Last Application Open", Operator::Lte, 7)?);

    let targeted = CreateTargetedMessageCommand::new()
        .auth(auth.clone().unwrap_or_default())
        .content(Content::localized([("en", "We miss you!"), ("de", "Wir vermissen dich!")]))
        .link("https://example.com/comeback")
        .ios(IosFields {
            sound: Some("default".into()),
            badges: Some(1),
            ..Default::default()
        })
        .devices_filter(audience);

    let broadcast = CreateMessageCommand::for_application([Notification::new()
        .content("Server maintenance tonight at 22:00 UTC")
        .platforms([Platform::Ios, Platform::Android, Platform::Chrome])])
    .application(&application)
    .auth(auth.clone().unwrap_or_default());

    let commands: [&dyn Command; 2] = [&targeted, &broadcast];

    if auth.is_none() {
        println!("PUSHWOOSH_AUTH is not set, printing commands only");
        for command in commands {
            println!("{}: {}", command.kind(), command.render()?);
        }
        return Ok(());
    }

    let client = PushwooshClient::from_env()?;
    for command in commands {
        let response = client.invoke(command).await?;
        println!("{} -> {}", client.path(command), response);
    }

    Ok(())
}
