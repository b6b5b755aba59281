use teloxide::types::UserId;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "abrechnung={level},telegram_bot={level},ledger={level}",
            level = settings.app.level
        ))
        .init();

    tracing::info!("Found telegram settings...");

    let allowed_users: Vec<UserId> = settings
        .telegram
        .allowed_users
        .into_iter()
        .map(UserId)
        .collect();

    let mut builder = telegram_bot::Bot::builder()
        .token(&settings.telegram.token)
        .allowed_users(allowed_users)
        .private_chat(settings.telegram.private_chat);
    if let Some(path) = settings.telegram.state_path {
        builder = builder.state_path(path);
    }

    builder.build().run().await;

    Ok(())
}
