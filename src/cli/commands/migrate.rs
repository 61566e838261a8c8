use crate::config;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let config = config::config();
    let db = DatabaseManager::connect(&config.database)?;
    db.migrate().await?;
    db.close().await;
    Ok(())
}
