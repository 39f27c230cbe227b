use tower_sessions::Session;

use crate::AppResult;

pub const USER_ID: &str = "user_id";
pub const FLASH: &str = "flash";

pub async fn set_flash(session: &Session, msg: &str) -> AppResult<()> {
    session.insert(FLASH, msg.to_owned()).await?;
    Ok(())
}

/// One-shot: reading the flash clears it.
pub async fn take_flash(session: &Session) -> AppResult<Option<String>> {
    Ok(session.remove::<String>(FLASH).await?)
}
