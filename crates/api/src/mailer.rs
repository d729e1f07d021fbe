//! Outbound user notifications.

use async_trait::async_trait;
use marquee_db::models::user::User;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Greet a newly registered user.
    async fn send_welcome(&self, user: &User) -> anyhow::Result<()>;
}

/// Mailer that only records what it would have sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_welcome(&self, user: &User) -> anyhow::Result<()> {
        tracing::info!(
            user_id = user.id,
            email = %user.fields.email,
            "Welcome email sent"
        );
        Ok(())
    }
}
