use std::fmt::Debug;

use log::*;

use crate::{
    db_types::NewMailSendHistory,
    traits::{KioskError, MailHistoryManagement, MailSendClient},
};

/// Sends notification mails through a [`MailSendClient`] and records each one that was accepted.
pub struct MailApi<C, B> {
    client: C,
    db: B,
}

impl<C, B> Debug for MailApi<C, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MailApi")
    }
}

impl<C, B> MailApi<C, B> {
    pub fn new(client: C, db: B) -> Self {
        Self { client, db }
    }
}

impl<C, B> MailApi<C, B>
where
    C: MailSendClient,
    B: MailHistoryManagement,
{
    /// Hands the mail to the client. If the client accepts it, one history record is written and `true` is returned.
    /// If it does not, nothing is written and `false` is returned. Failed sends are not retried.
    pub async fn send_mail(&self, from: &str, to: &str, subject: &str, content: &str) -> Result<bool, KioskError> {
        if !self.client.send_email(from, to, subject, content) {
            warn!("📧️ Mail to {to} [{subject}] was not sent");
            return Ok(false);
        }
        let history = NewMailSendHistory::new(from, to, subject, content);
        let record = self.db.insert_mail_history(history).await?;
        debug!("📧️ Mail to {to} sent and logged as #{}", record.id);
        Ok(true)
    }
}
