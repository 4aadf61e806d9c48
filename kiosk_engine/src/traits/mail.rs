use log::*;

use crate::{
    db_types::{MailSendHistory, NewMailSendHistory},
    traits::KioskError,
};

/// The boundary to an external mail service.
///
/// Sending is fire-and-forget: the client reports whether the mail was accepted, and nothing is retried.
pub trait MailSendClient {
    fn send_email(&self, from: &str, to: &str, subject: &str, content: &str) -> bool;
}

/// Storage for the log of mails that were sent successfully.
#[allow(async_fn_in_trait)]
pub trait MailHistoryManagement {
    async fn insert_mail_history(&self, history: NewMailSendHistory) -> Result<MailSendHistory, KioskError>;
}

/// A [`MailSendClient`] that writes the mail to the log instead of delivering it. Every send succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailSendClient;

impl MailSendClient for LogMailSendClient {
    fn send_email(&self, from: &str, to: &str, subject: &str, content: &str) -> bool {
        info!("📧️ Sending mail from {from} to {to}: [{subject}]");
        debug!("📧️ {content}");
        true
    }
}
