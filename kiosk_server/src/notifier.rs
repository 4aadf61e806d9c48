use kiosk_engine::{
    db_types::Order,
    traits::{LogMailSendClient, MailHistoryManagement, MailSendClient},
    MailApi,
};
use log::*;

use crate::config::MailConfig;

/// Sends a mail for every order the kiosk accepts.
///
/// A failed notification never fails the order it is about. It is logged, and the order stands.
pub struct OrderNotifier<M, C = LogMailSendClient> {
    mail: MailApi<C, M>,
    config: MailConfig,
}

impl<M, C> OrderNotifier<M, C> {
    pub fn new(client: C, history: M, config: MailConfig) -> Self {
        Self { mail: MailApi::new(client, history), config }
    }
}

impl<M, C> OrderNotifier<M, C>
where
    M: MailHistoryManagement,
    C: MailSendClient,
{
    /// Returns whether a notification went out.
    pub async fn order_placed(&self, order: &Order) -> bool {
        let Some(to) = self.config.to.as_deref() else {
            trace!("📧️ No recipient configured. Skipping notification for order #{}", order.id);
            return false;
        };
        let subject = format!("[주문 접수] 주문 #{}", order.id);
        let content = format!(
            "{} 주문이 접수되었습니다. 상품 {}개, 총 {}",
            order.registered_at.format("%Y-%m-%d %H:%M"),
            order.line_items.len(),
            order.total_price
        );
        match self.mail.send_mail(&self.config.from, to, &subject, &content).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!("📧️ Notification for order #{} was sent, but could not be logged. {e}", order.id);
                true
            },
        }
    }
}
