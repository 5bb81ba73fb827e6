use async_trait::async_trait;
use gumtaper_models::reminder::{ReminderPayload, SlotIndex};
use gumtaper_scheduler::{ReminderDeliveryChannel, ReminderMessageType};

/// Delivers reminders to the log. Stands in for a device notification.
pub struct LogDeliveryChannel;

#[async_trait]
impl ReminderDeliveryChannel for LogDeliveryChannel {
    async fn send_reminder_notification(
        &self,
        index: SlotIndex,
        payload: &ReminderPayload,
        message: ReminderMessageType,
    ) {
        match message {
            ReminderMessageType::Registered => {
                log::debug!("Reminder armed. [slot = {index}]")
            }
            ReminderMessageType::Fired => {
                log::info!("🚨: {} [slot = {index}]", payload.message)
            }
            ReminderMessageType::Cancelled => {
                log::debug!("Reminder cancelled. [slot = {index}]")
            }
        }
    }
}
