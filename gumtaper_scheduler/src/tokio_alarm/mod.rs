use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use gumtaper_models::reminder::{ReminderPayload, SlotIndex};
use tokio::{
    sync::RwLock,
    task::{self, JoinHandle},
};
use tokio_util::sync::CancellationToken;

use crate::alarm::AlarmFacility;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ReminderMessageType {
    Registered,
    Fired,
    Cancelled,
}

#[async_trait]
pub trait ReminderDeliveryChannel: Send + Sync + 'static {
    async fn send_reminder_notification(
        &self,
        index: SlotIndex,
        payload: &ReminderPayload,
        message: ReminderMessageType,
    );
}

struct ScheduledAlarmHandle {
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

type AlarmTaskStore = RwLock<HashMap<SlotIndex, ScheduledAlarmHandle>>;

/// Alarm facility backed by one tokio task per slot. Every outstanding alarm is
/// cancelled when the facility is dropped.
pub struct TokioAlarmFacility {
    tasks: Arc<AlarmTaskStore>,
    delivery_channel: Arc<dyn ReminderDeliveryChannel>,
    shutdown: CancellationToken,
}

impl TokioAlarmFacility {
    pub fn new(delivery_channel: Arc<dyn ReminderDeliveryChannel>) -> Self {
        let tasks = Arc::new(RwLock::new(HashMap::new()));
        let shutdown = CancellationToken::new();
        Self::spawn_cleanup_task(Arc::clone(&tasks), shutdown.child_token());

        Self {
            tasks,
            delivery_channel,
            shutdown,
        }
    }

    /// Slots whose alarm has neither fired nor been cancelled yet.
    pub async fn pending_slots(&self) -> Vec<SlotIndex> {
        let mut slots: Vec<_> = self
            .tasks
            .read()
            .await
            .iter()
            .filter(|(_, handle)| !handle.task.is_finished())
            .map(|(index, _)| *index)
            .collect();
        slots.sort_unstable();
        slots
    }

    fn spawn_alarm_task(
        &self,
        index: SlotIndex,
        delay: Duration,
        payload: ReminderPayload,
    ) -> ScheduledAlarmHandle {
        let cancellation_token = self.shutdown.child_token();
        let task_cancellation_token = cancellation_token.clone();
        let delivery_channel = Arc::clone(&self.delivery_channel);

        let task = task::spawn(async move {
            delivery_channel
                .send_reminder_notification(index, &payload, ReminderMessageType::Registered)
                .await;

            tokio::select! {
                _ = task_cancellation_token.cancelled() => {
                    log::debug!("Alarm task was cancelled. [slot = {index}]");
                    delivery_channel
                        .send_reminder_notification(index, &payload, ReminderMessageType::Cancelled)
                        .await;
                },
                _ = tokio::time::sleep(delay) => {
                    log::info!("Firing reminder. [slot = {index}]");
                    delivery_channel
                        .send_reminder_notification(index, &payload, ReminderMessageType::Fired)
                        .await;
                }
            }
        });

        ScheduledAlarmHandle {
            task,
            cancellation_token,
        }
    }

    fn spawn_cleanup_task(tasks: Arc<AlarmTaskStore>, shutdown: CancellationToken) {
        task::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(CLEANUP_INTERVAL) => {
                        Self::clean_finished_tasks(&tasks).await;
                    }
                    _ = shutdown.cancelled() => {
                        log::info!("Alarm cleanup task shutting down");
                        break;
                    }
                };
            }
        });
    }

    async fn clean_finished_tasks(tasks: &AlarmTaskStore) {
        let mut tasks = tasks.write().await;
        let before = tasks.len();
        tasks.retain(|_, handle| !handle.task.is_finished());
        let after = tasks.len();

        if before != after {
            log::info!("Cleaned up {} finished alarm tasks", before - after);
        }
    }
}

impl Drop for TokioAlarmFacility {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[async_trait]
impl AlarmFacility for TokioAlarmFacility {
    async fn cancel(&self, index: SlotIndex) {
        if let Some(handle) = self.tasks.write().await.remove(&index) {
            handle.cancellation_token.cancel();
        }
    }

    async fn register(
        &self,
        index: SlotIndex,
        fires_at: DateTime<Tz>,
        payload: ReminderPayload,
    ) -> anyhow::Result<()> {
        let delay = (fires_at.with_timezone(&Utc) - Utc::now())
            .to_std()
            .map_err(|_| anyhow::anyhow!("Firing instant {fires_at} is in the past"))?;

        let handle = self.spawn_alarm_task(index, delay, payload);
        if let Some(replaced) = self.tasks.write().await.insert(index, handle) {
            replaced.cancellation_token.cancel();
        }

        Ok(())
    }
}
