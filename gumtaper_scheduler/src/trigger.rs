use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use gumtaper_models::profile::UserProfile;
use gumtaper_storage::ProfileStore;
use tokio::sync::Mutex;

use crate::scheduler::{ReminderScheduler, RescheduleReport};

/// Events that ask for the reminder series to be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescheduleTrigger {
    AppStart,
    BootCompleted,
    ProfileSaved,
    DayRollover,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Rescheduled(RescheduleReport),
    NoActiveProfile,
}

pub struct ReminderService<S: ProfileStore> {
    store: Arc<S>,
    scheduler: ReminderScheduler,
    timezone: Tz,
    in_flight: Mutex<()>,
}

impl<S: ProfileStore> ReminderService<S> {
    pub fn new(store: Arc<S>, scheduler: ReminderScheduler, timezone: Tz) -> Self {
        Self {
            store,
            scheduler,
            timezone,
            in_flight: Mutex::new(()),
        }
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }

    pub async fn handle_trigger(&self, trigger: RescheduleTrigger) -> anyhow::Result<TriggerOutcome> {
        let _guard = self.in_flight.lock().await;
        self.reschedule_from_store(trigger, self.now()).await
    }

    pub async fn handle_trigger_at(
        &self,
        trigger: RescheduleTrigger,
        now: DateTime<Tz>,
    ) -> anyhow::Result<TriggerOutcome> {
        let _guard = self.in_flight.lock().await;
        self.reschedule_from_store(trigger, now).await
    }

    /// Persists an edited profile and rebuilds the series from it.
    pub async fn save_profile(&self, profile: &UserProfile) -> anyhow::Result<TriggerOutcome> {
        let _guard = self.in_flight.lock().await;
        self.store.write(profile).await?;
        self.reschedule_from_store(RescheduleTrigger::ProfileSaved, self.now())
            .await
    }

    /// Callers hold `in_flight` so the profile read here is still the stored
    /// one when its alarms are installed.
    async fn reschedule_from_store(
        &self,
        trigger: RescheduleTrigger,
        now: DateTime<Tz>,
    ) -> anyhow::Result<TriggerOutcome> {
        log::info!("Handling reschedule trigger [trigger = {trigger:?}, now = {now}]");

        let profile = match self.store.read().await? {
            Some(profile) if profile.is_active() => profile,
            _ => {
                log::info!("No active profile, skipping [trigger = {trigger:?}]");
                return Ok(TriggerOutcome::NoActiveProfile);
            }
        };

        let report = self.scheduler.reschedule(&profile, now).await?;
        Ok(TriggerOutcome::Rescheduled(report))
    }

    pub async fn load_profile(&self) -> anyhow::Result<Option<UserProfile>> {
        Ok(self.store.read().await?)
    }
}
