use std::sync::Arc;

use chrono::{DateTime, NaiveTime, TimeDelta};
use chrono_tz::Tz;
use gumtaper_models::{
    profile::UserProfile,
    program::ProgramWeek,
    reminder::{ReminderPayload, ReminderSlot, SlotIndex},
    settings::{DEFAULT_REMINDER_MESSAGE, SchedulerSettings},
};
use tokio::sync::Mutex;

use crate::{
    alarm::{AlarmFacility, next_fire_at},
    clock::current_week,
    error::{ProfileField, RegistrationFailure, ScheduleError},
    fields::{parse_quit_start, parse_time_of_day},
    policy::{spacing_for_week, spacing_minutes},
    series::{MAX_SLOTS_PER_DAY, generate, waking_window},
};

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Shortest accepted waking window. `None` turns the check off.
    pub min_waking_window: Option<TimeDelta>,
    pub message: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_waking_window: None,
            message: DEFAULT_REMINDER_MESSAGE.to_owned(),
        }
    }
}

impl From<&SchedulerSettings> for SchedulerConfig {
    fn from(settings: &SchedulerSettings) -> Self {
        Self {
            min_waking_window: settings
                .min_waking_window_minutes
                .map(|minutes| TimeDelta::minutes(minutes as i64)),
            message: settings.message.clone(),
        }
    }
}

/// Today's reminder series, computed but not yet installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPlan {
    pub week: ProgramWeek,
    pub spacing_minutes: u32,
    pub slots: Vec<ReminderSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredReminder {
    pub index: SlotIndex,
    pub fires_at: DateTime<Tz>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleReport {
    pub week: ProgramWeek,
    pub spacing_minutes: u32,
    pub registered: Vec<RegisteredReminder>,
    pub failures: Vec<RegistrationFailure>,
}

impl RescheduleReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct ReminderScheduler {
    alarms: Arc<dyn AlarmFacility>,
    config: SchedulerConfig,
    in_flight: Mutex<()>,
}

impl ReminderScheduler {
    pub fn new(alarms: Arc<dyn AlarmFacility>, config: SchedulerConfig) -> Self {
        Self {
            alarms,
            config,
            in_flight: Mutex::new(()),
        }
    }

    /// Validates the profile and computes today's series without touching the
    /// alarm facility.
    pub fn plan(
        &self,
        profile: &UserProfile,
        now: &DateTime<Tz>,
    ) -> Result<ReminderPlan, ScheduleError> {
        let wake_up_time = parse_time_of_day(ProfileField::WakeUpTime, &profile.wake_up_time)?;
        let sleep_time = parse_time_of_day(ProfileField::SleepTime, &profile.sleep_time)?;
        self.check_waking_window(wake_up_time, sleep_time)?;

        let quit_start = profile
            .quit_start
            .as_deref()
            .ok_or(ScheduleError::MissingField(ProfileField::QuitStart))?;
        let quit_start = parse_quit_start(quit_start)?;

        let week = current_week(quit_start, now.naive_local());
        let slots = generate(wake_up_time, sleep_time, spacing_for_week(week))?;

        Ok(ReminderPlan {
            week,
            spacing_minutes: spacing_minutes(week),
            slots,
        })
    }

    /// Replaces every installed reminder with today's series. Validation
    /// failures leave the installed reminders untouched; single registration
    /// failures are collected in the report.
    pub async fn reschedule(
        &self,
        profile: &UserProfile,
        now: DateTime<Tz>,
    ) -> Result<RescheduleReport, ScheduleError> {
        // A late cancel from an older call must not wipe a newer call's alarms.
        let _guard = self.in_flight.lock().await;

        let plan = self.plan(profile, &now)?;
        log::info!(
            "Rescheduling reminders [week = {}, spacing_minutes = {}, slots = {}]",
            plan.week,
            plan.spacing_minutes,
            plan.slots.len()
        );

        self.cancel_all().await;
        let report = self.install(plan, &now).await;

        if report.is_complete() {
            log::info!("Installed {} reminders", report.registered.len());
        } else {
            log::warn!(
                "Installed {} reminders, {} failed [failed_slots = {:?}]",
                report.registered.len(),
                report.failures.len(),
                report
                    .failures
                    .iter()
                    .map(|failure| failure.index)
                    .collect::<Vec<_>>()
            );
        }

        Ok(report)
    }

    fn check_waking_window(
        &self,
        wake_up_time: NaiveTime,
        sleep_time: NaiveTime,
    ) -> Result<(), ScheduleError> {
        let Some(minimum) = self.config.min_waking_window else {
            return Ok(());
        };

        let window = waking_window(wake_up_time, sleep_time);
        if window < minimum {
            return Err(ScheduleError::WindowTooShort {
                window_minutes: window.num_minutes(),
                minimum_minutes: minimum.num_minutes(),
            });
        }

        Ok(())
    }

    async fn cancel_all(&self) {
        for index in 0..MAX_SLOTS_PER_DAY as SlotIndex {
            self.alarms.cancel(index).await;
        }
        log::debug!("Cancelled reminder slots [0, {MAX_SLOTS_PER_DAY})");
    }

    async fn install(&self, plan: ReminderPlan, now: &DateTime<Tz>) -> RescheduleReport {
        let mut registered = Vec::with_capacity(plan.slots.len());
        let mut failures = Vec::new();

        for slot in plan.slots {
            let Some(fires_at) = next_fire_at(&slot.fire_at, now) else {
                failures.push(RegistrationFailure {
                    index: slot.index,
                    reason: format!("{} has no valid local instant", slot.fire_at),
                });
                continue;
            };

            let payload = ReminderPayload::new(self.config.message.clone());
            match self.alarms.register(slot.index, fires_at, payload).await {
                Ok(()) => {
                    log::debug!(
                        "Registered reminder [slot = {}, fires_at = {}]",
                        slot.index,
                        fires_at
                    );
                    registered.push(RegisteredReminder {
                        index: slot.index,
                        fires_at,
                    });
                }
                Err(error) => {
                    log::warn!(
                        "Alarm facility rejected reminder [slot = {}, error = {}]",
                        slot.index,
                        error
                    );
                    failures.push(RegistrationFailure {
                        index: slot.index,
                        reason: error.to_string(),
                    });
                }
            }
        }

        RescheduleReport {
            week: plan.week,
            spacing_minutes: plan.spacing_minutes,
            registered,
            failures,
        }
    }
}
