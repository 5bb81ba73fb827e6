use chrono::{NaiveDateTime, NaiveTime};
use gumtaper_models::{profile::UserProfile, program::ProgramWeek, reminder::ReminderSlot};

use crate::{
    clock::{current_week, days_elapsed},
    error::{ProfileField, ScheduleError},
    fields::{parse_quit_start, sleep_time_or_default, wake_up_time_or_default},
    policy::{PROGRAM_WEEKS, spacing_for_week},
    series::generate,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramProgress {
    pub days_since_start: i64,
    /// Capped at the program length.
    pub week: ProgramWeek,
    pub day_of_week: u32,
    pub program_percent: f64,
    pub daily_savings: f64,
    pub total_savings: f64,
    pub milestones: &'static [&'static str],
}

impl ProgramProgress {
    pub fn compute(profile: &UserProfile, now: NaiveDateTime) -> Result<Self, ScheduleError> {
        let quit_start = profile
            .quit_start
            .as_deref()
            .ok_or(ScheduleError::MissingField(ProfileField::QuitStart))?;
        let quit_start = parse_quit_start(quit_start)?;

        let days_since_start = days_elapsed(quit_start, now);
        let week = current_week(quit_start, now).min(ProgramWeek::new(PROGRAM_WEEKS as i64));
        let daily_savings = profile.cigarettes_per_day as f64 * profile.cigarette_price;

        Ok(Self {
            days_since_start,
            week,
            day_of_week: (days_since_start % 7) as u32 + 1,
            program_percent: week.get() as f64 / PROGRAM_WEEKS as f64 * 100.0,
            daily_savings,
            total_savings: daily_savings * days_since_start as f64,
            milestones: health_milestones(days_since_start),
        })
    }

    /// Today's reminder times for display. Unreadable wake/sleep times fall
    /// back to the defaults instead of failing.
    pub fn todays_reminders(&self, profile: &UserProfile) -> Vec<NaiveTime> {
        let wake_up_time = wake_up_time_or_default(profile);
        let sleep_time = sleep_time_or_default(profile);

        match generate(wake_up_time, sleep_time, spacing_for_week(self.week)) {
            Ok(slots) => slots
                .into_iter()
                .map(|ReminderSlot { fire_at, .. }| fire_at.into_time())
                .collect(),
            Err(error) => {
                log::warn!("Could not list today's reminders: {error}");
                Vec::new()
            }
        }
    }
}

pub fn health_milestones(days_since_start: i64) -> &'static [&'static str] {
    match days_since_start {
        ..=0 => &["Your journey begins today!"],
        1..3 => &[
            "Blood oxygen levels are returning to normal",
            "Carbon monoxide levels are dropping",
        ],
        3..7 => &[
            "Sense of taste and smell improving",
            "Breathing is becoming easier",
        ],
        7..14 => &["Circulation is improving", "Lung function is increasing"],
        14..30 => &[
            "Heart attack risk has started to drop",
            "Energy levels are increasing",
        ],
        _ => &[
            "Significant health improvements achieved",
            "Keep going strong!",
        ],
    }
}
