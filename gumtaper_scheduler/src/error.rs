use chrono::TimeDelta;
use gumtaper_models::reminder::SlotIndex;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    WakeUpTime,
    SleepTime,
    QuitStart,
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProfileField::WakeUpTime => "wake-up time",
            ProfileField::SleepTime => "sleep time",
            ProfileField::QuitStart => "quit start date",
        };
        f.write_str(name)
    }
}

/// Failures that abort a reschedule before anything is cancelled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Profile has no {0}")]
    MissingField(ProfileField),

    #[error("Invalid {field} format: {value:?}, expected HH:MM")]
    InvalidTimeFormat { field: ProfileField, value: String },

    #[error("Invalid quit start date: {0:?}")]
    InvalidStartTimestamp(String),

    #[error("Waking window of {window_minutes} minutes is shorter than the required {minimum_minutes}")]
    WindowTooShort {
        window_minutes: i64,
        minimum_minutes: i64,
    },

    #[error("Reminder spacing must be positive, got {} seconds", .0.num_seconds())]
    NonPositiveSpacing(TimeDelta),

    #[error("Exceeded maximum allowed reminders per day ({limit})")]
    ExcessiveSlotCount { limit: usize },
}

/// A single slot the alarm facility refused. Does not stop the rest of the batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Could not register reminder slot {index}: {reason}")]
pub struct RegistrationFailure {
    pub index: SlotIndex,
    pub reason: String,
}
