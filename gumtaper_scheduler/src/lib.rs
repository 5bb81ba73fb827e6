mod alarm;
mod clock;
mod error;
mod fields;
mod policy;
mod progress;
mod scheduler;
mod series;
mod tokio_alarm;
mod trigger;

pub use alarm::{AlarmFacility, duration_until_next_midnight, next_fire_at};
pub use clock::{current_week, days_elapsed};
pub use error::{ProfileField, RegistrationFailure, ScheduleError};
pub use fields::{
    DEFAULT_SLEEP_TIME, DEFAULT_WAKE_UP_TIME, parse_quit_start, parse_time_of_day,
    sleep_time_or_default, wake_up_time_or_default,
};
pub use policy::{PROGRAM_WEEKS, spacing_for_week, spacing_minutes};
pub use progress::{ProgramProgress, health_milestones};
pub use scheduler::{
    RegisteredReminder, ReminderPlan, ReminderScheduler, RescheduleReport, SchedulerConfig,
};
pub use series::{MAX_SLOTS_PER_DAY, generate, waking_window};
pub use tokio_alarm::{ReminderDeliveryChannel, ReminderMessageType, TokioAlarmFacility};
pub use trigger::{ReminderService, RescheduleTrigger, TriggerOutcome};

#[cfg(test)]
mod tests;
