use chrono::{DateTime, NaiveDateTime, NaiveTime};
use gumtaper_models::profile::UserProfile;

use crate::error::{ProfileField, ScheduleError};

const TIME_FORMAT: &str = "%H:%M";

pub const DEFAULT_WAKE_UP_TIME: NaiveTime = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
pub const DEFAULT_SLEEP_TIME: NaiveTime = NaiveTime::from_hms_opt(22, 0, 0).unwrap();

pub fn parse_time_of_day(field: ProfileField, value: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| {
        ScheduleError::InvalidTimeFormat {
            field,
            value: value.to_owned(),
        }
    })
}

/// Accepts the local date-time the onboarding flow writes, with or without
/// seconds, as well as RFC 3339 (whose offset is dropped in favour of the
/// wall-clock reading).
pub fn parse_quit_start(value: &str) -> Result<NaiveDateTime, ScheduleError> {
    let value = value.trim();
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|date_time| date_time.naive_local())
        })
        .ok_or_else(|| ScheduleError::InvalidStartTimestamp(value.to_owned()))
}

pub fn wake_up_time_or_default(profile: &UserProfile) -> NaiveTime {
    time_or_default(
        ProfileField::WakeUpTime,
        &profile.wake_up_time,
        DEFAULT_WAKE_UP_TIME,
    )
}

pub fn sleep_time_or_default(profile: &UserProfile) -> NaiveTime {
    time_or_default(
        ProfileField::SleepTime,
        &profile.sleep_time,
        DEFAULT_SLEEP_TIME,
    )
}

fn time_or_default(field: ProfileField, value: &str, default: NaiveTime) -> NaiveTime {
    parse_time_of_day(field, value).unwrap_or_else(|error| {
        log::warn!("{error}. Falling back to {}", default.format(TIME_FORMAT));
        default
    })
}
