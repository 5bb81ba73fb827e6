use serde::Deserialize;

use crate::profile::UserProfile;

pub const DEFAULT_REMINDER_MESSAGE: &str = "Time for Nicotine Gum";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct DeviceSettings {
    pub timezone: chrono_tz::Tz,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct SchedulerSettings {
    pub min_waking_window_minutes: Option<u32>,
    pub message: String,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            min_waking_window_minutes: None,
            message: DEFAULT_REMINDER_MESSAGE.to_owned(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub device: DeviceSettings,
    pub scheduler: SchedulerSettings,
    pub profile: Option<UserProfile>,
}
