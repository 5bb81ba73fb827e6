use serde::Deserialize;

/// Projection of the user's onboarding answers. Time fields are kept exactly as
/// they were written (`HH:MM`) and are only parsed by the scheduling code.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct UserProfile {
    pub wake_up_time: String,
    pub sleep_time: String,
    /// Local date-time the program started, absent until onboarding completes.
    pub quit_start: Option<String>,
    pub cigarettes_per_day: u32,
    pub cigarette_price: f64,
    pub years_of_smoking: u32,
    pub age: u32,
    pub gender: String,
}

impl UserProfile {
    /// Wake/sleep and the start date are the fields scheduling cannot run without.
    pub fn is_active(&self) -> bool {
        !self.wake_up_time.is_empty()
            && !self.sleep_time.is_empty()
            && self.quit_start.as_deref().is_some_and(|s| !s.is_empty())
    }
}
