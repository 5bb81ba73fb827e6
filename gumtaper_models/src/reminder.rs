use chrono::{NaiveTime, Timelike};

/// Slot position within a day's series. Doubles as the identifier under which
/// the alarm facility keeps the registration.
pub type SlotIndex = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderFireTime(NaiveTime);

impl ReminderFireTime {
    pub fn new(inner: NaiveTime) -> Self {
        let normalized_time = inner.with_nanosecond(0).expect("Will never fail.");
        Self(normalized_time)
    }

    pub fn time(&self) -> &NaiveTime {
        &self.0
    }

    pub fn into_time(self) -> NaiveTime {
        self.0
    }
}

impl std::fmt::Display for ReminderFireTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSlot {
    pub index: SlotIndex,
    pub fire_at: ReminderFireTime,
}

impl ReminderSlot {
    pub fn new(index: SlotIndex, fire_at: ReminderFireTime) -> Self {
        Self { index, fire_at }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPayload {
    pub message: String,
}

impl ReminderPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
