use chrono::{NaiveTime, TimeDelta};
use gumtaper_models::reminder::{ReminderFireTime, ReminderSlot, SlotIndex};

use crate::error::ScheduleError;

/// Upper bound on reminders in one day. Also the cancellation range used
/// before every reschedule.
pub const MAX_SLOTS_PER_DAY: usize = 1000;

/// Time from waking up until the sleep boundary. A sleep time at or before the
/// wake time belongs to the next calendar day; equal times give an empty window.
pub fn waking_window(wake_up_time: NaiveTime, sleep_time: NaiveTime) -> TimeDelta {
    let delta = sleep_time - wake_up_time;
    if delta < TimeDelta::zero() {
        delta + TimeDelta::days(1)
    } else {
        delta
    }
}

/// Reminder times for one day: wake time, then every `spacing` until the sleep
/// boundary. Always yields at least the wake time itself.
pub fn generate(
    wake_up_time: NaiveTime,
    sleep_time: NaiveTime,
    spacing: TimeDelta,
) -> Result<Vec<ReminderSlot>, ScheduleError> {
    if spacing <= TimeDelta::zero() {
        return Err(ScheduleError::NonPositiveSpacing(spacing));
    }

    let window = waking_window(wake_up_time, sleep_time);
    let mut slots = Vec::new();
    let mut offset = TimeDelta::zero();

    while offset <= window {
        if slots.len() == MAX_SLOTS_PER_DAY {
            return Err(ScheduleError::ExcessiveSlotCount {
                limit: MAX_SLOTS_PER_DAY,
            });
        }

        let (time, _) = wake_up_time.overflowing_add_signed(offset);
        let index = slots.len() as SlotIndex;
        slots.push(ReminderSlot::new(index, ReminderFireTime::new(time)));
        offset += spacing;
    }

    Ok(slots)
}
