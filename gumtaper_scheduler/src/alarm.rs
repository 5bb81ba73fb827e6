use async_trait::async_trait;
use chrono::{DateTime, LocalResult, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use gumtaper_models::reminder::{ReminderFireTime, ReminderPayload, SlotIndex};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Wall-clock triggered callbacks keyed by slot index. Cancelling an unknown
/// index is a no-op; registering a known index replaces it.
#[async_trait]
pub trait AlarmFacility: Send + Sync + 'static {
    async fn cancel(&self, index: SlotIndex);

    async fn register(
        &self,
        index: SlotIndex,
        fires_at: DateTime<Tz>,
        payload: ReminderPayload,
    ) -> anyhow::Result<()>;
}

/// The next instant strictly after `now` whose wall-clock reading is `fire_at`.
/// A reading that falls into a DST gap moves to the first instant after the
/// gap; an ambiguous one resolves to the earliest mapping still ahead of `now`.
pub fn next_fire_at(fire_at: &ReminderFireTime, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let local_now = now.naive_local();
    let delta = *fire_at.time() - local_now.time();

    let today = local_now.date();
    let target_date = if delta <= TimeDelta::zero() {
        today.checked_add_signed(TimeDelta::days(1))?
    } else {
        today
    };

    localize(&now.timezone(), target_date.and_time(*fire_at.time()), now)
}

/// Time left until the next local midnight.
pub fn duration_until_next_midnight(now: &DateTime<Tz>) -> Option<std::time::Duration> {
    let midnight = next_fire_at(&ReminderFireTime::new(NaiveTime::MIN), now)?;
    (midnight - *now).to_std().ok()
}

fn localize(tz: &Tz, local: NaiveDateTime, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earliest, latest) => {
            if earliest > *now {
                Some(earliest)
            } else {
                Some(latest)
            }
        }
        // Gaps end on a whole minute and never span a day.
        LocalResult::None => (1..=MINUTES_PER_DAY)
            .map(|minutes| local + TimeDelta::minutes(minutes))
            .find_map(|candidate| tz.from_local_datetime(&candidate).earliest()),
    }
}
