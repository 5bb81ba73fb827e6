use chrono::{NaiveTime, TimeDelta};
use proptest::prelude::*;

use crate::*;

fn time_strategy() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

proptest! {
    #[test]
    fn same_day_series_stays_inside_window(
        wake in time_strategy(),
        sleep in time_strategy(),
        spacing in 1i64..=480,
    ) {
        prop_assume!(wake < sleep);
        let spacing = TimeDelta::minutes(spacing);

        let slots = generate(wake, sleep, spacing).unwrap();
        let window = sleep - wake;

        prop_assert_eq!(slots.len() as i64, window.num_minutes() / spacing.num_minutes() + 1);
        prop_assert_eq!(*slots[0].fire_at.time(), wake);
        for slot in &slots {
            prop_assert!(*slot.fire_at.time() >= wake);
            prop_assert!(*slot.fire_at.time() <= sleep);
        }
        for pair in slots.windows(2) {
            prop_assert_eq!(*pair[1].fire_at.time() - *pair[0].fire_at.time(), spacing);
            prop_assert_eq!(pair[1].index, pair[0].index + 1);
        }
    }

    #[test]
    fn any_series_is_bounded_and_starts_at_wake(
        wake in time_strategy(),
        sleep in time_strategy(),
        spacing in 2i64..=480,
    ) {
        let slots = generate(wake, sleep, TimeDelta::minutes(spacing)).unwrap();

        prop_assert!(!slots.is_empty());
        prop_assert!(slots.len() <= MAX_SLOTS_PER_DAY);
        prop_assert_eq!(*slots[0].fire_at.time(), wake);

        let last_offset = TimeDelta::minutes(spacing) * (slots.len() as i32 - 1);
        prop_assert!(last_offset <= waking_window(wake, sleep));
        prop_assert!(last_offset + TimeDelta::minutes(spacing) > waking_window(wake, sleep));
    }

    #[test]
    fn non_positive_spacing_never_loops(
        wake in time_strategy(),
        sleep in time_strategy(),
        spacing in -480i64..=0,
    ) {
        prop_assert_eq!(
            generate(wake, sleep, TimeDelta::minutes(spacing)),
            Err(ScheduleError::NonPositiveSpacing(TimeDelta::minutes(spacing)))
        );
    }
}
