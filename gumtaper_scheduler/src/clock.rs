use chrono::NaiveDateTime;
use gumtaper_models::program::ProgramWeek;

/// Whole weeks since the quit start, plus one. A start date in the future
/// still reads as the first week.
pub fn current_week(quit_start: NaiveDateTime, now: NaiveDateTime) -> ProgramWeek {
    let elapsed = now - quit_start;
    ProgramWeek::new(elapsed.num_weeks() + 1)
}

/// Whole days since the quit start, never negative.
pub fn days_elapsed(quit_start: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - quit_start).num_days().max(0)
}
