use chrono::TimeDelta;
use gumtaper_models::program::ProgramWeek;

/// Length of the taper program. Every week from here on uses the last tier.
pub const PROGRAM_WEEKS: u32 = 6;

const SPACING_BY_WEEK: [u32; PROGRAM_WEEKS as usize] = [90, 120, 150, 180, 210, 240];

pub fn spacing_minutes(week: ProgramWeek) -> u32 {
    let tier = week.get().min(PROGRAM_WEEKS) as usize - 1;
    SPACING_BY_WEEK[tier]
}

pub fn spacing_for_week(week: ProgramWeek) -> TimeDelta {
    TimeDelta::minutes(spacing_minutes(week) as i64)
}
