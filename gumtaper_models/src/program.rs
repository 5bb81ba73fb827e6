/// 1-indexed week of the taper program. Never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProgramWeek(u32);

impl ProgramWeek {
    pub const FIRST: ProgramWeek = ProgramWeek(1);

    pub fn new(week: i64) -> Self {
        let week = week.clamp(1, u32::MAX as i64);
        Self(week as u32)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProgramWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
