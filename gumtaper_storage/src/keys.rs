pub const WAKE_UP_TIME_KEY: &str = "wakeUpTime";
pub const SLEEP_TIME_KEY: &str = "sleepTime";
pub const QUIT_START_KEY: &str = "startDate";
pub const CIGARETTES_PER_DAY_KEY: &str = "cigarettesPerDay";
pub const CIGARETTE_PRICE_KEY: &str = "cigarettePrice";
pub const YEARS_OF_SMOKING_KEY: &str = "yearsOfSmoking";
pub const AGE_KEY: &str = "age";
pub const GENDER_KEY: &str = "gender";
