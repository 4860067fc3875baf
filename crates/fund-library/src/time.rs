// helper constants for time represented in seconds
pub const SECOND: u64 = 1;
pub const MINUTES: u64 = 60;
pub const HOURS: u64 = 60 * MINUTES;
pub const DAYS: u64 = 24 * HOURS;
pub const YEAR: u64 = 365 * DAYS;
