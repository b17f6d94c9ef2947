use chrono::{Days, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakUpdate {
    pub streak: u32,
    pub last_login: NaiveDate,
    /// Set only when the login continued yesterday's streak.
    pub increased: bool,
    /// False when today was already recorded and nothing needs saving.
    pub changed: bool,
}

/// Applies one login on `today` to a profile's streak.
///
/// A login on a day already recorded (or on a day before the recorded one)
/// leaves everything as is. A login the day after the recorded one extends
/// the streak, anything else starts over at 1.
pub fn evaluate_streak(
    current_streak: u32,
    last_login: Option<NaiveDate>,
    today: NaiveDate,
) -> StreakUpdate {
    match last_login {
        Some(last) if last >= today => StreakUpdate {
            streak: current_streak,
            last_login: last,
            increased: false,
            changed: false,
        },
        Some(last) if today.checked_sub_days(Days::new(1)) == Some(last) => StreakUpdate {
            streak: current_streak.saturating_add(1),
            last_login: today,
            increased: true,
            changed: true,
        },
        _ => StreakUpdate {
            streak: 1,
            last_login: today,
            increased: false,
            changed: true,
        },
    }
}
