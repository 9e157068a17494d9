use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of reminder lead times offered to users.
///
/// Persisted as minutes in the `reminders.remind_before` column; the enum is
/// the only way to construct a value, so the column never holds anything
/// outside {60, 180, 1440}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemindBefore {
    OneHour,
    ThreeHours,
    OneDay,
}

impl RemindBefore {
    /// All offsets, in the order they are shown as buttons.
    pub const ALL: [RemindBefore; 3] = [
        RemindBefore::OneHour,
        RemindBefore::ThreeHours,
        RemindBefore::OneDay,
    ];

    pub fn minutes(self) -> i64 {
        match self {
            RemindBefore::OneHour => 60,
            RemindBefore::ThreeHours => 180,
            RemindBefore::OneDay => 1440,
        }
    }

    /// Locale key for the button caption ("In 1 hour").
    pub fn button_key(self) -> &'static str {
        match self {
            RemindBefore::OneHour => "reminder_1h",
            RemindBefore::ThreeHours => "reminder_3h",
            RemindBefore::OneDay => "reminder_1d",
        }
    }

    /// Locale key for the inline lead-time phrase ("one hour").
    pub fn label_key(self) -> &'static str {
        match self {
            RemindBefore::OneHour => "reminder_time_1h",
            RemindBefore::ThreeHours => "reminder_time_3h",
            RemindBefore::OneDay => "reminder_time_1d",
        }
    }
}

impl TryFrom<i64> for RemindBefore {
    type Error = i64;

    fn try_from(minutes: i64) -> std::result::Result<Self, i64> {
        match minutes {
            60 => Ok(RemindBefore::OneHour),
            180 => Ok(RemindBefore::ThreeHours),
            1440 => Ok(RemindBefore::OneDay),
            other => Err(other),
        }
    }
}

impl fmt::Display for RemindBefore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

/// User-facing language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Uk,
}

impl Lang {
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Uk => "uk",
        }
    }

    /// Display name in the language itself.
    pub fn name(self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Uk => "Українська",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en" => Ok(Lang::En),
            "uk" => Ok(Lang::Uk),
            other => Err(format!("unknown language code: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remind_before_roundtrips_through_minutes() {
        for rb in RemindBefore::ALL {
            assert_eq!(RemindBefore::try_from(rb.minutes()), Ok(rb));
        }
    }

    #[test]
    fn remind_before_rejects_arbitrary_minutes() {
        assert_eq!(RemindBefore::try_from(90), Err(90));
        assert_eq!(RemindBefore::try_from(0), Err(0));
    }

    #[test]
    fn lang_parses_known_codes() {
        assert_eq!("en".parse::<Lang>(), Ok(Lang::En));
        assert_eq!("uk".parse::<Lang>(), Ok(Lang::Uk));
        assert!("de".parse::<Lang>().is_err());
    }
}
