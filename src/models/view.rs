use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The last screen the user was on, persisted so the app reopens there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    History,
    Settings,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Home => write!(f, "home"),
            View::History => write!(f, "history"),
            View::Settings => write!(f, "settings"),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(View::Home),
            "history" => Ok(View::History),
            "settings" => Ok(View::Settings),
            _ => Err(format!(
                "Invalid view '{}'. Valid options: home, history, settings",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_display() {
        assert_eq!(format!("{}", View::Home), "home");
        assert_eq!(format!("{}", View::History), "history");
        assert_eq!(format!("{}", View::Settings), "settings");
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!(View::from_str("home").unwrap(), View::Home);
        assert_eq!(View::from_str("HISTORY").unwrap(), View::History);
        assert_eq!(View::from_str(" settings ").unwrap(), View::Settings);
    }

    #[test]
    fn test_view_from_str_invalid() {
        assert!(View::from_str("profile").is_err());
        assert!(View::from_str("").is_err());
    }

    #[test]
    fn test_default_is_home() {
        assert_eq!(View::default(), View::Home);
    }
}
