//! Display labels for results and bet kinds

use ledger_core::{BetKind, BetResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// German
    #[default]
    De,
    /// English
    En,
}

impl Locale {
    /// Language tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::De => "de",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" => Ok(Locale::De),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale {other:?}")),
        }
    }
}

// Indexed by result code.
const RESULT_LABELS_DE: [&str; 6] = [
    "Verloren",
    "Gewonnen",
    "Verloren (Einsatz zurück)",
    "Gewonnen (Einsatz zurück)",
    "Push",
    "Offen",
];

const RESULT_LABELS_EN: [&str; 6] = [
    "Lost",
    "Won",
    "Lost (stake returned)",
    "Won (stake returned)",
    "Push",
    "Open",
];

/// Label for a result code
pub fn result_label(result: BetResult, locale: Locale) -> &'static str {
    let table = match locale {
        Locale::De => &RESULT_LABELS_DE,
        Locale::En => &RESULT_LABELS_EN,
    };

    usize::try_from(result.code())
        .ok()
        .and_then(|idx| table.get(idx))
        .copied()
        .unwrap_or("?")
}

/// Label for a bet kind; the same in every locale
pub fn kind_label(kind: BetKind) -> &'static str {
    kind.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_labels() {
        assert_eq!(result_label(BetResult::Lost, Locale::De), "Verloren");
        assert_eq!(result_label(BetResult::VoidWin, Locale::En), "Won (stake returned)");
        assert_eq!(result_label(BetResult::Open, Locale::De), "Offen");
        assert_eq!(result_label(BetResult::Unrecognized(6), Locale::En), "?");
        assert_eq!(result_label(BetResult::Unrecognized(-1), Locale::De), "?");
    }

    #[test]
    fn test_every_known_code_has_a_label() {
        for code in 0..=5 {
            for locale in [Locale::De, Locale::En] {
                assert_ne!(result_label(BetResult::from(code), locale), "?");
            }
        }
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" de ".parse::<Locale>().unwrap(), Locale::De);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(kind_label(BetKind::Single), "Single");
        assert_eq!(kind_label(BetKind::Multi), "Multi");
    }
}
