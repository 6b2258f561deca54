//! Output type definitions.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Presence flags for the drinks the classifier knows about.
///
/// Serialized with the field names the result store uses: `coke`, `perrier`,
/// `dietCoke`, `other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrinksResult {
    /// Coca-Cola seen.
    pub coke: bool,
    /// Perrier seen.
    pub perrier: bool,
    /// Diet Coke seen. Nothing sets this yet.
    pub diet_coke: bool,
    /// Something else, or nothing recognizable.
    pub other: bool,
}

impl DrinksResult {
    /// Build a result; `diet_coke` is always false.
    pub const fn new(coke: bool, perrier: bool, other: bool) -> Self {
        Self {
            coke,
            perrier,
            diet_coke: false,
            other,
        }
    }

    /// Whether the flag for `drink` is set.
    pub const fn has(&self, drink: Drink) -> bool {
        match drink {
            Drink::Coke => self.coke,
            Drink::Perrier => self.perrier,
            Drink::DietCoke => self.diet_coke,
            Drink::Other => self.other,
        }
    }
}

impl std::fmt::Display for DrinksResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "has coke = {}", self.coke)?;
        writeln!(f, "has perrier = {}", self.perrier)?;
        writeln!(f, "has diet coke = {}", self.diet_coke)?;
        write!(f, "has other = {}", self.other)
    }
}

/// One of the flags in [`DrinksResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drink {
    /// Coca-Cola.
    Coke,
    /// Perrier.
    Perrier,
    /// Diet Coke.
    DietCoke,
    /// Anything else.
    Other,
}

impl std::fmt::Display for Drink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coke => write!(f, "Coca-Cola"),
            Self::Perrier => write!(f, "Perrier"),
            Self::DietCoke => write!(f, "Diet Coke"),
            Self::Other => write!(f, "other drinks"),
        }
    }
}

impl std::str::FromStr for Drink {
    type Err = Error;

    /// Accepts spoken names ("Coca Cola", "Coca-Cola", "Diet Coke") as well as
    /// the record field names, ignoring case, spaces, hyphens and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "coke" | "cocacola" => Ok(Self::Coke),
            "perrier" => Ok(Self::Perrier),
            "dietcoke" => Ok(Self::DietCoke),
            "other" => Ok(Self::Other),
            _ => Err(Error::UnknownDrink {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_never_sets_diet_coke() {
        let result = DrinksResult::new(true, true, true);
        assert!(!result.diet_coke);
    }

    #[test]
    fn test_serializes_store_field_names() {
        let json = serde_json::to_string(&DrinksResult::new(false, true, false)).unwrap();
        assert_eq!(
            json,
            r#"{"coke":false,"perrier":true,"dietCoke":false,"other":false}"#
        );
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let result: DrinksResult = serde_json::from_str(r#"{"coke":true}"#).unwrap();
        assert_eq!(result, DrinksResult::new(true, false, false));
    }

    #[test]
    fn test_display_lists_every_flag() {
        let text = DrinksResult::new(true, false, false).to_string();
        assert_eq!(
            text,
            "has coke = true\nhas perrier = false\nhas diet coke = false\nhas other = false"
        );
    }

    #[test]
    fn test_drink_from_spoken_names() {
        for name in ["Coca Cola", "Coca-Cola", "Coca-cola", "coke"] {
            assert_eq!(name.parse::<Drink>().unwrap(), Drink::Coke);
        }
        assert_eq!("Diet Coke".parse::<Drink>().unwrap(), Drink::DietCoke);
        assert_eq!("dietCoke".parse::<Drink>().unwrap(), Drink::DietCoke);
        assert_eq!("Perrier".parse::<Drink>().unwrap(), Drink::Perrier);
        assert!(matches!(
            "Sprite".parse::<Drink>(),
            Err(Error::UnknownDrink { .. })
        ));
    }

    #[test]
    fn test_has() {
        let result = DrinksResult::new(false, true, false);
        assert!(result.has(Drink::Perrier));
        assert!(!result.has(Drink::Coke));
        assert!(!result.has(Drink::DietCoke));
    }
}
