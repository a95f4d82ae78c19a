use serde::{Deserialize, Serialize};

/// The fixed set of spending classifications a transaction can be filed under.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Transportation,
    Dining,
    Entertainment,
    Healthcare,
    Shopping,
    Utilities,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::Groceries,
        Category::Transportation,
        Category::Dining,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Utilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => GROCERIES_STR,
            Category::Transportation => TRANSPORTATION_STR,
            Category::Dining => DINING_STR,
            Category::Entertainment => ENTERTAINMENT_STR,
            Category::Healthcare => HEALTHCARE_STR,
            Category::Shopping => SHOPPING_STR,
            Category::Utilities => UTILITIES_STR,
        }
    }

    /// Looks up a category by its exact name.
    pub fn from_name(name: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Looks up a category ignoring ASCII case, for typed user input such as `dining`.
    pub fn from_name_ignore_case(name: impl AsRef<str>) -> Option<Category> {
        let name = name.as_ref().trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

const GROCERIES_STR: &str = "Groceries";
const TRANSPORTATION_STR: &str = "Transportation";
const DINING_STR: &str = "Dining";
const ENTERTAINMENT_STR: &str = "Entertainment";
const HEALTHCARE_STR: &str = "Healthcare";
const SHOPPING_STR: &str = "Shopping";
const UTILITIES_STR: &str = "Utilities";

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_matches_as_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert_eq!(Category::from_str("Dining").unwrap(), Category::Dining);
        assert!(Category::from_str("dining").is_err());
        assert_eq!(Category::from_name("Dining"), Some(Category::Dining));
        assert_eq!(Category::from_name("dining"), None);
    }

    #[test]
    fn test_from_name_ignore_case() {
        assert_eq!(
            Category::from_name_ignore_case(" healthCARE "),
            Some(Category::Healthcare)
        );
        assert_eq!(Category::from_name_ignore_case("Rent"), None);
    }
}
