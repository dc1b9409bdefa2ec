//! Index configuration.
//!
//! The accepted category set and the default search radius are the only
//! knobs. Both are fixed for the lifetime of a built index; a new value takes
//! effect on the next build.

use crate::error::{ForageError, Result};
use forage_types::category::Category;
use serde::{Deserialize, Serialize};

/// Index configuration.
///
/// # Example
///
/// ```rust
/// use forage::Config;
/// use forage_types::Category;
///
/// let config = Config::default();
/// assert_eq!(config.default_radius_m, 2000.0);
///
/// let json = r#"{
///     "default_radius_m": 500.0,
///     "categories": ["cafe", "ice_cream"]
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert!(config.accepts(Category::Cafe));
/// assert!(!config.accepts(Category::Pub));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Radius used by `find_nearby_default`, in projected meters.
    #[serde(default = "Config::default_radius")]
    pub default_radius_m: f64,

    /// Categories admitted into the catalog. A subset of [`Category::ALL`].
    #[serde(default = "Config::default_categories")]
    pub categories: Vec<Category>,
}

impl Config {
    const fn default_radius() -> f64 {
        2000.0
    }

    fn default_categories() -> Vec<Category> {
        Category::ALL.to_vec()
    }

    pub fn with_default_radius(mut self, radius_m: f64) -> Self {
        self.default_radius_m = radius_m;
        self
    }

    /// Restrict the catalog to the given categories.
    pub fn with_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        let mut categories: Vec<Category> = categories.into_iter().collect();
        categories.sort();
        categories.dedup();
        self.categories = categories;
        self
    }

    /// Whether records of `category` are admitted.
    pub fn accepts(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.default_radius_m.is_finite() {
            return Err(ForageError::Config(
                "Default radius must be finite (not NaN or infinity)".to_string(),
            ));
        }
        if self.default_radius_m <= 0.0 {
            return Err(ForageError::Config(
                "Default radius must be positive".to_string(),
            ));
        }
        if self.categories.is_empty() {
            return Err(ForageError::Config(
                "At least one category must be accepted".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| ForageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(toml_str).map_err(|e| ForageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ForageError::Serialization(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_radius_m: Self::default_radius(),
            categories: Self::default_categories(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_radius_m, 2000.0);
        assert_eq!(config.categories.len(), 9);
        for category in Category::ALL {
            assert!(config.accepts(category));
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_categories_dedups() {
        let config = Config::default().with_categories([
            Category::Pub,
            Category::Bar,
            Category::Pub,
        ]);
        assert_eq!(config.categories, vec![Category::Pub, Category::Bar]);
        assert!(!config.accepts(Category::Cafe));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default()
            .with_default_radius(750.0)
            .with_categories([Category::Cafe, Category::Theatre]);

        let json = config.to_json().unwrap();
        let deserialized = Config::from_json(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = Config::from_json(r#"{"categories": ["hospital"]}"#).unwrap_err();
        assert!(matches!(err, ForageError::Config(_)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.default_radius_m = 0.0;
        assert!(config.validate().is_err());

        config.default_radius_m = -10.0;
        assert!(config.validate().is_err());

        config.default_radius_m = f64::NAN;
        assert!(config.validate().is_err());

        config.default_radius_m = f64::INFINITY;
        assert!(config.validate().is_err());

        config.default_radius_m = 100.0;
        config.categories.clear();
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml() {
        let config = Config::from_toml(
            r#"
            default_radius_m = 1500.0
            categories = ["restaurant", "fast_food"]
            "#,
        )
        .unwrap();
        assert_eq!(config.default_radius_m, 1500.0);
        assert!(config.accepts(Category::FastFood));

        let rendered = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&rendered).unwrap(), config);
    }
}
