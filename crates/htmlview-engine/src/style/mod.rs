//! # Style Sheet
//!
//! A style sheet maps a style class name (`p`, `liWrapper`, `codeFirstRow`, ...)
//! to a bag of host style properties. Visual nodes only carry class names
//! ([`StyleRef`]); hosts resolve them into concrete properties with
//! [`StyleSheet::resolve`].
//!
//! The built-in classes live in `default_styles.toml`, which the build script
//! validates. Caller overrides replace whole classes, they are not deep-merged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of a style class as carried by visual nodes.
pub type StyleRef = String;

/// Property name to value mapping for a single style class.
pub type PropertyBag = BTreeMap<String, StyleValue>;

const DEFAULT_STYLES: &str = include_str!("default_styles.toml");

/// A single host style property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

/// Mapping from style class name to its property bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet {
    classes: BTreeMap<String, PropertyBag>,
}

impl StyleSheet {
    /// The built-in style sheet.
    pub fn base() -> Self {
        Self::from_toml_str(DEFAULT_STYLES).unwrap_or_default()
    }

    /// Parse a style sheet where every top-level table is a style class.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Returns a new sheet with `overrides` applied on top of `self`.
    ///
    /// A class present in `overrides` replaces the class of the same name.
    pub fn merged_with(&self, overrides: &StyleSheet) -> StyleSheet {
        let mut classes = self.classes.clone();
        for (name, bag) in &overrides.classes {
            classes.insert(name.clone(), bag.clone());
        }
        StyleSheet { classes }
    }

    pub fn insert(&mut self, class: impl Into<String>, properties: PropertyBag) {
        self.classes.insert(class.into(), properties);
    }

    pub fn get(&self, class: &str) -> Option<&PropertyBag> {
        self.classes.get(class)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Flattens a list of class references into one property bag.
    ///
    /// Later references win on conflicting properties; unknown classes are ignored.
    pub fn resolve(&self, refs: &[StyleRef]) -> PropertyBag {
        let mut resolved = PropertyBag::new();
        for class in refs {
            if let Some(bag) = self.classes.get(class) {
                resolved.extend(bag.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn base_sheet_contains_wrapper_classes() {
        let sheet = StyleSheet::base();
        for class in ["pWrapper", "liWrapper", "imgWrapper", "codeScrollView", "root"] {
            assert!(sheet.contains(class), "missing {class}");
        }
        assert!(!sheet.contains("text"));
    }

    #[test]
    fn base_sheet_parses_numbers_and_text() {
        let sheet = StyleSheet::base();
        let p = sheet.get("p").unwrap();
        assert_eq!(p.get("fontSize"), Some(&StyleValue::Number(16.0)));
        assert_eq!(
            p.get("color"),
            Some(&StyleValue::Text("rgba(0,0,0,0.8)".to_string()))
        );
    }

    #[test]
    fn overrides_replace_whole_class() {
        let overrides = StyleSheet::from_toml_str(
            r##"
[a]
color = "#000000"

[custom]
underline = true
"##,
        )
        .unwrap();

        let merged = StyleSheet::base().merged_with(&overrides);

        let a = merged.get("a").unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a.get("color"), Some(&StyleValue::from("#000000")));
        assert_eq!(
            merged.get("custom").unwrap().get("underline"),
            Some(&StyleValue::Bool(true))
        );
        // Untouched classes survive
        assert!(merged.contains("pWrapper"));
    }

    #[test]
    fn resolve_applies_later_refs_last() {
        let mut sheet = StyleSheet::default();
        sheet.insert(
            "codeRow",
            PropertyBag::from([
                ("height".to_string(), StyleValue::from(25.0)),
                ("flex".to_string(), StyleValue::from(1.0)),
            ]),
        );
        sheet.insert(
            "codeFirstRow",
            PropertyBag::from([("height".to_string(), StyleValue::from(45.0))]),
        );

        let resolved = sheet.resolve(&[
            "codeRow".to_string(),
            "codeFirstRow".to_string(),
            "missing".to_string(),
        ]);

        assert_eq!(resolved.get("height"), Some(&StyleValue::Number(45.0)));
        assert_eq!(resolved.get("flex"), Some(&StyleValue::Number(1.0)));
        assert_eq!(resolved.len(), 2);
    }
}
