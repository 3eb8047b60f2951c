use serde::{Deserialize, Serialize};

use crate::attr::AttrValue;

/// An immutable feature attribute bag.
///
/// Ordering contract:
/// - Pairs keep their insertion (document) order; the popup surfaces the
///   full set in that order.
///
/// Lookup is linear over the pairs; attribute sets are small.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pairs: Vec<(String, AttrValue)>,
}

impl Feature {
    pub fn new(pairs: Vec<(String, AttrValue)>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, AttrValue)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// String attribute with an explicit default for absent or non-string
    /// values, so callers never fail on a missing key.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(AttrValue::as_str).unwrap_or(default)
    }

    /// Numeric attribute; absent or non-numeric values yield `None`, so
    /// every threshold comparison against a missing key fails.
    pub fn num(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(AttrValue::as_num)
    }

    /// The `layer` attribute, or the empty string when untagged.
    pub fn layer_name(&self) -> &str {
        self.str_or("layer", "")
    }
}

#[cfg(test)]
mod tests {
    use super::Feature;
    use crate::attr::AttrValue;

    fn f(pairs: &[(&str, AttrValue)]) -> Feature {
        Feature::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn lookup_and_defaults() {
        let feat = f(&[
            ("layer", AttrValue::from("roads")),
            ("pmap:min_zoom", AttrValue::from(5.0)),
        ]);
        assert_eq!(feat.layer_name(), "roads");
        assert_eq!(feat.num("pmap:min_zoom"), Some(5.0));
        assert_eq!(feat.num("pmap:min_admin_level"), None);
        assert_eq!(feat.str_or("name:en", ""), "");
    }

    #[test]
    fn preserves_insertion_order() {
        let feat = f(&[
            ("zebra", AttrValue::from("z")),
            ("alpha", AttrValue::from("a")),
        ]);
        let keys: Vec<&str> = feat.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zebra", "alpha"]);
    }

    #[test]
    fn non_string_values_do_not_satisfy_str_accessor() {
        let feat = f(&[("pmap:kind", AttrValue::from(3.0))]);
        assert_eq!(feat.str_or("pmap:kind", "fallback"), "fallback");
    }
}
