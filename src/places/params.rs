// Request parameter map and per-operation parameter rules
// Author: kelexine (https://github.com/kelexine)

use crate::error::{PlacesError, Result};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt::Display;

/// Query parameters for one request.
///
/// Keys are kept sorted, which makes the serialized form independent of
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K: Into<String>, V: Display, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Keys of which Nearby Search needs at least one when ranking by distance.
const RANK_BY_DISTANCE_KEYS: [&str; 3] = ["keyword", "name", "type"];

/// Merge the Nearby Search arguments into `params`.
///
/// `location` and `radius` always override caller values. With
/// `rankby=distance` the radius is dropped and one of `keyword`, `name` or
/// `type` becomes mandatory; otherwise a non-zero radius is mandatory.
pub fn nearby_search_params(
    location: impl Display,
    radius: Option<u32>,
    mut params: Params,
) -> Result<Params> {
    params.insert("location", location);
    match radius {
        Some(radius) => params.insert("radius", radius),
        None => params.remove("radius"),
    };

    if params.get("rankby") == Some("distance") {
        params.remove("radius");

        if !RANK_BY_DISTANCE_KEYS.iter().any(|key| params.contains_key(key)) {
            return Err(PlacesError::InvalidParams(
                "Nearby Search requires one or more of 'keyword', 'name', or 'type' params since 'rankby' = 'distance'"
                    .to_string(),
            ));
        }
    } else if radius.unwrap_or(0) == 0 {
        return Err(PlacesError::InvalidParams(
            "radius is required unless rankby=distance".to_string(),
        ));
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOC: &str = "-33.8670522,151.1957362";

    #[test]
    fn test_radius_required() {
        let err = nearby_search_params(LOC, None, Params::new()).unwrap_err();
        assert!(matches!(err, PlacesError::InvalidParams(ref msg) if msg.contains("radius is required")));
    }

    #[test]
    fn test_zero_radius_counts_as_missing() {
        assert!(nearby_search_params(LOC, Some(0), Params::new()).is_err());
    }

    #[test]
    fn test_rankby_distance_requires_keyword() {
        let params = Params::from([("rankby", "distance")]);
        let err = nearby_search_params(LOC, None, params).unwrap_err();
        assert!(matches!(err, PlacesError::InvalidParams(ref msg) if msg.contains("'keyword', 'name', or 'type'")));
    }

    #[test]
    fn test_rankby_distance_drops_radius() {
        let params = Params::from([("rankby", "distance"), ("keyword", "cafe")]);
        let params = nearby_search_params(LOC, None, params).unwrap();
        assert!(!params.contains_key("radius"));
        assert_eq!(params.get("location"), Some(LOC));

        // even an explicit radius argument is dropped
        let params = Params::from([("rankby", "distance"), ("type", "bar")]);
        let params = nearby_search_params(LOC, Some(500), params).unwrap();
        assert!(!params.contains_key("radius"));
    }

    #[test]
    fn test_location_and_radius_set() {
        let params = nearby_search_params(LOC, Some(500), Params::new()).unwrap();
        assert_eq!(params.get("location"), Some(LOC));
        assert_eq!(params.get("radius"), Some("500"));
    }

    #[test]
    fn test_arguments_override_extra_params() {
        let params = Params::from([("location", "0,0"), ("radius", "10"), ("keyword", "museum")]);
        let params = nearby_search_params(LOC, Some(1500), params).unwrap();
        assert_eq!(params.get("location"), Some(LOC));
        assert_eq!(params.get("radius"), Some("1500"));
        assert_eq!(params.get("keyword"), Some("museum"));
    }

    #[test]
    fn test_extra_radius_ignored_without_argument() {
        let params = Params::from([("radius", "10")]);
        assert!(nearby_search_params(LOC, None, params).is_err());
    }

    #[test]
    fn test_params_serialize_sorted() {
        let params = Params::new().with("b", 2).with("a", 1);
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"a":"1","b":"2"}"#);
    }
}
