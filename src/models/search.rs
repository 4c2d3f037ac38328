// src/models/search.rs
// DOCUMENTATION: Body of POST /places_search

use serde::Deserialize;

/// Optional filter lists; `null`, a missing key and `[]` all mean "no constraint"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub states: Option<Vec<String>>,

    #[serde(default)]
    pub cities: Option<Vec<String>>,

    #[serde(default)]
    pub amenities: Option<Vec<String>>,
}

impl SearchCriteria {
    pub fn state_ids(&self) -> &[String] {
        self.states.as_deref().unwrap_or_default()
    }

    pub fn city_ids(&self) -> &[String] {
        self.cities.as_deref().unwrap_or_default()
    }

    pub fn amenity_ids(&self) -> &[String] {
        self.amenities.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.state_ids().is_empty() && self.city_ids().is_empty() && self.amenity_ids().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_empty_lists_are_no_constraint() {
        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"states": null, "cities": []}"#).unwrap();
        assert!(criteria.is_empty());

        let criteria: SearchCriteria = serde_json::from_str(r#"{"amenities": ["a1"]}"#).unwrap();
        assert!(!criteria.is_empty());
        assert_eq!(criteria.amenity_ids(), ["a1".to_string()]);
    }
}
