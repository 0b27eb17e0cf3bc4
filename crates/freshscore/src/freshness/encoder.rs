use super::domain::{ItemReading, PerishableCategory};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Number of numeric reading fields that lead the vector.
pub const NUMERIC_FEATURES: usize = 5;

pub const FEATURE_COUNT: usize = NUMERIC_FEATURES + PerishableCategory::COUNT;

/// Column names in the exact order the estimator is trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "temperature",
    "humidity",
    "duration_hours",
    "distance_km",
    "door_openings",
    "category_berries",
    "category_cheese",
    "category_eggs",
    "category_flowers",
    "category_frozen_food",
    "category_herbs",
    "category_ice_cream",
    "category_juice",
    "category_leafy_greens",
    "category_meat",
    "category_milk",
    "category_seafood",
    "category_strawberries",
    "category_vaccines",
    "category_yogurt",
];

/// Ordered numeric encoding of an [`ItemReading`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: &'static [&'static str],
    values: Vec<f64>,
}

impl FeatureVector {
    /// Pairs column names with values; `None` when the lengths differ.
    #[cfg(test)]
    pub(crate) fn from_parts(names: &'static [&'static str], values: Vec<f64>) -> Option<Self> {
        (names.len() == values.len()).then_some(Self { names, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|candidate| *candidate == name)
            .and_then(|index| self.values.get(index).copied())
    }

    /// The one-hot block trailing the numeric fields.
    pub fn category_indicators(&self) -> &[f64] {
        self.values.get(NUMERIC_FEATURES..).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.names.iter().copied().zip(self.values.iter().copied())
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// One-hot encodes the category after the five numeric fields.
pub fn encode(reading: &ItemReading) -> FeatureVector {
    let mut values = Vec::with_capacity(FEATURE_COUNT);
    values.extend(reading.numeric_fields().iter().map(|(_, value)| *value));

    let selected = reading.category().encoding_index();
    values.extend(
        (0..PerishableCategory::COUNT).map(|index| if index == selected { 1.0 } else { 0.0 }),
    );

    FeatureVector {
        names: &FEATURE_NAMES,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk_reading() -> ItemReading {
        ItemReading::new(PerishableCategory::Milk, 4.0, 80, 5.0, 100.0, 1).expect("valid reading")
    }

    #[test]
    fn names_follow_numeric_then_alphabetical_categories() {
        for (index, category) in PerishableCategory::encoding_order().iter().enumerate() {
            assert_eq!(
                FEATURE_NAMES[NUMERIC_FEATURES + index],
                format!("category_{}", category.slug())
            );
        }
        assert_eq!(FEATURE_NAMES[0], "temperature");
        assert_eq!(FEATURE_NAMES[4], "door_openings");
    }

    #[test]
    fn exactly_one_indicator_is_set_for_every_category() {
        for category in PerishableCategory::form_order() {
            let reading = ItemReading::default().with_category(category);
            let features = encode(&reading);
            assert_eq!(features.len(), FEATURE_COUNT);

            let indicators = features.category_indicators();
            assert_eq!(indicators.len(), PerishableCategory::COUNT);
            assert_eq!(indicators.iter().sum::<f64>(), 1.0);
            assert_eq!(indicators.iter().filter(|value| **value == 1.0).count(), 1);
            assert_eq!(indicators.iter().filter(|value| **value == 0.0).count(), 14);

            let column = format!("category_{}", category.slug());
            assert_eq!(features.get(&column), Some(1.0));
        }
    }

    #[test]
    fn numeric_fields_are_copied_exactly() {
        let features = encode(&milk_reading());
        assert_eq!(features.get("temperature"), Some(4.0));
        assert_eq!(features.get("humidity"), Some(80.0));
        assert_eq!(features.get("duration_hours"), Some(5.0));
        assert_eq!(features.get("distance_km"), Some(100.0));
        assert_eq!(features.get("door_openings"), Some(1.0));
        assert_eq!(features.get("category_cheese"), Some(0.0));
        assert_eq!(features.get("category_unknown"), None);
    }

    #[test]
    fn encoding_is_deterministic() {
        let reading = milk_reading();
        assert_eq!(encode(&reading), encode(&reading));
    }

    #[test]
    fn serializes_as_named_map() {
        let json = serde_json::to_value(encode(&milk_reading())).expect("serializes");
        assert_eq!(json["category_milk"], 1.0);
        assert_eq!(json["temperature"], 4.0);
        assert_eq!(json.as_object().map(|map| map.len()), Some(FEATURE_COUNT));
    }

    #[test]
    fn from_parts_rejects_mismatched_lengths() {
        static PAIR: [&str; 2] = ["temperature", "humidity"];
        assert!(FeatureVector::from_parts(&PAIR, vec![4.0]).is_none());
        assert!(FeatureVector::from_parts(&PAIR, vec![4.0, 80.0, 1.0]).is_none());

        let features = FeatureVector::from_parts(&PAIR, vec![4.0, 80.0]).expect("lengths agree");
        assert_eq!(features.iter().count(), 2);
        let json = serde_json::to_value(&features).expect("serializes");
        assert_eq!(json.as_object().map(|map| map.len()), Some(2));
    }
}
