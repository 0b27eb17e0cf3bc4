use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of perishable goods the dashboard knows how to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerishableCategory {
    Strawberries,
    Flowers,
    FrozenFood,
    Milk,
    Vaccines,
    Cheese,
    Meat,
    LeafyGreens,
    IceCream,
    Seafood,
    Juice,
    Eggs,
    Yogurt,
    Berries,
    Herbs,
}

impl PerishableCategory {
    pub const COUNT: usize = 15;

    /// Order in which categories are offered on the form.
    pub const fn form_order() -> [Self; Self::COUNT] {
        [
            Self::Strawberries,
            Self::Flowers,
            Self::FrozenFood,
            Self::Milk,
            Self::Vaccines,
            Self::Cheese,
            Self::Meat,
            Self::LeafyGreens,
            Self::IceCream,
            Self::Seafood,
            Self::Juice,
            Self::Eggs,
            Self::Yogurt,
            Self::Berries,
            Self::Herbs,
        ]
    }

    /// Alphabetical order used for the one-hot indicator columns.
    pub const fn encoding_order() -> [Self; Self::COUNT] {
        [
            Self::Berries,
            Self::Cheese,
            Self::Eggs,
            Self::Flowers,
            Self::FrozenFood,
            Self::Herbs,
            Self::IceCream,
            Self::Juice,
            Self::LeafyGreens,
            Self::Meat,
            Self::Milk,
            Self::Seafood,
            Self::Strawberries,
            Self::Vaccines,
            Self::Yogurt,
        ]
    }

    pub const fn encoding_index(self) -> usize {
        match self {
            Self::Berries => 0,
            Self::Cheese => 1,
            Self::Eggs => 2,
            Self::Flowers => 3,
            Self::FrozenFood => 4,
            Self::Herbs => 5,
            Self::IceCream => 6,
            Self::Juice => 7,
            Self::LeafyGreens => 8,
            Self::Meat => 9,
            Self::Milk => 10,
            Self::Seafood => 11,
            Self::Strawberries => 12,
            Self::Vaccines => 13,
            Self::Yogurt => 14,
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Strawberries => "strawberries",
            Self::Flowers => "flowers",
            Self::FrozenFood => "frozen_food",
            Self::Milk => "milk",
            Self::Vaccines => "vaccines",
            Self::Cheese => "cheese",
            Self::Meat => "meat",
            Self::LeafyGreens => "leafy_greens",
            Self::IceCream => "ice_cream",
            Self::Seafood => "seafood",
            Self::Juice => "juice",
            Self::Eggs => "eggs",
            Self::Yogurt => "yogurt",
            Self::Berries => "berries",
            Self::Herbs => "herbs",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strawberries => "Strawberries",
            Self::Flowers => "Flowers",
            Self::FrozenFood => "Frozen Food",
            Self::Milk => "Milk",
            Self::Vaccines => "Vaccines",
            Self::Cheese => "Cheese",
            Self::Meat => "Meat",
            Self::LeafyGreens => "Leafy Greens",
            Self::IceCream => "Ice Cream",
            Self::Seafood => "Seafood",
            Self::Juice => "Juice",
            Self::Eggs => "Eggs",
            Self::Yogurt => "Yogurt",
            Self::Berries => "Berries",
            Self::Herbs => "Herbs",
        }
    }
}

impl Default for PerishableCategory {
    fn default() -> Self {
        Self::form_order()[0]
    }
}

impl fmt::Display for PerishableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown perishable category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for PerishableCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::form_order()
            .into_iter()
            .find(|category| category.slug() == needle)
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

/// Slider metadata for one numeric reading field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl FieldSpec {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const TEMPERATURE: FieldSpec = FieldSpec {
    name: "temperature",
    label: "Internal Temperature (°C)",
    min: 0.0,
    max: 25.0,
    default: 6.0,
    step: 0.1,
};

pub const HUMIDITY: FieldSpec = FieldSpec {
    name: "humidity",
    label: "Humidity (%)",
    min: 30.0,
    max: 100.0,
    default: 75.0,
    step: 1.0,
};

pub const DURATION_HOURS: FieldSpec = FieldSpec {
    name: "duration_hours",
    label: "Transit Duration (hours)",
    min: 0.0,
    max: 48.0,
    default: 8.0,
    step: 0.1,
};

pub const DISTANCE_KM: FieldSpec = FieldSpec {
    name: "distance_km",
    label: "Distance Traveled (km)",
    min: 0.0,
    max: 2000.0,
    default: 250.0,
    step: 1.0,
};

pub const DOOR_OPENINGS: FieldSpec = FieldSpec {
    name: "door_openings",
    label: "Door Openings",
    min: 0.0,
    max: 10.0,
    default: 2.0,
    step: 1.0,
};

/// Numeric fields in feature-vector order.
pub const READING_FIELDS: [FieldSpec; 5] =
    [TEMPERATURE, HUMIDITY, DURATION_HOURS, DISTANCE_KM, DOOR_OPENINGS];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReadingError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// Transport conditions submitted for a single item.
///
/// Fields are private so every instance has passed the slider bounds in
/// [`ItemReading::new`] (or is the in-range [`Default`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReading {
    category: PerishableCategory,
    temperature: f64,
    humidity: u8,
    duration_hours: f64,
    distance_km: f64,
    door_openings: u8,
}

impl ItemReading {
    pub fn new(
        category: PerishableCategory,
        temperature: f64,
        humidity: u8,
        duration_hours: f64,
        distance_km: f64,
        door_openings: u8,
    ) -> Result<Self, ReadingError> {
        check(&TEMPERATURE, temperature)?;
        check(&HUMIDITY, f64::from(humidity))?;
        check(&DURATION_HOURS, duration_hours)?;
        check(&DISTANCE_KM, distance_km)?;
        check(&DOOR_OPENINGS, f64::from(door_openings))?;

        Ok(Self {
            category,
            temperature,
            humidity,
            duration_hours,
            distance_km,
            door_openings,
        })
    }

    /// Same conditions for another category; the numeric fields stay valid.
    pub fn with_category(self, category: PerishableCategory) -> Self {
        Self { category, ..self }
    }

    pub fn category(&self) -> PerishableCategory {
        self.category
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn humidity(&self) -> u8 {
        self.humidity
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn door_openings(&self) -> u8 {
        self.door_openings
    }

    /// Numeric fields paired with their slider metadata, in feature order.
    pub fn numeric_fields(&self) -> [(FieldSpec, f64); 5] {
        [
            (TEMPERATURE, self.temperature),
            (HUMIDITY, f64::from(self.humidity)),
            (DURATION_HOURS, self.duration_hours),
            (DISTANCE_KM, self.distance_km),
            (DOOR_OPENINGS, f64::from(self.door_openings)),
        ]
    }
}

impl Default for ItemReading {
    fn default() -> Self {
        Self {
            category: PerishableCategory::default(),
            temperature: TEMPERATURE.default,
            humidity: HUMIDITY.default as u8,
            duration_hours: DURATION_HOURS.default,
            distance_km: DISTANCE_KM.default,
            door_openings: DOOR_OPENINGS.default as u8,
        }
    }
}

fn check(spec: &FieldSpec, value: f64) -> Result<(), ReadingError> {
    if !value.is_finite() {
        return Err(ReadingError::NotFinite { field: spec.name });
    }
    if !spec.contains(value) {
        return Err(ReadingError::OutOfRange {
            field: spec.name,
            value,
            min: spec.min,
            max: spec.max,
        });
    }
    Ok(())
}

/// Freshness estimate, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct FreshScore(f64);

impl FreshScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn clamped(raw: f64) -> Self {
        if raw.is_nan() {
            return Self(Self::MIN);
        }
        Self(raw.clamp(Self::MIN, Self::MAX))
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    pub fn tier(self) -> RiskTier {
        RiskTier::from_score(self.0)
    }
}

impl fmt::Display for FreshScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Qualitative band driving both the gauge colouring and the status block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Healthy,
    Caution,
    Risk,
}

impl RiskTier {
    pub const CAUTION_FLOOR: f64 = 60.0;
    pub const HEALTHY_FLOOR: f64 = 80.0;

    /// Both floors are exclusive: 80 is still caution, 60 is still risk.
    pub fn from_score(score: f64) -> Self {
        if score > Self::HEALTHY_FLOOR {
            Self::Healthy
        } else if score > Self::CAUTION_FLOOR {
            Self::Caution
        } else {
            Self::Risk
        }
    }

    pub const fn ordered() -> [Self; 3] {
        [Self::Risk, Self::Caution, Self::Healthy]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Caution => "caution",
            Self::Risk => "risk",
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Self::Healthy => "✅ Excellent freshness!",
            Self::Caution => "🟡 Acceptable freshness",
            Self::Risk => "🚨 Spoilage Risk",
        }
    }

    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Healthy => "Product is in optimal condition.",
            Self::Caution => "Monitor temperature and transit time.",
            Self::Risk => "Inspect or reroute the item immediately.",
        }
    }

    /// Background of the status block.
    pub const fn block_color(self) -> &'static str {
        match self {
            Self::Healthy => "#28a745",
            Self::Caution => "#ffc107",
            Self::Risk => "#dc3545",
        }
    }

    /// Fill of the matching gauge band.
    pub const fn band_color(self) -> &'static str {
        match self {
            Self::Healthy => "lightgreen",
            Self::Caution => "yellow",
            Self::Risk => "red",
        }
    }

    /// Gauge range covered by the tier.
    pub const fn band(self) -> (f64, f64) {
        match self {
            Self::Risk => (FreshScore::MIN, Self::CAUTION_FLOOR),
            Self::Caution => (Self::CAUTION_FLOOR, Self::HEALTHY_FLOOR),
            Self::Healthy => (Self::HEALTHY_FLOOR, FreshScore::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_orders_cover_every_variant_once() {
        let mut form: Vec<_> = PerishableCategory::form_order().to_vec();
        let mut encoding: Vec<_> = PerishableCategory::encoding_order().to_vec();
        form.sort_by_key(|category| category.slug());
        encoding.sort_by_key(|category| category.slug());
        assert_eq!(form, encoding);
        form.dedup();
        assert_eq!(form.len(), PerishableCategory::COUNT);
    }

    #[test]
    fn encoding_order_is_alphabetical_and_matches_index() {
        let order = PerishableCategory::encoding_order();
        for window in order.windows(2) {
            assert!(window[0].slug() < window[1].slug());
        }
        for (index, category) in order.iter().enumerate() {
            assert_eq!(category.encoding_index(), index);
        }
    }

    #[test]
    fn category_parses_from_slug() {
        assert_eq!(
            "leafy_greens".parse::<PerishableCategory>(),
            Ok(PerishableCategory::LeafyGreens)
        );
        assert_eq!(
            " MILK ".parse::<PerishableCategory>(),
            Ok(PerishableCategory::Milk)
        );
        assert!("kale".parse::<PerishableCategory>().is_err());
        assert_eq!(PerishableCategory::default(), PerishableCategory::Strawberries);
    }

    #[test]
    fn default_reading_matches_form_defaults() {
        let reading = ItemReading::default();
        assert_eq!(reading.category(), PerishableCategory::Strawberries);
        assert_eq!(reading.temperature(), 6.0);
        assert_eq!(reading.humidity(), 75);
        assert_eq!(reading.duration_hours(), 8.0);
        assert_eq!(reading.distance_km(), 250.0);
        assert_eq!(reading.door_openings(), 2);
        for (spec, value) in reading.numeric_fields() {
            assert!(spec.contains(value), "{} default out of range", spec.name);
        }
    }

    #[test]
    fn changing_category_keeps_validated_conditions() {
        let reading = ItemReading::new(PerishableCategory::Milk, 4.0, 80, 5.0, 100.0, 1)
            .expect("valid reading");
        let swapped = reading.clone().with_category(PerishableCategory::Cheese);
        assert_eq!(swapped.category(), PerishableCategory::Cheese);
        assert_eq!(swapped.numeric_fields(), reading.numeric_fields());
    }

    #[test]
    fn reading_rejects_values_outside_slider_bounds() {
        let err = ItemReading::new(PerishableCategory::Meat, 30.0, 75, 8.0, 250.0, 2)
            .expect_err("temperature above range");
        assert!(matches!(
            err,
            ReadingError::OutOfRange {
                field: "temperature",
                ..
            }
        ));

        let err = ItemReading::new(PerishableCategory::Meat, 4.0, 20, 8.0, 250.0, 2)
            .expect_err("humidity below range");
        assert!(matches!(err, ReadingError::OutOfRange { field: "humidity", .. }));

        let err = ItemReading::new(PerishableCategory::Meat, 4.0, 75, f64::NAN, 250.0, 2)
            .expect_err("nan duration");
        assert_eq!(
            err,
            ReadingError::NotFinite {
                field: "duration_hours"
            }
        );

        assert!(ItemReading::new(PerishableCategory::Meat, 25.0, 100, 48.0, 2000.0, 10).is_ok());
        assert!(ItemReading::new(PerishableCategory::Meat, 0.0, 30, 0.0, 0.0, 0).is_ok());
    }

    #[test]
    fn score_is_clamped_into_range() {
        assert_eq!(FreshScore::clamped(-42.0).value(), 0.0);
        assert_eq!(FreshScore::clamped(250.0).value(), 100.0);
        assert_eq!(FreshScore::clamped(61.5).value(), 61.5);
        assert_eq!(FreshScore::clamped(f64::NAN).value(), 0.0);
        assert_eq!(FreshScore::clamped(f64::INFINITY).value(), 100.0);
    }

    #[test]
    fn tier_boundaries_are_exclusive() {
        assert_eq!(RiskTier::from_score(100.0), RiskTier::Healthy);
        assert_eq!(RiskTier::from_score(80.01), RiskTier::Healthy);
        assert_eq!(RiskTier::from_score(80.0), RiskTier::Caution);
        assert_eq!(RiskTier::from_score(60.01), RiskTier::Caution);
        assert_eq!(RiskTier::from_score(60.0), RiskTier::Risk);
        assert_eq!(RiskTier::from_score(0.0), RiskTier::Risk);
    }

    #[test]
    fn tier_bands_tile_the_gauge() {
        let bands: Vec<_> = RiskTier::ordered().iter().map(|tier| tier.band()).collect();
        assert_eq!(bands.first().map(|band| band.0), Some(FreshScore::MIN));
        assert_eq!(bands.last().map(|band| band.1), Some(FreshScore::MAX));
        for pair in bands.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }
}
