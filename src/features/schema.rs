//! Field names, order and advisory ranges. Order must match the order the
//! scaler was fit on.

pub const FEATURE_COUNT: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    /// Form input step
    pub step: f64,
}

impl FeatureSpec {
    const fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, min, max, step: 0.1 }
    }

    const fn discrete(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, min, max, step: 1.0 }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

pub static FEATURES: [FeatureSpec; FEATURE_COUNT] = [
    FeatureSpec::new("tempmax", 20.0, 40.0),
    FeatureSpec::new("tempmin", 15.0, 30.0),
    FeatureSpec::new("temp", 20.0, 35.0),
    FeatureSpec::new("feelslikemax", 20.0, 50.0),
    FeatureSpec::new("feelslikemin", 15.0, 35.0),
    FeatureSpec::new("feelslike", 20.0, 40.0),
    FeatureSpec::new("dew", 15.0, 30.0),
    FeatureSpec::new("humidity", 50.0, 100.0),
    FeatureSpec::new("precip", 0.0, 50.0),
    FeatureSpec::new("precipprob", 0.0, 100.0),
    FeatureSpec::new("precipcover", 0.0, 100.0),
    FeatureSpec::new("snow", 0.0, 10.0),
    FeatureSpec::new("snowdepth", 0.0, 10.0),
    FeatureSpec::new("windspeed", 0.0, 50.0),
    FeatureSpec::new("winddir", 0.0, 360.0),
    FeatureSpec::new("sealevelpressure", 990.0, 1020.0),
    FeatureSpec::new("cloudcover", 0.0, 100.0),
    FeatureSpec::new("visibility", 0.0, 10.0),
    FeatureSpec::new("solarradiation", 0.0, 400.0),
    FeatureSpec::new("solarenergy", 0.0, 30.0),
    FeatureSpec::discrete("uvindex", 0.0, 10.0),
    FeatureSpec::discrete("conditions", 0.0, 5.0),
    FeatureSpec::discrete("stations", 0.0, 5.0),
    FeatureSpec::discrete("cases", 0.0, 20000.0),
];

pub(crate) fn position(name: &str) -> Option<usize> {
    FEATURES.iter().position(|s| s.name == name)
}

pub(crate) fn names() -> impl Iterator<Item = &'static str> {
    FEATURES.iter().map(|s| s.name)
}
