use serde::Serialize;

/// Deviation beyond which a metric is colored as alert or positive.
pub const DEVIATION_THRESHOLD: f64 = 0.05;

/// Bar color for a mean-difference value.
///
/// | Mean Diff      | Color    |
/// |----------------|----------|
/// | < -0.05        | Alert    |
/// | > 0.05         | Positive |
/// | otherwise      | Neutral  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviationColor {
    Alert,
    Positive,
    Neutral,
}

impl DeviationColor {
    pub fn hex(&self) -> &'static str {
        match self {
            DeviationColor::Alert => "#FF0000",
            DeviationColor::Positive => "#008000",
            DeviationColor::Neutral => "#C0C0C0",
        }
    }
}

pub fn classify(deviation: f64) -> DeviationColor {
    match deviation {
        d if d < -DEVIATION_THRESHOLD => DeviationColor::Alert,
        d if d > DEVIATION_THRESHOLD => DeviationColor::Positive,
        _ => DeviationColor::Neutral,
    }
}
