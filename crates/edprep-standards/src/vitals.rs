//! Physiologically plausible bounds for ED vital signs.

/// Subjective pain score column; not range-checked, forward-filled instead.
pub const PAIN_COLUMN: &str = "pain";

/// Closed interval `[min, max]` for one vital-sign column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalBound {
    pub column: &'static str,
    pub min: f64,
    pub max: f64,
}

impl VitalBound {
    pub const fn new(column: &'static str, min: f64, max: f64) -> Self {
        Self { column, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The bound table used by the vital-signs processor.
#[derive(Debug, Clone)]
pub struct VitalBounds {
    bounds: Vec<VitalBound>,
}

impl Default for VitalBounds {
    fn default() -> Self {
        Self::new(vec![
            VitalBound::new("temperature", 95.0, 107.6),
            VitalBound::new("heartrate", 20.0, 250.0),
            VitalBound::new("resprate", 4.0, 60.0),
            VitalBound::new("o2sat", 70.0, 100.0),
            VitalBound::new("sbp", 50.0, 250.0),
            VitalBound::new("dbp", 20.0, 150.0),
        ])
    }
}

impl VitalBounds {
    pub fn new(bounds: Vec<VitalBound>) -> Self {
        Self { bounds }
    }

    pub fn iter(&self) -> impl Iterator<Item = &VitalBound> {
        self.bounds.iter()
    }

    pub fn get(&self, column: &str) -> Option<&VitalBound> {
        self.bounds.iter().find(|bound| bound.column == column)
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.bounds.iter().map(|bound| bound.column).collect()
    }
}
