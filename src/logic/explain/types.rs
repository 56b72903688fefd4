use serde::{Deserialize, Serialize};

/// One expanded feature and its fitted weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub feature: String,
    pub weight: f64,
}

/// Top revenue drivers, sorted by descending |weight|
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoefficientReport {
    pub entries: Vec<Coefficient>,
}

impl CoefficientReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coefficient> {
        self.entries.iter()
    }

    pub fn features(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.feature.clone()).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.entries.iter().map(|c| c.weight).collect()
    }
}
