// src/territory/mod.rs
pub mod generator;

use crate::color::Color;
use crate::province::{RegionAccumulator, RegionKind};

/// Запись территории — укрупнённой области, группирующей провинции
#[derive(Debug, Clone, PartialEq)]
pub struct TerritoryRecord {
    /// Внешний идентификатор вида `ter-042`
    pub region_id: String,
    pub kind: RegionKind,
    pub color: Color,
    /// Центр масс в пиксельных координатах до раздачи стен
    pub centroid: (f64, f64),
    /// Провинции, чьи центроиды попали внутрь территории
    pub province_ids: Vec<String>,
}

impl TerritoryRecord {
    /// Замораживает накопитель заливки в запись территории
    #[must_use]
    pub fn from_accumulator(acc: RegionAccumulator) -> Self {
        let centroid = acc.centroid();
        Self {
            region_id: acc.region_id,
            kind: acc.kind,
            color: acc.color,
            centroid,
            province_ids: Vec::new(),
        }
    }
}
