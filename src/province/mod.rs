// src/province/mod.rs
pub mod compose;
pub mod generator;
pub mod partition;
pub mod seeder;

use serde::{Deserialize, Serialize};

use crate::biome::{UNKNOWN_BIOME_ID, UNKNOWN_BIOME_NAME};
use crate::color::Color;

/// Тип поверхности области
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Land,
    Ocean,
}

impl RegionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RegionKind::Land => "land",
            RegionKind::Ocean => "ocean",
        }
    }
}

/// Накопитель области во время заливки
///
/// Пока идёт рост области, копятся только суммы координат и счётчик
/// пикселей; неизменяемая запись строится после завершения разбиения.
/// Пиксели, доставшиеся области при раздаче стен, в центроид не входят.
#[derive(Debug, Clone)]
pub struct RegionAccumulator {
    pub region_id: String,
    pub kind: RegionKind,
    pub color: Color,
    pub sum_x: u64,
    pub sum_y: u64,
    pub count: u64,
}

impl RegionAccumulator {
    #[must_use]
    pub fn new(region_id: String, kind: RegionKind, color: Color, seed: (u32, u32)) -> Self {
        Self {
            region_id,
            kind,
            color,
            sum_x: u64::from(seed.0),
            sum_y: u64::from(seed.1),
            count: 1,
        }
    }

    /// Учитывает захваченный заливкой пиксель
    pub fn absorb(&mut self, x: u32, y: u32) {
        self.sum_x += u64::from(x);
        self.sum_y += u64::from(y);
        self.count += 1;
    }

    /// Центр масс учтённых пикселей
    #[must_use]
    pub fn centroid(&self) -> (f64, f64) {
        (
            self.sum_x as f64 / self.count as f64,
            self.sum_y as f64 / self.count as f64,
        )
    }

    /// Замораживает накопитель в запись провинции с неизвестным биомом
    #[must_use]
    pub fn into_province(self) -> ProvinceRecord {
        let centroid = self.centroid();
        ProvinceRecord {
            region_id: self.region_id,
            kind: self.kind,
            color: self.color,
            centroid,
            biome_color: [0, 0, 0],
            biome_id: UNKNOWN_BIOME_ID.to_string(),
            biome_name: UNKNOWN_BIOME_NAME.to_string(),
        }
    }
}

/// Запись провинции, неизменяемая после завершения генерации
#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceRecord {
    /// Внешний идентификатор вида `prv-0042`
    pub region_id: String,
    pub kind: RegionKind,
    /// Уникальный в пределах карты цвет
    pub color: Color,
    /// Центр масс в пиксельных координатах до раздачи стен
    pub centroid: (f64, f64),
    /// Цвет биомного растра в центроиде
    pub biome_color: Color,
    pub biome_id: String,
    pub biome_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn accumulator_tracks_the_centroid() {
        let mut acc =
            RegionAccumulator::new("prv-0001".to_string(), RegionKind::Land, [1, 2, 3], (4, 0));
        acc.absorb(6, 2);
        acc.absorb(8, 4);
        let (cx, cy) = acc.centroid();
        assert_relative_eq!(cx, 6.0);
        assert_relative_eq!(cy, 2.0);

        let record = acc.into_province();
        assert_eq!(record.biome_id, "unknown");
        assert_eq!(record.biome_name, "Unknown");
        assert_eq!(record.biome_color, [0, 0, 0]);
    }
}
