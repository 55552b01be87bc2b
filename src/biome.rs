// src/biome.rs
//! Палитра биомов и сопоставление цвета
//!
//! Палитра загружается из JSON-массива записей `{id, name, color}`;
//! незнакомые поля записей игнорируются. Сопоставление цвета — сначала
//! точное совпадение, затем ближайший биом по евклидову расстоянию в RGB.
//! Пустая палитра — не ошибка: все провинции остаются с неизвестным биомом.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::color::Color;
use crate::error::MapToolError;

/// Идентификатор биома по умолчанию
pub const UNKNOWN_BIOME_ID: &str = "unknown";
/// Отображаемое имя биома по умолчанию
pub const UNKNOWN_BIOME_NAME: &str = "Unknown";

/// Запись палитры биомов
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Biome {
    pub id: String,
    pub name: String,
    pub color: [u8; 3],
}

/// Загруженная палитра биомов
#[derive(Debug, Clone, Default)]
pub struct BiomePalette {
    biomes: Vec<Biome>,
}

impl BiomePalette {
    #[must_use]
    pub fn from_biomes(biomes: Vec<Biome>) -> Self {
        Self { biomes }
    }

    pub fn load(path: &Path) -> Result<Self, MapToolError> {
        let contents = fs::read_to_string(path)?;
        let biomes: Vec<Biome> = serde_json::from_str(&contents)?;
        Ok(Self { biomes })
    }

    /// Загружает палитру, а при любой неудаче предупреждает и остаётся пустой
    #[must_use]
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(palette) => palette,
            Err(err) => {
                println!(
                    "⚠️  Палитра биомов {} не загружена ({err}), биомы останутся неизвестными",
                    path.display()
                );
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Находит биом по цвету: точное совпадение, иначе ближайший
    ///
    /// `None` только при пустой палитре. Допуск из конфигурации носит
    /// справочный характер: возвращается ближайший биом без отсечки.
    #[must_use]
    pub fn resolve(&self, color: Color) -> Option<&Biome> {
        if let Some(exact) = self.biomes.iter().find(|b| b.color == color) {
            return Some(exact);
        }

        let mut best: Option<&Biome> = None;
        let mut min_dist = i64::MAX;
        for biome in &self.biomes {
            let dr = i64::from(color[0]) - i64::from(biome.color[0]);
            let dg = i64::from(color[1]) - i64::from(biome.color[1]);
            let db = i64::from(color[2]) - i64::from(biome.color[2]);
            let dist = dr * dr + dg * dg + db * db;
            if dist < min_dist {
                min_dist = dist;
                best = Some(biome);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_palette() -> BiomePalette {
        BiomePalette::from_biomes(vec![
            Biome {
                id: "hot_desert".to_string(),
                name: "Hot Desert".to_string(),
                color: [255, 0, 0],
            },
            Biome {
                id: "tundra".to_string(),
                name: "Tundra".to_string(),
                color: [0, 200, 255],
            },
        ])
    }

    #[test]
    fn exact_color_wins() {
        let palette = test_palette();
        assert_eq!(palette.resolve([255, 0, 0]).unwrap().id, "hot_desert");
    }

    #[test]
    fn nearest_color_is_the_fallback() {
        let palette = test_palette();
        assert_eq!(palette.resolve([200, 50, 50]).unwrap().id, "hot_desert");
        assert_eq!(palette.resolve([10, 180, 240]).unwrap().id, "tundra");
    }

    #[test]
    fn empty_palette_resolves_nothing() {
        assert!(BiomePalette::default().resolve([1, 2, 3]).is_none());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let json = r#"[{"id": "swamp", "name": "Swamp", "color": [30, 60, 30], "movement_cost": 2}]"#;
        let biomes: Vec<Biome> = serde_json::from_str(json).unwrap();
        assert_eq!(biomes.len(), 1);
        assert_eq!(biomes[0].id, "swamp");
    }
}
