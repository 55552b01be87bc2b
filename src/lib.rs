//! Генератор политической карты из растровых масок
//!
//! Библиотека превращает несколько входных растров (маска границ, маска
//! океана, биомный растр, карта высот) в структурное описание мира:
//! - Провинции — мелкие связные области с уникальными цветами
//! - Территории — укрупнённые группы провинций
//! - Биомы провинций по палитре
//! - Планарный граф разбиения (вершины, рёбра, смежность)
//! - Реки на рёбрах графа по накоплению стока
//!
//! Конвейер пакетный и детерминированный: одинаковые входы и сид дают
//! байтово идентичные результаты. Для CLI-использования см. бинарник
//! `maptool-cli`.
pub mod biome;
pub mod color;
pub mod config;
pub mod edt;
pub mod error;
pub mod export;
pub mod grid;
pub mod heightmap;
pub mod ids;
pub mod mask;
pub mod province;
pub mod render;
pub mod rivers;
pub mod shapes;
pub mod territory;

// === Конфигурация ===
pub use config::{BoundaryColor, ToolParams};

// === Ошибки ===
pub use error::MapToolError;

// === Сетки и маски ===
pub use grid::{IndexGrid, Mask};
pub use mask::MapMasks;

// === Карта высот ===
pub use heightmap::Heightmap;

// === Биомы ===
pub use biome::{Biome, BiomePalette};

// === Провинции ===
pub use province::{
    ProvinceRecord, RegionKind,
    generator::{ProvinceMapOutput, generate_province_map},
};

// === Территории ===
pub use territory::{
    TerritoryRecord,
    generator::{TerritoryMapOutput, generate_territory_map},
};

// === Планарный граф ===
pub use shapes::{ShapeData, extract_shapes};

// === Реки ===
pub use rivers::{RiverData, generate_rivers};
