// src/config.rs
//! Конфигурация генерации карты
//!
//! Этот модуль определяет параметры, управляющие разбиением карты:
//! - Опорные цвета входных растров (океан, границы)
//! - Серии внешних идентификаторов провинций и территорий
//! - Плотности точек-семян для обоих разбиений
//! - Порог потока для рек и сид генератора случайных чисел
//!
//! Все структуры поддерживают сериализацию в TOML для настройки через
//! конфигурационные файлы; незаполненные поля получают значения по умолчанию.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::MapToolError;

/// Опорный цвет маски границ
///
/// Трёхканальные изображения сравниваются с RGB-цветом, одноканальные —
/// с одним значением серого.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BoundaryColor {
    Rgb([u8; 3]),
    Gray(u8),
}

/// Основные параметры генерации
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParams {
    /// Сид генератора случайных чисел (детерминированная генерация)
    #[serde(default)]
    pub seed: u64,

    /// Цвет пикселей океана во входной маске
    #[serde(default = "default_ocean_color")]
    pub ocean_color: [u8; 3],

    /// Цвет пикселей-стен в маске границ
    #[serde(default = "default_boundary_color")]
    pub boundary_color: BoundaryColor,

    /// Префикс внешних идентификаторов провинций
    #[serde(default = "default_province_id_prefix")]
    pub province_id_prefix: String,

    /// Первый номер серии провинций
    #[serde(default = "default_province_id_start")]
    pub province_id_start: u64,

    /// Последний номер серии провинций (определяет ширину нулей)
    #[serde(default = "default_province_id_end")]
    pub province_id_end: u64,

    /// Префикс внешних идентификаторов территорий
    #[serde(default = "default_territory_id_prefix")]
    pub territory_id_prefix: String,

    #[serde(default = "default_territory_id_start")]
    pub territory_id_start: u64,

    #[serde(default = "default_territory_id_end")]
    pub territory_id_end: u64,

    /// Желаемое число сухопутных провинций
    #[serde(default = "default_province_land_points")]
    pub province_land_points: usize,

    /// Желаемое число океанских провинций (0 — океан не разбивается)
    #[serde(default = "default_province_ocean_points")]
    pub province_ocean_points: usize,

    /// Желаемое число сухопутных территорий
    #[serde(default = "default_territory_land_points")]
    pub territory_land_points: usize,

    /// Желаемое число океанских территорий
    #[serde(default = "default_territory_ocean_points")]
    pub territory_ocean_points: usize,

    /// Минимальный накопленный поток, при котором ребро считается рекой
    #[serde(default = "default_river_threshold")]
    pub river_threshold: f64,

    /// Допуск сопоставления цвета биома (справочный: всегда берётся
    /// ближайший биом палитры)
    #[serde(default = "default_biome_tolerance")]
    pub biome_tolerance: f64,
}

fn default_ocean_color() -> [u8; 3] {
    [0, 0, 255]
}
fn default_boundary_color() -> BoundaryColor {
    BoundaryColor::Rgb([0, 0, 0])
}
fn default_province_id_prefix() -> String {
    "prv-".to_string()
}
fn default_province_id_start() -> u64 {
    1
}
fn default_province_id_end() -> u64 {
    9999
}
fn default_territory_id_prefix() -> String {
    "ter-".to_string()
}
fn default_territory_id_start() -> u64 {
    1
}
fn default_territory_id_end() -> u64 {
    999
}
fn default_province_land_points() -> usize {
    120
}
fn default_province_ocean_points() -> usize {
    40
}
fn default_territory_land_points() -> usize {
    24
}
fn default_territory_ocean_points() -> usize {
    8
}
fn default_river_threshold() -> f64 {
    10.0
}
fn default_biome_tolerance() -> f64 {
    10.0
}

impl Default for ToolParams {
    fn default() -> Self {
        Self {
            seed: 0,
            ocean_color: default_ocean_color(),
            boundary_color: default_boundary_color(),
            province_id_prefix: default_province_id_prefix(),
            province_id_start: default_province_id_start(),
            province_id_end: default_province_id_end(),
            territory_id_prefix: default_territory_id_prefix(),
            territory_id_start: default_territory_id_start(),
            territory_id_end: default_territory_id_end(),
            province_land_points: default_province_land_points(),
            province_ocean_points: default_province_ocean_points(),
            territory_land_points: default_territory_land_points(),
            territory_ocean_points: default_territory_ocean_points(),
            river_threshold: default_river_threshold(),
            biome_tolerance: default_biome_tolerance(),
        }
    }
}

impl ToolParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # map.toml
    /// seed = 42
    /// ocean_color = [0, 0, 255]
    /// boundary_color = [0, 0, 0]
    /// province_land_points = 150
    /// ```
    pub fn from_toml_file(path: &Path) -> Result<Self, MapToolError> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        Ok(params)
    }
}
