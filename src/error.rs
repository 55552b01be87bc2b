// src/error.rs
//! Ошибки конвейера генерации
//!
//! Архитектурные сбои (нет входных изображений, несогласованные размеры)
//! прерывают всю генерацию; локальные неприятности — отсутствие палитры
//! биомов, карта высот без файла, исчерпанная серия идентификаторов —
//! ошибками не являются и обрабатываются на месте.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapToolError {
    /// Нет ни границ, ни океана — размер карты определить нечем
    #[error("need at least a boundary or an ocean image to determine map size")]
    InputMissing,

    /// Запрошенный тип поверхности пуст: нет пикселей заливки или семян
    #[error("no {0} points to generate")]
    EmptyDomain(&'static str),

    /// Входные изображения разного размера
    #[error("input image dimensions disagree: {expected_w}x{expected_h} vs {got_w}x{got_h}")]
    DimensionMismatch {
        expected_w: u32,
        expected_h: u32,
        got_w: u32,
        got_h: u32,
    },

    /// Не удалось подобрать свободный цвет за разумное число попыток
    #[error("color space exhausted while allocating a unique region color")]
    ColorExhausted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
