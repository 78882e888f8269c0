// src/config.rs
//! Конфигурация генерации этажа подземелья
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией:
//! - Размеры сетки и сид
//! - Количество и размеры комнат
//! - Стратегию соединения комнат коридорами
//! - Правила клеточного автомата для сглаживания
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Предельная сторона сетки в тайлах
pub const MAX_DIMENSION: i32 = 4096;
/// Предельное целевое число комнат
pub const MAX_ROOMS: usize = 64;
/// Предельное число попыток на одну комнату
pub const MAX_ATTEMPTS: usize = 10_000;

/// Способ построения основной сети коридоров между комнатами
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum CorridorStrategy {
    /// Цепочка в порядке размещения: комната i соединяется с комнатой i+1
    #[default]
    Chain,
    /// Минимальное остовное дерево по манхэттенскому расстоянию между центрами
    MinimumSpanningTree,
}

/// Настройки размещения комнат
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomSettings {
    /// Минимальное целевое число комнат (включительно)
    #[serde(default = "default_count_min")]
    pub count_min: usize,

    /// Максимальное целевое число комнат (включительно)
    #[serde(default = "default_count_max")]
    pub count_max: usize,

    /// Минимальная сторона комнаты в тайлах
    #[serde(default = "default_min_size")]
    pub min_size: i32,

    /// Максимальная сторона комнаты в тайлах
    #[serde(default = "default_max_size")]
    pub max_size: i32,

    /// Число попыток разместить одну комнату, после чего слот пропускается
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Отступ от края карты для левого верхнего угла комнаты (не меньше 1)
    #[serde(default = "default_edge_margin")]
    pub edge_margin: i32,
}

fn default_count_min() -> usize {
    5
}
fn default_count_max() -> usize {
    9
}
fn default_min_size() -> i32 {
    5
}
fn default_max_size() -> i32 {
    12
}
fn default_max_attempts() -> usize {
    100
}
fn default_edge_margin() -> i32 {
    2
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            count_min: 5,
            count_max: 9,
            min_size: 5,
            max_size: 12,
            max_attempts: 100,
            edge_margin: 2,
        }
    }
}

impl RoomSettings {
    /// Фиксирует целевое число комнат.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count_min = count;
        self.count_max = count;
        self
    }
}

/// Настройки коридоров
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorridorSettings {
    /// Основная стратегия соединения (по умолчанию `Chain`)
    #[serde(default)]
    pub strategy: CorridorStrategy,

    /// Доля дополнительных случайных соединений относительно числа комнат:
    /// - `0.0` — только основная сеть,
    /// - `0.5` — примерно по одному лишнему коридору на две комнаты (петли).
    #[serde(default = "default_extra_ratio")]
    pub extra_ratio: f32,
}

fn default_extra_ratio() -> f32 {
    0.5
}

impl Default for CorridorSettings {
    fn default() -> Self {
        Self {
            strategy: CorridorStrategy::Chain,
            extra_ratio: 0.5,
        }
    }
}

/// Правила клеточного автомата
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmoothingSettings {
    /// Количество синхронных проходов (0 = без сглаживания)
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Стена становится полом, если соседей-стен строго меньше этого значения
    #[serde(default = "default_birth_limit")]
    pub birth_limit: u8,

    /// Пол становится стеной, если соседей-стен строго больше этого значения
    #[serde(default = "default_death_limit")]
    pub death_limit: u8,
}

fn default_iterations() -> usize {
    2
}
fn default_birth_limit() -> u8 {
    4
}
fn default_death_limit() -> u8 {
    5
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            iterations: 2,
            birth_limit: 4,
            death_limit: 5,
        }
    }
}

/// Основные параметры генерации этажа
///
/// Полная конфигурация для генерации одного этажа. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Сид генератора случайных чисел (детерминированная генерация)
    #[serde(default)]
    pub seed: u64,

    /// Ширина карты в тайлах (по умолчанию 50)
    #[serde(default = "default_width")]
    pub width: i32,

    /// Высота карты в тайлах (по умолчанию 38)
    #[serde(default = "default_height")]
    pub height: i32,

    #[serde(default)]
    pub rooms: RoomSettings,

    #[serde(default)]
    pub corridors: CorridorSettings,

    #[serde(default)]
    pub smoothing: SmoothingSettings,
}

fn default_width() -> i32 {
    50
}
fn default_height() -> i32 {
    38
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 50,
            height: 38,
            rooms: RoomSettings::default(),
            corridors: CorridorSettings::default(),
            smoothing: SmoothingSettings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Конфигурация по умолчанию с заданными размерами сетки.
    #[must_use]
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # floor.toml
    /// seed = 42
    /// width = 80
    /// height = 40
    ///
    /// [corridors]
    /// strategy = "MinimumSpanningTree"
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Разбирает TOML-строку и проверяет параметры.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Проверяет согласованность параметров.
    ///
    /// Любая конфигурация, прошедшая проверку, гарантирует, что генерация не паникует
    /// ни при каком исходе случайных бросков, а все циклы ограничены
    /// `MAX_ROOMS × MAX_ATTEMPTS` попытками на сетке не больше `MAX_DIMENSION²`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_DIMENSION).contains(&self.width) {
            return Err(ConfigError::invalid(
                "width",
                format!("ожидается 0..={MAX_DIMENSION}, получено {}", self.width),
            ));
        }
        if !(0..=MAX_DIMENSION).contains(&self.height) {
            return Err(ConfigError::invalid(
                "height",
                format!("ожидается 0..={MAX_DIMENSION}, получено {}", self.height),
            ));
        }

        let rooms = &self.rooms;
        if rooms.count_min > rooms.count_max {
            return Err(ConfigError::invalid(
                "rooms.count_min",
                format!("{} больше count_max = {}", rooms.count_min, rooms.count_max),
            ));
        }
        if rooms.count_max > MAX_ROOMS {
            return Err(ConfigError::invalid(
                "rooms.count_max",
                format!("не больше {MAX_ROOMS}, получено {}", rooms.count_max),
            ));
        }
        if rooms.min_size < 1 {
            return Err(ConfigError::invalid("rooms.min_size", "должен быть не меньше 1"));
        }
        if rooms.min_size > rooms.max_size {
            return Err(ConfigError::invalid(
                "rooms.min_size",
                format!("{} больше max_size = {}", rooms.min_size, rooms.max_size),
            ));
        }
        // Комната крупнее сетки допустима (слот просто пропускается), но не сверх предела
        if rooms.max_size > MAX_DIMENSION {
            return Err(ConfigError::invalid(
                "rooms.max_size",
                format!("не больше {MAX_DIMENSION}, получено {}", rooms.max_size),
            ));
        }
        if !(1..=MAX_ATTEMPTS).contains(&rooms.max_attempts) {
            return Err(ConfigError::invalid(
                "rooms.max_attempts",
                format!("ожидается 1..={MAX_ATTEMPTS}, получено {}", rooms.max_attempts),
            ));
        }
        if rooms.edge_margin < 1 {
            return Err(ConfigError::invalid(
                "rooms.edge_margin",
                "комнаты должны оставлять хотя бы одну стену у края карты",
            ));
        }
        if rooms.edge_margin > MAX_DIMENSION {
            return Err(ConfigError::invalid(
                "rooms.edge_margin",
                format!("не больше {MAX_DIMENSION}, получено {}", rooms.edge_margin),
            ));
        }

        let ratio = self.corridors.extra_ratio;
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(ConfigError::invalid(
                "corridors.extra_ratio",
                format!("ожидается конечное неотрицательное число, получено {ratio}"),
            ));
        }

        let smoothing = &self.smoothing;
        if smoothing.birth_limit > 8 {
            return Err(ConfigError::invalid("smoothing.birth_limit", "соседей всего 8"));
        }
        if smoothing.death_limit > 8 {
            return Err(ConfigError::invalid("smoothing.death_limit", "соседей всего 8"));
        }

        Ok(())
    }
}
