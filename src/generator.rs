// src/generator.rs
//! Оркестратор генерации этажа
//!
//! Фазы идут строго по порядку и не повторяются:
//! `AllWalls → RoomsPlaced → RoomsConnected → Smoothed → ConnectivityRepaired`.
//! Ни одна фаза не может прервать конвейер: при неудаче она просто делает меньше
//! (меньше комнат, нет коридоров, нет пола).

use crate::config::{GeneratorConfig, MAX_DIMENSION};
use crate::connectivity::{RepairReport, repair_connectivity};
use crate::corridors::connect_rooms;
use crate::error::ConfigError;
use crate::grid::{Grid, Point, Tile};
use crate::rooms::{Room, place_rooms};
use crate::smoothing::smooth;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Текущая фаза генерации
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GenerationState {
    Uninitialized,
    AllWalls,
    RoomsPlaced,
    RoomsConnected,
    Smoothed,
    ConnectivityRepaired,
}

/// Сводка одного запуска `generate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub rooms: usize,
    pub corridors: usize,
    pub floor_tiles: usize,
    pub repair: RepairReport,
}

/// Генератор одного этажа: владеет сеткой, списком комнат и источником случайности.
pub struct MapGenerator<R = ChaCha8Rng> {
    config: GeneratorConfig,
    grid: Grid,
    rooms: Vec<Room>,
    state: GenerationState,
    rng: R,
}

impl MapGenerator<ChaCha8Rng> {
    /// Генератор с `ChaCha8Rng`, засеянным `config.seed`.
    pub fn from_config(config: GeneratorConfig) -> Result<Self, ConfigError> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::new(config, rng)
    }

    /// Параметры по умолчанию с заданными размерами и сидом.
    #[must_use]
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Self {
        Self::with_rng(width, height, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> MapGenerator<R> {
    /// Проверяет конфигурацию и создаёт сетку из одних стен.
    pub fn new(config: GeneratorConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    /// Параметры по умолчанию с заданными размерами, приведёнными к `0..=MAX_DIMENSION`.
    pub fn with_rng(width: i32, height: i32, rng: R) -> Self {
        let width = width.clamp(0, MAX_DIMENSION);
        let height = height.clamp(0, MAX_DIMENSION);
        Self::build(GeneratorConfig::with_size(width, height), rng)
    }

    fn build(config: GeneratorConfig, rng: R) -> Self {
        let mut generator = Self {
            grid: Grid::new(config.width, config.height),
            config,
            rooms: Vec::new(),
            state: GenerationState::Uninitialized,
            rng,
        };
        generator.reset();
        generator
    }

    fn reset(&mut self) {
        self.grid.fill(Tile::Wall);
        self.rooms.clear();
        self.state = GenerationState::AllWalls;
    }

    /// Запускает весь конвейер с нуля, заменяя предыдущий этаж.
    pub fn generate(&mut self) -> GenerationSummary {
        self.reset();

        self.rooms = place_rooms(&mut self.grid, &self.config.rooms, &mut self.rng);
        self.state = GenerationState::RoomsPlaced;

        let corridors = connect_rooms(
            &mut self.grid,
            &self.rooms,
            &self.config.corridors,
            &mut self.rng,
        );
        self.state = GenerationState::RoomsConnected;

        smooth(&mut self.grid, &self.config.smoothing);
        self.state = GenerationState::Smoothed;

        let repair = repair_connectivity(&mut self.grid, &mut self.rng);
        self.state = GenerationState::ConnectivityRepaired;

        let summary = GenerationSummary {
            rooms: self.rooms.len(),
            corridors,
            floor_tiles: self.grid.floor_count(),
            repair,
        };
        log::info!(
            "floor {}×{}: {} rooms, {} corridors, {} floor tiles, {} components stitched",
            self.grid.width(),
            self.grid.height(),
            summary.rooms,
            summary.corridors,
            summary.floor_tiles,
            summary.repair.components_before
        );
        summary
    }

    #[must_use]
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.grid.tile(x, y)
    }

    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.is_walkable(x, y)
    }

    /// Комнаты в порядке размещения; может быть пустым.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Случайная клетка пола (равномерно). Если пола нет — центр сетки.
    pub fn random_floor_tile(&mut self) -> Point {
        let floor = self.grid.floor_tiles();
        if floor.is_empty() {
            return self.grid.center();
        }
        floor[self.rng.gen_range(0..floor.len())]
    }

    /// Центр комнаты `index` (по модулю числа комнат).
    /// Без комнат — случайная клетка пола.
    pub fn room_center(&mut self, index: usize) -> Point {
        if self.rooms.is_empty() {
            return self.random_floor_tile();
        }
        self.rooms[index % self.rooms.len()].center()
    }
}
