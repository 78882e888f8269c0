use crate::config::SmoothingSettings;
use crate::grid::{Grid, Tile};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Число стен среди 8 соседей. Клетки за границей сетки считаются стенами.
#[must_use]
pub fn count_wall_neighbors(grid: &Grid, x: i32, y: i32) -> u8 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if (dx, dy) != (0, 0) && grid.tile(x + dx, y + dy) == Tile::Wall {
                count += 1;
            }
        }
    }
    count
}

fn next_tile(grid: &Grid, settings: &SmoothingSettings, x: i32, y: i32) -> Tile {
    let walls = count_wall_neighbors(grid, x, y);
    match grid.tile(x, y) {
        Tile::Wall if walls < settings.birth_limit => Tile::Floor,
        Tile::Floor if walls > settings.death_limit => Tile::Wall,
        tile => tile,
    }
}

/// Один синхронный шаг автомата: каждая клетка считается по предыдущему состоянию.
fn step(grid: &Grid, settings: &SmoothingSettings) -> Vec<Tile> {
    let width = grid.width();
    let cells = 0..grid.tiles().len();

    #[cfg(feature = "parallel")]
    let cells = cells.into_par_iter();

    cells
        .map(|i| {
            let x = (i % width as usize) as i32;
            let y = (i / width as usize) as i32;
            next_tile(grid, settings, x, y)
        })
        .collect()
}

/// Сглаживает прямоугольный каркас в пещероподобную форму.
///
/// Связность не сохраняется: тонкие коридоры часто исчезают,
/// поэтому после этого шага обязательно восстановление связности.
pub fn smooth(grid: &mut Grid, settings: &SmoothingSettings) {
    for _ in 0..settings.iterations {
        let next = step(grid, settings);
        grid.replace_tiles(next);
    }
    log::debug!(
        "smoothing: {} iterations, {} floor tiles left",
        settings.iterations,
        grid.floor_count()
    );
}
