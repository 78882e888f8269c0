use serde::{Deserialize, Serialize};
use std::fmt;

/// Состояние клетки этажа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
}

impl Tile {
    /// Символ клетки в текстовом представлении карты.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        match self {
            Tile::Wall => [40, 36, 48, 255],
            Tile::Floor => [196, 180, 140, 255],
        }
    }
}

/// Целочисленная координата на сетке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn manhattan(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// 4-связные соседи
pub const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Двумерный буфер клеток фиксированного размера.
///
/// Любое чтение за пределами `[0, width) × [0, height)` возвращает `Wall`,
/// любая запись туда игнорируется. Размеры не меняются за время жизни сетки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    data: Vec<Tile>,
}

impl Grid {
    /// Создаёт сетку, целиком заполненную стенами. Отрицательные размеры считаются нулём.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            data: vec![Tile::Wall; (width as usize) * (height as usize)],
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }

    #[must_use]
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Wall, |idx| self.data[idx])
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx] = tile;
        }
    }

    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Tile::Floor
    }

    pub fn fill(&mut self, tile: Tile) {
        self.data.fill(tile);
    }

    /// Клетки построчно, слева направо и сверху вниз.
    pub fn tiles(&self) -> &[Tile] {
        &self.data
    }

    pub(crate) fn replace_tiles(&mut self, data: Vec<Tile>) {
        debug_assert_eq!(data.len(), self.data.len());
        self.data = data;
    }

    /// Все клетки пола в построчном порядке.
    #[must_use]
    pub fn floor_tiles(&self) -> Vec<Point> {
        let width = self.width.max(1) as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == Tile::Floor)
            .map(|(i, _)| Point::new((i % width) as i32, (i / width) as i32))
            .collect()
    }

    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.data.iter().filter(|&&t| t == Tile::Floor).count()
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row: String = (0..self.width).map(|x| self.tile(x, y).glyph()).collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn grid_from_ascii(rows: &[&str]) -> Grid {
    let height = rows.len() as i32;
    let width = rows.first().map_or(0, |r| r.len()) as i32;
    let mut grid = Grid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c == '.' {
                grid.set_tile(x as i32, y as i32, Tile::Floor);
            }
        }
    }
    grid
}
