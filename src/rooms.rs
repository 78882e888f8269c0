// src/rooms.rs
use crate::config::RoomSettings;
use crate::grid::{Grid, Point, Tile};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Прямоугольная комната из клеток пола
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Пересекаются ли прямоугольники, расширенные на `margin` клеток с каждой стороны.
    #[must_use]
    pub fn intersects_with_margin(&self, other: &Room, margin: i32) -> bool {
        self.x - margin < other.x + other.width + margin
            && other.x - margin < self.x + self.width + margin
            && self.y - margin < other.y + other.height + margin
            && other.y - margin < self.y + self.height + margin
    }

    fn carve(&self, grid: &mut Grid) {
        for y in self.y..self.y + self.height {
            for x in self.x..self.x + self.width {
                grid.set_tile(x, y, Tile::Floor);
            }
        }
    }
}

/// Размещает непересекающиеся комнаты и вырезает их в сетке.
///
/// Слот, для которого не нашлось места за `max_attempts` попыток, пропускается.
/// Пустой результат допустим (например, если сетка меньше минимальной комнаты).
pub fn place_rooms<R: Rng + ?Sized>(
    grid: &mut Grid,
    settings: &RoomSettings,
    rng: &mut R,
) -> Vec<Room> {
    let target = rng.gen_range(settings.count_min..=settings.count_max);
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..target {
        for _ in 0..settings.max_attempts {
            let Some(candidate) = sample_room(grid, settings, rng) else {
                continue;
            };

            // Зазор в одну клетку: соседние комнаты никогда не делят стену
            if rooms.iter().any(|r| r.intersects_with_margin(&candidate, 1)) {
                continue;
            }

            candidate.carve(grid);
            rooms.push(candidate);
            break;
        }
    }

    log::debug!("rooms: placed {} of {} target", rooms.len(), target);
    rooms
}

fn sample_room<R: Rng + ?Sized>(
    grid: &Grid,
    settings: &RoomSettings,
    rng: &mut R,
) -> Option<Room> {
    let width = rng.gen_range(settings.min_size..=settings.max_size);
    let height = rng.gen_range(settings.min_size..=settings.max_size);
    let margin = settings.edge_margin;

    let x_end = grid.width().saturating_sub(width).saturating_sub(margin);
    let y_end = grid.height().saturating_sub(height).saturating_sub(margin);
    if x_end <= margin || y_end <= margin {
        return None;
    }

    let x = rng.gen_range(margin..x_end);
    let y = rng.gen_range(margin..y_end);
    Some(Room::new(x, y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn margin_intersection() {
        let a = Room::new(2, 2, 5, 5);
        // Стык вплотную и через одну стену: при зазоре 1 оба случая — пересечение
        assert!(a.intersects_with_margin(&Room::new(7, 2, 3, 3), 1));
        assert!(a.intersects_with_margin(&Room::new(8, 2, 3, 3), 1));
        // Две стены между комнатами уже допустимы
        assert!(!a.intersects_with_margin(&Room::new(9, 2, 3, 3), 1));
        assert!(!a.intersects_with_margin(&Room::new(9, 2, 3, 3), 0));
        assert!(a.intersects_with_margin(&Room::new(3, 3, 1, 1), 0));
    }

    #[test]
    fn center_uses_integer_division() {
        assert_eq!(Room::new(2, 3, 5, 6).center(), Point::new(4, 6));
        assert_eq!(Room::new(0, 0, 1, 1).center(), Point::new(0, 0));
    }

    #[test]
    fn rooms_stay_inside_with_margin_and_do_not_overlap() {
        let settings = RoomSettings::default();
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut grid = Grid::new(50, 38);
            let rooms = place_rooms(&mut grid, &settings, &mut rng);

            assert!(rooms.len() <= settings.count_max);
            for (i, room) in rooms.iter().enumerate() {
                assert!(room.x >= 1 && room.y >= 1, "seed {seed}: {room:?}");
                assert!(room.x + room.width <= grid.width() - 1, "seed {seed}: {room:?}");
                assert!(room.y + room.height <= grid.height() - 1, "seed {seed}: {room:?}");
                for other in &rooms[i + 1..] {
                    assert!(!room.intersects_with_margin(other, 1), "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn placed_rooms_are_carved_as_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut grid = Grid::new(60, 40);
        let rooms = place_rooms(&mut grid, &RoomSettings::default(), &mut rng);
        assert!(!rooms.is_empty());

        let carved: usize = rooms.iter().map(|r| (r.width * r.height) as usize).sum();
        assert_eq!(grid.floor_count(), carved);
        for room in &rooms {
            for y in room.y..room.y + room.height {
                for x in room.x..room.x + room.width {
                    assert!(grid.is_walkable(x, y));
                }
            }
        }
    }

    #[test]
    fn contains_is_half_open() {
        let room = Room::new(2, 3, 4, 2);
        assert!(room.contains(Point::new(2, 3)));
        assert!(room.contains(Point::new(5, 4)));
        assert!(!room.contains(Point::new(6, 4)));
        assert!(!room.contains(Point::new(5, 5)));
        assert!(!room.contains(Point::new(1, 3)));
    }

    #[test]
    fn extreme_sizes_do_not_overflow() {
        let settings = RoomSettings {
            count_min: 1,
            count_max: 1,
            min_size: i32::MAX,
            max_size: i32::MAX,
            max_attempts: 3,
            edge_margin: i32::MAX,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut grid = Grid::new(0, 0);
        assert!(place_rooms(&mut grid, &settings, &mut rng).is_empty());
    }

    #[test]
    fn tiny_grid_gets_no_rooms() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = Grid::new(4, 4);
        let rooms = place_rooms(&mut grid, &RoomSettings::default(), &mut rng);
        assert!(rooms.is_empty());
        assert_eq!(grid.floor_count(), 0);
    }

    #[test]
    fn crowded_grid_skips_slots() {
        // На 14×14 помещается не больше одной комнаты 5×5 с отступами
        let settings = RoomSettings {
            min_size: 5,
            max_size: 5,
            ..RoomSettings::default().with_count(6)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut grid = Grid::new(14, 14);
        let rooms = place_rooms(&mut grid, &settings, &mut rng);
        assert_eq!(rooms.len(), 1);
    }
}
