// src/corridors.rs
use crate::config::{CorridorSettings, CorridorStrategy};
use crate::grid::{Grid, Point, Tile};
use crate::rooms::Room;
use petgraph::algo::min_spanning_tree;
use petgraph::data::Element;
use petgraph::graph::UnGraph;
use rand::Rng;

/// Горизонтальный отрезок на строке `y`, включая оба конца. Обрезается по сетке.
pub fn carve_horizontal(grid: &mut Grid, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        grid.set_tile(x, y, Tile::Floor);
    }
}

/// Вертикальный отрезок в столбце `x`, включая оба конца. Обрезается по сетке.
pub fn carve_vertical(grid: &mut Grid, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        grid.set_tile(x, y, Tile::Floor);
    }
}

/// Г-образный коридор из `a` в `b`.
///
/// С вероятностью ½ сначала идёт по строке `a`, затем по столбцу `b`,
/// иначе сначала по столбцу `a`, затем по строке `b`. В обоих случаях
/// получается непрерывный путь по полу между `a` и `b`.
pub fn carve_l_corridor<R: Rng + ?Sized>(grid: &mut Grid, a: Point, b: Point, rng: &mut R) {
    if rng.gen_bool(0.5) {
        carve_horizontal(grid, a.x, b.x, a.y);
        carve_vertical(grid, a.y, b.y, b.x);
    } else {
        carve_vertical(grid, a.y, b.y, a.x);
        carve_horizontal(grid, a.x, b.x, b.y);
    }
}

/// Соединяет комнаты коридорами: основная сеть плюс случайные дополнительные связи.
///
/// Возвращает число вырезанных коридоров. Меньше двух комнат — ничего не делает.
/// Связность пола после этого шага не проверяется.
pub fn connect_rooms<R: Rng + ?Sized>(
    grid: &mut Grid,
    rooms: &[Room],
    settings: &CorridorSettings,
    rng: &mut R,
) -> usize {
    if rooms.len() < 2 {
        return 0;
    }

    let mut carved = 0;
    for (i, j) in backbone_edges(rooms, settings.strategy) {
        carve_l_corridor(grid, rooms[i].center(), rooms[j].center(), rng);
        carved += 1;
    }

    // Петли: лишние пары выбираются независимо, совпадение пропускается
    let extra = (rooms.len() as f32 * settings.extra_ratio).ceil() as usize;
    for _ in 0..extra {
        let i = rng.gen_range(0..rooms.len());
        let j = rng.gen_range(0..rooms.len());
        if i != j {
            carve_l_corridor(grid, rooms[i].center(), rooms[j].center(), rng);
            carved += 1;
        }
    }

    log::debug!(
        "corridors: {} carved for {} rooms ({:?})",
        carved,
        rooms.len(),
        settings.strategy
    );
    carved
}

/// Пары индексов комнат основной сети в порядке вырезания.
fn backbone_edges(rooms: &[Room], strategy: CorridorStrategy) -> Vec<(usize, usize)> {
    match strategy {
        CorridorStrategy::Chain => (1..rooms.len()).map(|i| (i - 1, i)).collect(),
        CorridorStrategy::MinimumSpanningTree => spanning_tree_edges(rooms),
    }
}

fn spanning_tree_edges(rooms: &[Room]) -> Vec<(usize, usize)> {
    let mut graph = UnGraph::<usize, u32>::with_capacity(rooms.len(), rooms.len() * rooms.len() / 2);
    let nodes: Vec<_> = (0..rooms.len()).map(|i| graph.add_node(i)).collect();

    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            let weight = rooms[i].center().manhattan(rooms[j].center());
            graph.add_edge(nodes[i], nodes[j], weight);
        }
    }

    min_spanning_tree(&graph)
        .filter_map(|element| match element {
            Element::Edge { source, target, .. } => Some((source, target)),
            Element::Node { .. } => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::count_components;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn carve(grid: &mut Grid, rooms: &[Room]) {
        for room in rooms {
            for y in room.y..room.y + room.height {
                for x in room.x..room.x + room.width {
                    grid.set_tile(x, y, Tile::Floor);
                }
            }
        }
    }

    #[test]
    fn segments_include_both_ends_in_any_order() {
        let mut grid = Grid::new(8, 8);
        carve_horizontal(&mut grid, 5, 2, 1);
        carve_vertical(&mut grid, 6, 3, 7);
        for x in 2..=5 {
            assert!(grid.is_walkable(x, 1));
        }
        for y in 3..=6 {
            assert!(grid.is_walkable(7, y));
        }
        assert_eq!(grid.floor_count(), 8);
    }

    #[test]
    fn segments_are_clipped_to_the_grid() {
        let mut grid = Grid::new(5, 5);
        carve_horizontal(&mut grid, -10, 10, 2);
        carve_vertical(&mut grid, -3, 30, 9);
        carve_horizontal(&mut grid, 0, 4, -1);
        assert_eq!(grid.floor_count(), 5);
    }

    #[test]
    fn l_corridor_joins_its_endpoints() {
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut grid = Grid::new(20, 20);
            let (a, b) = (Point::new(2, 15), Point::new(17, 3));
            carve_l_corridor(&mut grid, a, b, &mut rng);

            assert!(grid.is_walkable(a.x, a.y));
            assert!(grid.is_walkable(b.x, b.y));
            assert_eq!(count_components(&grid), 1);
            // Длина Г-образного пути = манхэттенское расстояние + 1
            assert_eq!(grid.floor_count(), a.manhattan(b) as usize + 1);
        }
    }

    #[test]
    fn fewer_than_two_rooms_is_a_no_op() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut grid = Grid::new(20, 20);
        let rooms = [Room::new(2, 2, 5, 5)];
        carve(&mut grid, &rooms);
        let before = grid.clone();

        let carved = connect_rooms(&mut grid, &rooms, &CorridorSettings::default(), &mut rng);
        assert_eq!(carved, 0);
        assert_eq!(grid, before);
        assert_eq!(connect_rooms(&mut grid, &[], &CorridorSettings::default(), &mut rng), 0);
    }

    #[test]
    fn every_strategy_joins_all_rooms() {
        let rooms = [
            Room::new(2, 2, 5, 5),
            Room::new(30, 25, 6, 5),
            Room::new(10, 20, 5, 7),
            Room::new(35, 3, 8, 6),
        ];
        for strategy in [CorridorStrategy::Chain, CorridorStrategy::MinimumSpanningTree] {
            let settings = CorridorSettings {
                strategy,
                extra_ratio: 0.0,
            };
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            let mut grid = Grid::new(50, 38);
            carve(&mut grid, &rooms);
            assert_eq!(count_components(&grid), 4);

            let carved = connect_rooms(&mut grid, &rooms, &settings, &mut rng);
            assert_eq!(carved, 3);
            assert_eq!(count_components(&grid), 1, "{strategy:?}");
        }
    }

    #[test]
    fn spanning_tree_prefers_close_rooms() {
        // Порядок размещения: дальняя, ближняя, средняя
        let rooms = [
            Room::new(0, 0, 1, 1),
            Room::new(40, 0, 1, 1),
            Room::new(2, 0, 1, 1),
        ];
        let mut edges: Vec<_> = spanning_tree_edges(&rooms)
            .into_iter()
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();
        edges.sort_unstable();
        assert_eq!(edges, vec![(0, 2), (1, 2)]);

        assert_eq!(
            backbone_edges(&rooms, CorridorStrategy::Chain),
            vec![(0, 1), (1, 2)]
        );
    }

    #[test]
    fn extra_ratio_bounds_corridor_count() {
        let rooms = [
            Room::new(2, 2, 5, 5),
            Room::new(12, 2, 5, 5),
            Room::new(22, 2, 5, 5),
            Room::new(32, 2, 5, 5),
            Room::new(2, 20, 5, 5),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut grid = Grid::new(50, 38);
        let carved = connect_rooms(&mut grid, &rooms, &CorridorSettings::default(), &mut rng);
        // 4 в цепочке и до ceil(5 * 0.5) = 3 дополнительных
        assert!((4..=7).contains(&carved));
    }
}
