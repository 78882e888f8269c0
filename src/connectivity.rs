use crate::corridors::carve_l_corridor;
use crate::grid::{Grid, ORTHOGONAL, Point};
use rand::Rng;
use std::collections::VecDeque;

/// Верхняя граница числа проходов сшивки. Одного прохода всегда достаточно:
/// каждый вырезанный коридор — непрерывный путь по полу.
const MAX_REPAIR_PASSES: usize = 4;

/// Итог восстановления связности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepairReport {
    pub components_before: usize,
    pub corridors_carved: usize,
    pub components_after: usize,
}

/// Обход в ширину по 4-связным клеткам пола от `start`.
///
/// Помечает посещённые клетки в `visited` (построчный индекс) и возвращает
/// компоненту в порядке обхода. Пустой вектор, если `start` не пол или уже посещён.
pub fn flood_fill(grid: &Grid, start: Point, visited: &mut [bool]) -> Vec<Point> {
    let width = grid.width() as usize;
    let index = |p: Point| (p.y as usize) * width + (p.x as usize);

    if !grid.is_walkable(start.x, start.y) || visited[index(start)] {
        return Vec::new();
    }

    let mut component = Vec::new();
    let mut queue = VecDeque::new();
    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(p) = queue.pop_front() {
        component.push(p);
        for &(dx, dy) in &ORTHOGONAL {
            let next = Point::new(p.x + dx, p.y + dy);
            if grid.is_walkable(next.x, next.y) && !visited[index(next)] {
                visited[index(next)] = true;
                queue.push_back(next);
            }
        }
    }

    component
}

/// Все компоненты связности пола в порядке обнаружения (построчный обход).
#[must_use]
pub fn find_components(grid: &Grid) -> Vec<Vec<Point>> {
    let mut visited = vec![false; grid.tiles().len()];
    let mut components = Vec::new();

    for tile in grid.floor_tiles() {
        let component = flood_fill(grid, tile, &mut visited);
        if !component.is_empty() {
            components.push(component);
        }
    }

    components
}

#[must_use]
pub fn count_components(grid: &Grid) -> usize {
    find_components(grid).len()
}

/// Ближайшая по Манхэттену пара точек из двух множеств (полный перебор).
///
/// При равных расстояниях побеждает первая найденная пара.
#[must_use]
pub fn nearest_pair(a: &[Point], b: &[Point]) -> Option<(Point, Point)> {
    let mut best: Option<(u32, Point, Point)> = None;

    for &p in a {
        for &q in b {
            let dist = p.manhattan(q);
            if best.is_none_or(|(d, _, _)| dist < d) {
                best = Some((dist, p, q));
            }
        }
    }

    best.map(|(_, p, q)| (p, q))
}

/// Сшивает разрозненные области пола в одну.
///
/// Соседние компоненты в порядке обнаружения соединяются Г-образным коридором
/// между ближайшими клетками. Пол только добавляется, никогда не удаляется.
pub fn repair_connectivity<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> RepairReport {
    let mut components = find_components(grid);
    let mut report = RepairReport {
        components_before: components.len(),
        ..RepairReport::default()
    };

    for _ in 0..MAX_REPAIR_PASSES {
        if components.len() <= 1 {
            break;
        }

        for pair in components.windows(2) {
            if let Some((p, q)) = nearest_pair(&pair[0], &pair[1]) {
                carve_l_corridor(grid, p, q, rng);
                report.corridors_carved += 1;
            }
        }

        components = find_components(grid);
    }

    report.components_after = components.len();
    if report.components_after > 1 {
        log::warn!(
            "connectivity: {} components left after {} passes",
            report.components_after,
            MAX_REPAIR_PASSES
        );
    } else {
        log::debug!(
            "connectivity: {} components joined with {} corridors",
            report.components_before,
            report.corridors_carved
        );
    }

    report
}

/// Клетки, достижимые из `start`; удобно для проверок потребителями карты.
#[must_use]
pub fn reachable_from(grid: &Grid, start: Point) -> Vec<Point> {
    let mut visited = vec![false; grid.tiles().len()];
    flood_fill(grid, start, &mut visited)
}

#[must_use]
pub fn is_fully_connected(grid: &Grid) -> bool {
    count_components(grid) <= 1
}
