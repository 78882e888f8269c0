//! Выгрузка сгенерированного этажа: PNG-превью и JSON-снимок.

use crate::grid::Grid;
use crate::rooms::Room;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

const ROOM_OUTLINE: Rgba<u8> = Rgba([200, 60, 40, 255]);

/// Сериализуемый снимок этажа для отладки и внешних инструментов
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorSnapshot {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub rooms: Vec<Room>,
    /// Строки карты: `#` — стена, `.` — пол
    pub rows: Vec<String>,
}

impl FloorSnapshot {
    #[must_use]
    pub fn new(grid: &Grid, rooms: &[Room], seed: u64) -> Self {
        let rows = (0..grid.height())
            .map(|y| (0..grid.width()).map(|x| grid.tile(x, y).glyph()).collect())
            .collect();
        Self {
            width: grid.width(),
            height: grid.height(),
            seed,
            rooms: rooms.to_vec(),
            rows,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn save_as_json(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// RGBA-пиксели сетки, по одному на клетку.
#[must_use]
pub fn to_rgba_image(grid: &Grid) -> Vec<u8> {
    grid.tiles().iter().flat_map(|t| t.to_rgba()).collect()
}

/// Сохраняет превью этажа: клетка = `scale × scale` пикселей, комнаты обведены рамкой.
pub fn save_floor_png(
    grid: &Grid,
    rooms: &[Room],
    path: &str,
    scale: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    if grid.width() == 0 || grid.height() == 0 {
        return Err("Cannot render an empty floor".into());
    }
    let scale = scale.max(1);
    let (width, height) = (grid.width() as u32, grid.height() as u32);

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, to_rgba_image(grid))
            .ok_or("Failed to create image buffer")?;
    let mut img = imageops::resize(&img, width * scale, height * scale, FilterType::Nearest);

    for room in rooms {
        let rect = Rect::at(room.x * scale as i32, room.y * scale as i32)
            .of_size(room.width as u32 * scale, room.height as u32 * scale);
        draw_hollow_rect_mut(&mut img, rect, ROOM_OUTLINE);
    }

    img.save(path)?;
    Ok(())
}
