use clap::Parser;
use dungeongen::export::{FloorSnapshot, save_floor_png};
use dungeongen::{GeneratorConfig, MapGenerator};
use std::path::PathBuf;

/// Генератор этажей подземелья
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (по умолчанию встроенные параметры)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Переопределить сид из конфигурации
    #[arg(short, long)]
    seed: Option<u64>,

    /// Переопределить ширину карты
    #[arg(long)]
    width: Option<i32>,

    /// Переопределить высоту карты
    #[arg(long)]
    height: Option<i32>,

    /// Путь для сохранения PNG-превью
    #[arg(long)]
    png: Option<PathBuf>,

    /// Масштаб превью: пикселей на клетку
    #[arg(long, default_value_t = 8)]
    scale: u32,

    /// Путь для сохранения JSON-снимка
    #[arg(long)]
    json: Option<PathBuf>,

    /// Напечатать карту в терминал
    #[arg(long)]
    ascii: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            println!("🔍 Загрузка конфигурации из {}...", path.display());
            GeneratorConfig::from_toml_file(path)?
        }
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }

    println!(
        "Генерация этажа (размер: {}×{}, сид: {})...",
        config.width, config.height, config.seed
    );
    let seed = config.seed;
    let mut generator = MapGenerator::from_config(config)?;
    let summary = generator.generate();
    println!(
        "Комнат: {}, коридоров: {}, клеток пола: {}, сшито компонент: {}",
        summary.rooms, summary.corridors, summary.floor_tiles, summary.repair.components_before
    );

    if cli.ascii {
        print!("{}", generator.grid());
    }

    if let Some(path) = &cli.png {
        println!("Сохранение превью в {path:?}");
        let path = path.to_str().ok_or("Non UTF-8 output path")?;
        save_floor_png(generator.grid(), generator.rooms(), path, cli.scale)?;
    }

    if let Some(path) = &cli.json {
        println!("Сохранение снимка в {path:?}");
        let path = path.to_str().ok_or("Non UTF-8 output path")?;
        FloorSnapshot::new(generator.grid(), generator.rooms(), seed).save_as_json(path)?;
    }

    println!("\nГотово!");
    Ok(())
}
