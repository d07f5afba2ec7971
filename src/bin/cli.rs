use clap::Parser;
use scenario_template::{MapTemplate, MidgardId, RecordWriter, SeededRandom};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Подготовка шаблона случайного сценария
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к шаблону в формате TOML
    #[arg(short, long)]
    config: PathBuf,

    /// Сид для выбора случайных рас
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Куда сохранить записи переменных сценария (JSON)
    #[arg(short, long, default_value = "variables.json")]
    output: PathBuf,

    /// Идентификатор объекта переменных сценария
    #[arg(long, default_value = "S143SV0000")]
    object_id: MidgardId,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Загрузка шаблона {:?}...", cli.config);
    let mut template = MapTemplate::from_toml_file(&cli.config)?;

    template.prepare(&mut SeededRandom::new(cli.seed))?;
    println!("Шаблон: {}", template.settings.name);
    for (slot, race) in template.settings.races.iter().enumerate() {
        println!("  игрок {}: {:?}", slot + 1, race);
    }

    let variables = template.scenario_variables(cli.object_id);
    let mut writer = RecordWriter::new();
    variables.serialize(&mut writer)?;

    println!("Сохранение переменных в {:?}", cli.output);
    fs::write(&cli.output, serde_json::to_string_pretty(writer.records())?)?;

    println!("\nГотово!");
    Ok(())
}
