use candle_canvas::demo::{DemoAction, DemoConfig, DemoController, Surface, TextLog};
use candle_canvas::module::{ModuleLoader, ModuleSource};
use candle_canvas::telemetry::init_default_tracing;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_ACTIONS: &str = "init,add-candle,add-many,render,destroy";

#[derive(Debug)]
struct CliArgs {
    module: Option<PathBuf>,
    config: Option<PathBuf>,
    actions: Vec<DemoAction>,
    seed: Option<u64>,
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let _ = init_default_tracing();
    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            DemoConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DemoConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let source = match args.module {
        Some(path) => ModuleSource::descriptor(path),
        None => ModuleSource::default(),
    };
    let loader = Arc::new(ModuleLoader::new(source));
    let mut controller =
        DemoController::new(loader, config, TextLog::new()).map_err(|err| err.to_string())?;

    for action in &args.actions {
        controller.run(*action).await;
    }
    print!("{}", controller.log().text());

    if let Some(output) = &args.output {
        write_ppm(output, controller.surface())?;
        println!("wrote {}", output.display());
    }
    Ok(())
}

/// Binary PPM; alpha is dropped.
fn write_ppm(path: &Path, surface: &Surface) -> Result<(), String> {
    let header = format!("P6\n{} {}\n255\n", surface.width(), surface.height());
    let mut bytes = Vec::with_capacity(header.len() + surface.as_bytes().len() / 4 * 3);
    bytes.extend_from_slice(header.as_bytes());
    for pixel in surface.as_bytes().chunks_exact(4) {
        bytes.extend_from_slice(&pixel[..3]);
    }
    fs::write(path, bytes).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_actions(raw: &str) -> Result<Vec<DemoAction>, String> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.parse::<DemoAction>().map_err(|err| err.to_string()))
        .collect()
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut module = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut actions = parse_actions(DEFAULT_ACTIONS)?;
    let mut seed = None::<u64>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--module" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --module".to_owned())?;
                module = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--actions" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --actions".to_owned())?;
                actions = parse_actions(&value)?;
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --seed".to_owned())?;
                seed = Some(
                    value
                        .parse()
                        .map_err(|err| format!("invalid --seed `{value}`: {err}"))?,
                );
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                return Err(
                    "usage: chart_demo [--module <descriptor.json>] [--config <demo.json>] [--actions init,add-candle,add-many,render,destroy] [--seed <u64>] [--output <file.ppm>]"
                        .to_owned(),
                );
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    Ok(CliArgs {
        module,
        config,
        actions,
        seed,
        output,
    })
}
