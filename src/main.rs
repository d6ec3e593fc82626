use std::env;
use std::path::PathBuf;
use std::process;

use log::{error, info};
use translucify::apply::apply;
use translucify::io::{ImageFile, PngDirectory};
use translucify::{FilterKind, FilterParameters};

const USAGE: &str = "Usage: translucify <high-pass|flood-fill> <input> <output-dir> [--config options.json] [--seed X,Y]";

struct Args {
    kind: FilterKind,
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
}

fn parse_seed(value: &str) -> Result<(usize, usize), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("seed must be X,Y, got {value}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad seed x {x}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad seed y {y}: {e}"))?;
    Ok((x, y))
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut seed = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config needs a path")?;
                config = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs X,Y")?;
                seed = Some(parse_seed(value)?);
            }
            other => positional.push(other.to_string()),
        }
    }

    let [mode, input, output] = positional.as_slice() else {
        return Err(USAGE.to_string());
    };

    let kind = match (mode.as_str(), seed) {
        ("high-pass", None) => FilterKind::HighPass,
        ("high-pass", Some(_)) => return Err("--seed only applies to flood-fill".to_string()),
        ("flood-fill", None) => FilterKind::flood_fill_from_corner(),
        ("flood-fill", Some((seed_x, seed_y))) => FilterKind::FloodFill { seed_x, seed_y },
        (other, _) => return Err(format!("unknown filter {other}\n{USAGE}")),
    };

    Ok(Args {
        kind,
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        config,
    })
}

fn run(args: Args) -> Result<bool, String> {
    let params = match &args.config {
        Some(path) => FilterParameters::load(path).map_err(|e| e.to_string())?,
        None => FilterParameters::default(),
    };
    info!(
        "{:?} with threshold={} tolerance={}",
        args.kind, params.threshold_value, params.tolerance_fraction
    );

    let images = ImageFile::discover(&args.input).map_err(|e| e.to_string())?;
    info!("{} image(s) from {}", images.len(), args.input.display());

    let mut presenter = PngDirectory::create(&args.output).map_err(|e| e.to_string())?;
    let report = apply(images, args.kind, &params, &mut presenter);

    for path in presenter.written() {
        println!("{}", path.display());
    }
    for (id, err) in &report.failures {
        error!("{id}: {err}");
    }
    Ok(report.is_success())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(message) => {
            eprintln!("{message}");
            process::exit(1);
        }
    }
}
