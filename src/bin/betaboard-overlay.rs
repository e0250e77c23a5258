//! CLI for rendering hold outlines and resampling playback files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use betaboard_overlay::config::{self, AppSettings, MAX_BORDER_THICKNESS_PX};
use betaboard_overlay::logging;
use betaboard_overlay::model::Hold;
use betaboard_overlay::numbering::assign_hold_numbers;
use betaboard_overlay::overlay::{BorderStyle, encode_png, render_hold_overlays};
use betaboard_overlay::playback::{Playback, Resampler, Sample};
use serde::Serialize;
use tracing::info;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(command) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    match command {
        Command::Holds(options) => run_holds(&options),
        Command::Resample(options) => run_resample(&options),
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Holds(HoldsOptions),
    Resample(ResampleOptions),
}

#[derive(Debug, Default, PartialEq)]
struct HoldsOptions {
    input: PathBuf,
    out_dir: PathBuf,
    thickness: Option<u32>,
    config: Option<PathBuf>,
}

#[derive(Debug, Default, PartialEq)]
struct ResampleOptions {
    input: PathBuf,
    target_hz: Option<f64>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
}

/// One entry of `overlays.json`.
#[derive(Serialize)]
struct OverlayManifestEntry {
    hold_id: String,
    number: Option<u32>,
    origin: [i64; 2],
    width: u32,
    height: u32,
    file: String,
    data_url: String,
}

fn run_holds(options: &HoldsOptions) -> Result<(), String> {
    let settings = load_settings(options.config.as_deref())?;
    let holds: Vec<Hold> = read_json(&options.input)?;
    let mut style = BorderStyle::from_settings(&settings.overlay);
    if let Some(thickness) = options.thickness {
        style.thickness_px = thickness;
    }

    let overlays = render_hold_overlays(&holds, &style).map_err(|err| err.to_string())?;
    let numbers = assign_hold_numbers(&holds);
    std::fs::create_dir_all(&options.out_dir)
        .map_err(|err| format!("Create {} failed: {err}", options.out_dir.display()))?;

    let mut manifest = Vec::with_capacity(holds.len());
    let mut taken = HashSet::with_capacity(holds.len());
    for hold in &holds {
        let Some(overlay) = overlays.get(&hold.id) else {
            continue;
        };
        let file = unique_file_name(&hold.id, &mut taken);
        let bytes = encode_png(&overlay.image).map_err(|err| format!("{}: {err}", hold.id))?;
        let path = options.out_dir.join(&file);
        std::fs::write(&path, bytes)
            .map_err(|err| format!("Write {} failed: {err}", path.display()))?;
        manifest.push(OverlayManifestEntry {
            hold_id: hold.id.clone(),
            number: numbers.get(&hold.id).copied(),
            origin: [overlay.origin.0, overlay.origin.1],
            width: overlay.width(),
            height: overlay.height(),
            file,
            data_url: overlay.data_url().map_err(|err| err.to_string())?,
        });
    }
    manifest.sort_by_key(|entry| entry.number);
    write_json(&options.out_dir.join("overlays.json"), &manifest)?;
    info!(
        holds = manifest.len(),
        out_dir = %options.out_dir.display(),
        "Wrote hold overlays"
    );
    println!("Wrote {} overlay(s) to {}", manifest.len(), options.out_dir.display());
    Ok(())
}

fn run_resample(options: &ResampleOptions) -> Result<(), String> {
    let resampler = match options.target_hz {
        Some(target) => Resampler::new(target),
        None => Resampler::from_settings(&load_settings(options.config.as_deref())?.playback),
    }
    .map_err(|err| err.to_string())?;
    let playbacks: Vec<Playback<Sample>> = read_json(&options.input)?;
    let resampled = resampler
        .resample_all(&playbacks)
        .map_err(|err| err.to_string())?;
    info!(
        playbacks = resampled.len(),
        target_hz = resampler.target_frequency_hz(),
        "Resampled playbacks"
    );
    match &options.output {
        Some(path) => write_json(path, &resampled),
        None => {
            let json = serde_json::to_string_pretty(&resampled).map_err(|err| err.to_string())?;
            println!("{json}");
            Ok(())
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<AppSettings, String> {
    match path {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("Read {} failed: {err}", path.display()))?;
    serde_json::from_str(&text).map_err(|err| format!("Invalid JSON in {}: {err}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|err| format!("Create {} failed: {err}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    std::fs::write(path, json).map_err(|err| format!("Write {} failed: {err}", path.display()))
}

/// `<stem>.png` for `id`, suffixed with `-2`, `-3`, ... when another hold already took it.
///
/// Names are compared case-insensitively so they stay distinct on any file system.
fn unique_file_name(id: &str, taken: &mut HashSet<String>) -> String {
    let stem = sanitize_file_stem(id);
    let mut candidate = format!("{stem}.png");
    let mut suffix = 2u32;
    while !taken.insert(candidate.to_ascii_lowercase()) {
        candidate = format!("{stem}-{suffix}.png");
        suffix += 1;
    }
    candidate
}

/// Hold ids come from the backend; keep file names to a safe alphabet.
fn sanitize_file_stem(id: &str) -> String {
    id.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

fn parse_args(args: Vec<String>) -> Result<Option<Command>, String> {
    let Some(subcommand) = args.first() else {
        return Err(help_text());
    };
    match subcommand.as_str() {
        "-h" | "--help" => {
            println!("{}", help_text());
            Ok(None)
        }
        "holds" => parse_holds(&args[1..]).map(|opts| opts.map(Command::Holds)),
        "resample" => parse_resample(&args[1..]).map(|opts| opts.map(Command::Resample)),
        unknown => Err(format!("Unknown command: {unknown}\n\n{}", help_text())),
    }
}

fn parse_holds(args: &[String]) -> Result<Option<HoldsOptions>, String> {
    let mut input = None;
    let mut out_dir = None;
    let mut options = HoldsOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--input" => {
                idx += 1;
                input = Some(PathBuf::from(value_for(args, idx, "--input")?));
            }
            "--out-dir" => {
                idx += 1;
                out_dir = Some(PathBuf::from(value_for(args, idx, "--out-dir")?));
            }
            "--thickness" => {
                idx += 1;
                let value = value_for(args, idx, "--thickness")?;
                let thickness = value
                    .parse::<u32>()
                    .ok()
                    .filter(|thickness| *thickness <= MAX_BORDER_THICKNESS_PX)
                    .ok_or_else(|| {
                        format!(
                            "Invalid --thickness value: {value} (expected 0..={MAX_BORDER_THICKNESS_PX})"
                        )
                    })?;
                options.thickness = Some(thickness);
            }
            "--config" => {
                idx += 1;
                options.config = Some(PathBuf::from(value_for(args, idx, "--config")?));
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    options.input = input.ok_or_else(|| "--input is required".to_string())?;
    options.out_dir = out_dir.ok_or_else(|| "--out-dir is required".to_string())?;
    Ok(Some(options))
}

fn parse_resample(args: &[String]) -> Result<Option<ResampleOptions>, String> {
    let mut input = None;
    let mut options = ResampleOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--input" => {
                idx += 1;
                input = Some(PathBuf::from(value_for(args, idx, "--input")?));
            }
            "--target-hz" => {
                idx += 1;
                let value = value_for(args, idx, "--target-hz")?;
                let target = value
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid --target-hz value: {value}"))?;
                options.target_hz = Some(target);
            }
            "--output" => {
                idx += 1;
                options.output = Some(PathBuf::from(value_for(args, idx, "--output")?));
            }
            "--config" => {
                idx += 1;
                options.config = Some(PathBuf::from(value_for(args, idx, "--config")?));
            }
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
        idx += 1;
    }
    options.input = input.ok_or_else(|| "--input is required".to_string())?;
    Ok(Some(options))
}

fn value_for<'a>(args: &'a [String], idx: usize, flag: &str) -> Result<&'a str, String> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn help_text() -> String {
    [
        "betaboard-overlay",
        "",
        "Renders hold outline overlays and resamples recording playbacks.",
        "",
        "Usage:",
        "  betaboard-overlay holds --input <holds.json> --out-dir <dir> [--thickness <px>]",
        "  betaboard-overlay resample --input <playbacks.json> [--target-hz <hz>] [--output <file>]",
        "",
        "Options:",
        "  --input <path>      JSON file with holds or playbacks.",
        "  --out-dir <dir>     Where <hold_id>.png files and overlays.json are written.",
        "  --thickness <px>    Border thickness, at most 64 (defaults to config, 2 px).",
        "  --target-hz <hz>    Output playback rate (defaults to config, 100 Hz).",
        "  --output <path>     Write resampled JSON here instead of stdout.",
        "  --config <path>     Settings file (defaults to .betaboard/config.toml).",
    ]
    .join("\n")
}
