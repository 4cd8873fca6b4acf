use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use keyline_core::{
    bake_document, export_baked_json, frame_to_timecode, BakingConfig, Config, StandardRate,
    Timecode, TimelineDocument,
};

#[derive(Parser, Debug)]
#[command(name = "keyline", version, about = "Inspect, sample and bake keyframe timelines")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). Without it RUST_LOG is used.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON config with load fallbacks, palette and output formatting.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a timeline document.
    Inspect(InspectArgs),
    /// Print sampled values of one parameter.
    Sample(SampleArgs),
    /// Sample every parameter and write the result as JSON.
    Bake(BakeArgs),
    /// Convert between frame indices and HH:MM:SS:FF.
    Timecode(TimecodeArgs),
    /// List the standard frame rates.
    Rates,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// First frame (defaults to 0).
    #[arg(long)]
    start: Option<u32>,

    /// Last frame, inclusive (defaults to the document's last frame).
    #[arg(long)]
    end: Option<u32>,

    /// Distance between samples in frames.
    #[arg(long, default_value_t = 1.0)]
    step: f64,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Parameter name.
    #[arg(long)]
    param: String,

    #[command(flatten)]
    window: WindowArgs,
}

#[derive(Parser, Debug)]
struct BakeArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    window: WindowArgs,
}

#[derive(Parser, Debug)]
struct TimecodeArgs {
    /// Absolute frame index to format.
    #[arg(required_unless_present = "parse")]
    frame: Option<u64>,

    /// Parse HH:MM:SS:FF back into a frame index.
    #[arg(long, conflicts_with = "frame")]
    parse: Option<String>,

    /// Frame rate in frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let cfg = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args, &cfg),
        Command::Sample(args) => cmd_sample(args, &cfg),
        Command::Bake(args) => cmd_bake(args, &cfg),
        Command::Timecode(args) => cmd_timecode(args),
        Command::Rates => cmd_rates(),
    }
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = match verbose {
        0 => std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        1 => "keyline=debug,keyline_core=debug".to_string(),
        _ => "trace".to_string(),
    };
    // The default `tracing-log` feature forwards keyline-core's `log` records.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let cfg: Config = serde_json::from_str(&text)
        .with_context(|| format!("parse config '{}'", path.display()))?;
    log::debug!("using config from {}", path.display());
    Ok(cfg)
}

fn read_document(path: &Path, cfg: &Config) -> anyhow::Result<TimelineDocument> {
    let doc = TimelineDocument::load_from_path_with_config(path, cfg)
        .with_context(|| format!("load timeline '{}'", path.display()))?;
    Ok(doc)
}

fn cmd_inspect(args: InspectArgs, cfg: &Config) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path, cfg)?;
    let end_tc = doc.timecode_at(doc.duration_frames());

    println!("frame rate: {} fps", doc.frame_rate());
    println!(
        "duration:   {} frames ({:.2} s, {end_tc})",
        doc.duration_frames(),
        doc.duration_seconds()
    );

    println!("markers:    {}", doc.markers().len());
    for m in doc.markers() {
        println!("  {:>6}  {}  {}", m.frame, doc.timecode_at(m.frame), m.label);
    }

    println!("clips:      {}", doc.clips().len());
    for c in doc.clips() {
        println!("  {}  {}..{}", c.label, c.start_frame, c.end_frame);
    }

    println!("parameters: {}", doc.parameters().len());
    for p in doc.parameters().iter() {
        println!(
            "  {}  [{}, {}]  default {}  {} keyframes  {}",
            p.name(),
            p.min_value(),
            p.max_value(),
            p.default_value(),
            p.keyframes().len(),
            p.color
        );
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs, cfg: &Config) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path, cfg)?;
    let start = args.window.start.unwrap_or(0);
    let end = args.window.end.unwrap_or_else(|| doc.last_frame());
    if end < start {
        anyhow::bail!("--end {end} is before --start {start}");
    }

    let samples = doc
        .parameters()
        .sample_range(&args.param, start as f64, end as f64, args.window.step)
        .with_context(|| format!("sample parameter '{}'", args.param))?;
    for (frame, value) in samples {
        let tc = doc.timecode_at(frame.floor() as u32);
        println!("{frame}\t{tc}\t{value}");
    }
    Ok(())
}

fn cmd_bake(args: BakeArgs, cfg: &Config) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path, cfg)?;
    let bake_cfg = BakingConfig {
        start_frame: args.window.start.unwrap_or(0),
        end_frame: args.window.end,
        step: args.window.step,
    };
    let baked = bake_document(&doc, &bake_cfg)
        .with_context(|| format!("bake '{}'", args.in_path.display()))?;
    let json = export_baked_json(&baked);
    let text = if cfg.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, text)
        .with_context(|| format!("write baked timeline '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} parameters x {} samples)",
        args.out.display(),
        baked.parameters.len(),
        baked.frames.len()
    );
    Ok(())
}

fn cmd_timecode(args: TimecodeArgs) -> anyhow::Result<()> {
    if let Ok(rate) = StandardRate::from_fps(args.fps) {
        if rate.is_drop_frame() {
            log::warn!("{rate}: timecodes are shown without drop-frame counting");
        }
    }

    match (args.frame, args.parse) {
        (_, Some(text)) => {
            let tc = Timecode::parse(&text, args.fps)
                .with_context(|| format!("parse timecode '{text}'"))?;
            println!("{}", tc.to_frame(args.fps));
        }
        (Some(frame), None) => {
            let tc = frame_to_timecode(frame, args.fps)?;
            println!("{tc}");
        }
        (None, None) => anyhow::bail!("pass a frame index or --parse HH:MM:SS:FF"),
    }
    Ok(())
}

fn cmd_rates() -> anyhow::Result<()> {
    for rate in StandardRate::all() {
        let kind = if rate.is_drop_frame() { "DF " } else { "NDF" };
        println!("{:>7}  {kind}  {}", rate.fps(), rate.description());
    }
    Ok(())
}
