use std::io::{BufRead as _, Write as _};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use spiral_loader::{
    BackgroundMode, BoxedSave, Color, DownloadSave, EncoderKind, ExportArtifact, ExportOutcome,
    Exporter, LoaderConfig, LoaderResult, MarkupOpts, PRESET_SIZES, PickerSave, PreviewHost,
    RasterExportOpts, ResolvedConfig, SaveCapability, SaveOutcome, Tier, Transparency,
    XML_DECLARATION, export_animation_document, persist, rasterize_svg, render_frame_rgba,
    svg_snapshot,
};

#[derive(Parser, Debug)]
#[command(name = "spiral-loader", version, about = "Golden-angle spiral loading animation")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the animated live-preview SVG.
    Preview(PreviewArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Export the looping GIF.
    Gif(GifArgs),
    /// Export a static SVG snapshot of the preview.
    Svg(SaveArgs),
    /// Export the Lottie animation document.
    Lottie(SaveArgs),
    /// Print the size tier table as JSON.
    Tiers,
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// JSON configuration file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base size in pixels.
    #[arg(long)]
    size: Option<u32>,
    /// Multiplier applied to the size.
    #[arg(long)]
    scale: Option<f64>,
    /// Playback speed; the period becomes duration / speed.
    #[arg(long)]
    speed: Option<f64>,
    /// Period of one pulse in seconds.
    #[arg(long)]
    duration: Option<f64>,
    /// Dot colour as #RRGGBB.
    #[arg(long)]
    dot_color: Option<Color>,
    /// Background colour as #RRGGBB.
    #[arg(long, conflicts_with = "bg_mode")]
    bg_color: Option<Color>,
    /// Background preset.
    #[arg(long, value_enum)]
    bg_mode: Option<BgModeArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum BgModeArg {
    Dark,
    Light,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
enum BackendArg {
    /// vello_cpu sampling backend used for export.
    #[default]
    Offline,
    /// Live scene frozen at the instant and rasterized with resvg.
    Live,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
enum EncoderArg {
    /// In-process encoder.
    #[default]
    Builtin,
    /// System ffmpeg.
    Ffmpeg,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    config: ConfigArgs,
    /// Output SVG path.
    #[arg(long, default_value = "mahana-ai-loader-preview.svg")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,
    /// Sample time in seconds.
    #[arg(long, default_value_t = 0.0)]
    at: f64,
    /// Which backend renders the frame.
    #[arg(long, value_enum, default_value_t = BackendArg::Offline)]
    backend: BackendArg,
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SaveArgs {
    #[command(flatten)]
    config: ConfigArgs,
    /// Prompt for the destination on stdin (empty answer cancels).
    #[arg(long, default_value_t = false)]
    pick: bool,
    /// Directory used when not picking.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct GifArgs {
    #[command(flatten)]
    save: SaveArgs,
    /// Make the background transparent through a colour key.
    #[arg(long, default_value_t = false)]
    transparent: bool,
    /// GIF encoder.
    #[arg(long, value_enum, default_value_t = EncoderArg::Builtin)]
    encoder: EncoderArg,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Preview(args) => cmd_preview(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Lottie(args) => cmd_lottie(args),
        Command::Tiers => cmd_tiers(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn resolve(args: &ConfigArgs) -> anyhow::Result<ResolvedConfig> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => LoaderConfig::from_path(path)?,
        None => LoaderConfig::default(),
    };
    if let Some(v) = args.size {
        cfg.size = v;
    }
    if let Some(v) = args.scale {
        cfg.scale = v;
    }
    if let Some(v) = args.speed {
        cfg.playback_speed = v;
    }
    if let Some(v) = args.duration {
        cfg.duration = v;
    }
    if let Some(v) = args.dot_color {
        cfg.dot_color = v;
    }
    if let Some(mode) = args.bg_mode {
        cfg.bg_color = match mode {
            BgModeArg::Dark => BackgroundMode::Dark,
            BgModeArg::Light => BackgroundMode::Light,
        }
        .color();
    }
    if let Some(v) = args.bg_color {
        cfg.bg_color = v;
    }
    Ok(cfg.resolve()?)
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let resolved = resolve(&args.config)?;
    let mut host = PreviewHost::new();
    let scene = host.mount(resolved.display_extent, &resolved.options)?;
    let markup = scene.to_markup_with(&MarkupOpts {
        pixel_size: Some(resolved.display_extent),
        background: Some(resolved.options.bg_color),
    });

    spiral_loader::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, format!("{XML_DECLARATION}{markup}"))
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let resolved = resolve(&args.config)?;
    let extent = resolved.display_extent;
    let options = resolved.options;

    let frame = match args.backend {
        BackendArg::Offline => render_frame_rgba(
            extent,
            args.at,
            &options,
            spiral_loader::Background::Solid(options.bg_color),
        )?,
        BackendArg::Live => {
            let mut host = PreviewHost::new();
            let scene = host.mount(extent, &options)?.freeze_at(args.at);
            let markup = scene.to_markup_with(&MarkupOpts {
                pixel_size: Some(extent),
                background: Some(options.bg_color),
            });
            rasterize_svg(&markup, extent, extent)?
        }
    };

    spiral_loader::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let resolved = resolve(&args.save.config)?;
    let mut opts = RasterExportOpts::new(resolved.display_extent, resolved.options);
    if args.transparent {
        opts.transparency = Transparency::ColorKey;
    }
    opts.encoder = match args.encoder {
        EncoderArg::Builtin => EncoderKind::Builtin,
        EncoderArg::Ffmpeg => EncoderKind::Ffmpeg,
    };

    let picker: Option<BoxedSave> = args
        .save
        .pick
        .then(|| Box::new(PickerSave::new(prompt_for_path)) as BoxedSave);
    let fallback: BoxedSave = Box::new(DownloadSave::new(args.save.out_dir.clone()));

    let exporter = Exporter::new();
    let task = exporter.start(opts, picker, fallback)?;
    match task.join()? {
        ExportOutcome::Saved(report) => {
            eprintln!(
                "wrote {} ({} frames, {}x{}, {} bytes)",
                report.path.display(),
                report.frames,
                report.width,
                report.height,
                report.bytes
            );
        }
        ExportOutcome::Cancelled => eprintln!("export cancelled"),
    }
    Ok(())
}

fn cmd_svg(args: SaveArgs) -> anyhow::Result<()> {
    let resolved = resolve(&args.config)?;
    let mut host = PreviewHost::new();
    host.mount(resolved.display_extent, &resolved.options)?;
    let artifact = svg_snapshot(&host, resolved.options.dot_color)?;
    save(&artifact, &args)
}

fn cmd_lottie(args: SaveArgs) -> anyhow::Result<()> {
    let resolved = resolve(&args.config)?;
    let artifact = export_animation_document(resolved.display_extent, &resolved.options)?;
    save(&artifact, &args)
}

fn save(artifact: &ExportArtifact, args: &SaveArgs) -> anyhow::Result<()> {
    let mut picker = PickerSave::new(prompt_for_path);
    let mut fallback = DownloadSave::new(args.out_dir.clone());
    let picker = args
        .pick
        .then_some(&mut picker as &mut dyn SaveCapability);
    match persist(artifact, picker, &mut fallback)? {
        SaveOutcome::Saved(path) => eprintln!("wrote {}", path.display()),
        SaveOutcome::Cancelled => eprintln!("save cancelled"),
    }
    Ok(())
}

fn prompt_for_path(suggested: &str) -> LoaderResult<Option<PathBuf>> {
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "save as [{suggested}] (empty to cancel): ");
    let _ = stderr.flush();

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read destination from stdin")?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
}

#[derive(serde::Serialize)]
struct TierRow {
    max_extent: Option<u32>,
    #[serde(flatten)]
    tier: Tier,
}

#[derive(serde::Serialize)]
struct PresetRow {
    size: u32,
    tier: Tier,
}

#[derive(serde::Serialize)]
struct TierReport {
    tiers: Vec<TierRow>,
    presets: Vec<PresetRow>,
}

fn cmd_tiers() -> anyhow::Result<()> {
    let report = TierReport {
        tiers: Tier::TABLE
            .iter()
            .map(|&(max_extent, tier)| TierRow { max_extent, tier })
            .collect(),
        presets: PRESET_SIZES
            .iter()
            .map(|&size| PresetRow {
                size,
                tier: Tier::for_extent(size),
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
