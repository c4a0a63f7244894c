use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sunbeam", version)]
struct Cli {
    /// Log widget events and redraws to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TrueType/OpenType face for the card's hour labels. Defaults to an
    /// installed sans-serif face.
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a session and write the recording card as a PNG.
    Card(RenderArgs),
    /// Replay a session and write the meter container (sky + sun) as a PNG.
    Scene(RenderArgs),
    /// Replay a session and print the derived widget view as JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let font = load_font(cli.font.as_deref())?;
    match cli.cmd {
        Command::Card(args) => cmd_card(args, &font),
        Command::Scene(args) => cmd_scene(args, &font),
        Command::Inspect(args) => cmd_inspect(args, &font),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_font(path: Option<&Path>) -> anyhow::Result<sunbeam::FontSource> {
    let Some(path) = path else {
        return Ok(sunbeam::FontSource::System);
    };
    sunbeam::FontSource::from_path(path).context("load label font")
}

fn read_session_json(path: &Path) -> anyhow::Result<sunbeam::Session> {
    let f = File::open(path).with_context(|| format!("open session '{}'", path.display()))?;
    let session = sunbeam::Session::from_reader(BufReader::new(f))
        .with_context(|| format!("parse session JSON '{}'", path.display()))?;
    Ok(session)
}

fn replay(path: &Path, font: &sunbeam::FontSource) -> anyhow::Result<sunbeam::RecorderWidget> {
    let session = read_session_json(path)?;
    match session.replay_with_font(font) {
        Ok(widget) => Ok(widget),
        Err(err) => {
            eprintln!("{}", err.user_message());
            Err(err).context("replay session")
        }
    }
}

fn cmd_card(args: RenderArgs, font: &sunbeam::FontSource) -> anyhow::Result<()> {
    let widget = replay(&args.in_path, font)?;
    write_png(&args.out, &widget.card_frame())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_scene(args: RenderArgs, font: &sunbeam::FontSource) -> anyhow::Result<()> {
    let widget = replay(&args.in_path, font)?;
    let frame = widget.render_scene()?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs, font: &sunbeam::FontSource) -> anyhow::Result<()> {
    let widget = replay(&args.in_path, font)?;
    let json = serde_json::to_string_pretty(&widget.view()).context("serialize widget view")?;
    println!("{json}");
    Ok(())
}

fn write_png(path: &Path, frame: &sunbeam::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let straight = frame.to_straight();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
