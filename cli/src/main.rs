use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};

use clap::{Args, Parser, Subcommand};
use emojiart::camera::{Point, Size};
use emojiart::config::EngineConfig;
use emojiart::doc::{DocStore, Document, Snapshot};
use emojiart::engine::{Action, EngineCore};
use emojiart::input::GestureEvent;
use emojiart::render::Renderer;
use serde_json::{Value, json};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("script line {line}: {source}")]
    Script { line: usize, source: serde_json::Error },
    #[error("invalid view size {width}x{height}; both sides must be positive")]
    InvalidViewSize { width: f64, height: f64 },
}

#[derive(Parser, Debug)]
#[command(name = "emojiart", about = "Replay gesture scripts against the emoji art engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a gesture script and print the resulting document, viewport, and selection.
    Replay(ReplayArgs),
    /// Apply a gesture script and print the draw calls for the final scene.
    Render(ScriptArgs),
}

#[derive(Args, Debug)]
struct ScriptArgs {
    #[arg(long, default_value = "-", help = "JSON-lines gesture script, or - for stdin")]
    script: String,

    #[arg(long, help = "Initial document snapshot (JSON)")]
    document: Option<String>,

    #[arg(long, env = "EMOJIART_VIEW_WIDTH", default_value_t = 400.0)]
    width: f64,

    #[arg(long, env = "EMOJIART_VIEW_HEIGHT", default_value_t = 400.0)]
    height: f64,

    #[arg(long, help = "Background image width reported after each background drop")]
    background_width: Option<f64>,

    #[arg(long, help = "Background image height reported after each background drop")]
    background_height: Option<f64>,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[command(flatten)]
    script: ScriptArgs,

    #[arg(long, default_value_t = false, help = "Also print each event's actions as JSON lines")]
    actions: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => run_replay(args),
        Command::Render(args) => run_render(args),
    }
}

fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    let mut on_actions = |actions: &[Action]| -> Result<(), CliError> {
        if args.actions {
            for action in actions {
                writeln!(out, "{}", serde_json::to_string(action)?)?;
            }
        }
        Ok(())
    };
    let core = replay(&args.script, &mut on_actions)?;

    let rendered = serde_json::to_string_pretty(&summary(&core))?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

fn run_render(args: ScriptArgs) -> Result<(), CliError> {
    let core = replay(&args, &mut |_| Ok(()))?;
    let mut renderer = TextRenderer { out: io::stdout().lock() };
    core.render(&mut renderer)?;
    Ok(())
}

/// Build an engine from `args` and apply every event in the script.
fn replay<F>(args: &ScriptArgs, on_actions: &mut F) -> Result<EngineCore, CliError>
where
    F: FnMut(&[Action]) -> Result<(), CliError>,
{
    let view = Size::new(args.width, args.height);
    if !view.is_positive() {
        return Err(CliError::InvalidViewSize { width: args.width, height: args.height });
    }

    let mut core = EngineCore::with_document(DocStore::new(), EngineConfig::from_env());
    core.set_view_size(view);

    if let Some(path) = &args.document {
        let snapshot: Snapshot = serde_json::from_str(&fs::read_to_string(path)?)?;
        info!(path = %path, items = snapshot.items.len(), "cli: loaded document");
        core.load_snapshot(snapshot);
    }

    let extent = match (args.background_width, args.background_height) {
        (Some(width), Some(height)) => Some(Size::new(width, height)),
        _ => None,
    };

    let reader: Box<dyn BufRead> = if args.script == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&args.script)?))
    };

    let mut applied = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(event) = parse_script_line(&line).map_err(|source| CliError::Script { line: index + 1, source })?
        else {
            continue;
        };
        let mut actions = core.handle(event);
        // Stand in for the host: report the fetched image size.
        if actions.iter().any(|a| matches!(a, Action::BackgroundRequested { .. })) {
            actions.extend(core.set_background_extent(extent));
        }
        on_actions(&actions)?;
        applied += 1;
    }
    debug!(applied, "cli: script applied");
    Ok(core)
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
fn parse_script_line(line: &str) -> Result<Option<GestureEvent>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

fn summary(core: &EngineCore) -> Value {
    let viewport = core.viewport();
    let selection: Vec<String> = core
        .doc()
        .items()
        .iter()
        .filter(|item| core.selection().contains(&item.id))
        .map(|item| item.id.to_string())
        .collect();
    json!({
        "document": core.doc().snapshot(),
        "viewport": {
            "pan": viewport.steady_pan(),
            "zoom": viewport.steady_zoom(),
        },
        "selection": selection,
    })
}

/// Writes one line per draw call.
struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = io::Error;

    fn draw_background(&mut self, url: &str, origin: Point, zoom: f64) -> Result<(), io::Error> {
        writeln!(self.out, "background {url} at ({:.2}, {:.2}) zoom {zoom:.3}", origin.x, origin.y)
    }

    fn draw_item(&mut self, text: &str, center: Point, font_size: f64) -> Result<(), io::Error> {
        writeln!(self.out, "item {text} at ({:.2}, {:.2}) size {font_size:.2}", center.x, center.y)
    }

    fn draw_selection_outline(&mut self, center: Point, side: f64, line_width: f64) -> Result<(), io::Error> {
        writeln!(
            self.out,
            "outline at ({:.2}, {:.2}) side {side:.2} width {line_width:.2}",
            center.x, center.y
        )
    }
}
