use std::{
    io::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glyphwave::GlyphLayout as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glyphwave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the animated quads at one point of the timeline as JSON.
    Frame(FrameArgs),
    /// Play the animation at a fixed frame rate and print one JSON line per frame.
    Timeline(TimelineArgs),
}

#[derive(Parser, Debug)]
struct Source {
    /// Animation descriptor JSON.
    #[arg(long)]
    descriptor: PathBuf,

    /// Text to lay out.
    #[arg(long)]
    text: String,

    /// PNG sampled by noise channels whose source is `external`.
    #[arg(long)]
    noise: Option<PathBuf>,

    /// Number of render batches the text is spread over.
    #[arg(long, default_value_t = 1)]
    batches: usize,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: Source,

    /// Clock in seconds, or normalized progress with `--scrub`.
    #[arg(long)]
    time: f32,

    /// Interpret `--time` as progress in [0, 1].
    #[arg(long)]
    scrub: bool,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    source: Source,

    #[arg(long, default_value_t = 30.0)]
    fps: f32,

    /// Stop after this many frames even if the animation loops.
    #[arg(long, default_value_t = 600)]
    max_frames: usize,
}

#[derive(serde::Serialize)]
struct QuadOut {
    character: usize,
    vertices: [[f32; 3]; 4],
    colors: [[u8; 4]; 4],
}

#[derive(serde::Serialize)]
struct FrameOut {
    clock: f32,
    max_duration: f32,
    quads: Vec<QuadOut>,
}

#[derive(serde::Serialize)]
struct TimelineLine {
    frame: usize,
    clock: f32,
    state: glyphwave::PlaybackState,
    visible_cap: Option<usize>,
    centroids: Vec<[f32; 3]>,
}

type Animator = glyphwave::GeometryAnimator<glyphwave::FixedLayout, glyphwave::InMemorySink>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn load_descriptor(
    path: &Path,
    noise: Option<&Path>,
) -> anyhow::Result<glyphwave::AnimationDescriptor> {
    let mut descriptor = glyphwave::AnimationDescriptor::from_path(path)
        .with_context(|| format!("load descriptor '{}'", path.display()))?;

    if let Some(noise) = noise {
        let bytes =
            std::fs::read(noise).with_context(|| format!("read noise '{}'", noise.display()))?;
        let sampler: Arc<dyn glyphwave::NoiseSampler> =
            Arc::new(glyphwave::ImageNoise::from_png_bytes(&bytes)?);
        for channel in &mut descriptor.channels {
            if let Some(n) = channel.noise_mut()
                && n.source == glyphwave::NoiseSource::External
            {
                n.sampler = Some(Arc::clone(&sampler));
            }
        }
    }
    Ok(descriptor)
}

fn build_animator(source: &Source) -> anyhow::Result<Animator> {
    let descriptor = load_descriptor(&source.descriptor, source.noise.as_deref())?;
    let layout = glyphwave::FixedLayout::new(
        &source.text,
        glyphwave::FixedLayoutOpts {
            batch_count: source.batches,
            ..glyphwave::FixedLayoutOpts::default()
        },
    );
    let animator = glyphwave::GeometryAnimator::attach(
        layout,
        glyphwave::InMemorySink::new(),
        descriptor,
        glyphwave::AnimatorOpts::default(),
    )?;
    Ok(animator)
}

/// Animated quads of every visible character, read back from the sink.
fn visible_quads(animator: &Animator) -> Vec<(usize, glyphwave::Quad, glyphwave::QuadColors)> {
    let sink = animator.sink();
    let mut out = Vec::new();
    for (character, glyph) in animator.layout().glyphs().iter().enumerate() {
        if !glyph.is_visible {
            continue;
        }
        let Some(commit) = sink.latest(glyph.batch_index) else {
            continue;
        };
        let quad = glyphwave::Quad::read(&commit.vertices, glyph.vertex_offset);
        let colors = glyphwave::QuadColors::read(&commit.colors, glyph.vertex_offset);
        if let (Some(quad), Some(colors)) = (quad, colors) {
            out.push((character, quad, colors));
        }
    }
    out
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut animator = build_animator(&args.source)?;

    let outcome = if args.scrub {
        animator.set_progress(args.time)?
    } else {
        let max = animator.max_duration();
        let normalized = if max > 0.0 { args.time / max } else { 0.0 };
        animator.finish(normalized.clamp(0.0, 1.0))?
    };
    if !outcome.is_committed() {
        anyhow::bail!("no frame produced ({outcome:?})");
    }

    let quads = visible_quads(&animator)
        .into_iter()
        .map(|(character, quad, colors)| QuadOut {
            character,
            vertices: quad.0.map(|v| v.to_array()),
            colors: colors.0.map(|c| [c.r, c.g, c.b, c.a]),
        })
        .collect();
    let out = FrameOut {
        clock: animator.clock(),
        max_duration: animator.max_duration(),
        quads,
    };

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, &out).context("write frame JSON")?;
    writeln!(lock)?;
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be a positive number (got {})", args.fps);
    }
    let mut animator = build_animator(&args.source)?;
    let dt = 1.0 / args.fps;

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let mut frame = 0usize;
    animator.play()?;
    loop {
        let line = TimelineLine {
            frame,
            clock: animator.clock(),
            state: animator.state(),
            visible_cap: animator.layout().visible_character_cap(),
            centroids: visible_quads(&animator)
                .iter()
                .map(|(_, quad, _)| quad.centroid().to_array())
                .collect(),
        };
        serde_json::to_writer(&mut lock, &line).context("write timeline JSON")?;
        writeln!(lock)?;

        frame += 1;
        if !animator.is_animating() || frame >= args.max_frames {
            break;
        }
        animator.tick(dt)?;
    }

    eprintln!("{frame} frames, max duration {:.3}s", animator.max_duration());
    Ok(())
}
