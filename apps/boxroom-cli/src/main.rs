use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use boxroom_physics::PhysicsWorld;
use boxroom_render::{DebugTextRenderer, RenderView, Renderer};
use boxroom_scene::{bootstrap, SceneHandles, SceneSpec};
use boxroom_sim::{SimContext, SimSettings};

#[derive(Parser)]
#[command(name = "boxroom-cli", about = "Headless boxroom sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to a JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the freshly bootstrapped scene
    Info,
    /// Run the simulation headless for a number of ticks
    Run {
        /// Number of 1/60 s ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// RNG seed for the perturbation sequence
        #[arg(short, long)]
        seed: Option<u64>,
        /// Disable the periodic random perturbation
        #[arg(long)]
        still: bool,
        /// Key script applied before the first tick, e.g. "aawd"
        #[arg(long)]
        script: Option<String>,
        /// Print the cube position every N ticks (0 = only at the end)
        #[arg(long, default_value = "120")]
        print_every: u64,
    },
    /// Apply a key script with no physics advancement and show the moves
    Nudge {
        /// Key characters to press in order, e.g. "aaa"
        script: String,
    },
}

fn build_scene(settings: &SimSettings) -> Result<(PhysicsWorld, SceneHandles, SimContext)> {
    let mut physics = PhysicsWorld::new();
    let handles = bootstrap(&mut physics, &SceneSpec::default())?;
    let ctx = SimContext::new(handles.cube, settings.clone());
    Ok((physics, handles, ctx))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let settings = match &cli.config {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::default(),
    };

    match cli.command {
        Commands::Info => {
            let (physics, _, _) = build_scene(&settings)?;
            println!("boxroom-cli v{}", env!("CARGO_PKG_VERSION"));
            print!(
                "{}",
                DebugTextRenderer::new().render(&physics, &RenderView::default())
            );
        }
        Commands::Run {
            ticks,
            seed,
            still,
            script,
            print_every,
        } => {
            let mut settings = settings;
            if let Some(seed) = seed {
                settings.seed = seed;
            }
            if still {
                settings.random_motion = false;
            }

            let (mut physics, handles, mut ctx) = build_scene(&settings)?;
            tracing::debug!(ticks, "starting headless run");
            for key in script.iter().flat_map(|s| s.chars()) {
                ctx.push_key(key);
            }

            let dt = physics.timestep();
            println!(
                "Running {ticks} ticks (seed={}, random_motion={})",
                settings.seed, settings.random_motion
            );
            for tick in 0..ticks {
                ctx.pump(dt, &mut physics)?;
                if print_every != 0 && tick % print_every == 0 {
                    let p = physics.pose(handles.cube)?.position;
                    println!("tick {tick:>6}: cube=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
                }
            }
            print!(
                "{}",
                DebugTextRenderer::new().render(&physics, &RenderView::default())
            );
        }
        Commands::Nudge { script } => {
            let (mut physics, handles, mut ctx) = build_scene(&settings)?;
            let before = physics.pose(handles.cube)?.position;

            for key in script.chars() {
                ctx.push_key(key);
            }
            ctx.pump(0.0, &mut physics)?;

            let after = physics.pose(handles.cube)?.position;
            let delta = after - before;
            println!("script: {script:?}");
            println!("before: ({:.2}, {:.2}, {:.2})", before.x, before.y, before.z);
            println!("after:  ({:.2}, {:.2}, {:.2})", after.x, after.y, after.z);
            println!("delta:  ({:+.2}, {:+.2}, {:+.2})", delta.x, delta.y, delta.z);
        }
    }

    Ok(())
}
