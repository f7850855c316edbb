/// flatshade terminal demo - rotating flat-shaded mesh
///
/// Usage: flatshade-terminal [path/to/model.obj] [options]
///
/// Without a mesh path a unit cube is rendered. Press the exit key
/// (Esc by default) or Ctrl-C to quit.

use anyhow::{bail, Context, Result};
use clap::Parser;
use flatshade_core::{load_obj, Mesh, RenderLoop};
use flatshade_terminal::{Cli, TerminalDisplay};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mesh = match &cli.mesh {
        Some(path) => load_obj(path)
            .with_context(|| format!("failed to load mesh from {}", path.display()))?,
        None => {
            info!(size = cli.cube_size, "No mesh given, using built-in cube");
            Mesh::cube(cli.cube_size)
        }
    };

    if mesh.is_empty() && !cli.allow_empty {
        bail!("mesh contains no faces; pass --allow-empty to render it anyway");
    }

    let config = cli.render_config();
    let mut session = RenderLoop::new(mesh, &config)
        .context("invalid render settings")?
        .with_frame_wait(cli.frame_wait())
        .with_max_frames(cli.frames);

    let mut display = TerminalDisplay::new(cli.exit_key).context("failed to query terminal")?;
    display.enter()?;
    let result = session.run(&mut display);
    display.leave()?;

    let summary = result.context("terminal output failed")?;
    println!(
        "Rendered {} frames, stopped at {:.1} degrees",
        summary.frames, summary.final_angle
    );
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
