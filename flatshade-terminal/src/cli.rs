/// Command line options for the terminal renderer
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::KeyCode;
use flatshade_core::{RenderConfig, Rgb};
use nalgebra::Vector3;

const DEFAULT_WIDTH: usize = 800;
const DEFAULT_HEIGHT: usize = 800;

/// Render a rotating, flat-shaded OBJ mesh in the terminal
#[derive(Debug, Parser)]
#[command(name = "flatshade-terminal")]
#[command(version, long_about = None)]
pub struct Cli {
    /// OBJ file to render; a unit cube is shown when omitted
    pub mesh: Option<PathBuf>,

    /// Framebuffer width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Framebuffer height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Rotation step per frame, in degrees
    #[arg(long, default_value_t = 5.0, allow_hyphen_values = true)]
    pub step: f32,

    /// Starting rotation angle, in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub angle: f32,

    /// Direction toward the light as x,y,z
    #[arg(long, default_value = "0,0,1", value_parser = parse_light, allow_hyphen_values = true)]
    pub light: Vector3<f32>,

    /// Background colour as r,g,b
    #[arg(long, default_value = "0,0,0", value_parser = parse_rgb)]
    pub background: Rgb,

    /// Key that ends the session: a character, "esc", "enter", or a key code such as 27
    #[arg(long, default_value = "esc", value_parser = parse_exit_key)]
    pub exit_key: KeyCode,

    /// Longest wait for input between frames, in milliseconds
    #[arg(long, default_value_t = 33)]
    pub frame_ms: u64,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Edge length of the fallback cube
    #[arg(long, default_value_t = 1.0)]
    pub cube_size: f32,

    /// Start the session even if the mesh has no faces
    #[arg(long)]
    pub allow_empty: bool,
}

impl Cli {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_size(self.width, self.height)
            .with_rotation_step(self.step)
            .with_initial_angle(self.angle)
            .with_light_direction(self.light)
            .with_background(self.background)
    }

    pub fn frame_wait(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

/// Split "a,b,c" into exactly three parsed components
fn parse_triple<T: std::str::FromStr>(value: &str) -> Result<[T; 3], String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [a, b, c] = parts.as_slice() else {
        return Err(format!("expected three comma-separated values, got '{value}'"));
    };
    let parse = |part: &str| {
        part.parse::<T>()
            .map_err(|_| format!("invalid component '{part}' in '{value}'"))
    };
    Ok([parse(*a)?, parse(*b)?, parse(*c)?])
}

fn parse_light(value: &str) -> Result<Vector3<f32>, String> {
    let [x, y, z] = parse_triple::<f32>(value)?;
    Ok(Vector3::new(x, y, z))
}

fn parse_rgb(value: &str) -> Result<Rgb, String> {
    let [r, g, b] = parse_triple::<u8>(value)?;
    Ok(Rgb::new(r, g, b))
}

/// Parse an exit key name or numeric key code
pub fn parse_exit_key(value: &str) -> Result<KeyCode, String> {
    let lower = value.to_ascii_lowercase();
    match lower.as_str() {
        "esc" | "escape" => return Ok(KeyCode::Esc),
        "enter" | "return" => return Ok(KeyCode::Enter),
        "space" => return Ok(KeyCode::Char(' ')),
        _ => {}
    }

    let mut chars = value.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match value.parse::<u8>() {
        Ok(27) => Ok(KeyCode::Esc),
        Ok(13) => Ok(KeyCode::Enter),
        Ok(code) if code.is_ascii_graphic() || code == b' ' => Ok(KeyCode::Char(code as char)),
        _ => Err(format!("unrecognized exit key '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["flatshade-terminal"]).unwrap();
        assert!(cli.mesh.is_none());
        assert_eq!(cli.exit_key, KeyCode::Esc);
        assert_eq!(cli.render_config(), RenderConfig::default());
        assert_eq!(cli.frame_wait(), Duration::from_millis(33));
    }

    #[test]
    fn test_full_options() {
        let cli = Cli::try_parse_from([
            "flatshade-terminal",
            "head.obj",
            "--width",
            "320",
            "--height",
            "200",
            "--step",
            "-2.5",
            "--light",
            "-1,0,1",
            "--background",
            "10,20,30",
            "--exit-key",
            "q",
            "--frames",
            "12",
        ])
        .unwrap();

        assert_eq!(cli.mesh, Some(PathBuf::from("head.obj")));
        assert_eq!(cli.exit_key, KeyCode::Char('q'));
        assert_eq!(cli.frames, Some(12));

        let config = cli.render_config();
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.rotation_step, -2.5);
        assert_eq!(config.light_direction, Vector3::new(-1.0, 0.0, 1.0));
        assert_eq!(config.background, Rgb::new(10, 20, 30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_light_needs_three_components() {
        assert!(Cli::try_parse_from(["flatshade-terminal", "--light", "0,1"]).is_err());
    }

    #[test]
    fn test_background_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["flatshade-terminal", "--background", "0,300,0"]).is_err());
    }

    #[test]
    fn test_parse_exit_key() {
        assert_eq!(parse_exit_key("ESC"), Ok(KeyCode::Esc));
        assert_eq!(parse_exit_key("27"), Ok(KeyCode::Esc));
        assert_eq!(parse_exit_key("113"), Ok(KeyCode::Char('q')));
        assert_eq!(parse_exit_key("x"), Ok(KeyCode::Char('x')));
        assert!(parse_exit_key("f13x").is_err());
    }
}
