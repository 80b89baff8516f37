//! Headless halftone renderer.
//!
//! Usage: `halftone <image> [--options <FILE>] [--out <DIR>]`
//!
//! Loads the image at its natural size, sweeps a synthetic pointer across it
//! (hovering for the first half, pressed for the second) and writes every
//! frame as a PNG. Set `RUST_LOG=debug` for more detail.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use halftone::prelude::*;

const FRAMES: u64 = 120;
const FPS: f32 = 30.0;

#[derive(Parser, Debug)]
#[command(name = "halftone")]
#[command(about = "Render a breathing halftone animation to PNG frames")]
struct Cli {
    /// Source image (PNG or JPEG)
    image: PathBuf,

    /// JSON options file
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Directory for the rendered frames
    #[arg(long, value_name = "DIR", default_value = "frames")]
    out: PathBuf,
}

fn run(image: PathBuf, options: Option<PathBuf>, out_dir: PathBuf) -> Result<u64, HalftoneError> {
    let config = match options {
        Some(path) => HalftoneConfig::load(path)?,
        None => HalftoneConfig::default(),
    };

    let capabilities = Capabilities::probe(|w, h| Some(Canvas::new(w, h)));
    let mut halftone = Halftone::new(config, capabilities, Some(Canvas::new(1, 1)));
    halftone.load_image_file(&image)?;

    fs::create_dir_all(&out_dir)?;

    let (width, height) = halftone
        .output()
        .map(|s| (s.width() as f32, s.height() as f32))
        .unwrap_or((0.0, 0.0));

    let mut scheduler = FixedRateScheduler::stepped(FPS).with_max_frames(FRAMES);
    let mut frame = 0u64;
    let mut result = Ok(());

    halftone.run_with(&mut scheduler, |halftone, _time| {
        let t = frame as f32 / FRAMES as f32;
        halftone.handle_event(HalftoneEvent::PointerMoved {
            x: width * (0.1 + 0.8 * t),
            y: height * (0.5 + 0.25 * (t * std::f32::consts::TAU).sin()),
        });
        if frame == FRAMES / 2 {
            halftone.handle_event(HalftoneEvent::PointerEngaged);
        }

        // The previous tick's frame is complete; write it before the next.
        if frame > 0 {
            if let Some(canvas) = halftone.output() {
                let path = out_dir.join(format!("frame_{:04}.png", frame - 1));
                if let Err(e) = canvas.save_png(&path) {
                    result = Err(e);
                    halftone.stop();
                }
            }
        }
        frame += 1;
    });
    result?;

    if let Some(canvas) = halftone.output() {
        canvas.save_png(out_dir.join(format!("frame_{:04}.png", frame.saturating_sub(1))))?;
    }
    Ok(frame)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli.image, cli.options, cli.out.clone()) {
        Ok(frames) => {
            log::info!("wrote {} frames to {}", frames, cli.out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "halftone",
            "photo.png",
            "--options",
            "opts.cfg",
            "--out",
            "render",
        ])
        .unwrap();
        assert_eq!(cli.image, PathBuf::from("photo.png"));
        assert_eq!(cli.options, Some(PathBuf::from("opts.cfg")));
        assert_eq!(cli.out, PathBuf::from("render"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["halftone", "photo.png"]).unwrap();
        assert_eq!(cli.options, None);
        assert_eq!(cli.out, PathBuf::from("frames"));
    }

    #[test]
    fn test_cli_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["halftone"]).is_err());
        assert!(Cli::try_parse_from(["halftone", "photo.png", "opts.cfg"]).is_err());
    }
}
