mod errors;
mod render;
mod shape;
mod svg;
mod types;

use errors::Error;
use std::{env, io::Write, path::Path, process::ExitCode};
use svg::SvgFile;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Convert one SVG document to a PNG file
///
/// Recoverable diagnostics land in `warnings` as soon as parsing is done,
/// so they are reported even when rendering or saving fails afterwards.
fn run(
    svg_path: impl AsRef<Path>,
    png_path: impl AsRef<Path>,
    warnings: &mut Vec<String>,
) -> Result<(), Error> {
    let file = SvgFile::load(svg_path)?;
    warnings.extend(file.warnings);
    let canvas = render::render(file.dimensions, &file.shapes);
    canvas.save(png_path)
}

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let (Some(svg_path), Some(png_path)) = (args.next(), args.next()) else {
        eprintln!("usage: svg2png <input.svg> <output.png>");
        return ExitCode::FAILURE;
    };

    let mut warnings = Vec::new();
    let result = run(&svg_path, &png_path, &mut warnings);

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    for warning in warnings {
        stderr
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))
            .ok();
        writeln!(stderr, "Warning: {warning}").ok();
        stderr.reset().ok();
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            stderr
                .set_color(
                    ColorSpec::new()
                        .set_fg(Some(Color::Red))
                        .set_bold(true)
                        .set_intense(true),
                )
                .ok();
            writeln!(stderr, "While converting '{svg_path}':").ok();
            writeln!(stderr, "Error: {e}").ok();
            stderr.reset().ok();
            ExitCode::FAILURE
        }
    }
}
