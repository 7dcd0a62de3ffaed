//! zipai command line interface
//!
//! Debug/ops entry point over the rendering core: renders a string to a
//! PNG data URL on stdout, or decodes it to a file with --out.

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::info;

use zipai::render::RenderOptions;
use zipai::{Config, TextImageRenderer, DATA_URL_PREFIX};

fn print_help() {
    println!("zipai - Chinese-text reference-image rasterizer");
    println!();
    println!("Usage: zipai [OPTIONS] TEXT");
    println!();
    println!("Options:");
    println!("  --tile             Use the mahjong tile preset (300x400, beige)");
    println!("  --out FILE         Write the decoded PNG to FILE instead of stdout");
    println!("  --width N          Canvas width (default from config)");
    println!("  --height N         Canvas height");
    println!("  --font-size N      Requested font size (soft upper bound)");
    println!("  --padding N        Canvas padding");
    println!("  --bg HEX           Background color (RRGGBB)");
    println!("  --fg HEX           Text color (RRGGBB)");
    println!("  --init-config      Write a default config template and exit");
    println!("  -h, --help         Show this help");
    println!("  -V, --version      Show version");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("zipai {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        let path = Config::write_default_config()?;
        println!("Config file generated: {}", path.display());
        return Ok(());
    }

    let cfg = Config::load();

    // Manual argument walk; flags may appear before or after the text
    let mut text: Option<String> = None;
    let mut out: Option<String> = None;
    let mut tile = false;
    let mut options = RenderOptions {
        width: cfg.render.width,
        height: cfg.render.height,
        font_size: cfg.render.font_size,
        background: cfg.render.background.clone(),
        text_color: cfg.render.text_color.clone(),
        padding: cfg.render.padding,
        spacing: cfg.render.spacing,
        ..RenderOptions::default()
    };

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        let take_value = |i: &mut usize| -> Result<String> {
            *i += 1;
            args.get(*i)
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", arg))
        };

        match arg.as_str() {
            "--tile" => tile = true,
            "--out" => out = Some(take_value(&mut i)?),
            "--width" => options.width = take_value(&mut i)?.parse().context("invalid --width")?,
            "--height" => {
                options.height = take_value(&mut i)?.parse().context("invalid --height")?
            }
            "--font-size" => {
                options.font_size = take_value(&mut i)?.parse().context("invalid --font-size")?
            }
            "--padding" => {
                options.padding = take_value(&mut i)?.parse().context("invalid --padding")?
            }
            "--bg" => options.background = take_value(&mut i)?,
            "--fg" => options.text_color = take_value(&mut i)?,
            other if other.starts_with("--") => {
                return Err(anyhow!("Unknown option: {} (see --help)", other));
            }
            _ => text = Some(arg.clone()),
        }
        i += 1;
    }

    let text = text.ok_or_else(|| anyhow!("No text given (see --help)"))?;

    let renderer = TextImageRenderer::new(&cfg);
    let data_url = if tile {
        renderer.generate_tile_preset(&text)?
    } else {
        options.text = text.clone();
        renderer.generate_text_image(&options)?
    };

    match out {
        Some(path) => {
            // Payload sits after the first comma of the data URL
            let payload = data_url
                .strip_prefix(DATA_URL_PREFIX)
                .ok_or_else(|| anyhow!("Unexpected data URL shape"))?;
            let bytes = BASE64
                .decode(payload)
                .context("Failed to decode PNG payload")?;
            std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path))?;
            info!("Image saved: {}", path);
        }
        None => println!("{}", data_url),
    }

    Ok(())
}
