// Catalog and pattern queries are part of the public surface but only some
// of them are reached from the frame loop
#![allow(dead_code)]

mod background;
mod config;
mod display;
mod error;
mod pipeline;
mod util;

use std::path::PathBuf;

use log::{debug, info, warn};
use sdl2::keyboard::Keycode;

use background::{get_preset, preset_count};
use config::{Config, DEFAULT_CONFIG_PATH};
use display::{Display, InputEvent, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use pipeline::{FramePipeline, TransitionEvent};
use util::{FpsCounter, Rng};

/// Seconds between FPS log lines
const FPS_LOG_INTERVAL: f32 = 1.0;

struct CliOptions {
    config_path: PathBuf,
    width: u32,
    height: u32,
    vsync: bool,
    preset: Option<usize>,
    authentic: bool,
    no_crt: bool,
}

/// Parse command line arguments
fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();
    let mut options = CliOptions {
        config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        vsync: true,
        preset: None,
        authentic: false,
        no_crt: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => options.vsync = false,
            "--no-crt" => options.no_crt = true,
            "--authentic" => options.authentic = true,
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    options.config_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            },
            "--preset" | "-p" => {
                if i + 1 < args.len() {
                    if let Ok(n) = args[i + 1].parse::<usize>() {
                        options.preset = Some(n);
                    }
                    i += 1;
                }
            },
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        options.width = w.max(1);
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        options.height = h.max(1);
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1920x1080)
                    if let Some((w, h)) = args[i + 1].split_once('x') {
                        if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                            options.width = w.max(1);
                            options.height = h.max(1);
                        }
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: battlebg [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --config PATH, -c PATH    Configuration file (default: {})",
                    DEFAULT_CONFIG_PATH
                );
                println!(
                    "  --width W, -w W           Set window width (default: {})",
                    DEFAULT_WIDTH
                );
                println!(
                    "  --height H, -h H          Set window height (default: {})",
                    DEFAULT_HEIGHT
                );
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)");
                println!("  --preset N, -p N          Pin preset N (1-{}), 0 cycles", preset_count());
                println!("  --authentic               30 FPS nominal timing, 75 s cycle");
                println!("  --no-crt                  Disable the CRT effect");
                println!("  --no-vsync                Disable VSync for uncapped framerate");
                println!("  --help                    Show this help message");
                println!();
                println!("Controls:");
                println!("  Left/Right     - Pin previous/next background");
                println!("  0 / Backspace  - Return to automatic cycling");
                println!("  C              - Toggle CRT effect");
                println!("  F              - Toggle FPS logging");
                println!("  S              - Save configuration");
                println!("  L              - Reload configuration");
                println!("  Escape         - Quit");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    options
}

fn load_config(options: &CliOptions) -> Config {
    let mut config = match Config::load(&options.config_path) {
        Ok(config) => {
            info!("Configuration loaded from {}", options.config_path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not read {} ({}), using defaults",
                options.config_path.display(),
                e
            );
            Config::default()
        },
    };

    if options.authentic {
        let authentic = Config::authentic();
        config.nominal_fps = authentic.nominal_fps;
        config.transition_interval_seconds = authentic.transition_interval_seconds;
    }
    if options.no_crt {
        config.crt_enabled = false;
    }
    if let Some(preset) = options.preset {
        config.selected_preset_index = preset;
    }
    config.sanitized()
}

/// 1-based selection pinning the preset `offset` steps away from `current`
fn pin_relative(current: usize, offset: isize) -> usize {
    let count = preset_count() as isize;
    (current as isize + offset).rem_euclid(count) as usize + 1
}

fn log_preset_change(index: usize, config: &Config) {
    if config.show_preset_name_overlay {
        info!("Now showing #{}: {}", index + 1, get_preset(index).name);
    } else {
        info!("Now showing #{}", index + 1);
    }
}

fn main() -> error::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,battlebg=info"))
        .init();

    let options = parse_args();
    let mut config = load_config(&options);

    let (mut display, texture_creator) =
        Display::with_options("battlebg", options.width, options.height, options.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, display.width(), display.height())?;

    let initial = config
        .pinned_preset()
        .unwrap_or_else(|| Rng::from_time().below(preset_count()));
    let mut pipeline = FramePipeline::new(initial, display.width(), display.height());

    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = false;
    let mut fps_log_timer = 0.0;

    info!(
        "battlebg {}x{}, vsync {}, {} FPS nominal, {} s cycle",
        display.width(),
        display.height(),
        if options.vsync { "on" } else { "off" },
        config.nominal_fps,
        config.transition_interval_seconds
    );
    log_preset_change(pipeline.current_preset(), &config);

    'main: loop {
        let (dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::Resized { width, height } => {
                    match RenderTarget::with_size(&texture_creator, width, height) {
                        Ok(resized) => {
                            target = resized;
                            pipeline.resize_output(width, height);
                        },
                        Err(e) => warn!("Keeping {}x{} output: {}", target.width(), target.height(), e),
                    }
                },
                InputEvent::KeyDown(key) => match key {
                    Keycode::Escape => break 'main,
                    Keycode::Left => {
                        config.selected_preset_index = pin_relative(pipeline.current_preset(), -1);
                    },
                    Keycode::Right => {
                        config.selected_preset_index = pin_relative(pipeline.current_preset(), 1);
                    },
                    Keycode::Num0 | Keycode::Backspace => {
                        config.selected_preset_index = 0;
                        info!("Automatic cycling every {} s", config.transition_interval_seconds);
                    },
                    Keycode::C => {
                        config.crt_enabled = !config.crt_enabled;
                        info!("CRT effect {}", if config.crt_enabled { "on" } else { "off" });
                    },
                    Keycode::F => show_fps = !show_fps,
                    Keycode::S => match config.save(&options.config_path) {
                        Ok(()) => info!("Configuration saved to {}", options.config_path.display()),
                        Err(e) => warn!("Failed to save configuration: {}", e),
                    },
                    Keycode::L => match Config::load(&options.config_path) {
                        Ok(loaded) => {
                            config = loaded;
                            info!("Configuration loaded from {}", options.config_path.display());
                        },
                        Err(e) => warn!("Failed to load configuration: {}", e),
                    },
                    _ => {},
                },
            }
        }

        match pipeline.update(dt, &config) {
            Some(TransitionEvent::Started { to, .. } | TransitionEvent::Switched { to, .. }) => {
                log_preset_change(to, &config);
            },
            Some(TransitionEvent::Completed { .. }) | None => {},
        }

        fps_log_timer += dt;
        if fps_log_timer >= FPS_LOG_INTERVAL {
            fps_log_timer = 0.0;
            let (min_fps, max_fps) = fps_counter.min_max_fps();
            let ms = fps_counter.avg_frame_time_ms();
            if show_fps {
                info!("FPS {:.0} avg  {:.0} min  {:.0} max  {:.1}ms", avg_fps, min_fps, max_fps, ms);
            } else {
                debug!("FPS {:.0} avg  {:.0} min  {:.0} max  {:.1}ms", avg_fps, min_fps, max_fps, ms);
            }
        }

        let frame = pipeline.render(&config);
        if let Err(e) = display.present(&mut target, frame) {
            warn!("Dropped frame: {}", e);
        }
    }

    Ok(())
}
