use macroquad::prelude::*;

mod audio;
mod camera;
mod config;
mod entity;
mod proximity;
mod renderer;
mod simulation;
mod snake;
mod spawner;
mod stats;
mod ui;
mod visual;
mod world;

use audio::{AudioBridge, ToneBank};
use config::Tuning;
use simulation::WorldState;
use stats::SessionGraphs;
use ui::UiState;
use visual::{Twinkle, VisualQuality, VisualSettings};
use world::Viewport;

fn window_conf() -> Conf {
    Conf {
        window_title: "Starsnake".to_string(),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

struct CliOptions {
    seed: u64,
    config_path: Option<String>,
    debug: bool,
    mute: bool,
    no_audio: bool,
    quality: Option<VisualQuality>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            config_path: None,
            debug: false,
            mute: false,
            no_audio: false,
            quality: None,
        }
    }
}

fn parse_cli<I: Iterator<Item = String>>(mut args: I) -> CliOptions {
    let mut opts = CliOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => match args.next().map(|v| v.parse::<u64>()) {
                Some(Ok(seed)) => opts.seed = seed,
                _ => eprintln!("[STARSNAKE] --seed expects an unsigned integer, keeping {}", opts.seed),
            },
            "--config" => match args.next() {
                Some(path) => opts.config_path = Some(path),
                None => eprintln!("[STARSNAKE] --config expects a path"),
            },
            "--quality" => match args.next().as_deref().and_then(VisualQuality::parse_cli) {
                Some(q) => opts.quality = Some(q),
                None => eprintln!("[STARSNAKE] --quality expects low, medium or high"),
            },
            "--debug" => opts.debug = true,
            "--mute" => opts.mute = true,
            "--no-audio" => opts.no_audio = true,
            other => eprintln!("[STARSNAKE] Ignoring unknown argument: {other}"),
        }
    }
    opts
}

fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match Tuning::load(path) {
        Ok(tuning) => {
            eprintln!("[STARSNAKE] Loaded tuning from {path}");
            tuning
        }
        Err(e) => {
            eprintln!("[STARSNAKE] Tuning load failed ({path}): {e}; using defaults");
            Tuning::default()
        }
    }
}

async fn init_audio(bridge: &mut AudioBridge, tuning: &Tuning, disabled: bool) {
    if disabled {
        bridge.mark_unavailable();
        eprintln!("[STARSNAKE] Audio disabled");
        return;
    }
    match ToneBank::load(tuning).await {
        Ok(bank) => {
            bridge.attach(Box::new(bank));
            eprintln!("[STARSNAKE] Audio ready");
        }
        Err(e) => {
            bridge.mark_failed();
            eprintln!("[STARSNAKE] Audio init failed: {e}");
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let opts = parse_cli(std::env::args().skip(1));
    let tuning = load_tuning(opts.config_path.as_deref());
    eprintln!("[STARSNAKE] Starting with seed {}", opts.seed);

    let mut state = WorldState::new(Viewport::new(screen_width(), screen_height()), tuning, opts.seed);
    state.verbose = opts.debug;

    let mut visual = VisualSettings {
        show_debug: opts.debug,
        ..VisualSettings::default()
    };
    if let Some(q) = opts.quality {
        visual.quality = q;
    }
    let twinkle = Twinkle::new(opts.seed as u32);

    let mut bridge = AudioBridge::new(if opts.mute { 0.0 } else { 1.0 });
    let mut graphs = SessionGraphs::new(600);
    let mut ui_state = UiState::default();
    let mut accumulator = 0.0f64;

    loop {
        let frame_time = get_frame_time();
        ui_state.frame_ms = frame_time * 1000.0;

        if ui_state.start_requested && !ui_state.started {
            ui_state.started = true;
            eprintln!("[STARSNAKE] Start requested");
            init_audio(&mut bridge, &state.tuning, opts.no_audio).await;
        }

        state.set_viewport(Viewport::new(screen_width(), screen_height()));

        if ui_state.started {
            accumulator += frame_time.min(0.1) as f64;
            let step = config::FIXED_DT as f64;
            while accumulator >= step {
                let outcome = state.tick();
                let chimes = bridge.dispatch(&outcome.detections, state.clock(), &state.tuning);
                graphs.record(state.stars.len(), state.snake.len(), chimes as u32);
                accumulator -= step;
            }

            if is_key_pressed(KeyCode::F3) {
                visual.show_debug = !visual.show_debug;
            }
        }

        let shimmer = visual.galaxy_twinkle.then_some(&twinkle);
        let frame = renderer::compose(&state, &visual, shimmer);
        renderer::execute(&frame, visual.quality);

        ui::draw_ui(&state, &mut bridge, &mut visual, &mut ui_state, &graphs);

        next_frame().await;
    }
}
