//! radar-replay: drive the tracker headlessly over a generated scene.
//!
//! Usage:
//!   radar-replay run --seed 7 --contacts 40 --frames 600 --attachments 2
//!   radar-replay run --config radar.json --frames 120 --zoom-in-at 30
//!   radar-replay config > radar.json
//!
//! `run` prints the final snapshot as JSON on stdout. Set RUST_LOG=info to
//! follow registrations and removals as they happen.

use std::path::PathBuf;
use std::process;

use glam::DVec3;
use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use aceradar_core::config::RadarConfig;
use aceradar_core::types::{AttachmentInfo, Pose};
use aceradar_tracker::canvas::WorldCanvas;
use aceradar_tracker::input::FrameInput;
use aceradar_tracker::scene::WorldScene;
use aceradar_tracker::world_setup::{spawn_observer, spawn_random_contacts};
use aceradar_tracker::TargetRegistry;

const FRAME_DT: f64 = 1.0 / 60.0;
const CONTACT_RANGE: f64 = 24_000.0;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "config" => cmd_config(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "radar-replay: ACE RADAR headless replay tool\n\
         \n\
         Commands:\n\
         \n\
         run       Step the tracker over a seeded scene and print the final snapshot\n\
         \n\
           --config <path>      Radar config JSON (optional, default: built-in)\n\
           --seed <N>           Scene seed (default: 1)\n\
           --contacts <N>       Contacts spawned up front (default: 30)\n\
           --frames <N>         Frames to step (default: 300)\n\
           --attachments <N>    Auxiliary displays following the shared zoom (default: 1)\n\
           --despawn-every <N>  Despawn one random contact every N frames (default: 0, never)\n\
           --zoom-in-at <N>     Press zoom-in on frame N (optional)\n\
           --zoom-out-at <N>    Press zoom-out on frame N (optional)\n\
         \n\
         config    Print the default radar config as JSON\n\
         \n\
           --config <path>      Validate and re-print an existing config instead\n"
    );
}

fn parse_value(args: &[String], flag: &str) -> Option<String> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match parse_value(args, flag) {
        Some(raw) => match raw.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {flag} expects a number, got '{raw}'");
                process::exit(1);
            }
        },
        None => default,
    }
}

fn parse_frame(args: &[String], flag: &str) -> Option<u64> {
    parse_value(args, flag).map(|_| parse_number(args, flag, 0))
}

fn load_config(args: &[String]) -> RadarConfig {
    let Some(path) = parse_value(args, "--config").map(PathBuf::from) else {
        return RadarConfig::default();
    };
    match RadarConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// --- Config command ---

fn cmd_config(args: &[String]) {
    let config = load_config(args);
    match config.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let config = load_config(args);
    let seed: u64 = parse_number(args, "--seed", 1);
    let contacts: usize = parse_number(args, "--contacts", 30);
    let frames: u64 = parse_number(args, "--frames", 300);
    let attachments: u64 = parse_number(args, "--attachments", 1);
    let despawn_every: u64 = parse_number(args, "--despawn-every", 0);
    let zoom_in_at = parse_frame(args, "--zoom-in-at");
    let zoom_out_at = parse_frame(args, "--zoom-out-at");

    let mut registry = match TargetRegistry::new(config) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::new();
    let observer = spawn_observer(&mut world, Pose::new(DVec3::new(0.0, 1_000.0, 0.0), 0.0));
    let mut live = spawn_random_contacts(&mut world, &mut rng, contacts, CONTACT_RANGE);
    let mut canvas = WorldCanvas::new();
    let attachments: Vec<AttachmentInfo> = (1..=attachments).map(AttachmentInfo::shared).collect();

    log::info!("Replaying {frames} frames over {contacts} contacts (seed {seed})");

    for frame in 1..=frames {
        if despawn_every > 0 && frame % despawn_every == 0 && !live.is_empty() {
            let index = rng.gen_range(0..live.len());
            let _ = world.despawn(live.swap_remove(index));
        }

        // The observer flies a slow circle.
        if let Ok(mut pose) = world.get::<&mut Pose>(observer) {
            pose.heading_deg = (pose.heading_deg + 0.5) % 360.0;
            let heading = pose.heading_deg.to_radians();
            pose.position += DVec3::new(heading.sin(), 0.0, heading.cos()) * 50.0;
        }

        let scene = WorldScene::new(&world);
        let input = FrameInput {
            zoom_in: zoom_in_at == Some(frame),
            zoom_out: zoom_out_at == Some(frame),
            attachments: attachments.clone(),
            ..FrameInput::active(FRAME_DT, scene.observer_pose().unwrap_or_default())
        };
        let report = registry.tick(&scene, &mut canvas, &input);
        log::debug!(
            "frame {}: {} tracked, {} visible, {} events",
            report.frame,
            report.tracked,
            report.visible,
            report.events.len()
        );
    }

    match serde_json::to_string_pretty(&registry.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
