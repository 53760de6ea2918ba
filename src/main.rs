//! Ballduel - a two-player ball mini-game built with Bevy
//!
//! Main entry point: argument parsing, app setup and system registration.

use ballduel::{
    ControlMode, Controls, EventBus, EventLogConfig, EventLogger, FixedFrame, MatchRng,
    MatchState, MatchTuning, PhysicsHost, PlayerInput, RepeatingTimers, constants::*, events,
    input, match_state, tick, ui, world,
};
use bevy::{camera::ScalingMode, prelude::*};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

/// Command-line options
struct Args {
    two_player: bool,
    seed: Option<u64>,
    tuning: Option<PathBuf>,
    no_log: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let value_of = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    };

    Args {
        two_player: args.iter().any(|a| a == "--two-player"),
        seed: value_of("--seed").and_then(|s| match s.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!("Ignoring invalid --seed '{}'", s);
                None
            }
        }),
        tuning: value_of("--tuning").map(PathBuf::from),
        no_log: args.iter().any(|a| a == "--no-log"),
    }
}

fn main() {
    let args = parse_args();

    let tuning = args
        .tuning
        .as_deref()
        .map(MatchTuning::load_or_default)
        .unwrap_or_default();

    // Unseeded runs still log the seed they used so a match can be replayed
    let seed = args.seed.unwrap_or_else(rand::random);

    let controls = if args.two_player {
        Controls::two_player()
    } else {
        Controls::default()
    };

    let mut logger = EventLogger::new(EventLogConfig {
        enabled: !args.no_log,
        ..default()
    });
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    logger.start_session(&timestamp, seed, &tuning);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                resolution: bevy::window::WindowResolution::new(FIELD_WIDTH as u32, FIELD_HEIGHT as u32)
                    .with_scale_factor_override(1.0),
                title: match controls.player2 {
                    ControlMode::Human => "Ballduel (2 players)".into(),
                    ControlMode::Ai => "Ballduel".into(),
                },
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .insert_resource(tuning)
        .insert_resource(controls)
        .insert_resource(logger)
        .insert_resource(MatchRng(StdRng::seed_from_u64(seed)))
        .insert_resource(if args.no_log {
            EventBus::disabled()
        } else {
            EventBus::new()
        })
        .init_resource::<MatchState>()
        .init_resource::<RepeatingTimers>()
        .init_resource::<PhysicsHost>()
        .init_resource::<PlayerInput>()
        .init_resource::<FixedFrame>()
        .add_systems(Startup, (setup, match_state::start_match).chain())
        // Input, restart and presentation run every rendered frame
        .add_systems(
            Update,
            (
                events::update_event_bus_time,
                input::capture_input,
                match_state::handle_restart_request,
                ui::apply_host_commands,
                world::sync_body_transforms,
                events::write_event_log,
            )
                .chain(),
        )
        // Match tick, then physics and contacts, then the countdown
        .add_systems(
            FixedUpdate,
            (
                tick::run_tick_system,
                world::physics_step,
                match_state::tick_match_clock,
            )
                .chain(),
        )
        .add_systems(Last, events::close_event_log)
        .run();
}

/// Spawn the camera, field and HUD
fn setup(mut commands: Commands, state: Res<MatchState>) {
    // Camera - orthographic, shows the whole field
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: FIELD_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));

    world::spawn_ground(&mut commands);
    world::spawn_goals(&mut commands);
    world::spawn_bodies(&mut commands, &state);
    ui::spawn_hud(&mut commands);
}
