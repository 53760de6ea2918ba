//! World module - field entities, the fixed physics step and transform sync

mod physics;

pub use physics::*;

use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::body::BodyId;
use crate::constants::*;
use crate::events::EventBus;
use crate::helpers::field_to_world;
use crate::match_state::MatchState;
use crate::player::{AnimationKey, PlayerSlot};
use crate::scoring::GoalZone;
use crate::tuning::MatchTuning;

/// Seeded RNG for every random choice made during a match
#[derive(Resource)]
pub struct MatchRng(pub StdRng);

/// Ground strip under the field
#[derive(Component)]
pub struct Ground;

/// Small band on a player sprite showing which way they face
#[derive(Component)]
pub struct FacingMarker(pub PlayerSlot);

impl FacingMarker {
    /// Horizontal offset of the band for an animation
    pub fn offset(key: AnimationKey) -> f32 {
        match key {
            AnimationKey::Left => -PLAYER_SIZE.x / 4.0,
            AnimationKey::Right => PLAYER_SIZE.x / 4.0,
            AnimationKey::Turn => 0.0,
        }
    }
}

// ============================================================================
// Field spawning (entities only; positions come from MatchState each frame)
// ============================================================================

/// Spawn the ground strip
pub fn spawn_ground(commands: &mut Commands) {
    commands.spawn((
        Sprite::from_color(GROUND_COLOR, GROUND_SIZE),
        Transform::from_translation(field_to_world(GROUND_CENTER).extend(0.0)),
        Ground,
    ));
}

/// Spawn both goal zones, drawn translucent behind the bodies
pub fn spawn_goals(commands: &mut Commands) {
    for zone in GoalZone::ALL {
        let color = match zone {
            GoalZone::Player1 => GOAL_P1_COLOR,
            GoalZone::Player2 => GOAL_P2_COLOR,
        };
        commands.spawn((
            Sprite::from_color(color, zone.size()),
            Transform::from_translation(field_to_world(zone.center()).extend(-0.1)),
            zone,
        ));
    }
}

/// Spawn the ball and both players
pub fn spawn_bodies(commands: &mut Commands, state: &MatchState) {
    let arena = state.arena();

    commands.spawn((
        Sprite::from_color(BALL_COLOR, BALL_SIZE),
        Transform::from_translation(field_to_world(arena.ball.position).extend(1.0)),
        BodyId::Ball,
    ));

    for (slot, color) in [(PlayerSlot::One, PLAYER1_COLOR), (PlayerSlot::Two, PLAYER2_COLOR)] {
        let body = arena.player(slot);
        commands
            .spawn((
                Sprite::from_color(color, PLAYER_SIZE),
                Transform::from_translation(field_to_world(body.position).extend(0.5)),
                BodyId::from(slot),
                slot,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Sprite::from_color(TEXT_PRIMARY, Vec2::new(PLAYER_SIZE.x / 2.0, 6.0)),
                    Transform::from_xyz(0.0, PLAYER_SIZE.y / 4.0, 0.1),
                    FacingMarker(slot),
                ));
            });
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Integrate bodies and feed contacts back into the match (FixedUpdate)
pub fn physics_step(
    time: Res<Time>,
    mut state: ResMut<MatchState>,
    mut host: ResMut<PhysicsHost>,
    mut rng: ResMut<MatchRng>,
    mut bus: ResMut<EventBus>,
    tuning: Res<MatchTuning>,
) {
    let contacts = host.step(state.arena_mut(), &tuning, time.delta_secs());
    dispatch_contacts(&mut state, &contacts, &tuning, &mut rng.0, &mut bus);
}

/// Copy body positions and rotation onto their sprites
pub fn sync_body_transforms(state: Res<MatchState>, mut query: Query<(&BodyId, &mut Transform)>) {
    for (id, mut transform) in &mut query {
        let body = state.arena().get(*id);
        let world = field_to_world(body.position);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        // Field y points down, so clockwise field rotation is negative in world space
        transform.rotation = Quat::from_rotation_z(-body.angle);
    }
}
