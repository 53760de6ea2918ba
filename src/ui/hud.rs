//! HUD text and the host-command sink that keeps it current

use bevy::prelude::*;

use crate::constants::*;
use crate::events::{EventBus, HostCommand};
use crate::world::FacingMarker;

/// Which HUD line a `Text2d` entity shows
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Score,
    Timer,
    Result,
    RestartPrompt,
}

const RESTART_PROMPT: &str = "Click or press Enter to restart";

/// Spawn the HUD lines in world space above the field
pub fn spawn_hud(commands: &mut Commands) {
    let lines = [
        (HudText::Score, "", 24.0, TEXT_PRIMARY, FIELD_HEIGHT / 2.0 - 24.0),
        (HudText::Timer, "", 24.0, TEXT_PRIMARY, FIELD_HEIGHT / 2.0 - 56.0),
        (HudText::Result, "", 48.0, TEXT_ACCENT, 60.0),
        (HudText::RestartPrompt, RESTART_PROMPT, 20.0, TEXT_PRIMARY, 10.0),
    ];

    for (kind, text, font_size, color, y) in lines {
        let visibility = match kind {
            HudText::RestartPrompt => Visibility::Hidden,
            _ => Visibility::Visible,
        };
        commands.spawn((
            Text2d::new(text),
            TextFont {
                font_size,
                ..default()
            },
            TextLayout::new_with_justify(Justify::Center),
            TextColor(color),
            Transform::from_xyz(0.0, y, 10.0),
            visibility,
            kind,
        ));
    }
}

/// Apply every queued host command (Update)
pub fn apply_host_commands(
    mut bus: ResMut<EventBus>,
    mut texts: Query<(&HudText, &mut Text2d, &mut Visibility)>,
    mut markers: Query<(&FacingMarker, &mut Transform)>,
) {
    // Read-only check first so an idle frame does not mark the bus changed
    if bus.commands().is_empty() {
        return;
    }
    for command in bus.drain_commands() {
        match command {
            HostCommand::SetScoreText(value) => set_text(&mut texts, HudText::Score, value),
            HostCommand::SetTimerText(value) => set_text(&mut texts, HudText::Timer, value),
            HostCommand::ShowResultText(value) => set_text(&mut texts, HudText::Result, value),
            HostCommand::ShowRestartAffordance(show) => {
                for (kind, _, mut visibility) in &mut texts {
                    if *kind == HudText::RestartPrompt {
                        *visibility = if show {
                            Visibility::Visible
                        } else {
                            Visibility::Hidden
                        };
                    }
                }
            }
            HostCommand::PlayAnimation { player, key } => {
                for (marker, mut transform) in &mut markers {
                    if marker.0 == player {
                        transform.translation.x = FacingMarker::offset(key);
                    }
                }
            }
        }
    }
}

fn set_text(texts: &mut Query<(&HudText, &mut Text2d, &mut Visibility)>, target: HudText, value: String) {
    for (kind, mut text, _) in texts.iter_mut() {
        if *kind == target {
            text.0 = value.clone();
        }
    }
}
