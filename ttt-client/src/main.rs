use bevy::log::LogPlugin;
use bevy::prelude::*;
use ttt_client::settings::ClientSettings;
use ttt_client::TicTacToeClientPlugin;

fn main() {
    let settings = ClientSettings::load();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "井字棋".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: settings.log_level.to_level(),
                    filter: "wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(TicTacToeClientPlugin::new(settings))
        .run();
}
