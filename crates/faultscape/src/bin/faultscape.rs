use std::io;
use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use clap::Parser;
use fault_formation::Config;
use faultscape::action::TerrainAction;
use faultscape::camera::FlyCameraPlugin;
#[cfg(debug_assertions)]
use faultscape::dev_tools::NormalGizmoPlugin;
use faultscape::light::TerrainLightPlugin;
use faultscape::prompt::{prompt_terrain, PromptAnswers};
use faultscape::settings::load_settings;
use faultscape::simulation::{InitialFaults, Simulation, SimulationPlugin};
use faultscape::terrain::TerrainPlugin;
use leafwing_input_manager::prelude::*;

/// Fault formation terrain modeling.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Ask for the terrain size and number of initial faults on the console.
    #[arg(long)]
    prompt: bool,
    /// JSON file with terrain settings.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Seed for the fault generator.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Fault Terrain Modeling".to_owned(),
            resolution: WindowResolution::new(800.0, 800.0),
            ..Default::default()
        }),
        ..Default::default()
    }));

    let (config, initial_faults) = startup_config(&cli);
    let simulation = match Simulation::new(config.clone()) {
        Ok(simulation) => simulation,
        Err(err) => {
            warn!(%err, ?config, "falling back to default terrain");
            Simulation::new(Config {
                seed: config.seed,
                ..Default::default()
            })
            .expect("default config should be valid")
        },
    };

    app.insert_resource(simulation)
        .insert_resource(InitialFaults(initial_faults))
        .add_plugins((
            SimulationPlugin,
            TerrainPlugin,
            FlyCameraPlugin,
            TerrainLightPlugin,
        ))
        .add_systems(Update, quit);

    #[cfg(debug_assertions)]
    app.add_plugins(NormalGizmoPlugin);

    app.run();
}

/// Settings file first, then the seed flag, then the console answers.
fn startup_config(cli: &Cli) -> (Config, usize) {
    let mut config = match &cli.settings {
        Some(path) => load_settings(path).unwrap_or_else(|err| {
            warn!(%err, ?path, "falling back to default settings");
            Config::default()
        }),
        None => Config::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut initial_faults = 0;
    if cli.prompt {
        let defaults = PromptAnswers::from_config(&config);
        match prompt_terrain(io::stdin().lock(), io::stdout(), defaults) {
            Ok(answers) => {
                initial_faults = answers.initial_faults;
                config = answers.apply(config);
            },
            Err(err) => {
                warn!(%err, "console prompt failed, keeping current settings");
            },
        }
    }

    info!(?config, initial_faults, "startup config");
    (config, initial_faults)
}

fn quit(action_state: Res<ActionState<TerrainAction>>, mut app_exit_events: EventWriter<AppExit>) {
    if action_state.just_pressed(&TerrainAction::Quit) {
        info!("quitting");
        app_exit_events.send(AppExit::Success);
    }
}
