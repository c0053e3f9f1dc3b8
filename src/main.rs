//! Side Shooter headless runner
//!
//! Drives the simulation at a fixed 60 Hz with a simple autopilot so the
//! core can be exercised without a renderer or input device.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use side_shooter::consts::RUNNER_DT;
use side_shooter::controls::Direction;
use side_shooter::sim::{GameEvent, GameState};
use side_shooter::{ControlMode, Controls, DamagePolicy, FireTrigger, Tuning};

#[derive(Parser, Debug)]
#[command(name = "side-shooter")]
#[command(about = "Run the side shooter simulation headless with a simple autopilot")]
struct Cli {
    /// Seed for the run's RNG
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Simulated time to run, in seconds
    #[arg(long, default_value_t = 60.0, value_parser = parse_seconds)]
    seconds: f32,
    /// JSON tuning file (partial files keep the defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// End the run on the first enemy contact
    #[arg(long)]
    instant_death: bool,
    /// Print the final state as JSON
    #[arg(long)]
    dump: bool,
}

fn parse_seconds(value: &str) -> Result<f32, String> {
    let seconds: f32 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(format!("`{value}` must be a finite, non-negative duration"))
    }
}

fn load_tuning(cli: &Cli) -> Result<Tuning, String> {
    let mut tuning = match &cli.tuning {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            let tuning =
                Tuning::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?;
            log::info!("Loaded tuning from {}", path.display());
            tuning
        }
        None => Tuning::default(),
    };
    if cli.instant_death {
        tuning.damage_policy = DamagePolicy::InstantDeath;
    }
    Ok(tuning)
}

/// Chase the nearest incoming enemy vertically and keep tapping fire
fn autopilot(state: &GameState, controls: &mut Controls) {
    let player = state.player.bounds();
    let target = state
        .enemies
        .iter()
        .filter(|e| e.bounds().right() > player.left())
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|e| e.bounds().center().y);

    let dy = target.map_or(0.0, |y| y - player.center().y);
    controls.set_direction(Direction::Up, dy < -4.0);
    controls.set_direction(Direction::Down, dy > 4.0);
    controls.set_trigger(state.time_ticks % 12 < 6);
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let tuning = match load_tuning(&cli) {
        Ok(tuning) => tuning,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut state = match GameState::with_tuning(cli.seed, tuning) {
        Ok(state) => state,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Side Shooter (headless) seed={} policy={} seconds={}",
        cli.seed,
        state.tuning.damage_policy.as_str(),
        cli.seconds
    );

    let mut controls =
        Controls::new(ControlMode::Keyboard).with_fire_trigger(FireTrigger::single_shot());
    let frames = (cli.seconds / RUNNER_DT).round() as u64;

    let mut runs = 1u32;
    let mut best = 0u64;
    let mut kills = 0u64;
    let mut shots = 0u64;
    let mut heals = 0u64;

    for _ in 0..frames {
        autopilot(&state, &mut controls);
        let intents = controls.frame_intents(RUNNER_DT);

        for event in state.advance(&intents, RUNNER_DT) {
            match event {
                GameEvent::ProjectileFired { .. } => shots += 1,
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::PickupCollected { healed: true, .. } => heals += 1,
                GameEvent::PlayerDamaged { hp_remaining, .. } => {
                    log::info!("Hit! {} hp left", hp_remaining);
                }
                GameEvent::GameOver { score } => {
                    log::info!("Run {} over with score {}", runs, score);
                    best = best.max(score);
                    controls.release_all();
                    controls.request_restart();
                }
                GameEvent::Restarted => runs += 1,
                _ => {}
            }
        }
    }
    best = best.max(state.score);

    println!("runs:   {runs}");
    println!("best:   {best}");
    println!("score:  {} (current run)", state.score);
    println!("kills:  {kills}");
    println!("shots:  {shots}");
    println!("heals:  {heals}");

    if cli.dump {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                log::error!("Failed to serialize state: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["side-shooter"]).unwrap();
        assert_eq!(cli.seed, 1);
        assert_eq!(cli.seconds, 60.0);
        assert!(cli.tuning.is_none());
        assert!(!cli.instant_death);
        assert!(!cli.dump);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "side-shooter",
            "--seed",
            "7",
            "--seconds",
            "2.5",
            "--tuning",
            "balance.json",
            "--instant-death",
            "--dump",
        ])
        .unwrap();
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.seconds, 2.5);
        assert_eq!(cli.tuning, Some(PathBuf::from("balance.json")));
        assert!(cli.instant_death);
        assert!(cli.dump);

        let cli = Cli::try_parse_from(["side-shooter", "--instant-death"]).unwrap();
        let tuning = load_tuning(&cli).unwrap();
        assert_eq!(tuning.damage_policy, DamagePolicy::InstantDeath);
    }

    #[test]
    fn test_seconds_must_be_finite() {
        for bad in ["inf", "NaN", "-1", "soon"] {
            assert!(parse_seconds(bad).is_err(), "{bad} accepted");
            assert!(Cli::try_parse_from(["side-shooter", "--seconds", bad]).is_err());
        }
        assert_eq!(parse_seconds("0"), Ok(0.0));
    }
}
