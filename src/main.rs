//! BhittiSense demo daemon
//!
//! Drives the sensing pipeline against the mock sensor board: a robot
//! sliding off-center through a corridor, a front wall closing in, and a
//! calibration pass in between. Useful for eyeballing the error signals
//! a steering controller would consume.

use bhitti_sense::devices::MockWallBoard;
use bhitti_sense::{Result, SensingConfig, SensorId, SystemDelay, WallSensing};
use std::env;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `bhitti-sense <path>` (positional)
/// - `bhitti-sense --config <path>` (flag-based)
/// - `bhitti-sense -c <path>` (short flag)
///
/// Returns `None` when no path was given; compiled-in defaults apply.
fn parse_config_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }

    None
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match parse_config_path() {
        Some(path) => {
            log::info!("Using config: {}", path);
            SensingConfig::from_file(&path)?
        }
        None => {
            log::info!("No config given, using compiled-in defaults");
            SensingConfig::default()
        }
    };

    let mut board = MockWallBoard::new(&config).with_noise(0.0005);
    let mut sensing = WallSensing::new(config.clone());
    let detector = sensing.detector();

    // Straight corridor, robot drifting 2 cm toward the right wall
    log::info!("corridor pass, drifting right");
    for cycle in 0..40 {
        let drift = 0.02 * (cycle as f32 / 39.0);
        board.set_distance(SensorId::SideLeft, config.geometry.middle_distance + drift);
        board.set_distance(SensorId::SideRight, config.geometry.middle_distance - drift);
        sensing.update_distance_readings(&mut board);

        if cycle % 10 == 9 {
            let walls = detector.read_walls();
            log::info!(
                "cycle {:2}: walls L={} F={} R={} close_err={:+.4}",
                cycle,
                walls.left,
                walls.front,
                walls.right,
                detector.side_sensors_close_error()
            );
        }
    }

    // Stationary and centered: the precondition for calibration
    board.set_distance(SensorId::SideLeft, config.geometry.middle_distance + 0.004);
    board.set_distance(SensorId::SideRight, config.geometry.middle_distance - 0.002);
    sensing.update_distance_readings(&mut board);
    log::info!("running side sensor calibration");
    sensing.side_sensors_calibration(&mut board, &mut SystemDelay);

    // Approach a perpendicular wall, slightly yawed
    log::info!("front wall approach");
    for cycle in 0..20 {
        let gap = 0.40 - 0.015 * cycle as f32;
        board.set_distance(SensorId::FrontLeft, gap + 0.01);
        board.set_distance(SensorId::FrontRight, gap);
        sensing.update_distance_readings(&mut board);

        if detector.front_wall_detection() {
            log::info!(
                "cycle {:2}: front wall at {:.3} m, yaw_err={:+.4}, diag_err={:+.4}",
                cycle,
                detector.front_wall_distance(),
                detector.front_sensors_error(),
                detector.diagonal_sensors_error()
            );
        }
    }

    log::info!("done");
    Ok(())
}
