use reef_core::config::RobotConfig;
use reef_core::field::Alliance;
use reef_core::geometry::Pose2d;
use reef_core::subsystems::elevator::NullElevatorIo;
use reef_core::subsystems::intake::NullIntakeIo;
use reef_core::subsystems::swerve::kinematics::Kinematics;
use reef_core::subsystems::vision::NullPoseEstimator;
use reef_core::{Ferris, Ports, run};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // bad constants are fatal, the robot doesn't start on half a config
    let config = match RobotConfig::from_constants() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("failed to build robot config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // alliance comes from match config; default to blue off the field
    let alliance = match std::env::var("ALLIANCE") {
        Ok(name) => match Alliance::from_dashboard(&name) {
            Ok(alliance) => alliance,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        Err(_) => Alliance::Blue,
    };

    match serde_json::to_string(&config.field.snapshot()) {
        Ok(table) => debug!(%table, "reef poses"),
        Err(e) => error!("failed to serialize reef poses: {}", e),
    }

    let kinematics = Kinematics::new(&config.chassis);
    debug!(vectors = ?kinematics.rotation_unit_vectors(), "module rotation unit vectors");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // no hardware off the robot; every port is the null one
    let ports = Ports {
        elevator: Box::new(NullElevatorIo),
        intake: Box::new(NullIntakeIo),
        estimator: Box::new(NullPoseEstimator::new(Pose2d::from_meters_degrees(0., 0., 0.))),
    };
    let mut ferris = Ferris::new(Arc::clone(&config), ports, alliance);

    runtime.block_on(async {
        // the vision pipeline owns the sender; nothing feeds it here
        let (_vision_tx, vision_rx) = mpsc::channel(16);

        info!(alliance = alliance.name(), "robot started");
        tokio::select! {
            _ = run(&mut ferris, vision_rx, None) => {}
            _ = tokio::signal::ctrl_c() => info!("shutting down"),
        }
        ferris.stop();
    });

    ExitCode::SUCCESS
}
