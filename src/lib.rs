use crate::auto::align::{AlignController, AlignmentTarget, alignment_target};
use crate::config::RobotConfig;
use crate::field::{Alliance, ReefSide};
use crate::subsystems::elevator::{Elevator, ElevatorIo};
use crate::subsystems::intake::{Intake, IntakeIo};
use crate::subsystems::swerve::kinematics::ModuleSetpoint;
use crate::subsystems::vision::{PoseEstimator, Vision, VisionObservation};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::{info, trace, warn};

pub mod auto;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod geometry;
pub mod motors;
pub mod subsystems;
pub mod units;

/// Hardware ports the robot is built with.
pub struct Ports {
    pub elevator: Box<dyn ElevatorIo>,
    pub intake: Box<dyn IntakeIo>,
    pub estimator: Box<dyn PoseEstimator>,
}

pub struct Ferris {
    pub config: Arc<RobotConfig>,

    pub elevator: Elevator,
    pub intake: Intake,
    pub vision: Vision,
    pub estimator: Box<dyn PoseEstimator>,
    //other subsystems here

    /// from match config, never worked out here
    pub alliance: Alliance,
    pub selected_side: ReefSide,
    /// where alignment would drive right now, refreshed every loop
    pub alignment_target: Option<AlignmentTarget>,
    align: AlignController,
    /// FL, FR, BL, BR, toward `alignment_target`
    pub module_setpoints: [ModuleSetpoint; 4],
    pub dt: Duration,
}

impl Ferris {
    pub fn new(config: Arc<RobotConfig>, ports: Ports, alliance: Alliance) -> Self {
        Ferris {
            elevator: Elevator::new(ports.elevator, config.elevator.clone()),
            intake: Intake::new(ports.intake, config.intake.clone()),
            vision: Vision::new(config.camera.clone()),
            estimator: ports.estimator,
            alliance,
            selected_side: ReefSide::Middle,
            alignment_target: None,
            align: AlignController::new(config.auto.position, &config.chassis),
            module_setpoints: [ModuleSetpoint::stopped(); 4],
            dt: Duration::from_millis(0),
            config,
        }
    }

    pub fn stop(&mut self) {
        self.elevator.stop();
        self.intake.stop();
        self.module_setpoints = [ModuleSetpoint::stopped(); 4];
        // other subsystems here
    }

    /// ## One loop iteration.
    /// Reads subsystem inputs, hands every queued vision frame to the estimator,
    /// then refreshes the alignment target and the module setpoints that drive onto it.
    /// Returns how many vision frames were used.
    pub fn periodic(&mut self, observations: &mut mpsc::Receiver<VisionObservation>) -> usize {
        self.elevator.periodic();
        self.intake.periodic();

        let mut applied = 0;
        loop {
            match observations.try_recv() {
                Ok(observation) => {
                    if self.vision.apply(&observation, self.estimator.as_mut()) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        let pose = self.estimator.estimated_pose();
        let target = alignment_target(&self.config.field, &pose, self.alliance, self.selected_side);
        trace!(face = target.face.number(), side = ?target.side, "alignment target");
        self.module_setpoints = self.align.setpoints(&pose, &target.pose);
        self.alignment_target = Some(target);

        applied
    }
}

/// ## Runs the fixed-rate robot loop.
/// Stops after `cycles` iterations, or never if None.
/// If an iteration starts more than `config.loop_overrun` after the last one the robot is stopped.
pub async fn run(
    ferris: &mut Ferris,
    mut observations: mpsc::Receiver<VisionObservation>,
    cycles: Option<u64>,
) {
    let mut ticker = interval(ferris.config.loop_period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(period_ms = ferris.config.loop_period().as_millis() as u64, "loop");
    let mut last_loop = Instant::now();
    let mut completed = 0;

    while cycles.is_none_or(|cycles| completed < cycles) {
        ticker.tick().await;

        let dt = last_loop.elapsed();
        last_loop = Instant::now();
        ferris.dt = dt;

        if dt > ferris.config.loop_overrun {
            warn!(dt_ms = dt.as_millis() as u64, "loop overrun, stopping motors");
            ferris.stop();
        }

        ferris.periodic(&mut observations);
        completed += 1;
    }
}
