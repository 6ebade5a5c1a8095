//! The robot's configuration, built once from `constants` and shared read-only.

use crate::constants::auto::{
    CHOREO_THETA_KP, CHOREO_X_KP, CHOREO_Y_KP, POSITION_THETA_KP, POSITION_X_KP, POSITION_Y_KP,
    REPULSOR_THETA_KP, REPULSOR_X_KP, REPULSOR_Y_KP,
};
use crate::constants::config::{LOOP_OVERRUN_MILLIS, MAIN_LOOP_FREQUENCY_HZ};
use crate::error::{Result, RobotError};
use crate::field::FieldLayout;
use crate::motors::MotorModel;
use crate::subsystems::elevator::ElevatorConfig;
use crate::subsystems::intake::IntakeConfig;
use crate::subsystems::swerve::geometry::{ChassisGeometry, DriveGearing};
use crate::subsystems::vision::CameraMount;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use uom::si::velocity::meter_per_second;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn p(kp: f64) -> Self {
        Self { kp, ki: 0., kd: 0. }
    }
}

/// One controller per field axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HolonomicGains {
    pub x: PidGains,
    pub y: PidGains,
    pub theta: PidGains,
}

/// Gains for the auto controllers. Only stored here; the controllers live elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoGains {
    pub choreo: HolonomicGains,
    pub repulsor: HolonomicGains,
    pub position: HolonomicGains,
}

impl AutoGains {
    pub fn from_constants() -> AutoGains {
        AutoGains {
            choreo: HolonomicGains {
                x: PidGains::p(CHOREO_X_KP),
                y: PidGains::p(CHOREO_Y_KP),
                theta: PidGains::p(CHOREO_THETA_KP),
            },
            repulsor: HolonomicGains {
                x: PidGains::p(REPULSOR_X_KP),
                y: PidGains::p(REPULSOR_Y_KP),
                theta: PidGains::p(REPULSOR_THETA_KP),
            },
            position: HolonomicGains {
                x: PidGains::p(POSITION_X_KP),
                y: PidGains::p(POSITION_Y_KP),
                theta: PidGains::p(POSITION_THETA_KP),
            },
        }
    }
}

/// ## Everything the robot derives from its constants at startup.
/// Built once, then wrapped in an Arc and handed to whoever needs it. Nothing in here changes afterwards.
#[derive(Debug, Clone)]
pub struct RobotConfig {
    pub main_loop_frequency_hz: f64,
    pub loop_overrun: Duration,
    pub drive_motor: MotorModel,
    pub chassis: ChassisGeometry,
    pub field: FieldLayout,
    pub camera: CameraMount,
    pub intake: IntakeConfig,
    pub elevator: ElevatorConfig,
    pub auto: AutoGains,
}

impl RobotConfig {
    /// Validates and derives everything. Any error here means the robot must not start.
    pub fn from_constants() -> Result<RobotConfig> {
        Self::new(MAIN_LOOP_FREQUENCY_HZ, DriveGearing::L2, MotorModel::Falcon500)
    }

    pub fn new(
        main_loop_frequency_hz: f64,
        drive_gearing: DriveGearing,
        drive_motor: MotorModel,
    ) -> Result<RobotConfig> {
        if !(main_loop_frequency_hz.is_finite() && main_loop_frequency_hz > 0.) {
            return Err(RobotError::InvalidConfiguration(format!(
                "main loop frequency must be positive and finite, got {} Hz",
                main_loop_frequency_hz
            )));
        }
        // tokio intervals need a non-zero period that fits in a Duration
        match Duration::try_from_secs_f64(1. / main_loop_frequency_hz) {
            Ok(period) if period > Duration::ZERO => {}
            _ => {
                return Err(RobotError::InvalidConfiguration(format!(
                    "main loop frequency {} Hz has no usable loop period",
                    main_loop_frequency_hz
                )));
            }
        }

        let config = RobotConfig {
            main_loop_frequency_hz,
            loop_overrun: Duration::from_millis(LOOP_OVERRUN_MILLIS),
            drive_motor,
            chassis: ChassisGeometry::from_constants(drive_gearing)?,
            field: FieldLayout::new(),
            camera: CameraMount::from_constants(),
            intake: IntakeConfig::from_constants()?,
            elevator: ElevatorConfig::from_constants()?,
            auto: AutoGains::from_constants(),
        };

        info!(
            loop_hz = config.main_loop_frequency_hz,
            gearing = ?drive_gearing,
            max_speed_mps = config
                .chassis
                .max_drive_speed(drive_motor)
                .get::<meter_per_second>(),
            "robot config built"
        );

        Ok(config)
    }

    pub fn loop_period(&self) -> Duration {
        Duration::from_secs_f64(1. / self.main_loop_frequency_hz)
    }
}
