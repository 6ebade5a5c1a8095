use crate::constants::config::{TRACK_LENGTH_INCHES, TRACK_WIDTH_INCHES};
use crate::constants::drivetrain::{
    DRIVE_FIXED_STAGE_RATIOS, DRIVE_L1_STAGE_RATIO, DRIVE_L2_STAGE_RATIO, DRIVE_L3_STAGE_RATIO,
    SWERVE_TURN_RATIO, SWERVE_WHEEL_DIAMETER_INCHES,
};
use crate::constants::robotmap::drivetrain_map::{
    BL_DRIVE_ID, BL_ENCODER_ID, BL_TURN_ID, BR_DRIVE_ID, BR_ENCODER_ID, BR_TURN_ID, FL_DRIVE_ID,
    FL_ENCODER_ID, FL_TURN_ID, FR_DRIVE_ID, FR_ENCODER_ID, FR_TURN_ID,
};
use crate::error::{Result, RobotError};
use crate::motors::MotorModel;
use crate::units::GearReduction;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;
use uom::si::f64::{Length, Velocity};
use uom::si::length::{inch, meter};
use uom::si::velocity::meter_per_second;

/// Swerve modules. Everything indexed by module uses this order: FL, FR, BL, BR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwerveModule {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl SwerveModule {
    pub const ALL: [SwerveModule; 4] = [
        SwerveModule::FrontLeft,
        SwerveModule::FrontRight,
        SwerveModule::BackLeft,
        SwerveModule::BackRight,
    ];

    /// CAN wiring for this module, from constants::robotmap::drivetrain_map.
    pub fn information(&self) -> ModuleInformation {
        match self {
            SwerveModule::FrontLeft => {
                ModuleInformation::new("Front Left", FL_DRIVE_ID, FL_TURN_ID, FL_ENCODER_ID)
            }
            SwerveModule::FrontRight => {
                ModuleInformation::new("Front Right", FR_DRIVE_ID, FR_TURN_ID, FR_ENCODER_ID)
            }
            SwerveModule::BackLeft => {
                ModuleInformation::new("Back Left", BL_DRIVE_ID, BL_TURN_ID, BL_ENCODER_ID)
            }
            SwerveModule::BackRight => {
                ModuleInformation::new("Back Right", BR_DRIVE_ID, BR_TURN_ID, BR_ENCODER_ID)
            }
        }
    }

    /// Position in ALL.
    pub fn index(&self) -> usize {
        match self {
            SwerveModule::FrontLeft => 0,
            SwerveModule::FrontRight => 1,
            SwerveModule::BackLeft => 2,
            SwerveModule::BackRight => 3,
        }
    }

    /// Signs of (x, y) for this corner.
    fn corner(&self) -> (f64, f64) {
        match self {
            SwerveModule::FrontLeft => (1., 1.),
            SwerveModule::FrontRight => (1., -1.),
            SwerveModule::BackLeft => (-1., 1.),
            SwerveModule::BackRight => (-1., -1.),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInformation {
    pub name: &'static str,
    pub drive_id: i32,
    pub turn_id: i32,
    pub encoder_id: i32,
}

impl ModuleInformation {
    pub fn new(name: &'static str, drive_id: i32, turn_id: i32, encoder_id: i32) -> Self {
        Self {
            name,
            drive_id,
            turn_id,
            encoder_id,
        }
    }
}

/// Where a module sits relative to the center of the robot, plus its wiring.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleGeometry {
    pub module: SwerveModule,
    pub position: Vector2<Length>,
    pub information: ModuleInformation,
}

/// ## SDS drive gearing tiers.
/// Only the first stage changes between tiers, the rest of the gear train is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveGearing {
    L1,
    L2,
    L3,
}

impl DriveGearing {
    pub fn stage_ratio(&self) -> f64 {
        match self {
            DriveGearing::L1 => DRIVE_L1_STAGE_RATIO,
            DriveGearing::L2 => DRIVE_L2_STAGE_RATIO,
            DriveGearing::L3 => DRIVE_L3_STAGE_RATIO,
        }
    }

    /// The tier's stage composed with the fixed downstream stages.
    pub fn reduction(&self) -> Result<GearReduction> {
        let [second, third] = DRIVE_FIXED_STAGE_RATIOS;
        GearReduction::from_stages(&[self.stage_ratio(), second, third])
    }
}

/// ## Chassis dimensions and everything derived from them.
/// Built once at startup; the module rectangle is always centered on the robot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChassisGeometry {
    track_width: Length,
    track_length: Length,
    wheel_diameter: Length,
    modules: [ModuleGeometry; 4],
    turn_gearing: GearReduction,
    drive_gearing: DriveGearing,
    drive_reduction: GearReduction,
}

impl ChassisGeometry {
    /// Track width, track length and wheel diameter must all be positive.
    pub fn new(
        track_width: Length,
        track_length: Length,
        wheel_diameter: Length,
        drive_gearing: DriveGearing,
    ) -> Result<ChassisGeometry> {
        for (name, value) in [
            ("track width", track_width),
            ("track length", track_length),
            ("wheel diameter", wheel_diameter),
        ] {
            if !(value.get::<meter>() > 0.) {
                return Err(RobotError::InvalidConfiguration(format!(
                    "{} must be positive, got {} m",
                    name,
                    value.get::<meter>()
                )));
            }
        }

        let half_width = track_width / 2.;
        let half_length = track_length / 2.;
        let modules = SwerveModule::ALL.map(|module| {
            let (x_sign, y_sign) = module.corner();
            ModuleGeometry {
                module,
                position: Vector2::new(half_width * x_sign, half_length * y_sign),
                information: module.information(),
            }
        });

        let geometry = ChassisGeometry {
            track_width,
            track_length,
            wheel_diameter,
            modules,
            turn_gearing: GearReduction::new(SWERVE_TURN_RATIO)?,
            drive_gearing,
            drive_reduction: drive_gearing.reduction()?,
        };

        debug!(
            track_width_m = track_width.get::<meter>(),
            track_length_m = track_length.get::<meter>(),
            drive_reduction = geometry.drive_reduction.ratio(),
            turn_reduction = geometry.turn_gearing.ratio(),
            "chassis geometry derived"
        );

        Ok(geometry)
    }

    pub fn from_constants(drive_gearing: DriveGearing) -> Result<ChassisGeometry> {
        Self::new(
            Length::new::<inch>(TRACK_WIDTH_INCHES),
            Length::new::<inch>(TRACK_LENGTH_INCHES),
            Length::new::<inch>(SWERVE_WHEEL_DIAMETER_INCHES),
            drive_gearing,
        )
    }

    pub fn track_width(&self) -> Length {
        self.track_width
    }

    pub fn track_length(&self) -> Length {
        self.track_length
    }

    pub fn wheel_diameter(&self) -> Length {
        self.wheel_diameter
    }

    pub fn modules(&self) -> &[ModuleGeometry; 4] {
        &self.modules
    }

    pub fn module(&self, module: SwerveModule) -> &ModuleGeometry {
        &self.modules[module.index()]
    }

    /// Module positions in meters, FL, FR, BL, BR.
    pub fn module_positions(&self) -> [Vector2<f64>; 4] {
        self.modules
            .each_ref()
            .map(|m| Vector2::new(m.position.x.get::<meter>(), m.position.y.get::<meter>()))
    }

    /// Motor rotations per module steering rotation, same for all four modules.
    pub fn turn_gearing(&self) -> GearReduction {
        self.turn_gearing
    }

    pub fn drive_gearing(&self) -> DriveGearing {
        self.drive_gearing
    }

    pub fn drive_reduction(&self) -> GearReduction {
        self.drive_reduction
    }

    /// Wheel travel per drive motor rotation.
    pub fn drive_meters_per_motor_rotation(&self) -> f64 {
        PI * self.wheel_diameter.get::<meter>() / self.drive_reduction.ratio()
    }

    /// Free speed of the robot on `motor`, ignoring load and battery sag.
    pub fn max_drive_speed(&self, motor: MotorModel) -> Velocity {
        Velocity::new::<meter_per_second>(
            motor.free_speed_rps() * self.drive_meters_per_motor_rotation(),
        )
    }
}
