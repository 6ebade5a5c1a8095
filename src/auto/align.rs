use crate::config::HolonomicGains;
use crate::field::{Alliance, FieldLayout, ReefFace, ReefSide};
use crate::geometry::Pose2d;
use crate::subsystems::swerve::geometry::ChassisGeometry;
use crate::subsystems::swerve::kinematics::{Kinematics, ModuleSetpoint};
use nalgebra::{Rotation2, Vector2};
use uom::si::angle::{degree, radian};
use uom::si::f64::Angle;
use uom::si::length::meter;

/// Where an alignment routine should drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentTarget {
    pub face: ReefFace,
    pub side: ReefSide,
    pub pose: Pose2d,
}

/// ## The reef face whose middle pose is closest to the robot.
pub fn nearest_face(field: &FieldLayout, robot: &Pose2d, alliance: Alliance) -> ReefFace {
    let mut nearest = field.reef_poses()[0];
    let mut nearest_distance = f64::INFINITY;

    for reef_pose in field.reef_poses() {
        let distance = robot
            .distance_to(&reef_pose.slot(alliance).middle)
            .get::<meter>();
        if distance < nearest_distance {
            nearest = *reef_pose;
            nearest_distance = distance;
        }
    }

    nearest.face
}

/// Target for lining up on `side` of whichever face the robot is closest to.
pub fn alignment_target(
    field: &FieldLayout,
    robot: &Pose2d,
    alliance: Alliance,
    side: ReefSide,
) -> AlignmentTarget {
    let face = nearest_face(field, robot, alliance);
    AlignmentTarget {
        face,
        side,
        pose: field.reef_pose(face).slot(alliance).get(side),
    }
}

/// ## Unwraps `target` (degrees) to the equivalent angle closest to a continuous gyro reading.
/// A gyro at 710 degrees asked to face 0 should go to 720, not spin back two turns.
pub fn calculate_relative_target(current: f64, target: f64) -> f64 {
    current + (target - current + 180.).rem_euclid(360.) - 180.
}

/// Robot-oriented drive command, in the units `Kinematics::get_targets` takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveCommand {
    pub translation: Vector2<f64>,
    pub rotation: f64,
}

/// ## Proportional controller that pulls the robot onto an alignment pose.
/// Position error is worked out on the field, then turned into the robot's frame so the modules
/// can be commanded directly.
pub struct AlignController {
    gains: HolonomicGains,
    kinematics: Kinematics,
}

impl AlignController {
    pub fn new(gains: HolonomicGains, geometry: &ChassisGeometry) -> AlignController {
        AlignController {
            gains,
            kinematics: Kinematics::new(geometry),
        }
    }

    pub fn command(&self, robot: &Pose2d, target: &Pose2d) -> DriveCommand {
        let field_error = target.translation() - robot.translation();
        let field_speed = Vector2::new(
            field_error.x * self.gains.x.kp,
            field_error.y * self.gains.y.kp,
        );
        // rotation * vector, field frame into robot frame
        let translation = Rotation2::new(-robot.heading().get::<radian>()) * field_speed;

        let current = robot.heading().get::<degree>();
        let heading_error = Angle::new::<degree>(
            calculate_relative_target(current, target.heading().get::<degree>()) - current,
        );

        DriveCommand {
            translation,
            rotation: heading_error.get::<radian>() * self.gains.theta.kp,
        }
    }

    /// Module setpoints (FL, FR, BL, BR) that move the robot toward `target`.
    pub fn setpoints(&self, robot: &Pose2d, target: &Pose2d) -> [ModuleSetpoint; 4] {
        let command = self.command(robot, target);
        self.kinematics.get_targets(command.translation, command.rotation)
    }
}
