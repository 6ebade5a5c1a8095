use crate::constants::vision::{
    CAMERA_DIAGONAL_FOV_DEGREES, CAMERA_NAME, CAMERA_PITCH_DEGREES, CAMERA_RESOLUTION,
    CAMERA_ROLL_DEGREES, CAMERA_YAW_DEGREES, HEADING_STD_DEV, MULTI_TAG_STD_DEV_METERS,
    ROBOT_TO_CAMERA_METERS, SINGLE_TAG_STD_DEV_METERS,
};
use crate::error::{Result, RobotError};
use crate::geometry::Pose2d;
use crate::units::degrees_to_radians;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use std::time::Duration;
use tracing::{trace, warn};
use uom::si::angle::degree;
use uom::si::f64::Angle;

/// ## Where the camera is and what it sees.
/// Handed to the vision pipeline as is; nothing in here looks at images.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraMount {
    pub name: String,
    pub robot_to_camera: Isometry3<f64>,
    pub diagonal_fov: Angle,
    /// (width, height) in pixels
    pub resolution: (u32, u32),
}

impl CameraMount {
    pub fn from_constants() -> CameraMount {
        let [x, y, z] = ROBOT_TO_CAMERA_METERS;
        let rotation = UnitQuaternion::from_euler_angles(
            degrees_to_radians(CAMERA_ROLL_DEGREES),
            degrees_to_radians(CAMERA_PITCH_DEGREES),
            degrees_to_radians(CAMERA_YAW_DEGREES),
        );

        CameraMount {
            name: CAMERA_NAME.to_owned(),
            robot_to_camera: Isometry3::from_parts(Translation3::new(x, y, z), rotation),
            diagonal_fov: Angle::new::<degree>(CAMERA_DIAGONAL_FOV_DEGREES),
            resolution: CAMERA_RESOLUTION,
        }
    }
}

/// ## Standard deviations handed to the pose estimator with a vision measurement.
/// (x meters, y meters, heading radians). Heading is f64::MAX so vision never moves the gyro heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrustVector(Vector3<f64>);

impl TrustVector {
    pub fn new(x_std_dev: f64, y_std_dev: f64, heading_std_dev: f64) -> TrustVector {
        TrustVector(Vector3::new(x_std_dev, y_std_dev, heading_std_dev))
    }

    pub fn x_std_dev(&self) -> f64 {
        self.0.x
    }

    pub fn y_std_dev(&self) -> f64 {
        self.0.y
    }

    pub fn heading_std_dev(&self) -> f64 {
        self.0.z
    }

    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }
}

/// ## How much to trust a vision pose built from `tag_count` tags.
/// One tag is looser than several. Zero tags isn't an estimate at all and errors with NoObservation.
pub fn trust_for(tag_count: usize) -> Result<TrustVector> {
    match tag_count {
        0 => Err(RobotError::NoObservation),
        1 => Ok(TrustVector::new(
            SINGLE_TAG_STD_DEV_METERS,
            SINGLE_TAG_STD_DEV_METERS,
            HEADING_STD_DEV,
        )),
        _ => Ok(TrustVector::new(
            MULTI_TAG_STD_DEV_METERS,
            MULTI_TAG_STD_DEV_METERS,
            HEADING_STD_DEV,
        )),
    }
}

/// One pose estimate from the vision pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisionObservation {
    pub pose: Pose2d,
    pub tag_count: usize,
    /// capture time since robot program start
    pub timestamp: Duration,
}

/// ## Anything that fuses vision with odometry.
/// Lives outside this crate on the robot; `NullPoseEstimator` stands in where there isn't one.
pub trait PoseEstimator: Send {
    fn add_vision_measurement(&mut self, pose: Pose2d, timestamp: Duration, std_devs: TrustVector);

    fn estimated_pose(&self) -> Pose2d;
}

/// Holds one pose forever and drops every measurement.
pub struct NullPoseEstimator {
    pose: Pose2d,
}

impl NullPoseEstimator {
    pub fn new(pose: Pose2d) -> Self {
        Self { pose }
    }
}

impl PoseEstimator for NullPoseEstimator {
    fn add_vision_measurement(&mut self, _: Pose2d, _: Duration, _: TrustVector) {}

    fn estimated_pose(&self) -> Pose2d {
        self.pose
    }
}

/// The vision side of the robot: camera description plus the trust model.
#[derive(Debug, Clone)]
pub struct Vision {
    camera: CameraMount,
}

impl Vision {
    pub fn new(camera: CameraMount) -> Self {
        Self { camera }
    }

    pub fn camera(&self) -> &CameraMount {
        &self.camera
    }

    /// Standard deviations for an observation; warns and errors if it saw no tags.
    pub fn std_devs_for(&self, observation: &VisionObservation) -> Result<TrustVector> {
        let std_devs = trust_for(observation.tag_count).inspect_err(|_| {
            warn!(
                camera = %self.camera.name,
                "trust requested for a vision estimate with no tags"
            )
        })?;
        trace!(tags = observation.tag_count, x_std_dev = std_devs.x_std_dev(), "vision trust");
        Ok(std_devs)
    }

    /// ## Hands an observation to the estimator with the right trust.
    /// Observations with no tags are dropped before the trust model is asked.
    /// Returns whether the measurement was used.
    pub fn apply(
        &self,
        observation: &VisionObservation,
        estimator: &mut dyn PoseEstimator,
    ) -> bool {
        if observation.tag_count == 0 {
            trace!("dropping vision frame with no tags");
            return false;
        }

        match self.std_devs_for(observation) {
            Ok(std_devs) => {
                estimator.add_vision_measurement(observation.pose, observation.timestamp, std_devs);
                true
            }
            Err(_) => false,
        }
    }
}
