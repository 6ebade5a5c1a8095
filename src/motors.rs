use crate::error::{Result, RobotError};
use crate::units::{GearReduction, rps_from_free_speed};
use serde::{Deserialize, Serialize};
use uom::si::angular_velocity::{radian_per_second, revolution_per_minute};
use uom::si::f64::AngularVelocity;

/// Motors we know the free speed of. The whole robot runs on Falcons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotorModel {
    Falcon500,
    KrakenX60,
    Neo,
    Neo550,
}

impl MotorModel {
    pub fn from_name(s: &str) -> Result<Self> {
        match s {
            "Falcon500" => Ok(MotorModel::Falcon500),
            "KrakenX60" => Ok(MotorModel::KrakenX60),
            "Neo" => Ok(MotorModel::Neo),
            "Neo550" => Ok(MotorModel::Neo550),
            _ => Err(RobotError::UnknownMotorModel(s.to_owned())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MotorModel::Falcon500 => "Falcon500",
            MotorModel::KrakenX60 => "KrakenX60",
            MotorModel::Neo => "Neo",
            MotorModel::Neo550 => "Neo550",
        }
    }

    /// Datasheet free speed in rpm.
    fn free_speed_rpm(&self) -> f64 {
        match self {
            MotorModel::Falcon500 => 6380.,
            MotorModel::KrakenX60 => 6000.,
            MotorModel::Neo => 5676.,
            MotorModel::Neo550 => 11000.,
        }
    }

    /// Shaft speed with no load on it.
    pub fn free_speed(&self) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_minute>(self.free_speed_rpm())
    }

    /// Free speed in rotations per second.
    pub fn free_speed_rps(&self) -> f64 {
        rps_from_free_speed(self.free_speed().get::<radian_per_second>())
    }

    /// Fastest the mechanism behind `reduction` can spin on this motor.
    pub fn max_mechanism_speed(&self, reduction: GearReduction) -> AngularVelocity {
        reduction.mechanism_speed(self.free_speed())
    }
}
