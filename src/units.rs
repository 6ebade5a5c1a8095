//! Unit conversions and gear-chain math.
//!
//! Everything here is a thin wrapper around `uom` so the rest of the crate can
//! talk in plain `f64` where a quantity type would only get in the way.

use crate::error::{Result, RobotError};
use std::f64::consts::{PI, TAU};
use uom::si::angle::{degree, radian, revolution};
use uom::si::angular_velocity::{radian_per_second, revolution_per_minute};
use uom::si::f64::{Angle, AngularVelocity, Length};
use uom::si::length::{inch, meter};

pub fn degrees_to_radians(degrees: f64) -> f64 {
    Angle::new::<degree>(degrees).get::<radian>()
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    Angle::new::<radian>(radians).get::<degree>()
}

pub fn inches_to_meters(inches: f64) -> f64 {
    Length::new::<inch>(inches).get::<meter>()
}

pub fn meters_to_inches(meters: f64) -> f64 {
    Length::new::<meter>(meters).get::<inch>()
}

pub fn rad_per_sec_to_rpm(rad_per_sec: f64) -> f64 {
    AngularVelocity::new::<radian_per_second>(rad_per_sec).get::<revolution_per_minute>()
}

/// Motor free speed in rotations per second, the unit CTRE velocity loops want.
pub fn rps_from_free_speed(rad_per_sec: f64) -> f64 {
    rad_per_sec_to_rpm(rad_per_sec) / 60.
}

/// ## Wraps an angle in radians into (-PI, PI].
pub fn normalize_angle(radians: f64) -> f64 {
    let wrapped = (radians + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// ## Multiplies a chain of stage ratios into one reduction.
/// Every stage has to be strictly positive, and there has to be at least one.
/// A product that underflows to zero or overflows to infinity is rejected as well.
pub fn compose_reduction(stages: &[f64]) -> Result<f64> {
    if stages.is_empty() {
        return Err(RobotError::InvalidConfiguration(
            "a gear chain needs at least one stage".to_owned(),
        ));
    }

    let mut reduction = 1.;
    for (index, stage) in stages.iter().enumerate() {
        // written so NaN falls into the error branch too
        if !(*stage > 0.) {
            return Err(RobotError::InvalidConfiguration(format!(
                "stage {} has ratio {}, ratios must be positive",
                index, stage
            )));
        }
        reduction *= stage;
    }

    if !(reduction.is_finite() && reduction > 0.) {
        return Err(RobotError::InvalidConfiguration(format!(
            "stages {:?} multiply out to {}, outside what an f64 can hold",
            stages, reduction
        )));
    }

    Ok(reduction)
}

/// ## A composed gear reduction.
/// Stored as motor rotations per mechanism rotation (the "N:1" number on the gearbox),
/// so anything above 1 means the mechanism turns slower than the motor.
/// Built once at startup and never changed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GearReduction(f64);

impl GearReduction {
    pub fn new(ratio: f64) -> Result<GearReduction> {
        Self::from_stages(&[ratio])
    }

    pub fn from_stages(stages: &[f64]) -> Result<GearReduction> {
        compose_reduction(stages).map(GearReduction)
    }

    pub fn ratio(&self) -> f64 {
        self.0
    }

    /// How far the motor has to spin to move the mechanism through `angle`.
    pub fn motor_rotations_for(&self, angle: Angle) -> f64 {
        angle.get::<revolution>() * self.0
    }

    /// Mechanism angle after the motor has spun `motor_rotations`.
    pub fn mechanism_angle(&self, motor_rotations: f64) -> Angle {
        Angle::new::<revolution>(motor_rotations / self.0)
    }

    pub fn mechanism_speed(&self, motor_speed: AngularVelocity) -> AngularVelocity {
        motor_speed / self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn conversions() {
        assert_approx_eq!(f64, degrees_to_radians(180.), PI, epsilon = 1e-12);
        assert_approx_eq!(f64, radians_to_degrees(PI / 2.), 90., epsilon = 1e-12);
        assert_approx_eq!(f64, inches_to_meters(4.), 0.1016, epsilon = 1e-12);
        assert_approx_eq!(f64, meters_to_inches(0.0254), 1., epsilon = 1e-12);
    }

    #[test]
    fn falcon_free_speed_to_rps() {
        // 6380 rpm is the Falcon 500's free speed
        let rad_per_sec = 6380. * TAU / 60.;
        assert_approx_eq!(f64, rad_per_sec_to_rpm(rad_per_sec), 6380., epsilon = 1e-9);
        assert_approx_eq!(f64, rps_from_free_speed(rad_per_sec), 6380. / 60., epsilon = 1e-9);
    }

    mod normalize_angle_tests {
        use super::*;

        #[test]
        fn already_normalized() {
            assert_approx_eq!(f64, normalize_angle(1.), 1., epsilon = 1e-12);
            assert_approx_eq!(f64, normalize_angle(-1.), -1., epsilon = 1e-12);
            assert_approx_eq!(f64, normalize_angle(0.), 0., epsilon = 1e-12);
        }

        #[test]
        fn pi_stays_positive() {
            assert_eq!(normalize_angle(PI), PI);
            assert_eq!(normalize_angle(-PI), PI);
        }

        #[test]
        fn wraps_past_a_full_turn() {
            assert_approx_eq!(f64, normalize_angle(TAU + 0.5), 0.5, epsilon = 1e-12);
            assert_approx_eq!(f64, normalize_angle(-TAU - 0.5), -0.5, epsilon = 1e-12);
            assert_approx_eq!(f64, normalize_angle(3. * PI / 2.), -PI / 2., epsilon = 1e-12);
        }
    }

    mod compose_reduction_tests {
        use super::*;

        #[test]
        fn product_of_stages() {
            let reduction = compose_reduction(&[19. / 25., 50. / 14., 45. / 15.]).unwrap();
            assert_approx_eq!(f64, reduction, 8.142857142857142, epsilon = 1e-12);
        }

        #[test]
        fn positive_stages_give_positive_result() {
            for stages in [vec![0.001], vec![1., 2., 3.], vec![0.5, 0.5, 0.5, 0.5]] {
                assert!(compose_reduction(&stages).unwrap() > 0.);
            }
        }

        #[test]
        fn zero_stage_is_rejected() {
            let result = compose_reduction(&[5., 0., 3.]);
            assert!(matches!(result, Err(RobotError::InvalidConfiguration(_))));
        }

        #[test]
        fn negative_stage_is_rejected() {
            let result = compose_reduction(&[-2.]);
            assert!(matches!(result, Err(RobotError::InvalidConfiguration(_))));
        }

        #[test]
        fn nan_stage_is_rejected() {
            let result = compose_reduction(&[2., f64::NAN]);
            assert!(matches!(result, Err(RobotError::InvalidConfiguration(_))));
        }

        #[test]
        fn underflowing_chain_is_rejected() {
            assert!(matches!(
                compose_reduction(&[1e-200, 1e-200]),
                Err(RobotError::InvalidConfiguration(_))
            ));
            assert!(matches!(
                GearReduction::from_stages(&[1e-200, 1e-200]),
                Err(RobotError::InvalidConfiguration(_))
            ));
        }

        #[test]
        fn overflowing_chain_is_rejected() {
            assert!(matches!(
                compose_reduction(&[1e200, 1e200]),
                Err(RobotError::InvalidConfiguration(_))
            ));
            assert!(matches!(
                compose_reduction(&[f64::INFINITY]),
                Err(RobotError::InvalidConfiguration(_))
            ));
        }

        #[test]
        fn empty_chain_is_rejected() {
            assert!(matches!(
                compose_reduction(&[]),
                Err(RobotError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn gear_reduction_conversions() {
        let reduction = GearReduction::from_stages(&[20., 72. / 28.]).unwrap();
        let quarter_turn = Angle::new::<degree>(90.);

        let motor_rotations = reduction.motor_rotations_for(quarter_turn);
        assert_approx_eq!(f64, motor_rotations, 0.25 * 20. * 72. / 28., epsilon = 1e-12);
        assert_approx_eq!(
            f64,
            reduction.mechanism_angle(motor_rotations).get::<degree>(),
            90.,
            epsilon = 1e-9
        );

        let motor_speed = AngularVelocity::new::<radian_per_second>(100.);
        assert_approx_eq!(
            f64,
            reduction.mechanism_speed(motor_speed).get::<radian_per_second>(),
            100. / reduction.ratio(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn gear_reduction_rejects_zero() {
        assert!(GearReduction::new(0.).is_err());
    }
}
