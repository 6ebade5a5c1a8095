use crate::subsystems::swerve::geometry::ChassisGeometry;
use nalgebra::{Rotation2, Vector2};
use std::f64::consts::FRAC_PI_2;
use uom::si::angle::radian;
use uom::si::f64::Angle;

/// Speed (-1 to 1) and wheel angle for one module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleSetpoint {
    pub speed: f64,
    pub angle: Angle,
}

impl ModuleSetpoint {
    pub fn stopped() -> ModuleSetpoint {
        ModuleSetpoint {
            speed: 0.,
            angle: Angle::new::<radian>(0.),
        }
    }
}

/// ## Rotation unit vectors for each swerve module.
/// A rotation unit vector is the direction a module has to push for the robot to spin in place.
/// They only depend on where the modules are, so they are worked out once from the chassis geometry.
pub struct Kinematics {
    module_rotation_unit_vectors: [Vector2<f64>; 4],
}

impl Kinematics {
    pub fn new(geometry: &ChassisGeometry) -> Kinematics {
        // rotate each module position by 90 degrees and normalize.
        // rotation * vector, not vector * rotation; Rotation2 is a matrix.
        let ninety_degree_rotation = Rotation2::new(FRAC_PI_2);
        let module_rotation_unit_vectors = geometry
            .module_positions()
            .map(|position| (ninety_degree_rotation * position).normalize());

        Kinematics {
            module_rotation_unit_vectors,
        }
    }

    pub fn rotation_unit_vectors(&self) -> &[Vector2<f64>; 4] {
        &self.module_rotation_unit_vectors
    }

    /// Unscaled setpoints, speeds can come out above 1.
    fn calculate_targets(
        &self,
        target_transformation: Vector2<f64>,
        rotation: f64,
    ) -> [ModuleSetpoint; 4] {
        self.module_rotation_unit_vectors.map(|rotation_unit_vector| {
            let final_vector = target_transformation + rotation_unit_vector * rotation;
            ModuleSetpoint {
                speed: final_vector.magnitude(),
                angle: Angle::new::<radian>(f64::atan2(final_vector.y, final_vector.x)),
            }
        })
    }

    /// Divides every speed by the largest one if the largest one is over 1.
    fn scale_targets(&self, targets: [ModuleSetpoint; 4]) -> [ModuleSetpoint; 4] {
        let max = targets.iter().map(|t| t.speed).fold(0., f64::max);
        if max > 1.0 {
            targets.map(|t| ModuleSetpoint {
                speed: t.speed / max,
                angle: t.angle,
            })
        } else {
            targets
        }
    }

    /// ## Module setpoints (FL, FR, BL, BR) for a robot-oriented translation and rotation.
    /// Positive rotation is counterclockwise. Angles come back wrapped to -PI..PI.
    pub fn get_targets(
        &self,
        target_transformation: Vector2<f64>,
        rotation: f64,
    ) -> [ModuleSetpoint; 4] {
        let targets = self.calculate_targets(target_transformation, rotation);
        self.scale_targets(targets)
    }
}

#[cfg(test)]
mod kinematics_tests {
    use super::*;
    use crate::subsystems::swerve::geometry::DriveGearing;
    use float_cmp::assert_approx_eq;
    use nalgebra::vector;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};
    use uom::si::f64::Length;
    use uom::si::length::meter;

    fn square_robot() -> Kinematics {
        let geometry = ChassisGeometry::new(
            Length::new::<meter>(0.6),
            Length::new::<meter>(0.6),
            Length::new::<meter>(0.1),
            DriveGearing::L2,
        )
        .unwrap();
        Kinematics::new(&geometry)
    }

    fn assert_targets(results: [ModuleSetpoint; 4], expected: [(f64, f64); 4]) {
        println!("results: {:?}", results);
        for (result, (speed, angle)) in results.iter().zip(expected) {
            assert_approx_eq!(f64, result.speed, speed, epsilon = 1e-9);
            assert_approx_eq!(f64, result.angle.get::<radian>(), angle, epsilon = 1e-9);
        }
    }

    #[test]
    fn kinematics_new_test() {
        let results = square_robot();

        // FL sits at (+, +), rotated a quarter turn it points to (-, +)
        let expected = [
            vector![-FRAC_1_SQRT_2, FRAC_1_SQRT_2],
            vector![FRAC_1_SQRT_2, FRAC_1_SQRT_2],
            vector![-FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
            vector![FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
        ];

        for (result, expected) in results.rotation_unit_vectors().iter().zip(expected) {
            assert_approx_eq!(f64, result.x, expected.x, epsilon = 1e-12);
            assert_approx_eq!(f64, result.y, expected.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn rectangular_robot_vectors_are_unit_length() {
        let geometry = ChassisGeometry::new(
            Length::new::<meter>(0.8),
            Length::new::<meter>(0.4),
            Length::new::<meter>(0.1),
            DriveGearing::L1,
        )
        .unwrap();
        for vector in Kinematics::new(&geometry).rotation_unit_vectors() {
            assert_approx_eq!(f64, vector.magnitude(), 1., epsilon = 1e-12);
        }
    }

    #[test]
    fn translate_full_power() {
        let kinematics = square_robot();
        assert_targets(
            kinematics.get_targets(vector![1.0, 0.0], 0.0),
            [(1.0, 0.0); 4],
        );
        assert_targets(
            kinematics.get_targets(vector![-1.0, 0.0], 0.0),
            [(1.0, PI); 4],
        );
        assert_targets(
            kinematics.get_targets(vector![0.0, -0.5], 0.0),
            [(0.5, -PI / 2.0); 4],
        );
    }

    #[test]
    fn spin_in_place() {
        let kinematics = square_robot();
        assert_targets(
            kinematics.get_targets(vector![0.0, 0.0], 1.0),
            [
                (1.0, 3.0 * PI / 4.0),
                (1.0, PI / 4.0),
                (1.0, -3.0 * PI / 4.0),
                (1.0, -PI / 4.0),
            ],
        );
        assert_targets(
            kinematics.get_targets(vector![0.0, 0.0], -0.5),
            [
                (0.5, -PI / 4.0),
                (0.5, -3.0 * PI / 4.0),
                (0.5, PI / 4.0),
                (0.5, 3.0 * PI / 4.0),
            ],
        );
    }

    #[test]
    fn scale_targets_test() {
        let kinematics = square_robot();
        let unscaled = kinematics.calculate_targets(vector![1.0, 1.0], 1.0);
        let scaled = kinematics.scale_targets(unscaled);

        let max = scaled.iter().map(|t| t.speed).fold(0., f64::max);
        assert_approx_eq!(f64, max, 1.0, epsilon = 1e-12);
        // FR's rotation vector lines up with the translation, so it's the fastest
        assert_approx_eq!(f64, scaled[1].speed, 1.0, epsilon = 1e-12);
    }
}
