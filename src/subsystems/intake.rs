use crate::constants::intake::{PIVOT_MAX_ANGLE_DEGREES, PIVOT_STAGE_RATIOS};
use crate::error::Result;
use crate::units::GearReduction;
use tracing::debug;
use uom::si::angle::{degree, radian};
use uom::si::f64::Angle;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeInputs {
    pub pivot_motor_rotations: f64,
    pub roller_speed: f64,
}

/// ## Hardware port for the intake pivot and rollers.
/// `NullIntakeIo` is the do-nothing implementation.
pub trait IntakeIo: Send {
    fn update_inputs(&mut self, inputs: &mut IntakeInputs);

    /// Pivot position in motor rotations.
    fn set_setpoint(&mut self, motor_rotations: f64);

    /// Roller percent output, -1 to 1.
    fn set_speed(&mut self, speed: f64);
}

pub struct NullIntakeIo;

impl IntakeIo for NullIntakeIo {
    fn update_inputs(&mut self, _: &mut IntakeInputs) {}

    fn set_setpoint(&mut self, _: f64) {}

    fn set_speed(&mut self, _: f64) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntakeConfig {
    /// motor rotations per pivot rotation
    pub pivot_gearing: GearReduction,
    pub max_angle: Angle,
}

impl IntakeConfig {
    pub fn from_constants() -> Result<IntakeConfig> {
        Ok(IntakeConfig {
            pivot_gearing: GearReduction::from_stages(&PIVOT_STAGE_RATIOS)?,
            max_angle: Angle::new::<degree>(PIVOT_MAX_ANGLE_DEGREES),
        })
    }
}

pub struct Intake {
    io: Box<dyn IntakeIo>,
    inputs: IntakeInputs,
    config: IntakeConfig,
}

impl Intake {
    pub fn new(io: Box<dyn IntakeIo>, config: IntakeConfig) -> Self {
        debug!(
            gearing = config.pivot_gearing.ratio(),
            max_angle_deg = config.max_angle.get::<degree>(),
            "intake configured"
        );
        Self {
            io,
            inputs: IntakeInputs::default(),
            config,
        }
    }

    pub fn periodic(&mut self) {
        self.io.update_inputs(&mut self.inputs);
    }

    /// Pivot angle from the last motor reading.
    pub fn pivot_angle(&self) -> Angle {
        self.config
            .pivot_gearing
            .mechanism_angle(self.inputs.pivot_motor_rotations)
    }

    /// ## Moves the pivot to `angle`, clamped between stowed (0) and max_angle.
    /// Returns the motor rotations that were commanded.
    pub fn set_pivot_angle(&mut self, angle: Angle) -> f64 {
        let clamped = Angle::new::<radian>(
            angle
                .get::<radian>()
                .clamp(0., self.config.max_angle.get::<radian>()),
        );
        let motor_rotations = self.config.pivot_gearing.motor_rotations_for(clamped);
        self.io.set_setpoint(motor_rotations);
        motor_rotations
    }

    pub fn set_roller_speed(&mut self, speed: f64) {
        self.io.set_speed(speed.clamp(-1., 1.));
    }

    pub fn stop(&mut self) {
        self.io.set_speed(0.);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeIntakeIo {
        setpoints: Arc<Mutex<Vec<f64>>>,
        speeds: Arc<Mutex<Vec<f64>>>,
    }

    impl IntakeIo for FakeIntakeIo {
        fn update_inputs(&mut self, inputs: &mut IntakeInputs) {
            // pivot sitting at 90 degrees
            inputs.pivot_motor_rotations = 0.25 * 20. * 72. / 28.;
        }

        fn set_setpoint(&mut self, motor_rotations: f64) {
            self.setpoints.lock().unwrap().push(motor_rotations);
        }

        fn set_speed(&mut self, speed: f64) {
            self.speeds.lock().unwrap().push(speed);
        }
    }

    fn intake(io: &FakeIntakeIo) -> Intake {
        Intake::new(Box::new(io.clone()), IntakeConfig::from_constants().unwrap())
    }

    #[test]
    fn config_from_constants() {
        let config = IntakeConfig::from_constants().unwrap();
        assert_approx_eq!(f64, config.pivot_gearing.ratio(), 20. * 72. / 28., epsilon = 1e-12);
        assert_approx_eq!(f64, config.max_angle.get::<degree>(), 117., epsilon = 1e-9);
    }

    #[test]
    fn pivot_setpoint_goes_through_gearing() {
        let io = FakeIntakeIo::default();
        let mut intake = intake(&io);

        let rotations = intake.set_pivot_angle(Angle::new::<degree>(90.));
        assert_approx_eq!(f64, rotations, 0.25 * 20. * 72. / 28., epsilon = 1e-9);
        assert_eq!(io.setpoints.lock().unwrap().as_slice(), &[rotations]);
    }

    #[test]
    fn pivot_setpoint_is_clamped() {
        let io = FakeIntakeIo::default();
        let mut intake = intake(&io);

        let over = intake.set_pivot_angle(Angle::new::<degree>(200.));
        assert_approx_eq!(f64, over, 117. / 360. * 20. * 72. / 28., epsilon = 1e-9);

        let under = intake.set_pivot_angle(Angle::new::<degree>(-15.));
        assert_eq!(under, 0.);
    }

    #[test]
    fn pivot_angle_from_inputs() {
        let io = FakeIntakeIo::default();
        let mut intake = intake(&io);
        intake.periodic();
        assert_approx_eq!(f64, intake.pivot_angle().get::<degree>(), 90., epsilon = 1e-9);
    }

    #[test]
    fn rollers() {
        let io = FakeIntakeIo::default();
        let mut intake = intake(&io);
        intake.set_roller_speed(-3.);
        intake.stop();
        assert_eq!(io.speeds.lock().unwrap().as_slice(), &[-1., 0.]);
    }
}
