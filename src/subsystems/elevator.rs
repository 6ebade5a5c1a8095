use crate::constants::elevator::{MAX_HEIGHT_INCHES, STAGES, STAGE_RATIOS};
use crate::error::{Result, RobotError};
use crate::units::GearReduction;
use tracing::debug;
use uom::si::f64::Length;
use uom::si::length::{inch, meter};

/// Last reading from the elevator hardware.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElevatorInputs {
    pub height_meters: f64,
    pub velocity_meters_per_second: f64,
    pub applied_volts: f64,
}

/// ## Hardware port for the elevator.
/// One implementation per environment (real motors, sim, tests).
/// `NullElevatorIo` is the do-nothing one.
pub trait ElevatorIo: Send {
    fn update_inputs(&mut self, inputs: &mut ElevatorInputs);

    /// Closed-loop carriage height in meters.
    fn set_setpoint(&mut self, height_meters: f64);

    /// Open-loop percent output, -1 to 1.
    fn set_speed(&mut self, speed: f64);
}

pub struct NullElevatorIo;

impl ElevatorIo for NullElevatorIo {
    fn update_inputs(&mut self, _: &mut ElevatorInputs) {}

    fn set_setpoint(&mut self, _: f64) {}

    fn set_speed(&mut self, _: f64) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorConfig {
    /// motor rotations per drum rotation
    pub gearing: GearReduction,
    pub max_height: Length,
    pub stages: u32,
}

impl ElevatorConfig {
    pub fn from_constants() -> Result<ElevatorConfig> {
        if STAGES == 0 {
            return Err(RobotError::InvalidConfiguration(
                "elevator needs at least one stage".to_owned(),
            ));
        }

        Ok(ElevatorConfig {
            gearing: GearReduction::from_stages(&STAGE_RATIOS)?,
            max_height: Length::new::<inch>(MAX_HEIGHT_INCHES),
            stages: STAGES,
        })
    }
}

pub struct Elevator {
    io: Box<dyn ElevatorIo>,
    inputs: ElevatorInputs,
    config: ElevatorConfig,
}

impl Elevator {
    pub fn new(io: Box<dyn ElevatorIo>, config: ElevatorConfig) -> Self {
        debug!(
            gearing = config.gearing.ratio(),
            max_height_m = config.max_height.get::<meter>(),
            "elevator configured"
        );
        Self {
            io,
            inputs: ElevatorInputs::default(),
            config,
        }
    }

    pub fn periodic(&mut self) {
        self.io.update_inputs(&mut self.inputs);
    }

    pub fn inputs(&self) -> &ElevatorInputs {
        &self.inputs
    }

    pub fn config(&self) -> &ElevatorConfig {
        &self.config
    }

    /// ## Sends the carriage to `height`, clamped to the travel the elevator actually has.
    /// Returns the height that was commanded.
    pub fn set_height(&mut self, height: Length) -> Length {
        let clamped = height
            .get::<meter>()
            .clamp(0., self.config.max_height.get::<meter>());
        self.io.set_setpoint(clamped);
        Length::new::<meter>(clamped)
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.io.set_speed(speed.clamp(-1., 1.));
    }

    pub fn stop(&mut self) {
        self.io.set_speed(0.);
    }
}
