pub mod elevator;
pub mod intake;
pub mod swerve;
pub mod vision;
