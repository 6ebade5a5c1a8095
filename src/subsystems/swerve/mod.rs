pub mod geometry;
pub mod kinematics;
