//! Reef scoring poses for both alliances.
//!
//! Only the six blue faces are written down (see `constants::field`). Every other
//! pose is derived from them:
//!
//! - the left and right branches by shifting sideways in the face's own frame,
//! - the red alliance by sliding the whole blue slot down the field.
//!
//! Red is never authored by hand so the two halves can't drift apart when a blue
//! pose gets re-measured.

use crate::constants::field::{
    BLUE_REEF_FACES, REEF_LEFT_OFFSET_METERS, REEF_RIGHT_OFFSET_METERS, RED_REEF_OFFSET_METERS,
};
use crate::error::{Result, RobotError};
use crate::geometry::{Pose2d, PoseSnapshot, Transform2d};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uom::si::f64::Length;
use uom::si::length::meter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alliance {
    Blue,
    Red,
}

impl Alliance {
    pub fn from_dashboard(s: &str) -> Result<Self> {
        match s {
            "Blue" => Ok(Alliance::Blue),
            "Red" => Ok(Alliance::Red),
            _ => Err(RobotError::InvalidSelector(format!("alliance {:?}", s))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Alliance::Blue => "Blue",
            Alliance::Red => "Red",
        }
    }
}

/// Which of the three alignment points on a face to drive to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReefSide {
    Left,
    Middle,
    Right,
}

impl ReefSide {
    pub fn from_dashboard(s: &str) -> Result<Self> {
        match s {
            "Left" => Ok(ReefSide::Left),
            "Middle" => Ok(ReefSide::Middle),
            "Right" => Ok(ReefSide::Right),
            _ => Err(RobotError::InvalidSelector(format!("reef side {:?}", s))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReefSide::Left => "Left",
            ReefSide::Middle => "Middle",
            ReefSide::Right => "Right",
        }
    }

    pub fn iterator() -> Vec<Self> {
        vec![ReefSide::Left, ReefSide::Middle, ReefSide::Right]
    }

    pub fn names() -> Vec<String> {
        Self::iterator()
            .iter()
            .map(|s| s.name().to_owned())
            .collect()
    }
}

/// ## One of the six reef faces, numbered 1 to 6 counterclockwise from the face at 0 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReefFace(u8);

impl ReefFace {
    pub const COUNT: u8 = 6;

    pub fn new(face: u8) -> Result<ReefFace> {
        if (1..=Self::COUNT).contains(&face) {
            Ok(ReefFace(face))
        } else {
            Err(RobotError::InvalidSelector(format!(
                "reef face {} (faces are 1 to {})",
                face,
                Self::COUNT
            )))
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = ReefFace> {
        (1..=Self::COUNT).map(ReefFace)
    }

    /// The face's blue middle pose, as measured.
    pub fn canonical_pose(&self) -> Pose2d {
        let (x, y, heading_degrees) = BLUE_REEF_FACES[usize::from(self.0 - 1)];
        Pose2d::from_meters_degrees(x, y, heading_degrees)
    }
}

/// Shift the pose to the robot's left.
pub fn left_pose(pose: Pose2d) -> Pose2d {
    pose.transform_by(Transform2d::from_meters(0., REEF_LEFT_OFFSET_METERS))
}

pub fn right_pose(pose: Pose2d) -> Pose2d {
    pose.transform_by(Transform2d::from_meters(0., REEF_RIGHT_OFFSET_METERS))
}

/// ## Red alliance twin of a blue pose.
/// Only x moves; heading is kept as is, the blue headings are already authored for it.
pub fn red_reef_pose(pose: Pose2d) -> Pose2d {
    pose.translated(
        Length::new::<meter>(RED_REEF_OFFSET_METERS),
        Length::new::<meter>(0.),
    )
}

/// Three alignment points on one face, all facing the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReefSlot {
    pub middle: Pose2d,
    pub left: Pose2d,
    pub right: Pose2d,
}

impl ReefSlot {
    pub fn from_middle(middle: Pose2d) -> ReefSlot {
        Self {
            middle,
            left: left_pose(middle),
            right: right_pose(middle),
        }
    }

    pub fn get(&self, side: ReefSide) -> Pose2d {
        match side {
            ReefSide::Left => self.left,
            ReefSide::Middle => self.middle,
            ReefSide::Right => self.right,
        }
    }

    fn map(&self, f: impl Fn(Pose2d) -> Pose2d) -> ReefSlot {
        Self {
            middle: f(self.middle),
            left: f(self.left),
            right: f(self.right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReefPose {
    pub face: ReefFace,
    pub blue: ReefSlot,
    pub red: ReefSlot,
}

impl ReefPose {
    pub fn derive(face: ReefFace) -> ReefPose {
        let blue = ReefSlot::from_middle(face.canonical_pose());
        // offsets are applied on the blue side first, then the whole slot is slid over
        let red = blue.map(red_reef_pose);

        ReefPose { face, blue, red }
    }

    pub fn slot(&self, alliance: Alliance) -> &ReefSlot {
        match alliance {
            Alliance::Blue => &self.blue,
            Alliance::Red => &self.red,
        }
    }
}

/// ## Every reef pose on the field, derived once at startup.
/// Read only afterwards, so it can be shared between the main loop and the vision task freely.
#[derive(Debug, Clone)]
pub struct FieldLayout {
    reef: Vec<ReefPose>,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldLayout {
    pub fn new() -> FieldLayout {
        let reef: Vec<ReefPose> = ReefFace::all().map(ReefPose::derive).collect();
        debug!(faces = reef.len(), "derived reef poses");

        FieldLayout { reef }
    }

    pub fn reef_pose(&self, face: ReefFace) -> &ReefPose {
        &self.reef[usize::from(face.number() - 1)]
    }

    pub fn reef_poses(&self) -> &[ReefPose] {
        &self.reef
    }

    /// ## Where to drive for `side` of reef face `face` (1 to 6).
    /// Errors with InvalidSelector for any other face number.
    pub fn get_pose(&self, face: u8, alliance: Alliance, side: ReefSide) -> Result<Pose2d> {
        let face = ReefFace::new(face)?;
        Ok(self.reef_pose(face).slot(alliance).get(side))
    }

    /// Flat table of every pose for logging.
    pub fn snapshot(&self) -> Vec<ReefPoseSnapshot> {
        let mut table = Vec::new();
        for reef_pose in &self.reef {
            for alliance in [Alliance::Blue, Alliance::Red] {
                for side in ReefSide::iterator() {
                    table.push(ReefPoseSnapshot {
                        face: reef_pose.face.number(),
                        alliance,
                        side,
                        pose: reef_pose.slot(alliance).get(side).snapshot(),
                    });
                }
            }
        }
        table
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReefPoseSnapshot {
    pub face: u8,
    pub alliance: Alliance,
    pub side: ReefSide,
    pub pose: PoseSnapshot,
}
