use crate::units::normalize_angle;
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

/// ## A position and heading on the field.
/// Note: We use the blue-origin coordinate system (Rightmost blue driver station is (0,0), blue facing +x).
/// Heading is kept in (-PI, PI], counterclockwise positive. Build through `new` so it stays there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2d {
    x: Length,
    y: Length,
    heading: Angle,
}

/// ## An offset expressed in some pose's own frame.
/// dx is along the pose's heading, dy is to its left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2d {
    pub dx: Length,
    pub dy: Length,
    pub dtheta: Angle,
}

impl Transform2d {
    pub fn new(dx: Length, dy: Length, dtheta: Angle) -> Transform2d {
        Self { dx, dy, dtheta }
    }

    /// A pure translation in meters.
    pub fn from_meters(dx: f64, dy: f64) -> Transform2d {
        Self::new(
            Length::new::<meter>(dx),
            Length::new::<meter>(dy),
            Angle::new::<radian>(0.),
        )
    }

    pub fn identity() -> Transform2d {
        Self::from_meters(0., 0.)
    }
}

impl Pose2d {
    pub fn new(x: Length, y: Length, heading: Angle) -> Pose2d {
        Self {
            x,
            y,
            heading: Angle::new::<radian>(normalize_angle(heading.get::<radian>())),
        }
    }

    pub fn from_meters_degrees(x: f64, y: f64, heading_degrees: f64) -> Pose2d {
        Self::new(
            Length::new::<meter>(x),
            Length::new::<meter>(y),
            Angle::new::<degree>(heading_degrees),
        )
    }

    pub fn x(&self) -> Length {
        self.x
    }

    pub fn y(&self) -> Length {
        self.y
    }

    pub fn heading(&self) -> Angle {
        self.heading
    }

    /// Moves the pose in field coordinates. The heading is carried over untouched.
    pub fn translated(&self, dx: Length, dy: Length) -> Pose2d {
        Pose2d {
            x: self.x + dx,
            y: self.y + dy,
            heading: self.heading,
        }
    }

    /// (x, y) in meters.
    pub fn translation(&self) -> Vector2<f64> {
        Vector2::new(self.x.get::<meter>(), self.y.get::<meter>())
    }

    /// ## Applies `transform` in this pose's rotated frame.
    /// An offset of (0, 1) moves the pose one meter to its own left, whatever way it faces.
    pub fn transform_by(&self, transform: Transform2d) -> Pose2d {
        // rotation * vector, not vector * rotation
        let field_offset = Rotation2::new(self.heading.get::<radian>())
            * Vector2::new(transform.dx.get::<meter>(), transform.dy.get::<meter>());

        Pose2d::new(
            self.x + Length::new::<meter>(field_offset.x),
            self.y + Length::new::<meter>(field_offset.y),
            self.heading + transform.dtheta,
        )
    }

    /// ## The transform that takes `origin` to this pose, in `origin`'s frame.
    /// Inverse of `transform_by`: `origin.transform_by(pose.relative_to(&origin)) == pose`.
    pub fn relative_to(&self, origin: &Pose2d) -> Transform2d {
        let local = Rotation2::new(-origin.heading.get::<radian>())
            * (self.translation() - origin.translation());

        Transform2d::new(
            Length::new::<meter>(local.x),
            Length::new::<meter>(local.y),
            Angle::new::<radian>(normalize_angle(
                (self.heading - origin.heading).get::<radian>(),
            )),
        )
    }

    pub fn distance_to(&self, other: &Pose2d) -> Length {
        Length::new::<meter>((self.translation() - other.translation()).magnitude())
    }

    pub fn snapshot(&self) -> PoseSnapshot {
        PoseSnapshot {
            x_meters: self.x.get::<meter>(),
            y_meters: self.y.get::<meter>(),
            heading_degrees: self.heading.get::<degree>(),
        }
    }
}

/// Plain-number copy of a pose for logs and dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub x_meters: f64,
    pub y_meters: f64,
    pub heading_degrees: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use std::f64::consts::PI;

    fn assert_pose_eq(a: Pose2d, b: Pose2d) {
        assert_approx_eq!(f64, a.x.get::<meter>(), b.x.get::<meter>(), epsilon = 1e-9);
        assert_approx_eq!(f64, a.y.get::<meter>(), b.y.get::<meter>(), epsilon = 1e-9);
        assert_approx_eq!(
            f64,
            a.heading.get::<radian>(),
            b.heading.get::<radian>(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn heading_is_normalized() {
        let pose = Pose2d::from_meters_degrees(0., 0., 270.);
        assert_approx_eq!(f64, pose.heading.get::<degree>(), -90., epsilon = 1e-9);

        let pose = Pose2d::from_meters_degrees(0., 0., -180.);
        assert_approx_eq!(f64, pose.heading.get::<radian>(), PI, epsilon = 1e-12);
    }

    #[test]
    fn accessors_see_the_normalized_heading() {
        let pose = Pose2d::new(
            Length::new::<meter>(2.),
            Length::new::<meter>(-1.),
            Angle::new::<degree>(450.),
        );
        assert_eq!(pose.x(), Length::new::<meter>(2.));
        assert_eq!(pose.y(), Length::new::<meter>(-1.));
        assert_approx_eq!(f64, pose.heading().get::<degree>(), 90., epsilon = 1e-9);
    }

    #[test]
    fn translated_keeps_heading() {
        let pose = Pose2d::from_meters_degrees(5.163, 5.177484, 60.);
        let moved = pose.translated(Length::new::<meter>(8.565), Length::new::<meter>(0.));

        assert_eq!(moved.heading(), pose.heading());
        assert_eq!(moved.y(), pose.y());
        assert_approx_eq!(f64, moved.x().get::<meter>(), 13.728, epsilon = 1e-9);
    }

    #[test]
    fn identity_transform() {
        for degrees in [0., 45., 120., 180., -60.] {
            let pose = Pose2d::from_meters_degrees(1.5, -2.25, degrees);
            assert_pose_eq(pose.transform_by(Transform2d::identity()), pose);
        }
    }

    mod transform_by_tests {
        use super::*;

        #[test]
        fn facing_plus_x() {
            let pose = Pose2d::from_meters_degrees(1., 1., 0.);
            let result = pose.transform_by(Transform2d::from_meters(2., 1.));
            assert_pose_eq(result, Pose2d::from_meters_degrees(3., 2., 0.));
        }

        #[test]
        fn facing_plus_y() {
            // robot's left is the field's -x when facing +y
            let pose = Pose2d::from_meters_degrees(1., 1., 90.);
            let result = pose.transform_by(Transform2d::from_meters(2., 1.));
            assert_pose_eq(result, Pose2d::from_meters_degrees(0., 3., 90.));
        }

        #[test]
        fn rotation_adds() {
            let pose = Pose2d::from_meters_degrees(0., 0., 170.);
            let result = pose.transform_by(Transform2d::new(
                Length::new::<meter>(0.),
                Length::new::<meter>(0.),
                Angle::new::<degree>(20.),
            ));
            assert_approx_eq!(f64, result.heading.get::<degree>(), -170., epsilon = 1e-9);
        }
    }

    #[test]
    fn relative_to_undoes_transform_by() {
        let origin = Pose2d::from_meters_degrees(4., 2., -120.);
        let offset = Transform2d::from_meters(0.3, -0.7);
        let moved = origin.transform_by(offset);
        let recovered = moved.relative_to(&origin);

        assert_approx_eq!(f64, recovered.dx.get::<meter>(), 0.3, epsilon = 1e-9);
        assert_approx_eq!(f64, recovered.dy.get::<meter>(), -0.7, epsilon = 1e-9);
        assert_approx_eq!(f64, recovered.dtheta.get::<radian>(), 0., epsilon = 1e-9);
    }

    #[test]
    fn distance() {
        let a = Pose2d::from_meters_degrees(0., 0., 0.);
        let b = Pose2d::from_meters_degrees(3., 4., 90.);
        assert_approx_eq!(f64, a.distance_to(&b).get::<meter>(), 5., epsilon = 1e-12);
    }

    #[test]
    fn snapshot_is_in_degrees() {
        let snapshot = Pose2d::from_meters_degrees(5.825, 4.03, 60.).snapshot();
        assert_approx_eq!(f64, snapshot.x_meters, 5.825, epsilon = 1e-12);
        assert_approx_eq!(f64, snapshot.heading_degrees, 60., epsilon = 1e-9);
    }
}
