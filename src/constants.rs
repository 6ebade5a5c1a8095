pub mod config {
    /// Rate the main robot loop runs at.
    pub const MAIN_LOOP_FREQUENCY_HZ: f64 = 50.;
    /// If a loop iteration takes longer than this the watchdog complains.
    pub const LOOP_OVERRUN_MILLIS: u64 = 150;

    // TODO: re-measure once the 2025 frame is welded
    /// Wheel-Wheel width of robot.
    pub const TRACK_WIDTH_INCHES: f64 = 29. - 5.25;
    /// Wheel-Wheel length of robot.
    pub const TRACK_LENGTH_INCHES: f64 = 29. - 5.25;
}

pub mod robotmap {
    pub mod drivetrain_map {
        pub const FL_DRIVE_ID: i32 = 1;
        pub const FR_DRIVE_ID: i32 = 2;
        pub const BL_DRIVE_ID: i32 = 3;
        pub const BR_DRIVE_ID: i32 = 4;

        pub const FL_TURN_ID: i32 = 5;
        pub const FR_TURN_ID: i32 = 6;
        pub const BL_TURN_ID: i32 = 7;
        pub const BR_TURN_ID: i32 = 8;

        pub const FL_ENCODER_ID: i32 = 9;
        pub const FR_ENCODER_ID: i32 = 10;
        pub const BL_ENCODER_ID: i32 = 11;
        pub const BR_ENCODER_ID: i32 = 12;

        pub const GYRO_ID: i32 = 13;
    }
}

pub mod field {
    /// Distance between a blue reef pose and its red twin along the field's long axis.
    pub const RED_REEF_OFFSET_METERS: f64 = 8.565;

    /// Robot-relative lateral shift to line the scorer up with the left branch.
    /// Not symmetric with the right one, the scorer sits off centre.
    pub const REEF_LEFT_OFFSET_METERS: f64 = -0.26;
    pub const REEF_RIGHT_OFFSET_METERS: f64 = 0.06;

    /// Blue reef faces as (x meters, y meters, heading degrees), face 1 first.
    pub const BLUE_REEF_FACES: [(f64, f64, f64); 6] = [
        (5.825, 4.03, 0.),
        (5.163, 5.177484, 60.),
        (3.838, 5.177484, 120.),
        (3.175, 4.03, 180.),
        (3.8375, 2.882516, -120.),
        (5.1625, 2.882516, -60.),
    ];
}

pub mod vision {
    pub const CAMERA_NAME: &str = "Camera";

    /// robot center to camera lens in meters (x, y, z)
    pub const ROBOT_TO_CAMERA_METERS: [f64; 3] = [-0.302561, -0.294302, 0.24];
    /// camera roll in degrees
    pub const CAMERA_ROLL_DEGREES: f64 = 0.;
    /// camera pitch in degrees (negative is tilted up)
    pub const CAMERA_PITCH_DEGREES: f64 = -10.;
    /// camera yaw in degrees (counterclockwise positive)
    pub const CAMERA_YAW_DEGREES: f64 = 180. - 50.;

    pub const CAMERA_DIAGONAL_FOV_DEGREES: f64 = 95.;
    pub const CAMERA_RESOLUTION: (u32, u32) = (1280, 800);

    /// x and y std devs in meters when only one tag made the estimate
    pub const SINGLE_TAG_STD_DEV_METERS: f64 = 0.4;
    /// x and y std devs in meters when two or more tags made the estimate
    pub const MULTI_TAG_STD_DEV_METERS: f64 = 0.2;
    /// heading is never corrected from vision, the gyro wins
    pub const HEADING_STD_DEV: f64 = f64::MAX;
}

pub mod drivetrain {
    pub const SWERVE_WHEEL_DIAMETER_INCHES: f64 = 4.0;
    /// motor rotations per module rotation
    pub const SWERVE_TURN_RATIO: f64 = 150. / 7.;

    pub const DRIVE_L1_STAGE_RATIO: f64 = 19. / 25.;
    pub const DRIVE_L2_STAGE_RATIO: f64 = 17. / 27.;
    pub const DRIVE_L3_STAGE_RATIO: f64 = 16. / 28.;
    /// stages after the swappable one, same on every tier
    pub const DRIVE_FIXED_STAGE_RATIOS: [f64; 2] = [50. / 14., 45. / 15.];
}

pub mod intake {
    // TODO: verify against the intake CAD once the pivot is final
    pub const PIVOT_STAGE_RATIOS: [f64; 2] = [20. / 1., 72. / 28.];
    pub const PIVOT_MAX_ANGLE_DEGREES: f64 = 117.;
}

pub mod elevator {
    // TODO: verify once the elevator gearbox is built
    pub const STAGE_RATIOS: [f64; 2] = [5. / 1., 66. / 22.];
    pub const MAX_HEIGHT_INCHES: f64 = 60.;
    pub const STAGES: u32 = 3;
}

// TODO: tune all of these on carpet
pub mod auto {
    // Choreo
    pub const CHOREO_X_KP: f64 = 8.;
    pub const CHOREO_Y_KP: f64 = 8.;
    pub const CHOREO_THETA_KP: f64 = 6.;

    // Repulsor
    pub const REPULSOR_X_KP: f64 = 100.;
    pub const REPULSOR_Y_KP: f64 = 100.;
    pub const REPULSOR_THETA_KP: f64 = 100.;

    // Position PID
    pub const POSITION_X_KP: f64 = 5.;
    pub const POSITION_Y_KP: f64 = 5.;
    pub const POSITION_THETA_KP: f64 = 5.;
}
