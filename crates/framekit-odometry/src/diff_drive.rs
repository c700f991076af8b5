//! Differential-drive odometry.

use std::time::Instant;

use framekit_core::{Angle, RollingMean};
use log::debug;

/// Updates below this interval are ignored.
const MIN_TIMESTEP: f64 = 1e-4;

/// Angular rates below this are integrated with a Runge-Kutta step instead
/// of the exact arc, which degenerates as the turn radius goes to infinity.
const STRAIGHT_THRESHOLD: f64 = 1e-6;

/// Integrates cumulative wheel positions of a differential-drive vehicle
/// into a planar pose, with rolling-window velocity estimates.
///
/// Heading zero means the local X axis points forward; spinning the right
/// wheel with the left held still turns the vehicle counter-clockwise.
/// Call [`init`](Self::init) once with a start time, then feed
/// [`update`](Self::update) monotonic wheel positions.
#[derive(Debug)]
pub struct DiffDriveOdometry {
    x: f64,
    y: f64,
    heading: Angle,

    wheel_separation: f64,
    left_wheel_radius: f64,
    right_wheel_radius: f64,

    last_update: Option<Instant>,
    left_wheel_old_pos: f64,
    right_wheel_old_pos: f64,

    linear_mean: RollingMean,
    angular_mean: RollingMean,
}

impl DiffDriveOdometry {
    /// Odometry with the given velocity rolling-window size.
    ///
    /// Wheel parameters default to unit separation and unit radii; set them
    /// with [`set_wheel_params`](Self::set_wheel_params) before updating.
    pub fn new(window_size: usize) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            heading: Angle::ZERO,
            wheel_separation: 1.0,
            left_wheel_radius: 1.0,
            right_wheel_radius: 1.0,
            last_update: None,
            left_wheel_old_pos: 0.0,
            right_wheel_old_pos: 0.0,
            linear_mean: RollingMean::new(window_size),
            angular_mean: RollingMean::new(window_size),
        }
    }

    /// Reset the integrated pose and velocity windows and start the clock.
    pub fn init(&mut self, time: Instant) {
        self.x = 0.0;
        self.y = 0.0;
        self.heading = Angle::ZERO;
        self.left_wheel_old_pos = 0.0;
        self.right_wheel_old_pos = 0.0;
        self.linear_mean.clear();
        self.angular_mean.clear();
        self.last_update = Some(time);
    }

    /// Set wheel separation and per-wheel radii.
    pub fn set_wheel_params(
        &mut self,
        wheel_separation: f64,
        left_wheel_radius: f64,
        right_wheel_radius: f64,
    ) {
        debug!(
            "wheel params: separation {wheel_separation}, radii {left_wheel_radius}/{right_wheel_radius}"
        );
        self.wheel_separation = wheel_separation;
        self.left_wheel_radius = left_wheel_radius;
        self.right_wheel_radius = right_wheel_radius;
    }

    /// Resize the velocity rolling windows, discarding their samples.
    pub fn set_velocity_rolling_window_size(&mut self, size: usize) {
        self.linear_mean.set_capacity(size);
        self.angular_mean.set_capacity(size);
    }

    /// Feed the latest cumulative wheel positions.
    ///
    /// Returns `false` without updating when [`init`](Self::init) has not
    /// been called yet or the interval since the last accepted update is
    /// shorter than the minimum timestep.
    pub fn update(&mut self, left_pos: Angle, right_pos: Angle, time: Instant) -> bool {
        let Some(last) = self.last_update else {
            return false;
        };
        let dt = time.saturating_duration_since(last).as_secs_f64();
        if dt < MIN_TIMESTEP {
            return false;
        }

        // arc length rolled by each wheel since the last update
        let left = left_pos.rad() * self.left_wheel_radius;
        let right = right_pos.rad() * self.right_wheel_radius;
        let left_delta = left - self.left_wheel_old_pos;
        let right_delta = right - self.right_wheel_old_pos;
        self.left_wheel_old_pos = left;
        self.right_wheel_old_pos = right;

        let linear = (left_delta + right_delta) * 0.5;
        let angular = (right_delta - left_delta) / self.wheel_separation;
        self.integrate(linear, angular);

        self.last_update = Some(time);
        self.linear_mean.push(linear / dt);
        self.angular_mean.push(angular / dt);
        true
    }

    /// X position in meters.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y position in meters.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Accumulated heading.
    #[inline]
    pub fn heading(&self) -> Angle {
        self.heading
    }

    /// Rolling-window mean linear velocity in meters per second.
    #[inline]
    pub fn linear_velocity(&self) -> f64 {
        self.linear_mean.mean()
    }

    /// Rolling-window mean angular velocity.
    #[inline]
    pub fn angular_velocity(&self) -> Angle {
        Angle::radians(self.angular_mean.mean())
    }

    fn integrate(&mut self, linear: f64, angular: f64) {
        if angular.abs() < STRAIGHT_THRESHOLD {
            // second-order Runge-Kutta: advance along the mid-step heading
            let direction = self.heading.rad() + angular * 0.5;
            self.x += linear * direction.cos();
            self.y += linear * direction.sin();
            self.heading += Angle::radians(angular);
        } else {
            // exact integration along the circular arc
            let heading_old = self.heading.rad();
            let radius = linear / angular;
            self.heading += Angle::radians(angular);
            self.x += radius * (self.heading.rad().sin() - heading_old.sin());
            self.y -= radius * (self.heading.rad().cos() - heading_old.cos());
        }
    }
}
