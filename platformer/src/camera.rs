//! Camera centering requests with optional dead zone and smoothing.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// World point the presentation layer should keep centred on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera2D {
    pub position: Vec2,
}

impl Camera2D {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }
}

/// Camera follow behavior configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFollow {
    /// Dead zone size - camera won't move if target is within this area
    pub dead_zone: Vec2,
    /// Maximum camera speed (for smooth following)
    pub max_speed: f32,
    /// Whether to use smooth following (lerp) or instant
    pub smooth: bool,
    /// Fraction of the remaining distance covered per update when smoothing
    pub smooth_factor: f32,
}

impl CameraFollow {
    /// Follow instantly with no dead zone.
    pub fn new() -> Self {
        Self {
            dead_zone: Vec2::ZERO,
            max_speed: f32::INFINITY,
            smooth: false,
            smooth_factor: 0.1,
        }
    }

    /// Set the dead zone size (camera won't move if target is within this area).
    #[must_use]
    pub fn with_dead_zone(mut self, width: f32, height: f32) -> Self {
        self.dead_zone = Vec2::new(width, height);
        self
    }

    /// Enable smooth following, covering `factor` of the remaining distance per update.
    #[must_use]
    pub fn with_smoothing(mut self, factor: f32) -> Self {
        self.smooth = true;
        self.smooth_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Set maximum camera speed for smooth following.
    #[must_use]
    pub fn with_max_speed(mut self, speed: f32) -> Self {
        self.max_speed = speed;
        self
    }
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self::new()
    }
}

/// Move `camera` towards `target`, honouring the dead zone.
pub fn update_camera_follow(camera: &mut Camera2D, follow: &CameraFollow, target: Vec2, dt: f32) {
    let offset = target - camera.position;
    let half_dead_zone = follow.dead_zone * 0.5;
    if offset.x.abs() <= half_dead_zone.x && offset.y.abs() <= half_dead_zone.y {
        return;
    }

    // Target clamped to the dead zone edges.
    let mut desired = camera.position;
    if offset.x.abs() > half_dead_zone.x {
        desired.x = target.x - offset.x.signum() * half_dead_zone.x;
    }
    if offset.y.abs() > half_dead_zone.y {
        desired.y = target.y - offset.y.signum() * half_dead_zone.y;
    }

    if !follow.smooth {
        camera.position = desired;
        return;
    }

    let diff = desired - camera.position;
    let distance = diff.length();
    if distance == 0.0 {
        return;
    }
    let max_move = follow.max_speed * dt;
    camera.position = if follow.max_speed.is_finite() && distance * follow.smooth_factor > max_move {
        camera.position + diff.normalized() * max_move
    } else {
        camera.position + diff * follow.smooth_factor
    };
}
