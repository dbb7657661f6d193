//! Arena and physics constants shared by rewards and terminal conditions.

use super::Vec3;

pub const TICKS_PER_SECOND: u32 = 120;

pub const CAR_MAX_SPEED: f32 = 2300.0;
pub const BALL_MAX_SPEED: f32 = 6000.0;
pub const BALL_RADIUS: f32 = 92.75;

pub const GOAL_HEIGHT: f32 = 642.775;
pub const BACK_NET_Y: f32 = 6000.0;

pub const ORANGE_GOAL_BACK: Vec3 = Vec3::new(0.0, BACK_NET_Y, GOAL_HEIGHT / 2.0);
pub const BLUE_GOAL_BACK: Vec3 = Vec3::new(0.0, -BACK_NET_Y, GOAL_HEIGHT / 2.0);
