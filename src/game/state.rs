use serde::{Deserialize, Serialize};

use super::{Team, Vec3};

/// Rigid-body snapshot of the ball or a car.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicsObject {
    pub position: Vec3,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl PhysicsObject {
    /// Mirror across the field center so orange sees the field as blue does.
    pub fn inverted(&self) -> PhysicsObject {
        let flip = |v: Vec3| Vec3::new(-v.x, -v.y, v.z);
        PhysicsObject {
            position: flip(self.position),
            linear_velocity: flip(self.linear_velocity),
            angular_velocity: flip(self.angular_velocity),
        }
    }
}

/// Per-player statistics and physics for one simulation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    pub car_id: u32,
    pub team: Team,
    pub match_goals: u32,
    pub match_saves: u32,
    pub match_shots: u32,
    pub match_demolishes: u32,
    pub boost_pickups: u32,
    pub is_demoed: bool,
    pub on_ground: bool,
    /// Whether the car touched the ball during the last step.
    pub ball_touched: bool,
    pub has_flip: bool,
    /// Boost in [0, 1].
    pub boost_amount: f32,
    pub car_data: PhysicsObject,
    pub inverted_car_data: PhysicsObject,
}

impl PlayerData {
    pub fn new(car_id: u32, team: Team, car_data: PhysicsObject) -> Self {
        PlayerData {
            car_id,
            team,
            match_goals: 0,
            match_saves: 0,
            match_shots: 0,
            match_demolishes: 0,
            boost_pickups: 0,
            is_demoed: false,
            on_ground: true,
            ball_touched: false,
            has_flip: true,
            boost_amount: 0.33,
            car_data,
            inverted_car_data: car_data.inverted(),
        }
    }
}

/// Full match snapshot handed to rewards, terminal conditions and
/// observation builders each step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub game_type: u32,
    pub blue_score: u32,
    pub orange_score: u32,
    /// Car id of the last player to touch the ball, if any.
    pub last_touch: Option<u32>,
    pub players: Vec<PlayerData>,
    pub ball: PhysicsObject,
    pub inverted_ball: PhysicsObject,
    pub boost_pads: Vec<f32>,
}

impl GameState {
    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::Blue => self.blue_score,
            Team::Orange => self.orange_score,
        }
    }

    /// Ball resting at the center spot, as it is at kickoff.
    pub fn is_kickoff(&self) -> bool {
        self.ball.position.x == 0.0 && self.ball.position.y == 0.0
    }

    pub fn player(&self, car_id: u32) -> Option<&PlayerData> {
        self.players.iter().find(|p| p.car_id == car_id)
    }
}
