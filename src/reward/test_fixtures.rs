use crate::game::{GameState, PhysicsObject, PlayerData, Team, Vec3};

pub fn player_at(car_id: u32, team: Team, position: Vec3, velocity: Vec3) -> PlayerData {
    PlayerData::new(
        car_id,
        team,
        PhysicsObject {
            position,
            linear_velocity: velocity,
            angular_velocity: Vec3::ZERO,
        },
    )
}

pub fn state_with(ball_position: Vec3, ball_velocity: Vec3, players: Vec<PlayerData>) -> GameState {
    let ball = PhysicsObject {
        position: ball_position,
        linear_velocity: ball_velocity,
        angular_velocity: Vec3::ZERO,
    };
    GameState {
        ball,
        inverted_ball: ball.inverted(),
        players,
        ..Default::default()
    }
}
