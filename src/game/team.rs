use super::field::{BLUE_GOAL_BACK, ORANGE_GOAL_BACK};
use super::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Orange,
}

impl Team {
    /// Get the other team
    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Orange,
            Team::Orange => Team::Blue,
        }
    }

    /// Numeric id used by the simulator (blue 0, orange 1).
    pub fn team_num(self) -> u8 {
        match self {
            Team::Blue => 0,
            Team::Orange => 1,
        }
    }

    /// Back of the net this team defends.
    pub fn own_goal_back(self) -> Vec3 {
        match self {
            Team::Blue => BLUE_GOAL_BACK,
            Team::Orange => ORANGE_GOAL_BACK,
        }
    }

    /// Back of the net this team attacks.
    pub fn opponent_goal_back(self) -> Vec3 {
        self.opponent().own_goal_back()
    }

    /// Get team name for display
    pub fn name(self) -> &'static str {
        match self {
            Team::Blue => "Blue",
            Team::Orange => "Orange",
        }
    }
}
