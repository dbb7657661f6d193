use crate::env::{ActionParser, CarControls};
use crate::error::EnvError;
use crate::game::GameState;

/// Analog axes (throttle, steer, pitch, yaw, roll) take three bins mapped
/// to -1, 0, 1; buttons (jump, boost, handbrake) take two.
const BINS: [usize; 8] = [3, 3, 3, 3, 3, 2, 2, 2];
const ANALOG_AXES: usize = 5;

/// Multi-discrete action decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscreteAction;

impl DiscreteAction {
    pub fn new() -> Self {
        DiscreteAction
    }

    fn parse_one(action: &[usize]) -> Result<CarControls, EnvError> {
        if action.len() != BINS.len() {
            return Err(EnvError::ActionArity {
                expected: BINS.len(),
                got: action.len(),
            });
        }
        let mut controls = [0.0; 8];
        for (index, (&value, &bins)) in action.iter().zip(&BINS).enumerate() {
            if value >= bins {
                return Err(EnvError::ActionOutOfRange { index, value, bins });
            }
            controls[index] = if index < ANALOG_AXES {
                value as f32 - 1.0
            } else {
                value as f32
            };
        }
        Ok(controls)
    }
}

impl ActionParser for DiscreteAction {
    fn action_space(&self) -> Vec<usize> {
        BINS.to_vec()
    }

    fn parse_actions(
        &self,
        actions: &[Vec<usize>],
        _state: &GameState,
    ) -> Result<Vec<CarControls>, EnvError> {
        actions.iter().map(|a| Self::parse_one(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analog_bins_are_centered() {
        let parser = DiscreteAction::new();
        let controls = parser
            .parse_actions(&[vec![0, 1, 2, 0, 2, 1, 0, 1]], &GameState::default())
            .unwrap();
        assert_eq!(controls, vec![[-1.0, 0.0, 1.0, -1.0, 1.0, 1.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_action_space() {
        assert_eq!(DiscreteAction::new().action_space(), vec![3, 3, 3, 3, 3, 2, 2, 2]);
    }

    #[test]
    fn test_out_of_range_button_rejected() {
        let err = DiscreteAction::new()
            .parse_actions(&[vec![1, 1, 1, 1, 1, 2, 0, 0]], &GameState::default())
            .unwrap_err();
        assert!(matches!(
            err,
            EnvError::ActionOutOfRange {
                index: 5,
                value: 2,
                bins: 2
            }
        ));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let err = DiscreteAction::new()
            .parse_actions(&[vec![1, 1, 1]], &GameState::default())
            .unwrap_err();
        assert!(matches!(err, EnvError::ActionArity { expected: 8, got: 3 }));
    }
}
