use serde::{Deserialize, Serialize};

use crate::env::Match;
use crate::error::EnvError;

/// Shape of the vectorized environment the learner trains against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSpec {
    pub num_instances: usize,
    /// Agent slots across all instances.
    pub num_envs: usize,
    pub action_space: Vec<usize>,
}

/// The fixed set of match instances built for one run.
pub struct InstancePool {
    instances: Vec<Match>,
}

impl InstancePool {
    /// Invoke `factory` once per instance index. Any failure aborts the
    /// launch before simulation work begins.
    pub fn launch<F>(num_instances: usize, factory: F) -> Result<Self, EnvError>
    where
        F: Fn(usize) -> Result<Match, EnvError>,
    {
        if num_instances == 0 {
            return Err(EnvError::NoInstances);
        }
        let mut instances = Vec::with_capacity(num_instances);
        for index in 0..num_instances {
            let instance = factory(index).map_err(|e| match e {
                EnvError::Factory { .. } => e,
                other => EnvError::Factory {
                    index,
                    reason: other.to_string(),
                },
            })?;
            tracing::debug!(index, agents = instance.agents(), "launched match instance");
            instances.push(instance);
        }
        Ok(InstancePool { instances })
    }

    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    pub fn num_envs(&self) -> usize {
        self.instances.iter().map(Match::agents).sum()
    }

    pub fn spec(&self) -> EnvSpec {
        EnvSpec {
            num_instances: self.num_instances(),
            num_envs: self.num_envs(),
            action_space: self.instances[0].action_space(),
        }
    }

    pub fn instances_mut(&mut self) -> &mut [Match] {
        &mut self.instances
    }

    pub fn into_instances(self) -> Vec<Match> {
        self.instances
    }
}
