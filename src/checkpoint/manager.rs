use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::checkpoint::metadata::CheckpointMetadata;
use crate::error::CheckpointError;
use crate::training::Learner;

const METADATA_FILE: &str = "metadata.json";
const TMP_SUFFIX: &str = ".tmp";
const OLD_SUFFIX: &str = ".old";

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Where snapshots are written and how they are named.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    pub models_dir: PathBuf,
    /// Name of the snapshot overwritten after every segment and read at
    /// startup.
    pub latest_name: String,
    pub history_dir: PathBuf,
    pub history_prefix: String,
    pub periodic_prefix: String,
    /// Absolute environment steps between periodic snapshots.
    pub periodic_interval_steps: u64,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        CheckpointConfig {
            models_dir: PathBuf::from("models"),
            latest_name: "exit_save".to_string(),
            history_dir: PathBuf::from("mmr_models"),
            history_prefix: "snapshot".to_string(),
            periodic_prefix: "rl_model".to_string(),
            periodic_interval_steps: 1_000_000,
        }
    }
}

/// A snapshot found on disk.
#[derive(Debug, Clone)]
pub struct CheckpointData {
    pub path: PathBuf,
    pub metadata: CheckpointMetadata,
}

/// Saves and loads learner snapshots. Each snapshot is a directory holding
/// the learner's weight files plus `metadata.json`.
pub struct CheckpointStore {
    config: CheckpointConfig,
}

impl CheckpointStore {
    pub fn new(config: CheckpointConfig) -> Self {
        CheckpointStore { config }
    }

    pub fn config(&self) -> &CheckpointConfig {
        &self.config
    }

    pub fn latest_path(&self) -> PathBuf {
        self.config.models_dir.join(&self.config.latest_name)
    }

    pub fn history_path(&self, num_timesteps: u64) -> PathBuf {
        self.config
            .history_dir
            .join(format!("{}_{}", self.config.history_prefix, num_timesteps))
    }

    pub fn periodic_path(&self, num_timesteps: u64) -> PathBuf {
        self.config
            .models_dir
            .join(format!("{}_{}_steps", self.config.periodic_prefix, num_timesteps))
    }

    /// Overwrite the "latest" snapshot.
    pub fn save_latest(&self, learner: &dyn Learner) -> Result<PathBuf, CheckpointError> {
        self.save_snapshot(learner, &self.latest_path(), true)
    }

    /// Write the immutable history snapshot for the learner's current step
    /// count. Refuses to replace an existing one.
    pub fn save_history(&self, learner: &dyn Learner) -> Result<PathBuf, CheckpointError> {
        let path = self.history_path(learner.num_timesteps());
        self.save_snapshot(learner, &path, false)
    }

    /// Mid-segment snapshot written by the periodic checkpoint callback.
    pub fn save_periodic(&self, learner: &dyn Learner) -> Result<PathBuf, CheckpointError> {
        let path = self.periodic_path(learner.num_timesteps());
        self.save_snapshot(learner, &path, true)
    }

    fn save_snapshot(
        &self,
        learner: &dyn Learner,
        final_dir: &Path,
        overwrite: bool,
    ) -> Result<PathBuf, CheckpointError> {
        if final_dir.exists() && !overwrite {
            return Err(CheckpointError::HistoryExists(final_dir.to_path_buf()));
        }

        let tmp_dir = with_suffix(final_dir, TMP_SUFFIX);
        if tmp_dir.exists() {
            fs::remove_dir_all(&tmp_dir)?;
        }
        fs::create_dir_all(&tmp_dir)?;

        learner
            .save_weights_to_dir(&tmp_dir)
            .map_err(|e| CheckpointError::ModelSave(e.to_string()))?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let metadata = CheckpointMetadata {
            num_timesteps: learner.num_timesteps(),
            timestamp,
            algorithm: learner.algorithm_name().to_string(),
            hyperparameters: learner.hyperparameters(),
            env: learner.env_spec(),
        };
        fs::write(tmp_dir.join(METADATA_FILE), serde_json::to_string_pretty(&metadata)?)?;

        // Keep the previous snapshot as `.old` until the new one is in place.
        if final_dir.exists() {
            let old_dir = with_suffix(final_dir, OLD_SUFFIX);
            if old_dir.exists() {
                fs::remove_dir_all(&old_dir)?;
            }
            fs::rename(final_dir, &old_dir)?;
            fs::rename(&tmp_dir, final_dir)?;
            fs::remove_dir_all(&old_dir)?;
        } else {
            fs::rename(&tmp_dir, final_dir)?;
        }

        tracing::debug!(path = %final_dir.display(), num_timesteps = metadata.num_timesteps, "checkpoint saved");
        Ok(final_dir.to_path_buf())
    }

    /// Read a snapshot's metadata.
    pub fn load_checkpoint(&self, dir: &Path) -> Result<CheckpointData, CheckpointError> {
        let meta_path = dir.join(METADATA_FILE);
        let meta_json = fs::read_to_string(&meta_path).map_err(|e| CheckpointError::MetadataRead {
            path: meta_path.clone(),
            source: e,
        })?;
        let metadata: CheckpointMetadata =
            serde_json::from_str(&meta_json).map_err(|e| CheckpointError::MetadataParse {
                path: meta_path,
                source: e,
            })?;
        Ok(CheckpointData {
            path: dir.to_path_buf(),
            metadata,
        })
    }

    /// Load the "latest" snapshot.
    ///
    /// `Ok(None)` means no snapshot exists. An existing snapshot that cannot
    /// be read, or was trained for a different action space, is an error.
    pub fn load_latest(
        &self,
        action_space: &[usize],
    ) -> Result<Option<CheckpointData>, CheckpointError> {
        let dir = self.latest_path();
        if !dir.exists() && !self.recover_interrupted(&dir)? {
            return Ok(None);
        }
        let data = self.load_checkpoint(&dir)?;
        if data.metadata.env.action_space != action_space {
            return Err(CheckpointError::IncompatibleEnv {
                path: dir,
                saved: data.metadata.env.action_space,
                current: action_space.to_vec(),
            });
        }
        Ok(Some(data))
    }

    /// Move a snapshot left behind by an interrupted overwrite back to
    /// `dir`. A `.tmp` copy only counts once its metadata was written, and
    /// is preferred over `.old` because it is newer.
    fn recover_interrupted(&self, dir: &Path) -> Result<bool, CheckpointError> {
        for suffix in [TMP_SUFFIX, OLD_SUFFIX] {
            let candidate = with_suffix(dir, suffix);
            if candidate.join(METADATA_FILE).exists() {
                tracing::warn!(
                    from = %candidate.display(),
                    to = %dir.display(),
                    "restoring snapshot left by an interrupted save"
                );
                fs::rename(&candidate, dir)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// History snapshots sorted by step count (ascending).
    pub fn list_history(&self) -> Result<Vec<CheckpointData>, CheckpointError> {
        let mut results = Vec::new();
        if !self.config.history_dir.exists() {
            return Ok(results);
        }
        let prefix = format!("{}_", self.config.history_prefix);
        for entry in fs::read_dir(&self.config.history_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if !name_str.starts_with(&prefix)
                || name_str.ends_with(TMP_SUFFIX)
                || name_str.ends_with(OLD_SUFFIX)
            {
                continue;
            }
            if path.join(METADATA_FILE).exists() {
                results.push(self.load_checkpoint(&path)?);
            }
        }
        results.sort_by_key(|d| d.metadata.num_timesteps);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::test_support::FakeLearner;

    fn store_in(dir: &Path) -> CheckpointStore {
        CheckpointStore::new(CheckpointConfig {
            models_dir: dir.join("models"),
            history_dir: dir.join("mmr_models"),
            ..Default::default()
        })
    }

    #[test]
    fn test_save_and_load_latest_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let learner = FakeLearner::at(4_800_000);

        let path = store.save_latest(&learner).unwrap();
        assert_eq!(path, dir.path().join("models").join("exit_save"));
        assert!(path.join("metadata.json").exists());
        assert!(path.join("weights.bin").exists());

        let data = store
            .load_latest(&learner.env_spec().action_space)
            .unwrap()
            .expect("latest snapshot should exist");
        assert_eq!(data.metadata.num_timesteps, 4_800_000);
        assert_eq!(data.metadata.algorithm, "PPO");
        assert_eq!(data.metadata.env, learner.env_spec());
    }

    #[test]
    fn test_latest_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save_latest(&FakeLearner::at(100)).unwrap();
        store.save_latest(&FakeLearner::at(200)).unwrap();

        let data = store.load_latest(&[3, 3, 3, 3, 3, 2, 2, 2]).unwrap().unwrap();
        assert_eq!(data.metadata.num_timesteps, 200);
        assert!(!dir.path().join("models").join("exit_save.tmp").exists());
    }

    #[test]
    fn test_latest_overwrite_leaves_no_old_copy() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save_latest(&FakeLearner::at(100)).unwrap();
        store.save_latest(&FakeLearner::at(200)).unwrap();
        assert!(!dir.path().join("models").join("exit_save.old").exists());
    }

    #[test]
    fn test_latest_recovered_from_complete_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save_latest(&FakeLearner::at(4_800_000)).unwrap();
        // Killed after the old copy was removed, before the rename.
        let latest = store.latest_path();
        fs::rename(&latest, dir.path().join("models").join("exit_save.tmp")).unwrap();

        let data = store
            .load_latest(&[3, 3, 3, 3, 3, 2, 2, 2])
            .unwrap()
            .expect("interrupted save should be recovered");
        assert_eq!(data.metadata.num_timesteps, 4_800_000);
        assert_eq!(data.path, latest);
        assert!(latest.join("weights.bin").exists());
    }

    #[test]
    fn test_latest_recovered_from_old_copy() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save_latest(&FakeLearner::at(4_800_000)).unwrap();
        let models = dir.path().join("models");
        fs::rename(store.latest_path(), models.join("exit_save.old")).unwrap();
        // New copy still being written: no metadata yet.
        fs::create_dir_all(models.join("exit_save.tmp")).unwrap();

        let data = store.load_latest(&[3, 3, 3, 3, 3, 2, 2, 2]).unwrap().unwrap();
        assert_eq!(data.metadata.num_timesteps, 4_800_000);

        // The next save replaces both leftovers.
        store.save_latest(&FakeLearner::at(5_000_000)).unwrap();
        assert!(!models.join("exit_save.tmp").exists());
        assert!(!models.join("exit_save.old").exists());
    }

    #[test]
    fn test_incomplete_tmp_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::create_dir_all(dir.path().join("models").join("exit_save.tmp")).unwrap();
        assert!(store.load_latest(&[3, 3]).unwrap().is_none());
    }

    #[test]
    fn test_missing_latest_is_absent_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.load_latest(&[3, 3]).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_metadata_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let latest = store.latest_path();
        fs::create_dir_all(&latest).unwrap();
        fs::write(latest.join("metadata.json"), "{ not json").unwrap();

        let err = store.load_latest(&[3, 3]).unwrap_err();
        assert!(
            matches!(err, CheckpointError::MetadataParse { .. }),
            "expected MetadataParse, got: {err}"
        );
    }

    #[test]
    fn test_snapshot_without_metadata_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::create_dir_all(store.latest_path()).unwrap();

        let err = store.load_latest(&[3, 3]).unwrap_err();
        assert!(matches!(err, CheckpointError::MetadataRead { .. }));
    }

    #[test]
    fn test_incompatible_action_space_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save_latest(&FakeLearner::at(10)).unwrap();

        let err = store.load_latest(&[5, 5]).unwrap_err();
        assert!(matches!(err, CheckpointError::IncompatibleEnv { .. }));
    }

    #[test]
    fn test_history_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let learner = FakeLearner::at(5_000_000);

        let path = store.save_history(&learner).unwrap();
        assert_eq!(path, dir.path().join("mmr_models").join("snapshot_5000000"));

        let err = store.save_history(&learner).unwrap_err();
        assert!(matches!(err, CheckpointError::HistoryExists(_)));
    }

    #[test]
    fn test_list_history_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        for steps in [10_000_000, 5_000_000, 15_000_000] {
            store.save_history(&FakeLearner::at(steps)).unwrap();
        }
        // Not a history snapshot.
        store.save_latest(&FakeLearner::at(1)).unwrap();

        let steps: Vec<u64> = store
            .list_history()
            .unwrap()
            .iter()
            .map(|d| d.metadata.num_timesteps)
            .collect();
        assert_eq!(steps, vec![5_000_000, 10_000_000, 15_000_000]);
    }

    #[test]
    fn test_periodic_path_naming() {
        let store = CheckpointStore::new(CheckpointConfig::default());
        assert_eq!(
            store.periodic_path(1_000_020),
            PathBuf::from("models").join("rl_model_1000020_steps")
        );
    }

    #[test]
    fn test_weight_save_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let mut learner = FakeLearner::at(1);
        learner.fail_saves = true;
        let err = store.save_latest(&learner).unwrap_err();
        assert!(matches!(err, CheckpointError::ModelSave(_)));
    }
}
