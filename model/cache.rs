use super::{ModelError, SurvivalModel};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static SHARED_MODEL: OnceLock<(PathBuf, SurvivalModel)> = OnceLock::new();

fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Returns the process-wide model, loading it from `path` on first use.
///
/// The model is immutable once loaded and lives for the rest of the process.
/// Asking for a different artifact afterwards is an error rather than a reload.
pub fn shared_model(path: &Path) -> Result<&'static SurvivalModel, ModelError> {
    let key = cache_key(path);
    if let Some((loaded, model)) = SHARED_MODEL.get() {
        return check_key(loaded, model, key);
    }

    let model = SurvivalModel::load(path)?;
    match SHARED_MODEL.set((key.clone(), model)) {
        Ok(()) => {}
        Err(_) => warn!("Model cache was filled concurrently; using the cached artifact"),
    }
    match SHARED_MODEL.get() {
        Some((loaded, model)) => check_key(loaded, model, key),
        None => unreachable!("model cache is initialised above"),
    }
}

fn check_key(
    loaded: &'static PathBuf,
    model: &'static SurvivalModel,
    requested: PathBuf,
) -> Result<&'static SurvivalModel, ModelError> {
    if *loaded == requested {
        Ok(model)
    } else {
        warn!(
            "Rejecting model {} because {} is already cached",
            requested.display(),
            loaded.display()
        );
        Err(ModelError::AlreadyLoaded {
            loaded: loaded.clone(),
            requested,
        })
    }
}
