//! Process-wide bridge state

use super::bridge::NativeBridge;
use super::config::BridgeConfig;
use super::error::BridgeError;
use lazy_static::lazy_static;
use log::error;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Slot that runs its loader at most once and remembers the outcome.
///
/// Racing callers block until the first attempt finishes, then all observe the
/// same value. A failed attempt is cached too; there is no retry.
pub struct LoadOnce<T> {
    cell: OnceCell<Result<T, BridgeError>>,
}

impl<T: Clone> LoadOnce<T> {
    pub const fn new() -> Self {
        Self { cell: OnceCell::new() }
    }

    pub fn get_or_load<F>(&self, load: F) -> Result<T, BridgeError>
    where
        F: FnOnce() -> Result<T, BridgeError>,
    {
        self.cell.get_or_init(load).clone()
    }

    /// Whether a load attempt has completed, successfully or not.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: Clone> Default for LoadOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref SHARED_BRIDGE: LoadOnce<Arc<NativeBridge>> = LoadOnce::new();
}

/// Bridge shared by the JNI exports, linked from the environment on first use.
pub fn shared_bridge() -> Result<Arc<NativeBridge>, BridgeError> {
    shared_bridge_with(&SHARED_BRIDGE, BridgeConfig::from_env)
}

/// Links the bridge in `slot` from the config `resolve` yields, once.
pub(crate) fn shared_bridge_with<F>(
    slot: &LoadOnce<Arc<NativeBridge>>,
    resolve: F,
) -> Result<Arc<NativeBridge>, BridgeError>
where
    F: FnOnce() -> Result<BridgeConfig, BridgeError>,
{
    slot.get_or_load(|| {
        let config = resolve().inspect_err(|e| error!("{}", e))?;
        NativeBridge::load(&config).map(Arc::new)
    })
}
