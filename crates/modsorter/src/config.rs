use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

static CONFIG: Lazy<Mutex<Arc<RunConfig>>> = Lazy::new(Default::default);

/// Process-wide settings for a single run.
#[derive(Debug, Default, Clone)]
pub struct RunConfig {
    /// The symbol-dump executable to invoke.
    pub tool: PathBuf,

    /// If enabled stderr diagnostics will be suppressed.
    pub quiet: bool,
}

impl RunConfig {
    pub fn get() -> Arc<RunConfig> {
        CONFIG.lock().unwrap().clone()
    }

    pub fn configure<F: FnOnce(&mut Self) -> R, R>(f: F) -> R {
        let mut config = RunConfig::get();
        let rv = {
            let mutable_config = Arc::make_mut(&mut config);
            f(mutable_config)
        };
        *CONFIG.lock().unwrap() = config;
        rv
    }
}
