use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};

const CONFIG_HOME_ENV: &str = "CARDIOFORM_CONFIG_HOME";
const API_URL_ENV: &str = "CARDIOFORM_API_URL";

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app root at a scratch directory and clears the service URL
/// override until dropped.
pub struct CardioformEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl CardioformEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous = [CONFIG_HOME_ENV, API_URL_ENV]
            .into_iter()
            .map(|name| (name, std::env::var(name).ok()))
            .collect();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(API_URL_ENV);
        }
        Self {
            previous,
            _lock: lock,
        }
    }

    #[allow(dead_code)]
    pub fn set_api_url(&self, url: &str) {
        // SAFETY: the guard holds the global env lock.
        unsafe {
            std::env::set_var(API_URL_ENV, url);
        }
    }
}

impl Drop for CardioformEnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.previous.drain(..) {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(name, value),
                    None => std::env::remove_var(name),
                }
            }
        }
    }
}
