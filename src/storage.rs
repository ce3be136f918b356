//! Browser Storage
//!
//! Thin localStorage wrappers. Failures are logged, never fatal.

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub fn set(key: &str, value: &str) {
    match local_storage() {
        Some(storage) => {
            if storage.set_item(key, value).is_err() {
                log::warn!("[STORAGE] Failed to write {}", key);
            }
        }
        None => log::warn!("[STORAGE] localStorage unavailable, {} not saved", key),
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        if storage.remove_item(key).is_err() {
            log::warn!("[STORAGE] Failed to remove {}", key);
        }
    }
}
