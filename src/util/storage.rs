//! Keyed string storage for session persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes hydrate-only `localStorage` access so the session store never
//! repeats web-sys glue. Non-hydrate builds (SSR, host tests) fall back to a
//! thread-local in-memory map with identical semantics.

#[cfg(not(feature = "hydrate"))]
use std::cell::RefCell;
#[cfg(not(feature = "hydrate"))]
use std::collections::HashMap;

#[cfg(not(feature = "hydrate"))]
thread_local! {
    static FALLBACK: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
}

/// Read the string stored under `key`, if any.
pub fn get_item(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        storage.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        FALLBACK.with(|map| map.borrow().get(key).cloned())
    }
}

/// Store `value` under `key`. Best-effort: storage failures are swallowed.
pub fn set_item(key: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, value);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        FALLBACK.with(|map| {
            map.borrow_mut().insert(key.to_owned(), value.to_owned());
        });
    }
}

/// Remove the entry stored under `key`, if present.
pub fn remove_item(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        FALLBACK.with(|map| {
            map.borrow_mut().remove(key);
        });
    }
}
