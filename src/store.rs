//! Settings Store
//!
//! Key-value persistence behind a trait so the theme preference can live in
//! `localStorage` in the browser and in memory under test.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::Dom;
use crate::models::Theme;

/// Durable string storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Browser `localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// None when storage is disabled (private mode, sandboxed frames)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if self.storage.set_item(key, value).is_err() {
            log::warn!("[Store] could not write {}", key);
        }
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// In-memory store; clones share the same map
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.set(key, value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

/// Theme preference: one stored value mirrored onto a root attribute
pub struct ThemeSettings<S: KeyValueStore> {
    store: S,
    key: String,
    root_attr: String,
}

impl<S: KeyValueStore> ThemeSettings<S> {
    pub fn new(store: S, key: &str, root_attr: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            root_attr: root_attr.to_string(),
        }
    }

    /// Stored preference, then OS preference, then light
    pub fn load(&self, os_prefers_dark: bool) -> Theme {
        self.store
            .get(&self.key)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or(if os_prefers_dark { Theme::Dark } else { Theme::Light })
    }

    pub fn apply<D: Dom>(&self, dom: &D, theme: Theme) {
        if let Some(root) = dom.root() {
            dom.set_attr(&root, &self.root_attr, theme.as_str());
        }
    }

    pub fn persist(&self, theme: Theme) {
        self.store.set(&self.key, theme.as_str());
    }
}
