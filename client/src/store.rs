use std::sync::{Arc, Mutex};

use crate::types::Recipe;

type Subscriber<T> = Box<dyn Fn(&T) + Send>;

/// Minimal observable value holder. Subscribers are invoked immediately
/// with the current value and again after every `set`/`update`. The store
/// never fetches anything itself.
pub struct Store<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

struct Inner<T> {
    value: T,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.lock().unwrap().value.clone()
    }

    pub fn set(&self, value: T) {
        let mut inner = self.inner.lock().unwrap();
        inner.value = value;
        for subscriber in &inner.subscribers {
            subscriber(&inner.value);
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut inner = self.inner.lock().unwrap();
        f(&mut inner.value);
        for subscriber in &inner.subscribers {
            subscriber(&inner.value);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + Send + 'static) {
        let mut inner = self.inner.lock().unwrap();
        f(&inner.value);
        inner.subscribers.push(Box::new(f));
    }
}

/// The two values the UI watches: the current recipe list and the session
/// token (None while signed out).
pub struct AppStores {
    pub recipes: Store<Vec<Recipe>>,
    pub session: Store<Option<String>>,
}

impl AppStores {
    pub fn new() -> Self {
        Self {
            recipes: Store::new(Vec::new()),
            session: Store::new(None),
        }
    }
}

impl Default for AppStores {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_store() -> (Store<i32>, Arc<Mutex<Vec<i32>>>) {
        let store = Store::new(0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |v| sink.lock().unwrap().push(*v));
        (store, seen)
    }

    #[test]
    fn subscribe_fires_immediately_with_current_value() {
        let (_store, seen) = recording_store();
        assert_eq!(*seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn set_notifies_subscribers() {
        let (store, seen) = recording_store();
        store.set(1);
        store.set(2);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(store.get(), 2);
    }

    #[test]
    fn update_mutates_in_place_and_notifies() {
        let (store, seen) = recording_store();
        store.update(|v| *v += 10);
        assert_eq!(store.get(), 10);
        assert_eq!(*seen.lock().unwrap(), vec![0, 10]);
    }

    #[test]
    fn clones_share_state() {
        let store = Store::new(String::from("a"));
        let other = store.clone();
        other.set("b".to_string());
        assert_eq!(store.get(), "b");
    }

    #[test]
    fn session_store_starts_signed_out() {
        let stores = AppStores::new();
        assert_eq!(stores.session.get(), None);
        stores.session.set(Some("token".into()));
        assert_eq!(stores.session.get().as_deref(), Some("token"));
    }
}
