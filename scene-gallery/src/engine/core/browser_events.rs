use std::sync::{Arc, Mutex};

use bevy::prelude::*;

/// Values pushed by a browser callback and drained once per update.
///
/// JS callbacks run outside the Bevy schedule, so they only get a clone of
/// this handle and never touch the world directly.
#[derive(Resource)]
pub struct BrowserQueue<T>(Arc<Mutex<Vec<T>>>);

impl<T> Default for BrowserQueue<T> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }
}

impl<T> Clone for BrowserQueue<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> BrowserQueue<T> {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn push(&self, value: T) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(value);
        }
    }

    /// Everything queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.0
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

/// Register `handler` for a window event and keep it alive for the rest of
/// the session.
#[cfg(target_arch = "wasm32")]
pub fn listen_on_window(event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    match web_sys::window() {
        Some(window) => {
            if let Err(e) = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
                error!("Failed to register {event} listener: {:?}", e);
            }
        }
        None => error!("No window to listen for {event} on"),
    }
    closure.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_queue() {
        let queue = BrowserQueue::<String>::default();
        let callback_side = queue.clone();
        callback_side.push("/lights".to_string());
        callback_side.push("/".to_string());

        assert_eq!(queue.drain(), vec!["/lights".to_string(), "/".to_string()]);
        assert!(queue.drain().is_empty());
    }
}
