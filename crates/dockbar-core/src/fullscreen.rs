//! Shared registry of applications currently running full-screen.

use std::cell::{Cell, RefCell};

/// An application occupying a whole screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullScreenApp {
    /// Native handle of the full-screen window.
    pub hwnd: usize,
    /// Device name of the screen it covers.
    pub device: String,
    /// Whether it spans the whole virtual desktop rather than one screen.
    pub spans_virtual_screen: bool,
}

/// Read side of the full-screen registry as seen by a bar.
pub trait FullScreenTracker {
    /// Current entries, in the order they appeared.
    fn entries(&self) -> Vec<FullScreenApp>;

    /// Starts delivering change notifications for `handle`.
    fn subscribe(&self, handle: usize);

    /// Stops delivering change notifications for `handle`.
    fn unsubscribe(&self, handle: usize);

    /// Tells the tracker the display topology changed, so entries must
    /// be re-evaluated against the new screens.
    fn notify_screens_changed(&self);
}

/// In-memory registry fed by a platform detector.
///
/// Mutators return whether the set changed; the owner then notifies the
/// bars returned by [`FullScreenRegistry::subscribers`].
#[derive(Debug, Default)]
pub struct FullScreenRegistry {
    apps: RefCell<Vec<FullScreenApp>>,
    subscribers: RefCell<Vec<usize>>,
    screens_changed: Cell<bool>,
}

impl FullScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, or updates the one with the same window.
    pub fn add(&self, app: FullScreenApp) -> bool {
        let mut apps = self.apps.borrow_mut();
        match apps.iter_mut().find(|a| a.hwnd == app.hwnd) {
            Some(existing) if *existing == app => false,
            Some(existing) => {
                *existing = app;
                true
            }
            None => {
                apps.push(app);
                true
            }
        }
    }

    pub fn remove(&self, hwnd: usize) -> bool {
        let mut apps = self.apps.borrow_mut();
        let before = apps.len();
        apps.retain(|a| a.hwnd != hwnd);
        apps.len() != before
    }

    /// Replaces every entry. Order of the new set is preserved.
    pub fn replace_all(&self, next: Vec<FullScreenApp>) -> bool {
        let mut apps = self.apps.borrow_mut();
        if *apps == next {
            return false;
        }
        *apps = next;
        true
    }

    pub fn len(&self) -> usize {
        self.apps.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.borrow().is_empty()
    }

    pub fn subscribers(&self) -> Vec<usize> {
        self.subscribers.borrow().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Returns and clears the pending screens-changed flag.
    pub fn take_screens_changed(&self) -> bool {
        self.screens_changed.replace(false)
    }
}

impl FullScreenTracker for FullScreenRegistry {
    fn entries(&self) -> Vec<FullScreenApp> {
        self.apps.borrow().clone()
    }

    fn subscribe(&self, handle: usize) {
        let mut subs = self.subscribers.borrow_mut();
        if !subs.contains(&handle) {
            subs.push(handle);
        }
    }

    fn unsubscribe(&self, handle: usize) {
        self.subscribers.borrow_mut().retain(|&h| h != handle);
    }

    fn notify_screens_changed(&self) {
        self.screens_changed.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(hwnd: usize, device: &str) -> FullScreenApp {
        FullScreenApp {
            hwnd,
            device: device.into(),
            spans_virtual_screen: false,
        }
    }

    #[test]
    fn add_and_remove_report_changes() {
        let registry = FullScreenRegistry::new();

        assert!(registry.add(app(1, r"\\.\DISPLAY1")));
        assert!(!registry.add(app(1, r"\\.\DISPLAY1")));
        assert!(registry.add(app(1, r"\\.\DISPLAY2")));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(1));
        assert!(!registry.remove(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn replace_all_ignores_identical_sets() {
        let registry = FullScreenRegistry::new();
        let set = vec![app(1, "A"), app(2, "B")];

        assert!(registry.replace_all(set.clone()));
        assert!(!registry.replace_all(set));
        assert!(registry.replace_all(Vec::new()));
    }

    #[test]
    fn subscriptions_are_unique_and_removable() {
        let registry = FullScreenRegistry::new();

        registry.subscribe(10);
        registry.subscribe(10);
        registry.subscribe(20);
        assert_eq!(registry.subscribers(), vec![10, 20]);

        registry.unsubscribe(10);
        assert_eq!(registry.subscriber_count(), 1);
    }

    #[test]
    fn screens_changed_flag_is_consumed() {
        let registry = FullScreenRegistry::new();
        assert!(!registry.take_screens_changed());

        registry.notify_screens_changed();

        assert!(registry.take_screens_changed());
        assert!(!registry.take_screens_changed());
    }
}
