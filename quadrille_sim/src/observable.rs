// Observable values — mutable cells that notify listeners on every write.
//
// Score, life count, and the end-of-game flag are `ObservableValue`s on
// `GameData`: the simulation thread writes them (through overlap consequences
// or level control code) and external code — a status display, a stop-level
// observer — registers listeners to react.
//
// Contract: every `set`, including one writing a value equal to the current
// one, notifies each registered listener exactly once, in registration order,
// synchronously on the calling thread. There is no listener removal.
//
// The value lock is released before listeners run, so a listener may call
// `get()`. Listeners must not write back into the cell they observe — the
// cells are single-writer (see `lib.rs`), and a listener calling `set` on its
// own cell would deadlock on the observer lock.

use std::sync::{Mutex, MutexGuard};

/// A value of type `T` plus the listeners watching it.
pub struct ObservableValue<T> {
    value: Mutex<T>,
    observers: Mutex<Vec<Box<dyn Fn(&T) + Send>>>,
}

/// Lock a mutex, recovering the inner value if a panicking writer poisoned it.
fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Clone> ObservableValue<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Mutex::new(initial),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        lock_or_recover(&self.value).clone()
    }

    /// Write a new value and notify every listener with it, in registration
    /// order, before returning. Equal values still notify.
    pub fn set(&self, value: T) {
        let snapshot = value.clone();
        {
            let mut guard = lock_or_recover(&self.value);
            *guard = value;
        }
        let observers = lock_or_recover(&self.observers);
        for observer in observers.iter() {
            observer(&snapshot);
        }
    }

    /// Register a listener. It will see every subsequent `set`.
    pub fn add_observer(&self, observer: impl Fn(&T) + Send + 'static) {
        lock_or_recover(&self.observers).push(Box::new(observer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    #[test]
    fn set_notifies_each_listener_once_with_the_new_value() {
        let cell = ObservableValue::new(0_i64);
        let seen = Arc::new(AtomicI64::new(-1));
        let calls = Arc::new(AtomicUsize::new(0));

        let seen_clone = Arc::clone(&seen);
        let calls_clone = Arc::clone(&calls);
        cell.add_observer(move |value| {
            seen_clone.store(*value, Ordering::SeqCst);
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        cell.set(5);
        assert_eq!(seen.load(Ordering::SeqCst), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cell.get(), 5);
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let cell = ObservableValue::new(0_u32);
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order_clone = Arc::clone(&order);
            cell.add_observer(move |_| {
                order_clone.lock().unwrap().push(label);
            });
        }

        cell.set(1);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn equal_value_still_notifies() {
        let cell = ObservableValue::new(7_i32);
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = Arc::clone(&calls);
        cell.add_observer(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        cell.set(7);
        cell.set(7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listeners_only_see_writes_after_registration() {
        let cell = ObservableValue::new(false);
        cell.set(true);

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        cell.add_observer(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        cell.set(false);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn a_listener_may_read_the_cell() {
        let cell = Arc::new(ObservableValue::new(0_i32));
        let cell_clone = Arc::clone(&cell);
        let seen = Arc::new(AtomicI64::new(-1));
        let seen_clone = Arc::clone(&seen);

        cell.add_observer(move |_| {
            seen_clone.store(i64::from(cell_clone.get()), Ordering::SeqCst);
        });

        cell.set(9);
        assert_eq!(seen.load(Ordering::SeqCst), 9);
    }
}
