use std::cell::RefCell;
use std::rc::Rc;

use super::runtime::{notify_write, try_with_runtime, with_runtime, SignalId};

struct SignalInner<T> {
    id: SignalId,
    value: RefCell<T>,
}

/// A reactive value cell.
///
/// When a signal's value changes, any effects that read it are re-run.
/// Signal ids belong to the thread-local runtime that allocated them, so a
/// signal is neither `Send` nor `Sync` and never leaves its thread.
#[derive(Clone)]
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let id = with_runtime(|rt| rt.allocate_signal());
        Self {
            inner: Rc::new(SignalInner {
                id,
                value: RefCell::new(value),
            }),
        }
    }

    /// Runtime id of this signal. Clones share the same id.
    pub fn id(&self) -> SignalId {
        self.inner.id
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        try_with_runtime(|rt| rt.track_read(self.inner.id));
        self.with_untracked(f)
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.value.borrow())
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the signal's value, only triggering updates if the value actually changed.
    pub fn set(&self, value: T) {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value;
        }
        notify_write(self.inner.id);
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Resolves only when `T` is not `Send`; a `Send` type makes the
    /// `AmbiguousIfSend<_>` lookup below ambiguous and fails to compile.
    trait AmbiguousIfSend<A> {
        fn some_item() {}
    }
    impl<T: ?Sized> AmbiguousIfSend<()> for T {}
    struct IsSend;
    impl<T: ?Sized + Send> AmbiguousIfSend<IsSend> for T {}

    #[test]
    fn test_create_signal_and_get() {
        let signal = create_signal(42);
        assert_eq!(signal.get(), 42);
    }

    #[test]
    fn test_set_updates_value() {
        let signal = create_signal(String::from("$0.00"));
        signal.set(String::from("$1,234.50"));
        assert_eq!(signal.get(), "$1,234.50");
    }

    #[test]
    fn test_with_for_borrowing() {
        let signal = create_signal(String::from("3.75"));
        let length = signal.with(|s| s.len());
        assert_eq!(length, 4);
    }

    #[test]
    fn test_clone_shares_underlying_value() {
        let signal1 = create_signal(50);
        let signal2 = signal1.clone();

        signal1.set(75);
        assert_eq!(signal2.get(), 75);
        assert_eq!(signal1.id(), signal2.id());
    }

    #[test]
    fn test_distinct_signals_have_distinct_ids() {
        let a = create_signal(0);
        let b = create_signal(0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_signal_stays_on_its_thread() {
        let _ = <Signal<String> as AmbiguousIfSend<_>>::some_item;
        let _ = <crate::surface::Label as AmbiguousIfSend<_>>::some_item;
    }
}
