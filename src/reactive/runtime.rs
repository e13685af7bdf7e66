use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

pub type SignalId = usize;
pub type EffectId = usize;

type EffectCallback = Box<dyn FnMut()>;

#[derive(Default)]
pub struct Runtime {
    current_effect: Option<EffectId>,
    pending_effects: HashSet<EffectId>,
    effect_callbacks: Vec<Option<EffectCallback>>,
    effect_dependencies: Vec<HashSet<SignalId>>,
    disposed_effects: HashSet<EffectId>,
    signal_subscribers: Vec<HashSet<EffectId>>,
    next_signal_id: SignalId,
    next_effect_id: EffectId,
    batch_depth: usize,
    flushing: bool,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_signal(&mut self) -> SignalId {
        let id = self.next_signal_id;
        self.next_signal_id += 1;
        self.signal_subscribers.push(HashSet::new());
        id
    }

    pub fn allocate_effect(&mut self, callback: EffectCallback) -> EffectId {
        let id = self.next_effect_id;
        self.next_effect_id += 1;
        self.effect_callbacks.push(Some(callback));
        self.effect_dependencies.push(HashSet::new());
        id
    }

    pub fn track_read(&mut self, signal_id: SignalId) {
        // Ids allocated before a runtime was created are unknown here
        if signal_id >= self.signal_subscribers.len() {
            return;
        }

        if let Some(effect_id) = self.current_effect {
            self.signal_subscribers[signal_id].insert(effect_id);
            self.effect_dependencies[effect_id].insert(signal_id);
        }
    }

    /// Queue every subscriber of `signal_id`. Returns true when the caller
    /// should flush (not inside a batch or an ongoing flush).
    fn queue_subscribers(&mut self, signal_id: SignalId) -> bool {
        if signal_id >= self.signal_subscribers.len() {
            return false;
        }

        let subscribers: Vec<_> = self.signal_subscribers[signal_id].iter().copied().collect();
        self.pending_effects.extend(subscribers);

        self.batch_depth == 0 && !self.flushing && !self.pending_effects.is_empty()
    }

    /// Detach the effect from its old dependencies and take its callback out,
    /// so it can run without the runtime being borrowed.
    fn begin_effect(&mut self, effect_id: EffectId) -> Option<(EffectCallback, Option<EffectId>)> {
        if self.disposed_effects.contains(&effect_id) {
            return None;
        }
        let callback = self.effect_callbacks.get_mut(effect_id)?.take()?;

        let old_deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in old_deps {
            self.signal_subscribers[signal_id].remove(&effect_id);
        }

        let prev_effect = self.current_effect.replace(effect_id);
        Some((callback, prev_effect))
    }

    fn end_effect(&mut self, effect_id: EffectId, callback: EffectCallback, prev: Option<EffectId>) {
        self.current_effect = prev;
        if !self.disposed_effects.contains(&effect_id) {
            self.effect_callbacks[effect_id] = Some(callback);
        }
    }

    pub fn dispose_effect(&mut self, effect_id: EffectId) {
        let deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in deps {
            if signal_id < self.signal_subscribers.len() {
                self.signal_subscribers[signal_id].remove(&effect_id);
            }
        }
        self.effect_callbacks[effect_id] = None;
        self.pending_effects.remove(&effect_id);
        self.disposed_effects.insert(effect_id);
    }
}

pub fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Try to access the runtime. Does nothing if the runtime is already borrowed.
pub fn try_with_runtime<F>(f: F)
where
    F: FnOnce(&mut Runtime),
{
    RUNTIME.with(|rt| {
        if let Ok(mut runtime) = rt.try_borrow_mut() {
            f(&mut runtime);
        }
    });
}

/// Run an effect with dependency tracking. The runtime is not borrowed while
/// the callback executes, so the callback may read and write signals freely.
pub fn run_effect(effect_id: EffectId) {
    let Some((mut callback, prev)) = with_runtime(|rt| rt.begin_effect(effect_id)) else {
        return;
    };
    callback();
    with_runtime(|rt| rt.end_effect(effect_id, callback, prev));
}

/// Notify subscribers of a signal write and run them unless batching.
pub fn notify_write(signal_id: SignalId) {
    let mut should_flush = false;
    try_with_runtime(|rt| should_flush = rt.queue_subscribers(signal_id));
    if should_flush {
        flush_effects();
    }
}

fn flush_effects() {
    with_runtime(|rt| rt.flushing = true);
    loop {
        let effects: Vec<_> = with_runtime(|rt| rt.pending_effects.drain().collect());
        if effects.is_empty() {
            break;
        }
        for effect_id in effects {
            run_effect(effect_id);
        }
    }
    with_runtime(|rt| rt.flushing = false);
}

/// Group several signal writes so dependent effects run once at the end.
pub fn batch<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_runtime(|rt| rt.batch_depth += 1);
    let result = f();
    let should_flush = with_runtime(|rt| {
        rt.batch_depth -= 1;
        rt.batch_depth == 0 && !rt.flushing && !rt.pending_effects.is_empty()
    });

    if should_flush {
        flush_effects();
    }

    result
}
