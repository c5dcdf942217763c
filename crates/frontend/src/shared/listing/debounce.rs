//! Trailing-edge debounce.
//!
//! [`Debouncer`] holds the timing rules and knows nothing about timers;
//! [`use_debounced`] drives it from a Leptos signal with `gloo-timers`.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Identifies one `push`; only the latest ticket can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Holds at most one pending value. Every push restarts the quiet period
/// and drops whatever was pending before.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_ms: u64,
    pending: Option<Pending<T>>,
    issued: u64,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: u64,
    ticket: DebounceTicket,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            pending: None,
            issued: 0,
        }
    }

    pub fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    pub fn push(&mut self, value: T, now_ms: u64) -> DebounceTicket {
        self.issued += 1;
        let ticket = DebounceTicket(self.issued);
        self.pending = Some(Pending {
            value,
            deadline: now_ms.saturating_add(self.quiet_ms),
            ticket,
        });
        ticket
    }

    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Clock-driven: emits the pending value once its quiet period is over.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now_ms >= p.deadline);
        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Timer-driven: the timer armed for `ticket` went off. Emits only if
    /// nothing was pushed after it.
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<T> {
        let current = self.pending.as_ref().is_some_and(|p| p.ticket == ticket);
        if current {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Signal that follows `source` once it has been quiet for `quiet_ms`.
///
/// The returned signal starts with the current value of `source`; only the
/// later changes are delayed.
pub fn use_debounced<T>(source: Signal<T>, quiet_ms: u32) -> ReadSignal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let (debounced, set_debounced) = signal(source.get_untracked());
    let debouncer = StoredValue::new(Debouncer::<T>::new(quiet_ms as u64));

    Effect::new(move |prev: Option<()>| {
        let value = source.get();
        if prev.is_none() {
            return;
        }
        let now = js_sys::Date::now() as u64;
        let Some(ticket) = debouncer.try_update_value(|d| d.push(value, now)) else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(quiet_ms).await;
            // The owner may be gone by now (view unmounted).
            if let Some(Some(value)) = debouncer.try_update_value(|d| d.fire(ticket)) {
                if debounced.get_untracked() != value {
                    set_debounced.set(value);
                }
            }
        });
    });

    on_cleanup(move || {
        debouncer.try_update_value(|d| d.cancel());
    });

    debounced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_value_is_emitted() {
        let mut d = Debouncer::new(500);
        d.push("v1", 0);
        d.push("v2", 200);
        d.push("v3", 400);

        assert_eq!(d.poll(600), None);
        assert_eq!(d.poll(899), None);
        assert_eq!(d.poll(900), Some("v3"));
        assert_eq!(d.poll(2000), None);
    }

    #[test]
    fn test_push_restarts_quiet_period() {
        let mut d = Debouncer::new(100);
        d.push(1, 0);
        assert_eq!(d.deadline(), Some(100));
        d.push(2, 90);
        assert_eq!(d.deadline(), Some(190));
        assert_eq!(d.poll(100), None);
        assert_eq!(d.poll(190), Some(2));
    }

    #[test]
    fn test_superseded_tickets_do_not_fire() {
        let mut d = Debouncer::new(500);
        let t1 = d.push("v1", 0);
        let t2 = d.push("v2", 10);
        let t3 = d.push("v3", 20);

        assert_eq!(d.fire(t1), None);
        assert_eq!(d.fire(t2), None);
        assert_eq!(d.fire(t3), Some("v3"));
        assert!(!d.is_pending());
        assert_eq!(d.fire(t3), None);
    }

    #[test]
    fn test_separate_bursts_emit_separately() {
        let mut d = Debouncer::new(100);
        d.push("a", 0);
        assert_eq!(d.poll(100), Some("a"));
        d.push("b", 300);
        assert_eq!(d.poll(350), None);
        assert_eq!(d.poll(400), Some("b"));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut d = Debouncer::new(100);
        let ticket = d.push(1, 0);
        d.cancel();
        assert_eq!(d.fire(ticket), None);
        assert_eq!(d.poll(1000), None);
    }
}
