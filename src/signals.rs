use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::{Rc, Weak},
};

/// Page-wide notifications consumed by scene controllers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSignal {
    /// Debounced "viewport changed" broadcast.
    ResizeScenes,
    /// Pointer position in logical window coordinates.
    PointerMove { client_x: f64, client_y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    ResizeScenes,
    PointerMove,
}

impl PageSignal {
    pub fn kind(&self) -> SignalKind {
        match self {
            PageSignal::ResizeScenes => SignalKind::ResizeScenes,
            PageSignal::PointerMove { .. } => SignalKind::PointerMove,
        }
    }
}

struct Listener {
    id: u64,
    kind: SignalKind,
    queue: VecDeque<PageSignal>,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// Single-threaded broadcast of page signals. Every subscriber owns a queue that
/// is filled on dispatch and drained by the subscriber on its own schedule.
#[derive(Clone, Default)]
pub struct SignalHub {
    state: Rc<RefCell<HubState>>,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kind: SignalKind) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push(Listener {
            id,
            kind,
            queue: VecDeque::new(),
        });

        Subscription {
            id,
            hub: Rc::downgrade(&self.state),
        }
    }

    pub fn dispatch(&self, signal: PageSignal) {
        let kind = signal.kind();
        let mut state = self.state.borrow_mut();
        for listener in state.listeners.iter_mut().filter(|l| l.kind == kind) {
            listener.queue.push_back(signal);
        }
    }
}

#[cfg(test)]
impl SignalHub {
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

/// Registration handle. Dropping it unregisters the listener.
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<HubState>>,
}

impl Subscription {
    /// Takes every signal queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<PageSignal> {
        let Some(hub) = self.hub.upgrade() else {
            return Vec::new();
        };

        let mut state = hub.borrow_mut();
        state
            .listeners
            .iter_mut()
            .find(|l| l.id == self.id)
            .map(|l| l.queue.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().listeners.retain(|l| l.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_reaches_matching_subscribers_only() {
        let hub = SignalHub::new();
        let resize = hub.subscribe(SignalKind::ResizeScenes);
        let pointer = hub.subscribe(SignalKind::PointerMove);

        hub.dispatch(PageSignal::ResizeScenes);
        hub.dispatch(PageSignal::PointerMove {
            client_x: 10.0,
            client_y: 20.0,
        });

        assert_eq!(resize.drain(), vec![PageSignal::ResizeScenes]);
        assert_eq!(
            pointer.drain(),
            vec![PageSignal::PointerMove {
                client_x: 10.0,
                client_y: 20.0
            }]
        );
        assert!(resize.drain().is_empty());
    }

    #[test]
    fn dropping_subscription_unregisters() {
        let hub = SignalHub::new();
        let subscription = hub.subscribe(SignalKind::ResizeScenes);
        assert_eq!(hub.listener_count(), 1);

        drop(subscription);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(PageSignal::ResizeScenes);
    }

    #[test]
    fn subscription_outliving_hub_drains_nothing() {
        let hub = SignalHub::new();
        let subscription = hub.subscribe(SignalKind::PointerMove);
        drop(hub);

        assert!(subscription.drain().is_empty());
    }
}
