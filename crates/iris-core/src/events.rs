//! Lifecycle events and listener registration.

use crate::layout::ImageGeometry;

#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    /// An inline viewer finished building and is attached.
    Ready,
    /// A modal viewer is about to show. Cancelable.
    Show,
    Shown,
    /// A modal viewer is about to hide. Cancelable.
    Hide,
    Hidden,
    /// About to switch to image `index`. Cancelable.
    View { index: usize },
    /// Image `index` is laid out and painted.
    Viewed {
        index: usize,
        image: ImageGeometry,
        title: String,
    },
}

impl ViewerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ViewerEvent::Ready => EventKind::Ready,
            ViewerEvent::Show => EventKind::Show,
            ViewerEvent::Shown => EventKind::Shown,
            ViewerEvent::Hide => EventKind::Hide,
            ViewerEvent::Hidden => EventKind::Hidden,
            ViewerEvent::View { .. } => EventKind::View,
            ViewerEvent::Viewed { .. } => EventKind::Viewed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    Show,
    Shown,
    Hide,
    Hidden,
    View,
    Viewed,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::Ready,
        EventKind::Show,
        EventKind::Shown,
        EventKind::Hide,
        EventKind::Hidden,
        EventKind::View,
        EventKind::Viewed,
    ];

    /// Whether a listener can abort the transition this event announces.
    pub fn is_cancelable(&self) -> bool {
        matches!(self, EventKind::Show | EventKind::Hide | EventKind::View)
    }
}

/// What a listener wants to happen after it ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventFlow {
    #[default]
    Continue,
    /// Abort the announced transition. Ignored for non-cancelable events.
    Prevent,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&ViewerEvent) -> EventFlow>;

/// Listeners in registration order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
}

impl EventBus {
    pub fn subscribe(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, listener));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Run every listener for the event's kind.
    ///
    /// All listeners run even after one prevents; the result is `Prevent` if
    /// any of them did and the event is cancelable.
    pub fn emit(&mut self, event: &ViewerEvent) -> EventFlow {
        let kind = event.kind();
        let mut prevented = false;
        for (_, listener_kind, listener) in self.listeners.iter_mut() {
            if *listener_kind == kind && listener(event) == EventFlow::Prevent {
                prevented = true;
            }
        }
        if prevented && kind.is_cancelable() {
            EventFlow::Prevent
        } else {
            EventFlow::Continue
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
