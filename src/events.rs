//! Typed, single-threaded event emission.
//!
//! Each component owns an [`EventEmitter`] over its own event enum. Listeners
//! run synchronously, in subscription order, within the emitting call.
//! [`EventQueue`] is a listener that buffers events so an owner (the
//! navigation bridge) can react after the component call has returned,
//! instead of re-entering the component from inside a listener.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Events with a stable wire name, used for logging and NDJSON output.
pub trait NamedEvent {
    fn name(&self) -> &'static str;
}

/// Handle returned by [`EventEmitter::on`], used to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Ordered set of listeners for one event type.
pub struct EventEmitter<E> {
    listeners: Vec<(ListenerId, Listener<E>)>,
    next_id: u64,
}

impl<E> Default for EventEmitter<E> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> std::fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E: NamedEvent> EventEmitter<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener.
    pub fn on(&mut self, listener: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Detach a listener. Returns false if it was not attached.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener.
    pub fn emit(&mut self, event: &E) {
        tracing::trace!(event = event.name(), listeners = self.listeners.len(), "emit");
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Detach every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Shared FIFO buffer fed by an emitter listener.
#[derive(Debug)]
pub struct EventQueue<E> {
    buffer: Rc<RefCell<VecDeque<E>>>,
}

impl<E> Clone for EventQueue<E> {
    fn clone(&self) -> Self {
        Self {
            buffer: Rc::clone(&self.buffer),
        }
    }
}

impl<E: NamedEvent + Clone + 'static> EventQueue<E> {
    /// Subscribe a new queue to `emitter`.
    pub fn attach(emitter: &mut EventEmitter<E>) -> (Self, ListenerId) {
        let buffer: Rc<RefCell<VecDeque<E>>> = Rc::default();
        let sink = Rc::clone(&buffer);
        let id = emitter.on(move |event: &E| sink.borrow_mut().push_back(event.clone()));
        (Self { buffer }, id)
    }

    /// Take the oldest buffered event.
    #[must_use]
    pub fn pop(&self) -> Option<E> {
        self.buffer.borrow_mut().pop_front()
    }

    /// Take every buffered event, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<E> {
        self.buffer.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }
}
