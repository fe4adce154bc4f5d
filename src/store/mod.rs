//! # Store
//!
//! The single owner of one stack's state. `dispatch()` is the only way an
//! action changes it:
//!
//! ```text
//! dispatch(action)
//!   1. ignored if an update is already in flight (re-entrancy latch)
//!   2. middleware chain          → None aborts, nothing else happens
//!   3. snapshot old state
//!   4. reduce
//!   5. swap in new state
//!   6. notify observers (old, new), in registration order
//!   7. run actions queued through the Dispatcher, each as its own cycle
//! ```
//!
//! ## Threading
//!
//! Single-threaded by construction (`Rc`, `RefCell`, `Cell`). The latch is a
//! plain flag that swallows dispatches triggered synchronously from inside a
//! cycle, e.g. a UI binding writing back while observers run. It is not a
//! lock. Work on other threads comes back through [`Dispatcher`] and
//! [`Store::process_pending`].
//!
//! ## Modules
//!
//! - [`navigation`]: push/pop sugar for `Store<NavigationState<R>>`
//! - [`presentation`]: present/dismiss sugar and sheet/cover projections

pub mod navigation;
pub mod presentation;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::Receiver;

use log::debug;

use crate::core::action::StackAction;
use crate::core::state::StackState;
use crate::middleware::{AnyMiddleware, Dispatcher, Middleware, MiddlewareChain};

pub use navigation::NavigationStore;
pub use presentation::PresentationStore;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer<S> = Rc<dyn Fn(&S, &S)>;

/// Sets the update flag for as long as it lives.
struct UpdateLatch<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> UpdateLatch<'a> {
    fn set(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for UpdateLatch<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct Store<S: StackState> {
    state: RefCell<Rc<S>>,
    chain: MiddlewareChain<S>,
    observers: RefCell<Vec<(ObserverId, Observer<S>)>>,
    next_observer_id: Cell<u64>,
    is_updating: Cell<bool>,
    dispatcher: Dispatcher<S::Action>,
    pending: Receiver<S::Action>,
}

impl<S: StackState> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: StackState> Store<S> {
    pub fn new(initial: S) -> Self {
        let (dispatcher, pending) = Dispatcher::channel();
        Self {
            state: RefCell::new(Rc::new(initial)),
            chain: MiddlewareChain::new(),
            observers: RefCell::new(Vec::new()),
            next_observer_id: Cell::new(0),
            is_updating: Cell::new(false),
            dispatcher,
            pending,
        }
    }

    /// Appends middleware to the end of the chain.
    pub fn with_middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<S> + 'static,
    {
        self.add_middleware(middleware);
        self
    }

    pub fn add_middleware<M>(&mut self, middleware: M)
    where
        M: Middleware<S> + 'static,
    {
        self.chain.push(AnyMiddleware::new(middleware));
    }

    pub fn middleware(&self) -> &MiddlewareChain<S> {
        &self.chain
    }

    /// Current state. The snapshot never changes after it is handed out.
    pub fn state(&self) -> Rc<S> {
        self.state.borrow().clone()
    }

    /// A handle for dispatching later, from anywhere.
    pub fn dispatcher(&self) -> Dispatcher<S::Action> {
        self.dispatcher.clone()
    }

    pub fn is_updating(&self) -> bool {
        self.is_updating.get()
    }

    /// Registers `observer` to receive `(old, new)` after every applied
    /// action or reset.
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&S, &S) + 'static,
    {
        let id = ObserverId(self.next_observer_id.get());
        self.next_observer_id.set(id.0 + 1);
        let observer: Observer<S> = Rc::new(observer);
        self.observers.borrow_mut().push((id, observer));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Sends `action` through middleware and the reducer.
    pub fn dispatch(&self, action: S::Action) {
        self.dispatch_applied(action);
    }

    /// Like [`dispatch`](Self::dispatch), returning the action the reducer
    /// actually ran. `None` when the call was ignored or middleware aborted.
    /// Queued redispatches do not count.
    pub(crate) fn dispatch_applied(&self, action: S::Action) -> Option<S::Action> {
        if self.is_updating.get() {
            debug!("Ignoring re-entrant dispatch of {}", action.name());
            return None;
        }
        let applied = self.run_cycle(action);
        self.drain_pending();
        applied
    }

    /// Runs actions queued through the [`Dispatcher`]. Returns how many ran.
    pub fn process_pending(&self) -> usize {
        if self.is_updating.get() {
            return 0;
        }
        self.drain_pending()
    }

    /// Replaces the state without consulting middleware. Observers are still
    /// notified. Used for changes the host already made (a back gesture, a
    /// restored session) that must not be vetoed.
    ///
    /// Actions observers queue through the [`Dispatcher`] run afterwards, as
    /// after a dispatch. Returns false when ignored because an update is in
    /// flight.
    pub fn reset(&self, state: S) -> bool {
        if self.is_updating.get() {
            debug!("Ignoring state reset during update");
            return false;
        }
        {
            let _latch = UpdateLatch::set(&self.is_updating);
            let old = self.state();
            self.commit(old, Rc::new(state));
        }
        self.drain_pending();
        true
    }

    fn run_cycle(&self, action: S::Action) -> Option<S::Action> {
        let _latch = UpdateLatch::set(&self.is_updating);
        let old = self.state();
        let action = self.chain.run(action, &old, &self.dispatcher)?;
        let new = Rc::new(old.reduce(action.clone()));
        debug!("State updated: depth {} -> {}", old.depth(), new.depth());
        self.commit(old, new);
        Some(action)
    }

    fn commit(&self, old: Rc<S>, new: Rc<S>) {
        *self.state.borrow_mut() = Rc::clone(&new);
        let observers: Vec<Observer<S>> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer(&old, &new);
        }
    }

    fn drain_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(action) = self.pending.try_recv() {
            self.run_cycle(action);
            ran += 1;
        }
        ran
    }
}

impl<S: StackState> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state.borrow())
            .field("middleware", &self.chain)
            .field("observers", &self.observers.borrow().len())
            .field("is_updating", &self.is_updating.get())
            .finish()
    }
}
