use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

/// Lets a test reach a mounted view's intent callback and state signal.
pub struct TestHandles<I: 'static, S: 'static> {
    dispatch: Rc<RefCell<Option<Callback<I>>>>,
    state: Rc<RefCell<Option<Signal<S>>>>,
}

impl<I: 'static, S: 'static> Clone for TestHandles<I, S> {
    fn clone(&self) -> Self {
        Self {
            dispatch: Rc::clone(&self.dispatch),
            state: Rc::clone(&self.state),
        }
    }
}

impl<I: 'static, S: 'static> Default for TestHandles<I, S> {
    fn default() -> Self {
        Self {
            dispatch: Rc::new(RefCell::new(None)),
            state: Rc::new(RefCell::new(None)),
        }
    }
}

impl<I: 'static, S: 'static> TestHandles<I, S> {
    pub fn register(&self, dispatch: Callback<I>, state: Signal<S>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.state.borrow_mut() = Some(state);
    }

    pub fn dispatch(&self) -> Callback<I> {
        (*self.dispatch.borrow()).expect("view dispatch registered")
    }

    pub fn state(&self) -> Signal<S> {
        (*self.state.borrow()).expect("view state registered")
    }
}

/// Registers the view's handles once, if a test provided them.
pub fn use_test_handles<I: 'static, S: 'static>(dispatch: Callback<I>, state: Signal<S>) {
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        if let Some(handles) = try_consume_context::<TestHandles<I, S>>() {
            handles.register(dispatch, state);
        }
    }
}
