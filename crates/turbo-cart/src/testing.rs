//! In-memory collaborators for exercising cart page logic off the browser.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::dom::{Dialogs, MountedToast, QuantityField, Scheduler, ToastHost};
use crate::error::CartUiError;
use crate::toast::Toast;

/// A quantity input backed by a `String`.
#[derive(Debug, Default)]
pub struct FakeField {
    value: RefCell<String>,
}

impl FakeField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(value.into()),
        }
    }
}

impl QuantityField for FakeField {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }
}

/// Dialogs with a fixed confirm answer that record every prompt.
#[derive(Debug)]
pub struct FakeDialogs {
    answer: bool,
    alert_error: Option<String>,
    confirms: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl FakeDialogs {
    pub fn accepting() -> Self {
        Self::answering(true)
    }

    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            alert_error: None,
            confirms: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
        }
    }

    /// Make every alert fail with `message` (the prompt is still recorded).
    pub fn with_failing_alerts(mut self, message: impl Into<String>) -> Self {
        self.alert_error = Some(message.into());
        self
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Dialogs for FakeDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) -> Result<(), CartUiError> {
        self.alerts.borrow_mut().push(message.to_string());
        match &self.alert_error {
            Some(error) => Err(CartUiError::Dom(error.clone())),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
struct HostState {
    toasts: Vec<(Toast, bool)>,
}

/// Toast host that tracks which toasts are currently visible.
#[derive(Debug, Default)]
pub struct FakeToastHost {
    state: Rc<RefCell<HostState>>,
}

impl FakeToastHost {
    /// Every toast ever mounted, in order.
    pub fn mounted(&self) -> Vec<Toast> {
        self.state
            .borrow()
            .toasts
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }

    pub fn mounted_total(&self) -> usize {
        self.state.borrow().toasts.len()
    }

    pub fn visible_count(&self) -> usize {
        self.state.borrow().toasts.iter().filter(|(_, v)| *v).count()
    }

    pub fn visible_messages(&self) -> Vec<String> {
        self.state
            .borrow()
            .toasts
            .iter()
            .filter(|(_, v)| *v)
            .map(|(t, _)| t.message.clone())
            .collect()
    }
}

struct FakeMountedToast {
    index: usize,
    state: Rc<RefCell<HostState>>,
}

impl MountedToast for FakeMountedToast {
    fn remove(self: Box<Self>) {
        if let Some(entry) = self.state.borrow_mut().toasts.get_mut(self.index) {
            entry.1 = false;
        }
    }
}

impl ToastHost for FakeToastHost {
    fn mount(&self, toast: &Toast) -> Result<Box<dyn MountedToast>, CartUiError> {
        let mut state = self.state.borrow_mut();
        state.toasts.push((toast.clone(), true));
        Ok(Box::new(FakeMountedToast {
            index: state.toasts.len() - 1,
            state: Rc::clone(&self.state),
        }))
    }
}

struct Pending {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// Scheduler driven by explicit calls to [`advance`](ManualScheduler::advance).
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    seq: Cell<u64>,
    pending: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    /// Move the clock forward, running due tasks in due-time order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get().saturating_add(by);
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let earliest = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(i, _)| i);
                earliest.map(|i| pending.remove(i))
            };
            match next {
                Some(p) => {
                    self.now.set(p.due);
                    (p.task)();
                }
                None => break,
            }
        }
        self.now.set(target);
    }

    /// Tasks not yet run.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<(), CartUiError> {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.pending.borrow_mut().push(Pending {
            due: self.now.get().saturating_add(delay),
            seq,
            task,
        });
        Ok(())
    }
}

/// Scheduler that refuses every task.
#[derive(Debug, Default)]
pub struct FailingScheduler;

impl Scheduler for FailingScheduler {
    fn schedule(&self, _delay: Duration, _task: Box<dyn FnOnce()>) -> Result<(), CartUiError> {
        Err(CartUiError::Dom("setTimeout unavailable".to_string()))
    }
}
