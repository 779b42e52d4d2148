//! Transient toast notifications.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use turbo_observability::StructuredLogger;

use crate::dom::{MountedToast, Scheduler, ToastHost};
use crate::error::CartUiError;

/// How long a toast stays on the page.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Tailwind classes for success toasts.
pub const SUCCESS_TOAST_CLASS: &str =
    "fixed bottom-5 right-5 bg-green-500 text-white px-4 py-2 rounded shadow";

/// Tailwind classes for error toasts.
pub const ERROR_TOAST_CLASS: &str =
    "fixed bottom-5 right-5 bg-red-500 text-white px-4 py-2 rounded shadow";

/// Visual variant of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A toast to render. The message is plain text, never markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub class_name: String,
    pub duration: Duration,
}

impl Toast {
    /// Success toast with default styling and duration.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            class_name: SUCCESS_TOAST_CLASS.to_string(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Error toast with default styling and duration.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            class_name: ERROR_TOAST_CLASS.to_string(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Mounts toasts and schedules their removal.
///
/// Every call is independent: there is no queue, so overlapping calls put
/// several toasts on the page, each removed by its own timer.
#[derive(Clone)]
pub struct ToastNotifier {
    host: Rc<dyn ToastHost>,
    scheduler: Rc<dyn Scheduler>,
    logger: StructuredLogger,
}

impl ToastNotifier {
    pub fn new(
        host: Rc<dyn ToastHost>,
        scheduler: Rc<dyn Scheduler>,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            host,
            scheduler,
            logger,
        }
    }

    /// Show `toast` and remove it after `toast.duration`.
    ///
    /// If the removal timer cannot be scheduled the toast is removed at once,
    /// so a failed timer never leaves a node behind.
    pub fn show(&self, toast: Toast) -> Result<(), CartUiError> {
        let mounted = self.host.mount(&toast)?;
        let slot: Rc<RefCell<Option<Box<dyn MountedToast>>>> =
            Rc::new(RefCell::new(Some(mounted)));

        let task_slot = Rc::clone(&slot);
        let scheduled = self.scheduler.schedule(
            toast.duration,
            Box::new(move || {
                if let Some(mounted) = task_slot.borrow_mut().take() {
                    mounted.remove();
                }
            }),
        );

        match scheduled {
            Ok(()) => {
                self.logger
                    .debug_builder("toast shown")
                    .field("message", toast.message.as_str())
                    .field_i64(
                        "duration_ms",
                        i64::try_from(toast.duration.as_millis()).unwrap_or(i64::MAX),
                    )
                    .emit();
                Ok(())
            }
            Err(e) => {
                if let Some(mounted) = slot.borrow_mut().take() {
                    mounted.remove();
                }
                self.logger
                    .warn_builder("toast removal could not be scheduled")
                    .field("error", e.to_string())
                    .emit();
                Err(e)
            }
        }
    }
}
