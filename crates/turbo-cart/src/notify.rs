//! The single pathway from interaction outcomes to user feedback.

use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use turbo_observability::StructuredLogger;

use crate::config::{FeedbackConfig, ToastConfig};
use crate::dom::Dialogs;
use crate::toast::{Toast, ToastNotifier};

/// How a notice reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackChannel {
    /// Transient toast.
    Toast,
    /// Blocking alert dialog.
    Alert,
    /// Logged only.
    Silent,
}

/// Something the user may need to hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The operation worked.
    Success(String),
    /// The request never completed or its body was unreadable.
    Failure(String),
    /// The server answered but declined.
    Rejected(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Failure(m) | Notice::Rejected(m) => m,
        }
    }
}

/// Routes notices to toasts, alerts or nowhere, per configuration.
///
/// Successes always use a success toast. Failures and rejections use their
/// configured channel; the toast channel renders an error toast.
#[derive(Clone)]
pub struct Notifier {
    toasts: ToastNotifier,
    dialogs: Rc<dyn Dialogs>,
    feedback: FeedbackConfig,
    toast_style: ToastConfig,
    logger: StructuredLogger,
}

impl Notifier {
    pub fn new(
        toasts: ToastNotifier,
        dialogs: Rc<dyn Dialogs>,
        feedback: FeedbackConfig,
        toast_style: ToastConfig,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            toasts,
            dialogs,
            feedback,
            toast_style,
            logger,
        }
    }

    /// The channel a notice will be delivered on.
    pub fn channel_for(&self, notice: &Notice) -> FeedbackChannel {
        match notice {
            Notice::Success(_) => FeedbackChannel::Toast,
            Notice::Failure(_) => self.feedback.network_failure,
            Notice::Rejected(_) => self.feedback.rejected,
        }
    }

    /// Deliver a notice.
    pub fn notify(&self, notice: Notice) {
        let channel = self.channel_for(&notice);
        match channel {
            FeedbackChannel::Toast => {
                let toast = self.toast_for(&notice);
                if let Err(e) = self.toasts.show(toast) {
                    self.logger
                        .error_builder("toast failed")
                        .field("error", e.to_string())
                        .emit();
                }
            }
            FeedbackChannel::Alert => {
                if let Err(e) = self.dialogs.alert(notice.message()) {
                    self.logger
                        .warn_builder("alert failed")
                        .field("message", notice.message())
                        .field("error", e.to_string())
                        .emit();
                }
            }
            FeedbackChannel::Silent => {
                self.logger
                    .debug_builder("notice suppressed")
                    .field("message", notice.message())
                    .emit();
            }
        }
    }

    fn toast_for(&self, notice: &Notice) -> Toast {
        let duration = Duration::from_millis(self.toast_style.duration_ms);
        let toast = match notice {
            Notice::Success(m) => {
                Toast::success(m.clone()).with_class(self.toast_style.success_class.clone())
            }
            Notice::Failure(m) | Notice::Rejected(m) => {
                Toast::error(m.clone()).with_class(self.toast_style.error_class.clone())
            }
        };
        toast.with_duration(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDialogs, FakeToastHost, ManualScheduler};
    use crate::toast::ToastKind;
    use turbo_observability::{LogLevel, MemorySink};

    struct Harness {
        notifier: Notifier,
        host: Rc<FakeToastHost>,
        dialogs: Rc<FakeDialogs>,
    }

    fn harness(feedback: FeedbackConfig) -> Harness {
        let host = Rc::new(FakeToastHost::default());
        let dialogs = Rc::new(FakeDialogs::accepting());
        let toasts = ToastNotifier::new(
            host.clone(),
            Rc::new(ManualScheduler::default()),
            StructuredLogger::new(),
        );
        let notifier = Notifier::new(
            toasts,
            dialogs.clone(),
            feedback,
            ToastConfig::default(),
            StructuredLogger::new(),
        );
        Harness {
            notifier,
            host,
            dialogs,
        }
    }

    #[test]
    fn test_default_routing() {
        let h = harness(FeedbackConfig::default());
        h.notifier.notify(Notice::Success("ok".into()));
        h.notifier.notify(Notice::Failure("Error adding to cart".into()));
        h.notifier.notify(Notice::Rejected("nope".into()));

        assert_eq!(h.host.visible_messages(), vec!["ok".to_string()]);
        assert_eq!(h.dialogs.alerts(), vec!["Error adding to cart".to_string()]);
    }

    #[test]
    fn test_failures_as_error_toasts() {
        let h = harness(FeedbackConfig {
            network_failure: FeedbackChannel::Toast,
            rejected: FeedbackChannel::Toast,
        });
        h.notifier.notify(Notice::Failure("down".into()));
        h.notifier.notify(Notice::Rejected("declined".into()));

        let kinds: Vec<ToastKind> = h.host.mounted().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Error, ToastKind::Error]);
        assert!(h.dialogs.alerts().is_empty());
    }

    #[test]
    fn test_toast_uses_configured_style() {
        let h = harness(FeedbackConfig::default());
        h.notifier.notify(Notice::Success("ok".into()));
        let toast = &h.host.mounted()[0];
        assert_eq!(toast.class_name, crate::toast::SUCCESS_TOAST_CLASS);
        assert_eq!(toast.duration, Duration::from_millis(2000));
    }

    #[test]
    fn test_failed_alert_is_logged() {
        let logs = Rc::new(MemorySink::default());
        let logger = StructuredLogger::new().with_sink(logs.clone());
        let dialogs = Rc::new(FakeDialogs::accepting().with_failing_alerts("dialogs blocked"));
        let toasts = ToastNotifier::new(
            Rc::new(FakeToastHost::default()),
            Rc::new(ManualScheduler::default()),
            logger.clone(),
        );
        let notifier = Notifier::new(
            toasts,
            dialogs.clone(),
            FeedbackConfig::default(),
            ToastConfig::default(),
            logger,
        );

        notifier.notify(Notice::Failure("Error adding to cart".into()));

        assert_eq!(dialogs.alerts(), vec!["Error adding to cart".to_string()]);
        let warns: Vec<_> = logs
            .entries()
            .into_iter()
            .filter(|e| e.level == LogLevel::Warn)
            .collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].message, "alert failed");
        assert_eq!(
            warns[0].fields.get("error"),
            Some(&serde_json::json!("DOM error: dialogs blocked"))
        );
    }

    #[test]
    fn test_serde_channel_names() {
        let c: FeedbackChannel = serde_json::from_str("\"silent\"").unwrap();
        assert_eq!(c, FeedbackChannel::Silent);
    }
}
