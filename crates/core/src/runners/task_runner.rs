//! Asynchronous execution of invocation specs

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use super::TaskState;
use crate::{
    build_system::BuildToolKind,
    command::TaskInvocationSpec,
    error::{Error, Result},
    interfaces::{Notification, NotificationSink, TaskLauncher},
};

/// Terminal result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub working_dir: PathBuf,
    pub tool: BuildToolKind,
    pub success: bool,
}

impl TaskOutcome {
    pub fn state(&self) -> TaskState {
        TaskState::Completed {
            success: self.success,
        }
    }

    pub fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::ExternalTaskFailure(format!(
                "{} spotless task in {}",
                self.tool,
                self.working_dir.display()
            )))
        }
    }
}

/// A running invocation. Resolves exactly once with its outcome.
#[derive(Debug)]
pub struct TaskHandle {
    working_dir: PathBuf,
    tool: BuildToolKind,
    receiver: oneshot::Receiver<TaskOutcome>,
}

impl TaskHandle {
    pub fn working_dir(&self) -> &std::path::Path {
        &self.working_dir
    }

    pub fn state(&self) -> TaskState {
        TaskState::Running
    }

    /// Wait for the task to terminate. A task that died without reporting
    /// counts as failed.
    pub async fn wait(self) -> TaskOutcome {
        match self.receiver.await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!(
                    "Task in {} ended without reporting an outcome",
                    self.working_dir.display()
                );
                TaskOutcome {
                    working_dir: self.working_dir,
                    tool: self.tool,
                    success: false,
                }
            }
        }
    }
}

/// Runs specs on the Tokio runtime and reports through the notification sink.
#[derive(Clone)]
pub struct TaskRunner {
    launcher: Arc<dyn TaskLauncher>,
    notifier: Arc<dyn NotificationSink>,
}

impl TaskRunner {
    pub fn new(launcher: Arc<dyn TaskLauncher>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { launcher, notifier }
    }

    /// Launch `spec` in the background and return immediately.
    ///
    /// The completion notification is written before the handle resolves.
    /// No retries. Outside a Tokio runtime nothing is launched and the
    /// handle resolves as failed.
    pub fn run(&self, spec: TaskInvocationSpec) -> TaskHandle {
        let (sender, receiver) = oneshot::channel();
        let handle = TaskHandle {
            working_dir: spec.working_dir.clone(),
            tool: spec.tool,
            receiver,
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!("Cannot launch {}: {}", spec.to_shell_command(), e);
                finish(self.notifier.as_ref(), &spec, false, sender);
                return handle;
            }
        };

        let launcher = Arc::clone(&self.launcher);
        let notifier = Arc::clone(&self.notifier);

        runtime.spawn(async move {
            let success = match AssertUnwindSafe(launcher.launch(&spec)).catch_unwind().await {
                Ok(Ok(success)) => success,
                Ok(Err(e)) => {
                    tracing::error!("Failed to launch {}: {}", spec.to_shell_command(), e);
                    false
                }
                Err(_) => {
                    tracing::error!("Launcher panicked running {}", spec.to_shell_command());
                    false
                }
            };

            finish(notifier.as_ref(), &spec, success, sender);
        });

        handle
    }
}

/// Report the terminal state of `spec`, then resolve its handle.
fn finish(
    notifier: &dyn NotificationSink,
    spec: &TaskInvocationSpec,
    success: bool,
    sender: oneshot::Sender<TaskOutcome>,
) {
    let dir = spec.working_dir.display();
    if success {
        notifier.notify(Notification::info(format!("Reformat completed: {dir}")));
    } else {
        notifier.notify(Notification::error(format!("Reformat failed: {dir}")));
    }

    let outcome = TaskOutcome {
        working_dir: spec.working_dir.clone(),
        tool: spec.tool,
        success,
    };
    tracing::debug!("Task in {} is {}", dir, outcome.state());
    let _ = sender.send(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NotificationLevel;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeLauncher {
        result: fn() -> Result<bool>,
        calls: AtomicUsize,
    }

    impl FakeLauncher {
        fn new(result: fn() -> Result<bool>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TaskLauncher for FakeLauncher {
        async fn launch(&self, _spec: &TaskInvocationSpec) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<Notification>>);

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn spec() -> TaskInvocationSpec {
        TaskInvocationSpec {
            working_dir: PathBuf::from("/repo"),
            tool: BuildToolKind::Gradle,
            task_names: vec!["spotlessApply".to_string()],
            parameters: String::new(),
        }
    }

    #[tokio::test]
    async fn test_success_notifies_and_resolves() {
        let launcher = FakeLauncher::new(|| Ok(true));
        let sink = Arc::new(RecordingSink::default());
        let runner = TaskRunner::new(launcher.clone(), sink.clone());

        let handle = runner.run(spec());
        assert_eq!(handle.state(), TaskState::Running);
        let outcome = handle.wait().await;

        assert!(outcome.success);
        assert_eq!(outcome.state(), TaskState::Completed { success: true });
        assert_eq!(launcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            sink.0.lock().unwrap().as_slice(),
            &[Notification::info("Reformat completed: /repo")]
        );
    }

    #[tokio::test]
    async fn test_failed_task_is_reported_once() {
        let launcher = FakeLauncher::new(|| Ok(false));
        let sink = Arc::new(RecordingSink::default());
        let runner = TaskRunner::new(launcher.clone(), sink.clone());

        let outcome = runner.run(spec()).wait().await;

        assert!(!outcome.success);
        assert!(matches!(
            outcome.clone().into_result(),
            Err(Error::ExternalTaskFailure(_))
        ));
        assert_eq!(launcher.calls.load(Ordering::SeqCst), 1);
        let notifications = sink.0.lock().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_launch_error_counts_as_failure() {
        let launcher = FakeLauncher::new(|| Err(Error::Launch("gradle: not found".to_string())));
        let sink = Arc::new(RecordingSink::default());
        let runner = TaskRunner::new(launcher, sink.clone());

        let outcome = runner.run(spec()).wait().await;

        assert!(!outcome.success);
        assert_eq!(sink.0.lock().unwrap()[0].message, "Reformat failed: /repo");
    }

    struct PanickingLauncher;

    #[async_trait]
    impl TaskLauncher for PanickingLauncher {
        async fn launch(&self, _spec: &TaskInvocationSpec) -> Result<bool> {
            panic!("launcher blew up");
        }
    }

    #[tokio::test]
    async fn test_panicking_launcher_is_reported_as_failure() {
        let sink = Arc::new(RecordingSink::default());
        let runner = TaskRunner::new(Arc::new(PanickingLauncher), sink.clone());

        let outcome = runner.run(spec()).wait().await;

        assert!(!outcome.success);
        assert_eq!(
            sink.0.lock().unwrap().as_slice(),
            &[Notification::error("Reformat failed: /repo")]
        );
    }

    #[tokio::test]
    async fn test_dropped_sender_resolves_as_failure() {
        let (sender, receiver) = oneshot::channel::<TaskOutcome>();
        drop(sender);
        let handle = TaskHandle {
            working_dir: PathBuf::from("/repo"),
            tool: BuildToolKind::Maven,
            receiver,
        };

        let outcome = handle.wait().await;

        assert!(!outcome.success);
        assert_eq!(outcome.tool, BuildToolKind::Maven);
    }

    #[test]
    fn test_run_outside_runtime_fails_without_launching() {
        let launcher = FakeLauncher::new(|| Ok(true));
        let sink = Arc::new(RecordingSink::default());
        let runner = TaskRunner::new(launcher.clone(), sink.clone());

        let outcome = futures::executor::block_on(runner.run(spec()).wait());

        assert!(!outcome.success);
        assert_eq!(launcher.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            sink.0.lock().unwrap().as_slice(),
            &[Notification::error("Reformat failed: /repo")]
        );
    }
}
