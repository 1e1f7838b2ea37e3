//! # Controller driver
//!
//! Runs a [`SyncController`] as a tokio task and performs the effects it
//! asks for.
//!
//! ```text
//! ControllerHandle ──Event──► mpsc ──► driver task ──► SyncController::handle
//!        ▲                                 │
//!        │                                 ├─ Validate    → inline, result fed back immediately
//!        │                                 ├─ ArmTimer    → tokio::time::sleep task
//!        │                                 ├─ Reconfigure → renderer, before any later Render
//!        │                                 └─ Render      → spawn_blocking, result fed back as event
//!        └──────────── watch::Receiver<Snapshot> ◄─ published after each event
//! ```
//!
//! Only the driver task touches controller state, so transitions never
//! interleave. Renders run off the loop and new edits are accepted while
//! one is in flight.

use crate::adapters::{DiagramRender, SyntaxValidator};
use crate::config::ControllerConfig;
use crate::controller::SyncController;
use crate::errors::{EditorError, EditorResult};
use crate::state::{ChangeOrigin, Effect, Event, RenderOutcome, Snapshot};
use flowcraft_common::{Theme, ValidationResult};
use flowcraft_renderer::RenderError;
use flowcraft_validator::ValidatorError;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Client side of a running controller
#[derive(Debug)]
pub struct ControllerHandle {
    events: mpsc::UnboundedSender<Event>,
    snapshots: watch::Receiver<Snapshot>,
    task: JoinHandle<()>,
}

impl ControllerHandle {
    /// Start the driver task. Must be called from within a tokio runtime.
    pub fn spawn(
        config: ControllerConfig,
        validator: Arc<dyn SyntaxValidator>,
        renderer: Arc<dyn DiagramRender>,
    ) -> Self {
        let controller = SyncController::new(config);
        let (events, receiver) = mpsc::unbounded_channel();
        let (publisher, snapshots) = watch::channel(controller.snapshot());

        renderer.reconfigure(config.initial_theme);

        let driver = Driver {
            controller,
            validator,
            renderer,
            feedback: events.downgrade(),
            publisher,
            timer: None,
        };
        let task = tokio::spawn(driver.run(receiver));

        Self {
            events,
            snapshots,
            task,
        }
    }

    /// A user edit; validated now, rendered after the debounce window
    pub fn on_text_changed(&self, text: impl Into<String>) -> EditorResult<()> {
        self.send(Event::TextChanged {
            text: text.into(),
            origin: ChangeOrigin::User,
        })
    }

    /// Wholesale replacement (template, load); rendered without debounce
    pub fn set_text(&self, text: impl Into<String>) -> EditorResult<()> {
        self.send(Event::TextChanged {
            text: text.into(),
            origin: ChangeOrigin::Programmatic,
        })
    }

    pub fn text_changed(&self, text: impl Into<String>, origin: ChangeOrigin) -> EditorResult<()> {
        self.send(Event::TextChanged {
            text: text.into(),
            origin,
        })
    }

    pub fn change_theme(&self, theme: Theme) -> EditorResult<()> {
        self.send(Event::ThemeChanged(theme))
    }

    pub fn force_refresh(&self) -> EditorResult<()> {
        self.send(Event::ForceRefresh)
    }

    pub fn zoom_in(&self) -> EditorResult<()> {
        self.send(Event::ZoomIn)
    }

    pub fn zoom_out(&self) -> EditorResult<()> {
        self.send(Event::ZoomOut)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn current_validation(&self) -> Option<ValidationResult> {
        self.snapshots.borrow().validation.clone()
    }

    pub fn current_render(&self) -> RenderOutcome {
        self.snapshots.borrow().render.clone()
    }

    /// Receiver notified after every transition that changed the snapshot
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Stop accepting events and wait for the driver to finish
    pub async fn shutdown(self) {
        let Self { events, task, .. } = self;
        drop(events);
        if let Err(e) = task.await {
            tracing::warn!("controller task ended abnormally: {}", e);
        }
    }

    fn send(&self, event: Event) -> EditorResult<()> {
        self.events
            .send(event)
            .map_err(|_| EditorError::ControllerClosed)
    }
}

struct Driver {
    controller: SyncController,
    validator: Arc<dyn SyntaxValidator>,
    renderer: Arc<dyn DiagramRender>,
    feedback: mpsc::WeakUnboundedSender<Event>,
    publisher: watch::Sender<Snapshot>,
    timer: Option<JoinHandle<()>>,
}

impl Driver {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>) {
        tracing::debug!("controller driver started");

        while let Some(event) = events.recv().await {
            self.dispatch(event);
            self.publish();
        }

        self.cancel_timer();
        tracing::debug!("controller driver stopped");
    }

    fn dispatch(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            for effect in self.controller.handle(event) {
                match effect {
                    Effect::Validate { revision, text } => {
                        let result = self.validate(&text);
                        queue.push_back(Event::ValidationResolved { revision, result });
                    }
                    Effect::ArmTimer { generation, delay } => {
                        self.cancel_timer();
                        let feedback = self.feedback.clone();
                        self.timer = Some(tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            if let Some(events) = feedback.upgrade() {
                                let _ = events.send(Event::TimerFired(generation));
                            }
                        }));
                    }
                    Effect::CancelTimer => self.cancel_timer(),
                    Effect::Reconfigure(theme) => self.renderer.reconfigure(theme),
                    Effect::Render {
                        session,
                        text,
                        theme,
                    } => {
                        let renderer = Arc::clone(&self.renderer);
                        let feedback = self.feedback.clone();
                        tokio::spawn(async move {
                            let result =
                                tokio::task::spawn_blocking(move || renderer.render(&text, theme))
                                    .await
                                    .unwrap_or_else(|e| {
                                        Err(RenderError::Internal(format!(
                                            "render task failed: {}",
                                            e
                                        )))
                                    });
                            if let Some(events) = feedback.upgrade() {
                                let _ = events.send(Event::RenderResolved { session, result });
                            }
                        });
                    }
                }
            }
        }
    }

    fn validate(&self, text: &str) -> Result<ValidationResult, ValidatorError> {
        let validator = Arc::clone(&self.validator);
        panic::catch_unwind(AssertUnwindSafe(|| validator.validate(text))).unwrap_or_else(|payload| {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ValidatorError::Panicked(detail))
        })
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn publish(&self) {
        let next = self.controller.snapshot();
        self.publisher.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
