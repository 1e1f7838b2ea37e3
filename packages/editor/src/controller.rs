//! # Synchronization Controller
//!
//! Decides what the user sees from a stream of edits and two slow, fallible
//! operations (validate, render).
//!
//! The controller is a plain state machine: [`SyncController::handle`] takes
//! one [`Event`] and returns the [`Effect`]s the driver must carry out. It
//! never sleeps, spawns or calls the validator/renderer itself, so every
//! ordering (timer races, out-of-order completions) can be replayed in a
//! unit test.
//!
//! ## Transitions
//!
//! ```text
//! TextChanged ──► blank? ──yes──► validation = none, outcome = Empty, cancel timer
//!                   │no
//!                   ├──► Validate(revision)
//!                   └──► user: ArmTimer        programmatic: render now
//!
//! TimerFired(g) ──► g current? ──► render gate ──► Render(session)
//!
//! render gate:  validation for this revision pending → defer until it resolves
//!               verdict invalid                      → skip
//!               (text, theme) already rendered       → skip
//!
//! RenderResolved(s) ──► s latest issued? ──► apply, else discard
//! ```

use crate::config::ControllerConfig;
use crate::state::{ChangeOrigin, Effect, Event, RenderOutcome, Snapshot};
use crate::timer::{DebounceTimer, Generation, GenerationCounter};
use crate::zoom::ZoomFactor;
use flowcraft_common::{Theme, ValidationResult};
use flowcraft_renderer::{Artifact, RenderError};
use flowcraft_validator::ValidatorError;
use std::sync::Arc;

/// Text and theme a render session was started with
#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderKey {
    text: String,
    theme: Theme,
}

#[derive(Debug, Clone)]
struct InFlight {
    session: Generation,
    key: RenderKey,
}

/// Render requested while validation for the current text was still out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Gated,
    Forced,
}

/// Authoritative owner of the document text and everything derived from it
#[derive(Debug)]
pub struct SyncController {
    config: ControllerConfig,
    text: String,
    revisions: GenerationCounter,
    validation: Option<ValidationResult>,
    pending_validation: Option<Generation>,
    deferred: Option<Deferred>,
    timer: DebounceTimer,
    sessions: GenerationCounter,
    in_flight: Option<InFlight>,
    outcome: RenderOutcome,
    last_rendered: Option<RenderKey>,
    theme: Theme,
    zoom: ZoomFactor,
}

impl SyncController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            text: String::new(),
            revisions: GenerationCounter::new(),
            validation: None,
            pending_validation: None,
            deferred: None,
            timer: DebounceTimer::new(),
            sessions: GenerationCounter::new(),
            in_flight: None,
            outcome: RenderOutcome::Empty,
            last_rendered: None,
            theme: config.initial_theme,
            zoom: ZoomFactor::default(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn zoom(&self) -> ZoomFactor {
        self.zoom
    }

    pub fn current_validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    pub fn current_render(&self) -> &RenderOutcome {
        &self.outcome
    }

    /// Latest render session issued (not necessarily resolved)
    pub fn latest_session(&self) -> Generation {
        self.sessions.latest()
    }

    pub fn is_render_pending(&self) -> bool {
        self.in_flight.is_some() || self.deferred.is_some() || self.timer.is_armed()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            revision: self.revisions.latest(),
            theme: self.theme,
            validation: self.validation.clone(),
            render: self.outcome.clone(),
            zoom: self.zoom,
            render_pending: self.is_render_pending(),
        }
    }

    /// Single transition function
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::TextChanged { text, origin } => self.on_text_changed(text, origin),
            Event::TimerFired(generation) => self.on_timer_fired(generation),
            Event::ValidationResolved { revision, result } => {
                self.on_validation_resolved(revision, result)
            }
            Event::RenderResolved { session, result } => {
                self.on_render_resolved(session, result);
                Vec::new()
            }
            Event::ThemeChanged(theme) => self.on_theme_changed(theme),
            Event::ForceRefresh => self.force_refresh(),
            Event::ZoomIn => {
                self.zoom = self.zoom.zoom_in();
                Vec::new()
            }
            Event::ZoomOut => {
                self.zoom = self.zoom.zoom_out();
                Vec::new()
            }
        }
    }

    pub fn on_text_changed(&mut self, text: String, origin: ChangeOrigin) -> Vec<Effect> {
        self.text = text;
        let revision = self.revisions.advance();
        let mut effects = Vec::new();

        if self.text.trim().is_empty() {
            tracing::debug!("text cleared at revision {}", revision);
            self.validation = None;
            self.pending_validation = None;
            self.deferred = None;
            self.outcome = RenderOutcome::Empty;
            self.last_rendered = None;
            if self.in_flight.take().is_some() {
                // Bump the session so a late result cannot repopulate the preview
                self.sessions.advance();
            }
            self.cancel_timer(&mut effects);
            return effects;
        }

        self.pending_validation = Some(revision);
        effects.push(Effect::Validate {
            revision,
            text: self.text.clone(),
        });

        match origin {
            ChangeOrigin::User => {
                let generation = self.timer.arm();
                effects.push(Effect::ArmTimer {
                    generation,
                    delay: self.config.debounce,
                });
            }
            ChangeOrigin::Programmatic => {
                self.cancel_timer(&mut effects);
                self.deferred = None;
                effects.extend(self.request_render(Deferred::Gated));
            }
        }

        effects
    }

    fn on_timer_fired(&mut self, generation: Generation) -> Vec<Effect> {
        if !self.timer.fire(generation) {
            tracing::debug!("ignoring superseded timer {}", generation);
            return Vec::new();
        }
        self.request_render(Deferred::Gated).into_iter().collect()
    }

    fn on_validation_resolved(
        &mut self,
        revision: Generation,
        result: Result<ValidationResult, ValidatorError>,
    ) -> Vec<Effect> {
        if !self.revisions.is_current(revision) || self.pending_validation != Some(revision) {
            tracing::debug!("discarding validation for stale revision {}", revision);
            return Vec::new();
        }
        self.pending_validation = None;

        match result {
            Ok(verdict) => {
                tracing::debug!(
                    "revision {} validated: valid={} errors={} warnings={}",
                    revision,
                    verdict.is_valid,
                    verdict.errors.len(),
                    verdict.warnings.len()
                );
                self.validation = Some(verdict);
            }
            Err(e) => {
                tracing::warn!("validator failed, keeping previous verdict: {}", e);
            }
        }

        match self.deferred.take() {
            Some(mode) => self.request_render(mode).into_iter().collect(),
            None => Vec::new(),
        }
    }

    fn on_render_resolved(&mut self, session: Generation, result: Result<Artifact, RenderError>) {
        if !self.sessions.is_current(session) {
            tracing::debug!("discarding result of superseded render session {}", session);
            return;
        }
        let Some(in_flight) = self.in_flight.take() else {
            tracing::debug!("render session {} resolved twice", session);
            return;
        };

        match result {
            Ok(artifact) => {
                tracing::debug!("render session {} applied ({})", session, artifact.id());
                self.outcome = RenderOutcome::Rendered(Arc::new(artifact));
                self.last_rendered = Some(in_flight.key);
            }
            Err(RenderError::Diagram(message)) => {
                tracing::debug!("render session {} failed: {}", session, message);
                self.outcome = RenderOutcome::Failed(message);
                self.last_rendered = None;
            }
            Err(e) => {
                tracing::error!("renderer fault in session {}: {}", session, e);
            }
        }
    }

    pub fn on_theme_changed(&mut self, theme: Theme) -> Vec<Effect> {
        if theme == self.theme {
            return Vec::new();
        }
        tracing::debug!("theme changed: {} -> {}", self.theme, theme);
        self.theme = theme;

        let mut effects = vec![Effect::Reconfigure(theme)];
        self.cancel_timer(&mut effects);
        effects.extend(self.request_render(Deferred::Gated));
        effects
    }

    /// Reset zoom and re-render the current text now, even if unchanged
    pub fn force_refresh(&mut self) -> Vec<Effect> {
        self.zoom = ZoomFactor::default();
        let mut effects = Vec::new();
        self.cancel_timer(&mut effects);
        effects.extend(self.request_render(Deferred::Forced));
        effects
    }

    fn cancel_timer(&mut self, effects: &mut Vec<Effect>) {
        if self.timer.cancel() {
            effects.push(Effect::CancelTimer);
        }
    }

    fn request_render(&mut self, mode: Deferred) -> Option<Effect> {
        if self.text.trim().is_empty() {
            return None;
        }

        if self.pending_validation == Some(self.revisions.latest()) {
            tracing::debug!("render deferred until validation resolves");
            self.deferred = Some(match (self.deferred, mode) {
                (Some(Deferred::Forced), _) | (_, Deferred::Forced) => Deferred::Forced,
                _ => Deferred::Gated,
            });
            return None;
        }

        if self.validation.as_ref().is_some_and(|v| !v.is_valid) {
            tracing::debug!("skipping render of invalid text");
            return None;
        }

        let key = RenderKey {
            text: self.text.clone(),
            theme: self.theme,
        };

        if mode == Deferred::Gated {
            if self.in_flight.as_ref().is_some_and(|f| f.key == key) {
                tracing::debug!("skipping render, already in flight");
                return None;
            }
            if self.last_rendered.as_ref() == Some(&key) {
                // Shown artifact matches again, so no other session may land
                if let Some(superseded) = self.in_flight.take() {
                    self.sessions.advance();
                    tracing::debug!(
                        "render session {} superseded by shown artifact",
                        superseded.session
                    );
                }
                tracing::debug!("skipping render, already rendered");
                return None;
            }
        }

        let session = self.sessions.advance();
        tracing::debug!("starting render session {}", session);
        self.in_flight = Some(InFlight {
            session,
            key: key.clone(),
        });

        Some(Effect::Render {
            session,
            text: key.text,
            theme: key.theme,
        })
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const FIRST: &str = "graph TD\n A-->B";
    const SECOND: &str = "graph TD\n A-->B-->C";

    fn svg_artifact(theme: Theme) -> Artifact {
        Artifact::new(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#.to_string(),
            theme,
        )
    }

    fn invalid() -> ValidationResult {
        ValidationResult::from_messages(vec!["Line 2: Unterminated string".to_string()], vec![])
    }

    fn find_validate(effects: &[Effect]) -> Generation {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Validate { revision, .. } => Some(*revision),
                _ => None,
            })
            .expect("validate effect")
    }

    fn find_timer(effects: &[Effect]) -> Generation {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::ArmTimer { generation, .. } => Some(*generation),
                _ => None,
            })
            .expect("timer effect")
    }

    fn renders(effects: &[Effect]) -> Vec<(Generation, String, Theme)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Render { session, text, theme } => Some((*session, text.clone(), *theme)),
                _ => None,
            })
            .collect()
    }

    /// Type `text`, let validation resolve with `verdict`; returns the timer generation
    fn type_text(controller: &mut SyncController, text: &str, verdict: ValidationResult) -> Generation {
        let effects = controller.handle(Event::TextChanged {
            text: text.to_string(),
            origin: ChangeOrigin::User,
        });
        let revision = find_validate(&effects);
        let timer = find_timer(&effects);
        let after = controller.handle(Event::ValidationResolved {
            revision,
            result: Ok(verdict),
        });
        assert!(after.is_empty());
        timer
    }

    /// Type, validate, fire the timer; returns the render session
    fn type_and_render(controller: &mut SyncController, text: &str) -> Generation {
        let timer = type_text(controller, text, ValidationResult::valid());
        let effects = controller.handle(Event::TimerFired(timer));
        let rendered = renders(&effects);
        assert_eq!(rendered.len(), 1);
        rendered[0].0
    }

    #[test]
    fn test_empty_text_clears_everything() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        controller.handle(Event::RenderResolved {
            session,
            result: Ok(svg_artifact(Theme::Light)),
        });
        assert!(controller.current_render().artifact().is_some());

        let effects = controller.handle(Event::TextChanged {
            text: "  \n\t".to_string(),
            origin: ChangeOrigin::User,
        });

        assert!(effects.is_empty());
        assert_eq!(controller.current_validation(), None);
        assert_eq!(controller.current_render(), &RenderOutcome::Empty);
        assert!(!controller.is_render_pending());
    }

    #[test]
    fn test_clearing_cancels_pending_timer_and_render() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        let timer = type_text(&mut controller, SECOND, ValidationResult::valid());

        let effects = controller.handle(Event::TextChanged {
            text: String::new(),
            origin: ChangeOrigin::User,
        });
        assert_eq!(effects, vec![Effect::CancelTimer]);

        // Late arrivals must not repopulate the cleared state
        assert!(controller.handle(Event::TimerFired(timer)).is_empty());
        controller.handle(Event::RenderResolved {
            session,
            result: Ok(svg_artifact(Theme::Light)),
        });
        assert_eq!(controller.current_render(), &RenderOutcome::Empty);
        assert_eq!(controller.current_validation(), None);
    }

    #[test]
    fn test_rapid_edits_render_latest_text_once() {
        let mut controller = SyncController::default();
        let first_timer = type_text(&mut controller, FIRST, ValidationResult::valid());
        let second_timer = type_text(&mut controller, SECOND, ValidationResult::valid());

        assert!(controller.handle(Event::TimerFired(first_timer)).is_empty());
        let effects = controller.handle(Event::TimerFired(second_timer));
        let rendered = renders(&effects);

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].1, SECOND);
    }

    #[test]
    fn test_out_of_order_completion_keeps_newest() {
        let mut controller = SyncController::default();
        let first = type_and_render(&mut controller, FIRST);
        let second = type_and_render(&mut controller, SECOND);
        assert!(second > first);

        let newer = svg_artifact(Theme::Light);
        let newer_id = newer.id();
        controller.handle(Event::RenderResolved {
            session: second,
            result: Ok(newer),
        });
        controller.handle(Event::RenderResolved {
            session: first,
            result: Ok(svg_artifact(Theme::Light)),
        });

        let shown = controller.current_render().artifact().expect("artifact");
        assert_eq!(shown.id(), newer_id);
    }

    #[test]
    fn test_stale_failure_does_not_replace_newer_result() {
        let mut controller = SyncController::default();
        let first = type_and_render(&mut controller, FIRST);
        let second = type_and_render(&mut controller, SECOND);

        controller.handle(Event::RenderResolved {
            session: second,
            result: Ok(svg_artifact(Theme::Light)),
        });
        controller.handle(Event::RenderResolved {
            session: first,
            result: Err(RenderError::Diagram("Parse error".to_string())),
        });

        assert!(controller.current_render().artifact().is_some());
    }

    #[test]
    fn test_invalid_text_never_renders() {
        let mut controller = SyncController::default();
        let timer = type_text(&mut controller, "graph TD\n A[\"oops", invalid());

        assert!(controller.handle(Event::TimerFired(timer)).is_empty());
        assert!(!controller.is_render_pending());

        // Once fixed, exactly one render is scheduled
        let timer = type_text(&mut controller, FIRST, ValidationResult::valid());
        let rendered = renders(&controller.handle(Event::TimerFired(timer)));
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].1, FIRST);
    }

    #[test]
    fn test_timer_waits_for_pending_validation() {
        let mut controller = SyncController::default();
        let effects = controller.handle(Event::TextChanged {
            text: FIRST.to_string(),
            origin: ChangeOrigin::User,
        });
        let revision = find_validate(&effects);
        let timer = find_timer(&effects);

        assert!(controller.handle(Event::TimerFired(timer)).is_empty());
        assert!(controller.is_render_pending());

        let effects = controller.handle(Event::ValidationResolved {
            revision,
            result: Ok(ValidationResult::valid()),
        });
        assert_eq!(renders(&effects).len(), 1);
    }

    #[test]
    fn test_deferred_render_respects_invalid_verdict() {
        let mut controller = SyncController::default();
        let effects = controller.handle(Event::TextChanged {
            text: FIRST.to_string(),
            origin: ChangeOrigin::User,
        });
        let revision = find_validate(&effects);
        controller.handle(Event::TimerFired(find_timer(&effects)));

        let effects = controller.handle(Event::ValidationResolved {
            revision,
            result: Ok(invalid()),
        });
        assert!(effects.is_empty());
        assert!(!controller.is_render_pending());
    }

    #[test]
    fn test_stale_validation_is_discarded() {
        let mut controller = SyncController::default();
        let first = controller.handle(Event::TextChanged {
            text: FIRST.to_string(),
            origin: ChangeOrigin::User,
        });
        controller.handle(Event::TextChanged {
            text: SECOND.to_string(),
            origin: ChangeOrigin::User,
        });

        controller.handle(Event::ValidationResolved {
            revision: find_validate(&first),
            result: Ok(invalid()),
        });
        assert_eq!(controller.current_validation(), None);
    }

    #[test]
    fn test_validator_failure_keeps_previous_verdict() {
        let mut controller = SyncController::default();
        type_text(&mut controller, FIRST, ValidationResult::valid());

        let effects = controller.handle(Event::TextChanged {
            text: SECOND.to_string(),
            origin: ChangeOrigin::User,
        });
        controller.handle(Event::ValidationResolved {
            revision: find_validate(&effects),
            result: Err(ValidatorError::Unavailable("worker crashed".to_string())),
        });

        assert_eq!(controller.current_validation(), Some(&ValidationResult::valid()));

        // The pipeline keeps going: the timer still renders
        let rendered = renders(&controller.handle(Event::TimerFired(find_timer(&effects))));
        assert_eq!(rendered.len(), 1);
    }

    #[test]
    fn test_theme_toggle_issues_one_render_and_keeps_old_artifact() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        let old = svg_artifact(Theme::Light);
        let old_id = old.id();
        controller.handle(Event::RenderResolved {
            session,
            result: Ok(old),
        });

        let effects = controller.handle(Event::ThemeChanged(Theme::Dark));
        assert_eq!(effects[0], Effect::Reconfigure(Theme::Dark));
        let rendered = renders(&effects);
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].1, FIRST);
        assert_eq!(rendered[0].2, Theme::Dark);

        // Stale until replaced
        assert_eq!(controller.current_render().artifact().map(|a| a.id()), Some(old_id));

        controller.handle(Event::RenderResolved {
            session: rendered[0].0,
            result: Ok(svg_artifact(Theme::Dark)),
        });
        let shown = controller.current_render().artifact().expect("artifact");
        assert_eq!(shown.theme(), Theme::Dark);

        // Same theme again is a no-op
        assert!(controller.handle(Event::ThemeChanged(Theme::Dark)).is_empty());
    }

    #[test]
    fn test_already_rendered_text_is_skipped() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        controller.handle(Event::RenderResolved {
            session,
            result: Ok(svg_artifact(Theme::Light)),
        });

        let timer = type_text(&mut controller, FIRST, ValidationResult::valid());
        assert!(controller.handle(Event::TimerFired(timer)).is_empty());
    }

    #[test]
    fn test_reverting_to_shown_text_drops_other_session() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        let shown = svg_artifact(Theme::Light);
        let shown_id = shown.id();
        controller.handle(Event::RenderResolved {
            session,
            result: Ok(shown),
        });

        let second = type_and_render(&mut controller, SECOND);

        let timer = type_text(&mut controller, FIRST, ValidationResult::valid());
        assert!(renders(&controller.handle(Event::TimerFired(timer))).is_empty());
        assert!(!controller.is_render_pending());

        controller.handle(Event::RenderResolved {
            session: second,
            result: Ok(svg_artifact(Theme::Light)),
        });

        assert_eq!(controller.text(), FIRST);
        assert_eq!(controller.current_render().artifact().map(|a| a.id()), Some(shown_id));
        assert!(!controller.is_render_pending());

        // Moving on to the second text again renders it afresh
        let timer = type_text(&mut controller, SECOND, ValidationResult::valid());
        let rendered = renders(&controller.handle(Event::TimerFired(timer)));
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].1, SECOND);
    }

    #[test]
    fn test_theme_round_trip_while_rendering_keeps_matching_artifact() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        let light = svg_artifact(Theme::Light);
        let light_id = light.id();
        controller.handle(Event::RenderResolved {
            session,
            result: Ok(light),
        });

        let dark = renders(&controller.handle(Event::ThemeChanged(Theme::Dark)));
        assert_eq!(dark.len(), 1);

        let effects = controller.handle(Event::ThemeChanged(Theme::Light));
        assert_eq!(effects[0], Effect::Reconfigure(Theme::Light));
        assert!(renders(&effects).is_empty());

        controller.handle(Event::RenderResolved {
            session: dark[0].0,
            result: Ok(svg_artifact(Theme::Dark)),
        });

        let shown = controller.current_render().artifact().expect("artifact");
        assert_eq!(shown.id(), light_id);
        assert_eq!(shown.theme(), Theme::Light);
        assert!(!controller.is_render_pending());
    }

    #[test]
    fn test_in_flight_text_is_not_requested_twice() {
        let mut controller = SyncController::default();
        type_and_render(&mut controller, FIRST);

        let timer = type_text(&mut controller, FIRST, ValidationResult::valid());
        assert!(controller.handle(Event::TimerFired(timer)).is_empty());
    }

    #[test]
    fn test_render_failure_is_shown_and_text_can_retry() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        controller.handle(Event::RenderResolved {
            session,
            result: Err(RenderError::Diagram("Parse error on line 2".to_string())),
        });
        assert_eq!(
            controller.current_render(),
            &RenderOutcome::Failed("Parse error on line 2".to_string())
        );

        let effects = controller.force_refresh();
        assert_eq!(renders(&effects).len(), 1);
    }

    #[test]
    fn test_internal_fault_keeps_previous_outcome() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        controller.handle(Event::RenderResolved {
            session,
            result: Ok(svg_artifact(Theme::Light)),
        });

        let session = type_and_render(&mut controller, SECOND);
        controller.handle(Event::RenderResolved {
            session,
            result: Err(RenderError::Internal("engine panicked".to_string())),
        });

        assert!(controller.current_render().artifact().is_some());
        assert!(!controller.is_render_pending());
    }

    #[test]
    fn test_force_refresh_resets_zoom_and_bypasses_dedup() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        controller.handle(Event::RenderResolved {
            session,
            result: Ok(svg_artifact(Theme::Light)),
        });
        controller.handle(Event::ZoomIn);
        controller.handle(Event::ZoomIn);
        assert_eq!(controller.zoom().get(), 1.4);

        let effects = controller.handle(Event::ForceRefresh);
        assert_eq!(controller.zoom(), ZoomFactor::default());
        assert_eq!(renders(&effects).len(), 1);
    }

    #[test]
    fn test_zoom_keeps_artifact_identity() {
        let mut controller = SyncController::default();
        let session = type_and_render(&mut controller, FIRST);
        controller.handle(Event::RenderResolved {
            session,
            result: Ok(svg_artifact(Theme::Light)),
        });
        let before = controller.current_render().artifact().cloned().expect("artifact");

        assert!(controller.handle(Event::ZoomIn).is_empty());
        assert!(controller.handle(Event::ZoomOut).is_empty());
        assert!(controller.handle(Event::ZoomOut).is_empty());

        let after = controller.current_render().artifact().expect("artifact");
        assert!(Arc::ptr_eq(&before, after));
    }

    #[test]
    fn test_programmatic_change_renders_without_debounce() {
        let mut controller = SyncController::new(
            ControllerConfig::default().with_debounce(Duration::from_secs(5)),
        );
        let effects = controller.handle(Event::TextChanged {
            text: FIRST.to_string(),
            origin: ChangeOrigin::Programmatic,
        });
        assert!(!effects.iter().any(|e| matches!(e, Effect::ArmTimer { .. })));

        let effects = controller.handle(Event::ValidationResolved {
            revision: find_validate(&effects),
            result: Ok(ValidationResult::valid()),
        });
        assert_eq!(renders(&effects).len(), 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut controller = SyncController::new(ControllerConfig::default().with_theme(Theme::Dark));
        type_text(&mut controller, FIRST, ValidationResult::valid());

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.text, FIRST);
        assert_eq!(snapshot.theme, Theme::Dark);
        assert!(snapshot.render_pending);
        assert!(!snapshot.is_invalid());
    }
}
