//! Screen state management for the onboarding screen.
//!
//! [`App`] is the single owner of the active tab, the registration draft, the
//! per-field touched flags and the submission state. The view layer reads from
//! it and mutates it only through its operations.

use super::animation::EntranceAnimation;
use super::pipeline::{Outcome, PendingSubmission, SubmissionPipeline};
use crate::domain::{
    Field, FieldErrors, RegistrationDraft, SubmissionState, Tab, Touched, is_submit_eligible,
    validate,
};
use std::fmt;
use std::time::{Duration, Instant};

/// Acknowledgment shown while the submission is in the `Succeeded` state.
pub const SUCCESS_MESSAGE: &str = "Registration successful! Welcome to EduBridge.";

/// Side effects requested from the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    /// Scroll the screen so the given tab is in view.
    ScrollTo(Tab),
}

/// Social sign-in providers offered on the home view. Not wired to any backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    Apple,
    Facebook,
}

impl SocialProvider {
    pub const ALL: [SocialProvider; 3] =
        [SocialProvider::Google, SocialProvider::Apple, SocialProvider::Facebook];

    pub fn label(self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Apple => "Apple",
            SocialProvider::Facebook => "Facebook",
        }
    }
}

/// What a call to [`App::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// The draft was eligible and the registration call was started.
    Started,
    /// The draft has errors; every field is now touched so they all show.
    Rejected,
    /// A submission is already in flight; nothing was started.
    AlreadyPending,
    /// The success acknowledgment is showing; nothing was started.
    Acknowledging,
}

/// Timing knobs for one screen instance.
#[derive(Debug, Clone, Copy)]
pub struct ScreenSettings {
    /// How long the success acknowledgment stays before the form resets.
    pub dwell: Duration,
    /// Length of the home view entrance animation.
    pub entrance: Duration,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            dwell: Duration::from_secs(3),
            entrance: Duration::from_millis(1000),
        }
    }
}

/// Onboarding screen state.
///
/// Constructed fresh per mount. Dropping it tears the screen down: the dwell
/// timer goes with it and the outcome of any in-flight call is discarded.
///
/// # Examples
///
/// ```
/// use edubridge::application::{App, RegistrationGateway, ScreenSettings, SubmissionPipeline};
/// use edubridge::domain::{RegistrationDraft, SubmissionResult, Tab};
/// use std::sync::Arc;
/// use std::time::Instant;
///
/// struct Accept;
/// impl RegistrationGateway for Accept {
///     fn register(&self, _draft: &RegistrationDraft) -> SubmissionResult<()> {
///         Ok(())
///     }
/// }
///
/// let pipeline = SubmissionPipeline::new(Arc::new(Accept));
/// let mut app = App::new(pipeline, ScreenSettings::default(), Instant::now());
/// assert_eq!(app.tab(), Tab::Home);
///
/// app.get_started();
/// assert_eq!(app.tab(), Tab::Register);
/// ```
pub struct App {
    tab: Tab,
    draft: RegistrationDraft,
    touched: Touched,
    errors: FieldErrors,
    submission: SubmissionState,
    focused: Field,
    notice: Option<String>,
    entrance: EntranceAnimation,
    settings: ScreenSettings,
    pipeline: SubmissionPipeline,
    pending: Option<PendingSubmission>,
    reset_deadline: Option<Instant>,
    effects: Vec<ViewEffect>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("tab", &self.tab)
            .field("draft", &self.draft)
            .field("touched", &self.touched)
            .field("errors", &self.errors)
            .field("submission", &self.submission)
            .field("focused", &self.focused)
            .field("reset_deadline", &self.reset_deadline)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(pipeline: SubmissionPipeline, settings: ScreenSettings, now: Instant) -> Self {
        let draft = RegistrationDraft::default();
        let errors = validate(&draft);
        Self {
            tab: Tab::Home,
            draft,
            touched: Touched::default(),
            errors,
            submission: SubmissionState::Idle,
            focused: Field::Name,
            notice: None,
            entrance: EntranceAnimation::new(now, settings.entrance),
            settings,
            pipeline,
            pending: None,
            reset_deadline: None,
            effects: Vec::new(),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn touched(&self) -> &Touched {
        &self.touched
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn focused(&self) -> Field {
        self.focused
    }

    /// Transient informational message, e.g. from a social sign-in stub.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn entrance(&self) -> &EntranceAnimation {
        &self.entrance
    }

    /// The error to render under `field`, if it has been touched.
    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        self.errors.visible(field, self.touched.is_touched(field))
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self.submission, SubmissionState::Idle | SubmissionState::Failed(_))
            && is_submit_eligible(&self.draft, &self.errors)
    }

    /// Drains the side effects queued for the view layer.
    pub fn take_effects(&mut self) -> Vec<ViewEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Sets a field by its wire name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        match Field::from_name(name) {
            Some(field) => self.set_field_value(field, value),
            None => tracing::debug!(name, "ignoring update for unknown field"),
        }
    }

    pub fn set_field_value(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        self.touched.mark(field);
        self.errors = validate(&self.draft);
        tracing::debug!(%field, valid = self.errors.get(field).is_none(), "field updated");
    }

    /// Appends a character to the focused field.
    pub fn type_char(&mut self, c: char) {
        let mut value = self.draft.get(self.focused).to_string();
        value.push(c);
        self.set_field_value(self.focused, value);
    }

    /// Removes the last character of the focused field.
    pub fn backspace(&mut self) {
        let mut value = self.draft.get(self.focused).to_string();
        if value.pop().is_some() {
            self.set_field_value(self.focused, value);
        }
    }

    /// Appends pasted text to the focused field, dropping line breaks.
    pub fn paste(&mut self, text: &str) {
        let cleaned: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if cleaned.is_empty() {
            return;
        }
        let mut value = self.draft.get(self.focused).to_string();
        value.push_str(&cleaned);
        self.set_field_value(self.focused, value);
    }

    pub fn focus(&mut self, field: Field) {
        self.focused = field;
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_previous(&mut self) {
        self.focused = self.focused.previous();
    }

    /// Switches tabs. Returns whether the tab actually changed.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.tab == tab {
            return false;
        }
        tracing::debug!(from = ?self.tab, to = ?tab, "tab selected");
        self.tab = tab;
        self.notice = None;
        self.effects.push(ViewEffect::ScrollTo(tab));
        true
    }

    /// The home view's "Get Started" action.
    pub fn get_started(&mut self) {
        self.select_tab(Tab::Register);
    }

    /// Social sign-in is a stub: it only reports that it is unavailable.
    pub fn social_login(&mut self, provider: SocialProvider) {
        tracing::info!(provider = provider.label(), "social sign-in requested");
        self.notice = Some(format!("{} sign-in is not available yet", provider.label()));
    }

    /// Submits the draft if it is eligible and nothing is in flight.
    pub fn submit(&mut self) -> SubmitAttempt {
        match self.submission {
            SubmissionState::Pending => {
                tracing::debug!("submit ignored, registration already in flight");
                return SubmitAttempt::AlreadyPending;
            }
            SubmissionState::Succeeded => return SubmitAttempt::Acknowledging,
            SubmissionState::Idle | SubmissionState::Failed(_) => {}
        }

        self.errors = validate(&self.draft);
        if !is_submit_eligible(&self.draft, &self.errors) {
            self.touched.mark_all();
            tracing::debug!(errors = self.errors.len(), "submit rejected by validation");
            return SubmitAttempt::Rejected;
        }

        tracing::info!("registration submitted");
        self.submission = SubmissionState::Pending;
        self.notice = None;
        self.pending = Some(self.pipeline.start(self.draft.clone()));
        SubmitAttempt::Started
    }

    /// Polls the in-flight call and fires the acknowledgment timer. Call once per tick.
    pub fn update(&mut self, now: Instant) {
        if let Some(outcome) = self.pending.as_ref().and_then(PendingSubmission::try_outcome) {
            self.pending = None;
            self.complete(outcome, now);
        }

        if self.reset_deadline.is_some_and(|deadline| now >= deadline) {
            tracing::debug!("acknowledgment window elapsed");
            self.reset();
        }
    }

    fn complete(&mut self, outcome: Outcome, now: Instant) {
        match outcome {
            Outcome::Success => {
                self.submission = SubmissionState::Succeeded;
                self.reset_deadline = Some(now + self.settings.dwell);
            }
            Outcome::Failure(reason) => {
                self.submission = SubmissionState::Failed(reason);
            }
        }
    }

    /// Clears the draft, touched flags and submission state.
    ///
    /// Ignored while a call is in flight; only its completion leaves `Pending`.
    pub fn reset(&mut self) {
        if self.submission.is_pending() {
            tracing::debug!("reset ignored, registration in flight");
            return;
        }
        self.draft.clear();
        self.touched.clear();
        self.errors = validate(&self.draft);
        self.submission = SubmissionState::Idle;
        self.reset_deadline = None;
        self.focused = Field::Name;
    }

    /// Dismisses a submission error, keeping the draft for correction.
    pub fn dismiss_error(&mut self) {
        if matches!(self.submission, SubmissionState::Failed(_)) {
            self.submission = SubmissionState::Idle;
        }
    }
}
