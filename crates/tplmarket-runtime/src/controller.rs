use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use tplmarket_engine::{RevealWindow, SavedSetReconciler, Toggle, apply};
use tplmarket_store::{LocalCache, RemoteStore};
use tplmarket_types::{FilterSelection, SavedSet, SortKey, Template};

use crate::catalog::TemplateRepository;
use crate::session::SessionHub;
use crate::sync::{SyncEvent, SyncTask, SyncWorker};
use crate::Result;

/// Outcome of `init`: either the controller is usable or the caller should
/// redirect to the entry point. Session absence is a navigation signal, not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Ready,
    Redirect,
}

/// Outcome of a toggle attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Toggled(Toggle),
    Redirect,
}

/// The template list state machine: catalog, working saved set, filter
/// selection and reveal window, plus the background remote sync.
///
/// Toggle commits are two-phase: membership and the optimistic saved-count
/// edit land in memory and in the local cache synchronously; the remote
/// phase is fire-and-forget through the sync worker and its failure only
/// ever produces a warning, never a rollback.
pub struct TemplateListController {
    repository: TemplateRepository,
    cache: LocalCache,
    session: Arc<SessionHub>,
    sync: SyncWorker,
    catalog: Vec<Template>,
    reconciler: SavedSetReconciler,
    selection: FilterSelection,
    window: RevealWindow,
    warnings: Vec<String>,
}

impl TemplateListController {
    pub fn new(
        repository: TemplateRepository,
        store: Arc<dyn RemoteStore>,
        cache: LocalCache,
        session: Arc<SessionHub>,
    ) -> Self {
        Self {
            repository,
            cache,
            session,
            sync: SyncWorker::spawn(store),
            catalog: Vec::new(),
            reconciler: SavedSetReconciler::new(),
            selection: FilterSelection::new(),
            window: RevealWindow::new(),
            warnings: Vec::new(),
        }
    }

    /// Loads the catalog and seeds the saved set: local cache first; the
    /// remote copy is only consulted when the cache came up empty. A failed
    /// remote saved-set read degrades to local-only with a warning.
    pub fn init(&mut self) -> Result<InitOutcome> {
        let Some(session) = self.session.get() else {
            return Ok(InitOutcome::Redirect);
        };

        self.catalog = self.repository.load()?;
        self.reconciler.seed_local(self.cache.saved_set());

        if self.reconciler.working_set().is_empty() {
            match self.repository.remote_saved_set(&session.user_id) {
                Ok(remote) => self.reconciler.seed_remote(remote),
                Err(err) => {
                    self.warnings.push(format!("saved templates unavailable: {}", err));
                    self.reconciler.seed_remote(SavedSet::new());
                }
            }
        } else {
            // Replace-wins: a non-empty cache is authoritative, the remote
            // read is skipped entirely.
            self.reconciler.seed_remote(SavedSet::new());
        }

        Ok(InitOutcome::Ready)
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn saved_set(&self) -> &SavedSet {
        self.reconciler.working_set()
    }

    pub fn is_saved(&self, template_id: &str) -> bool {
        self.reconciler.working_set().contains(template_id)
    }

    // Any selection change invalidates the reveal window.

    pub fn toggle_industry(&mut self, industry: impl Into<String>) {
        self.selection.toggle_industry(industry);
        self.window.reset();
    }

    pub fn toggle_format(&mut self, format: impl Into<String>) {
        self.selection.toggle_format(format);
        self.window.reset();
    }

    pub fn toggle_language(&mut self, language: impl Into<String>) {
        self.selection.toggle_language(language);
        self.window.reset();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.selection.set_sort(sort);
        self.window.reset();
    }

    /// The full filtered and sorted list.
    pub fn derived(&self) -> Vec<Template> {
        apply(&self.catalog, &self.selection, self.reconciler.working_set())
    }

    /// The currently revealed prefix of the derived list.
    pub fn visible(&self) -> Vec<Template> {
        let derived = self.derived();
        self.window.visible(&derived).to_vec()
    }

    pub fn visible_count(&self) -> usize {
        self.window.visible_count()
    }

    pub fn has_more(&self) -> bool {
        self.window.has_more(self.derived().len())
    }

    pub fn load_more(&mut self) {
        self.window.load_more();
    }

    pub fn sentinel_visible(&mut self, now: DateTime<Utc>) -> bool {
        self.window.sentinel_visible(now)
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        self.window.tick(now)
    }

    /// Flips saved membership for `template_id`.
    ///
    /// Phase one (synchronous): working set, the optimistic catalog count
    /// edit, and the local cache file. Phase two (asynchronous): the sync
    /// worker upserts the user row and the template count. Local state is
    /// authoritative from phase one onward.
    pub fn toggle(&mut self, template_id: &str) -> ToggleOutcome {
        let Some(session) = self.session.get() else {
            return ToggleOutcome::Redirect;
        };

        let toggle = self.reconciler.toggle(template_id);

        let mut saved_count = 0;
        if let Some(template) = self.catalog.iter_mut().find(|t| t.id == template_id) {
            if toggle.saved {
                template.increment_saved();
            } else {
                template.decrement_saved();
            }
            saved_count = template.saved_count;
        }

        if let Err(err) = self.cache.write_saved_set(self.reconciler.working_set()) {
            self.warnings.push(format!("local cache write failed: {}", err));
        }

        let accepted = self.sync.dispatch(SyncTask {
            user_id: session.user_id,
            saved: self.reconciler.working_set().clone(),
            template_id: template_id.to_string(),
            saved_count,
        });
        if !accepted {
            self.warnings.push("remote sync worker is gone; changes kept locally".to_string());
        }

        ToggleOutcome::Toggled(toggle)
    }

    /// Drains finished sync outcomes, converting failures into warnings.
    pub fn pump_sync_events(&mut self) -> Vec<SyncEvent> {
        let events = self.sync.drain_events();
        self.record_failures(&events);
        events
    }

    /// Blocks for the next sync outcome, for callers that need to observe
    /// the remote phase (the CLI does, a UI loop would poll instead).
    pub fn await_sync(&mut self, timeout: Duration) -> Option<SyncEvent> {
        let event = self.sync.next_event(timeout)?;
        self.record_failures(std::slice::from_ref(&event));
        Some(event)
    }

    /// Soft warnings accumulated so far: remote sync failures, cache write
    /// failures, saved-set fetch degradation.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    pub fn shutdown(&mut self) {
        self.sync.shutdown();
    }

    fn record_failures(&mut self, events: &[SyncEvent]) {
        for event in events {
            if let SyncEvent::Failed { template_id, message } = event {
                self.warnings.push(format!(
                    "failed to sync save state for {}: {}",
                    template_id, message
                ));
            }
        }
    }
}
