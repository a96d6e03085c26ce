//! Dashboard session state
//!
//! [`Dashboard`] owns everything the lead dashboard keeps between renders:
//! the lead store, the list filters, the loading flag and the lead form.
//! Presentation code reads [`Dashboard::snapshot`] and reports user intents
//! back through the `*_requested` methods.

use crate::{error::SourceError, source::LeadSource, wire};
use leadboard_core::{
    ChartBucket, FilterCriteria, Lead, LeadId, LeadPatch, LeadStatus, LeadStore, Metrics,
    StatusFilter, chart_data, metrics,
};
use serde::Serialize;
use tracing::{debug, error, info};

/// Result of [`Dashboard::initialize`]
#[derive(Debug)]
pub enum LoadOutcome {
    /// The store now holds `count` leads from the source
    Loaded {
        /// Number of leads loaded
        count: usize,
    },
    /// The load failed and the store was emptied
    Degraded {
        /// What went wrong
        error: SourceError,
    },
}

impl LoadOutcome {
    /// Whether the source answered with data
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Toast shown after a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Short headline
    pub title: &'static str,
    /// One-sentence body
    pub description: &'static str,
}

impl Notice {
    const CREATED: Self = Self {
        title: "Lead created!",
        description: "The new lead was added to the CRM.",
    };

    const UPDATED: Self = Self {
        title: "Lead updated!",
        description: "The lead's details were updated.",
    };
}

/// Result of [`Dashboard::save_requested`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No lead was selected, a new one was added at the front
    Created(Lead),
    /// The selected lead was overwritten
    Updated(Lead),
    /// The selected lead no longer exists; nothing changed
    Missed(LeadId),
}

impl SaveOutcome {
    /// The lead as stored after the save
    #[must_use]
    pub const fn lead(&self) -> Option<&Lead> {
        match self {
            Self::Created(lead) | Self::Updated(lead) => Some(lead),
            Self::Missed(_) => None,
        }
    }

    /// Toast to show, if any
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        match self {
            Self::Created(_) => Some(Notice::CREATED),
            Self::Updated(_) => Some(Notice::UPDATED),
            Self::Missed(_) => None,
        }
    }
}

/// State of the lead form dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    /// Lead being edited, `None` when creating
    pub editing: Option<LeadId>,
    /// Initial field values
    pub values: LeadPatch,
}

/// Everything a render needs, computed in one go
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Header badge count, unfiltered
    pub lead_count: usize,
    /// Initial load still in flight
    pub loading: bool,
    /// Metric cards
    pub metrics: Metrics,
    /// Status bar chart
    pub chart: Vec<ChartBucket>,
    /// Active list filters
    pub criteria: FilterCriteria,
    /// Lead rows passing the filters
    pub rows: Vec<Lead>,
    /// Show the "no leads found" placeholder
    pub no_results: bool,
    /// Lead form, when open
    pub form: Option<FormView>,
}

/// One dashboard session
#[derive(Debug)]
pub struct Dashboard {
    store: LeadStore,
    criteria: FilterCriteria,
    loading: bool,
    selected: Option<LeadId>,
    form_open: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Fresh session: no leads yet, loading until [`Dashboard::initialize`]
    /// completes
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: LeadStore::new(),
            criteria: FilterCriteria::default(),
            loading: true,
            selected: None,
            form_open: false,
        }
    }

    /// Session over an already populated store, not loading
    #[must_use]
    pub fn with_store(store: LeadStore) -> Self {
        Self {
            store,
            loading: false,
            ..Self::new()
        }
    }

    /// Fill the store from `source`.
    ///
    /// Any failure leaves an empty store; the error is logged and handed
    /// back in [`LoadOutcome::Degraded`] for callers that care. Calling this
    /// again replaces the store with whatever the latest call returned.
    pub async fn initialize<S: LeadSource + ?Sized>(&mut self, source: &S) -> LoadOutcome {
        self.loading = true;

        let outcome = match source.fetch_leads().await {
            Ok(records) => {
                let leads = wire::into_leads(records);
                let count = leads.len();
                let reissued = self.store.replace_all(leads);
                info!(source = source.name(), count, reissued, "Leads loaded");
                LoadOutcome::Loaded { count }
            }
            Err(error) => {
                error!(source = source.name(), %error, "Failed to load leads");
                self.store.clear();
                LoadOutcome::Degraded { error }
            }
        };

        self.loading = false;
        outcome
    }

    /// Initial load still in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &LeadStore {
        &self.store
    }

    /// All leads in store order
    #[must_use]
    pub fn leads(&self) -> &[Lead] {
        self.store.list()
    }

    /// Active list filters
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Search box changed
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    /// Status selector changed
    pub fn set_status_filter(&mut self, status: StatusFilter) {
        debug!(%status, "Status filter changed");
        self.criteria.status = status;
    }

    /// Leads passing the active filters, in store order
    #[must_use]
    pub fn filtered(&self) -> Vec<Lead> {
        leadboard_core::filter(
            self.store.list(),
            &self.criteria.search_term,
            self.criteria.status,
        )
    }

    /// Per-status counts over every lead
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        metrics(self.store.list())
    }

    /// Chart buckets over every lead
    #[must_use]
    pub fn chart_data(&self) -> Vec<ChartBucket> {
        chart_data(self.store.list())
    }

    /// Lead currently selected for editing
    #[must_use]
    pub fn selected(&self) -> Option<&Lead> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    /// Whether the lead form is showing
    #[must_use]
    pub const fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Edit button pressed on a lead row or card.
    ///
    /// Returns `false` and changes nothing when the id is unknown.
    pub fn edit_requested(&mut self, id: &LeadId) -> bool {
        if !self.store.contains(id) {
            debug!(%id, "Edit requested for unknown lead");
            return false;
        }
        self.selected = Some(id.clone());
        self.form_open = true;
        true
    }

    /// "New lead" button pressed
    pub fn new_lead_requested(&mut self) {
        self.selected = None;
        self.form_open = true;
    }

    /// Form dismissed without saving
    pub const fn close_form(&mut self) {
        self.form_open = false;
    }

    /// Values the form opens with: the selected lead, or a blank `New` lead
    #[must_use]
    pub fn form_values(&self) -> LeadPatch {
        self.selected().map_or_else(
            || {
                LeadPatch::new()
                    .with_name("")
                    .with_phone("")
                    .with_status(LeadStatus::New)
                    .with_last_contact("")
                    .with_scheduled_at("")
            },
            LeadPatch::from,
        )
    }

    /// Form submitted: update the selected lead, or create one when nothing
    /// is selected. The selection is cleared and the form closed either way.
    pub fn save_requested(&mut self, patch: LeadPatch) -> SaveOutcome {
        let outcome = match self.selected.take() {
            Some(id) => match self.store.update(&id, patch) {
                Ok(lead) => SaveOutcome::Updated(lead.clone()),
                Err(error) => {
                    debug!(%id, %error, "Save for a lead that is gone, ignoring");
                    SaveOutcome::Missed(id)
                }
            },
            None => SaveOutcome::Created(self.store.create(patch)),
        };

        self.form_open = false;
        outcome
    }

    /// Display bundle for the current state
    #[must_use]
    pub fn snapshot(&self) -> DashboardView {
        let rows = self.filtered();
        let form = self.form_open.then(|| FormView {
            editing: self.selected().map(|lead| lead.id.clone()),
            values: self.form_values(),
        });

        DashboardView {
            lead_count: self.store.len(),
            loading: self.loading,
            metrics: self.metrics(),
            chart: self.chart_data(),
            criteria: self.criteria.clone(),
            no_results: rows.is_empty(),
            rows,
            form,
        }
    }
}
