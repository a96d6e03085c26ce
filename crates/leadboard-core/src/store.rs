//! In-session lead store
//!
//! The store is the authoritative, ordered collection of leads for one
//! dashboard session. It is filled once from the remote source and then only
//! changed through [`LeadStore::create`] and [`LeadStore::update`]; nothing is
//! written back to the remote side and leads are never removed.

use crate::{
    Error, Result,
    types::{Lead, LeadId, LeadPatch},
};
use chrono::Utc;
use std::{collections::HashSet, fmt};
use tracing::{debug, warn};

/// Build a session id from a unix timestamp in milliseconds and a sequence
/// number, e.g. `1736700000000-3`.
#[must_use]
pub fn session_id(millis: i64, sequence: impl fmt::Display) -> LeadId {
    LeadId::new(format!("{millis}-{sequence}"))
}

/// Ordered collection of leads, newest first after local creation
#[derive(Debug, Clone, Default)]
pub struct LeadStore {
    leads: Vec<Lead>,
    issued: u64,
}

impl LeadStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `leads`, see [`LeadStore::replace_all`]
    #[must_use]
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        let mut store = Self::new();
        store.replace_all(leads);
        store
    }

    /// Current leads in store order
    #[must_use]
    pub fn list(&self) -> &[Lead] {
        &self.leads
    }

    /// Look up a lead by id
    #[must_use]
    pub fn get(&self, id: &LeadId) -> Option<&Lead> {
        self.leads.iter().find(|lead| &lead.id == id)
    }

    /// Whether a lead with this id exists
    #[must_use]
    pub fn contains(&self, id: &LeadId) -> bool {
        self.get(id).is_some()
    }

    /// Number of leads
    #[must_use]
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    /// Whether the store holds no leads
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Replace the whole collection, keeping the given order.
    ///
    /// A record whose id repeats an earlier one is kept under a freshly
    /// issued session id. Returns how many ids were reissued.
    pub fn replace_all(&mut self, leads: Vec<Lead>) -> usize {
        let mut taken: HashSet<LeadId> = leads.iter().map(|lead| lead.id.clone()).collect();
        let mut seen = HashSet::with_capacity(leads.len());
        let mut kept = Vec::with_capacity(leads.len());
        let mut reissued = 0;

        for mut lead in leads {
            if !seen.insert(lead.id.clone()) {
                let fresh = fresh_id(&mut self.issued, |id| taken.contains(id));
                warn!(duplicate = %lead.id, reissued = %fresh, "Duplicate lead id, reissuing");
                taken.insert(fresh.clone());
                seen.insert(fresh.clone());
                lead.id = fresh;
                reissued += 1;
            }
            kept.push(lead);
        }

        self.leads = kept;
        reissued
    }

    /// Drop every lead
    pub fn clear(&mut self) {
        self.leads.clear();
    }

    /// Add a lead built from `patch` at the front of the store.
    ///
    /// Missing fields get defaults (`New` status, empty name and phone, no
    /// optional notes). The id is always freshly issued.
    pub fn create(&mut self, patch: LeadPatch) -> Lead {
        let leads = &self.leads;
        let id = fresh_id(&mut self.issued, |id| leads.iter().any(|lead| &lead.id == id));
        let lead = Lead::from_patch(id, patch);

        debug!(id = %lead.id, status = %lead.status, "Lead created");
        self.leads.insert(0, lead.clone());
        lead
    }

    /// Merge `patch` over the lead with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LeadNotFound`] when no lead has this id; the store is
    /// left untouched in that case.
    pub fn update(&mut self, id: &LeadId, patch: LeadPatch) -> Result<&Lead> {
        let lead = self
            .leads
            .iter_mut()
            .find(|lead| &lead.id == id)
            .ok_or_else(|| Error::LeadNotFound { id: id.clone() })?;

        lead.apply(patch);
        debug!(id = %lead.id, status = %lead.status, "Lead updated");
        Ok(lead)
    }
}

fn fresh_id(issued: &mut u64, is_taken: impl Fn(&LeadId) -> bool) -> LeadId {
    let millis = Utc::now().timestamp_millis();
    loop {
        let candidate = session_id(millis, *issued);
        *issued += 1;
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}
