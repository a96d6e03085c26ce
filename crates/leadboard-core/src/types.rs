//! Core data types for the leadboard dashboard

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use validator::Validate;

/// Session-unique lead identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(String);

impl LeadId {
    /// Create an id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LeadId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LeadId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Pipeline stage of a lead
///
/// The set is closed: a lead is always in exactly one of these five stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeadStatus {
    /// Freshly captured, not contacted yet
    #[default]
    New,
    /// First outreach message sent
    OutreachSent,
    /// Waiting on a follow up
    FollowUp,
    /// Not a fit
    Disqualified,
    /// Meeting booked
    Scheduled,
}

impl LeadStatus {
    /// All statuses in display order (metric cards and chart bars)
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::OutreachSent,
        Self::FollowUp,
        Self::Disqualified,
        Self::Scheduled,
    ];

    /// Canonical display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::OutreachSent => "Outreach Sent",
            Self::FollowUp => "Follow Up",
            Self::Disqualified => "Disqualified",
            Self::Scheduled => "Scheduled",
        }
    }

    /// Stable key used by presentation code to pick theme colours
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::OutreachSent => "outreach",
            Self::FollowUp => "follow-up",
            Self::Disqualified => "disqualified",
            Self::Scheduled => "scheduled",
        }
    }

    /// Position of this status in [`LeadStatus::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::New => 0,
            Self::OutreachSent => 1,
            Self::FollowUp => 2,
            Self::Disqualified => 3,
            Self::Scheduled => 4,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeadStatus {
    type Err = crate::Error;

    /// Accepts the canonical labels and the labels the lead webhook emits,
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" | "novo" => Ok(Self::New),
            "outreach sent" | "abordagem enviada" => Ok(Self::OutreachSent),
            "follow up" => Ok(Self::FollowUp),
            "disqualified" | "desqualificado" => Ok(Self::Disqualified),
            "scheduled" | "agendado" => Ok(Self::Scheduled),
            _ => Err(crate::Error::Validation {
                field: "status".to_string(),
                message: format!("unknown lead status '{s}'"),
            }),
        }
    }
}

impl Serialize for LeadStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for LeadStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A prospective customer tracked through the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Session-unique identifier
    pub id: LeadId,

    /// Display name
    pub name: String,

    /// Contact phone, free format
    pub phone: String,

    /// Current pipeline stage
    pub status: LeadStatus,

    /// Last contact note, display only
    pub last_contact: Option<String>,

    /// Scheduled meeting note, display only
    pub scheduled_at: Option<String>,
}

impl Lead {
    /// Create a lead with no optional fields set
    pub fn new(
        id: impl Into<LeadId>,
        name: impl Into<String>,
        phone: impl Into<String>,
        status: LeadStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            status,
            last_contact: None,
            scheduled_at: None,
        }
    }

    /// Build a lead from a patch, substituting defaults for missing fields
    #[must_use]
    pub fn from_patch(id: LeadId, patch: LeadPatch) -> Self {
        Self {
            id,
            name: patch.name.unwrap_or_default(),
            phone: patch.phone.unwrap_or_default(),
            status: patch.status.unwrap_or_default(),
            last_contact: patch.last_contact.and_then(non_blank),
            scheduled_at: patch.scheduled_at.and_then(non_blank),
        }
    }

    /// Shallow merge: every field present in `patch` overwrites ours.
    /// An empty optional field in the patch clears the stored value.
    pub fn apply(&mut self, patch: LeadPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(last_contact) = patch.last_contact {
            self.last_contact = non_blank(last_contact);
        }
        if let Some(scheduled_at) = patch.scheduled_at {
            self.scheduled_at = non_blank(scheduled_at);
        }
    }
}

/// Partial lead fields as submitted by the lead form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadPatch {
    /// New display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    /// New contact phone
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: Option<String>,

    /// New pipeline stage
    pub status: Option<LeadStatus>,

    /// New last contact note (empty clears it)
    pub last_contact: Option<String>,

    /// New scheduled meeting note (empty clears it)
    pub scheduled_at: Option<String>,
}

impl LeadPatch {
    /// Empty patch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the phone
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the status
    #[must_use]
    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the last contact note
    #[must_use]
    pub fn with_last_contact(mut self, last_contact: impl Into<String>) -> Self {
        self.last_contact = Some(last_contact.into());
        self
    }

    /// Set the scheduled meeting note
    #[must_use]
    pub fn with_scheduled_at(mut self, scheduled_at: impl Into<String>) -> Self {
        self.scheduled_at = Some(scheduled_at.into());
        self
    }

    /// Form-side check that required fields are filled in.
    ///
    /// Advisory only: the store accepts patches that fail it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] naming the first offending field.
    pub fn check(&self) -> crate::Result<()> {
        self.validate().map_err(crate::Error::from)
    }
}

impl From<&Lead> for LeadPatch {
    /// Full-field patch, used to prefill the edit form
    fn from(lead: &Lead) -> Self {
        Self {
            name: Some(lead.name.clone()),
            phone: Some(lead.phone.clone()),
            status: Some(lead.status),
            last_contact: lead.last_contact.clone(),
            scheduled_at: lead.scheduled_at.clone(),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
