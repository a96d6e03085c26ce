//! Loosely-typed lead records as served by the lead webhook
//!
//! The webhook speaks the source locale (`nome`, `telefone`, ...) but some
//! deployments send the English keys, so both are accepted. Every field may
//! be missing or `null`.

use crate::error::SourceResult;
use chrono::Utc;
use leadboard_core::{Lead, LeadId, LeadStatus, store::session_id};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// One record of the webhook payload
///
/// Source-locale and English keys are separate fields so a record carrying
/// both still decodes; the source-locale value wins when both are filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLead {
    /// Upstream id; strings and numbers are accepted
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,

    /// Display name
    #[serde(default, rename = "nome", deserialize_with = "lenient_text")]
    pub name: Option<String>,

    /// Display name, English key
    #[serde(default, rename = "name", deserialize_with = "lenient_text")]
    pub name_en: Option<String>,

    /// Contact phone
    #[serde(default, rename = "telefone", deserialize_with = "lenient_text")]
    pub phone: Option<String>,

    /// Contact phone, English key
    #[serde(default, rename = "phone", deserialize_with = "lenient_text")]
    pub phone_en: Option<String>,

    /// Raw status label
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,

    /// Last contact note
    #[serde(default, rename = "ultimo_contato", deserialize_with = "lenient_text")]
    pub last_contact: Option<String>,

    /// Last contact note, English key
    #[serde(default, rename = "lastContact", deserialize_with = "lenient_text")]
    pub last_contact_en: Option<String>,

    /// Scheduled meeting note
    #[serde(default, rename = "data_agendamento", deserialize_with = "lenient_text")]
    pub scheduled_at: Option<String>,

    /// Scheduled meeting note, English key
    #[serde(default, rename = "scheduledAt", deserialize_with = "lenient_text")]
    pub scheduled_at_en: Option<String>,
}

impl RemoteLead {
    /// Map into the canonical lead shape.
    ///
    /// A missing id becomes `<millis>-<index>`; missing name and phone
    /// become empty strings; a missing or unrecognised status becomes `New`.
    #[must_use]
    pub fn into_lead(self, index: usize, millis: i64) -> Lead {
        let id = self
            .id
            .map_or_else(|| session_id(millis, index), LeadId::from);
        let status = self.status.as_deref().map_or(LeadStatus::New, |raw| {
            if raw.trim().is_empty() {
                return LeadStatus::New;
            }
            raw.parse().unwrap_or_else(|_| {
                warn!(id = %id, status = raw, "Unknown lead status, treating as New");
                LeadStatus::New
            })
        });

        let mut lead = Lead::new(
            id,
            first_filled(self.name, self.name_en).unwrap_or_default(),
            first_filled(self.phone, self.phone_en).unwrap_or_default(),
            status,
        );
        lead.last_contact = first_filled(self.last_contact, self.last_contact_en);
        lead.scheduled_at = first_filled(self.scheduled_at, self.scheduled_at_en);
        lead
    }
}

/// Prefer the source-locale value unless it is blank
fn first_filled(local: Option<String>, english: Option<String>) -> Option<String> {
    local
        .filter(|v| !v.trim().is_empty())
        .or_else(|| english.filter(|v| !v.trim().is_empty()))
}

/// Decode a webhook body into records
///
/// # Errors
///
/// Returns [`crate::SourceError::Payload`] unless the body is a JSON array of
/// objects.
pub fn decode_leads(body: &[u8]) -> SourceResult<Vec<RemoteLead>> {
    Ok(serde_json::from_slice(body)?)
}

/// Map a whole payload, stamping synthesised ids with the current time
#[must_use]
pub fn into_leads(records: Vec<RemoteLead>) -> Vec<Lead> {
    let millis = Utc::now().timestamp_millis();
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_lead(index, millis))
        .collect()
}

/// Falsy ids (`null`, `""`, `0`, `false`) count as missing
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    use serde_json::Value;

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) if !id.is_empty() => Some(id),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}

/// Scalars are kept as text; objects and arrays count as missing
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    use serde_json::Value;

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
