use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "contacted" => Self::Contacted,
            "qualified" => Self::Qualified,
            "proposal" => Self::Proposal,
            "won" => Self::Won,
            "lost" => Self::Lost,
            _ => Self::New,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Website,
    Referral,
    Social,
    Email,
    Event,
    #[default]
    Other,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Referral => "referral",
            Self::Social => "social",
            Self::Email => "email",
            Self::Event => "event",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "website" => Self::Website,
            "referral" => Self::Referral,
            "social" => Self::Social,
            "email" => Self::Email,
            "event" => Self::Event,
            _ => Self::Other,
        }
    }
}

/// Copy of the person behind a lead. Not a reference to a contact document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPerson {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub contact: ContactPerson,
    /// Set or cleared together with `organisation_name`
    pub organisation_id: Option<String>,
    pub organisation_name: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub source: LeadSource,
    pub notes: Option<String>,
    /// Linked contact documents; a set, order carries no meaning
    #[serde(default)]
    pub contact_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn new(contact: ContactPerson) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            contact,
            organisation_id: None,
            organisation_name: None,
            status: LeadStatus::default(),
            source: LeadSource::default(),
            notes: None,
            contact_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the organisation id and name are both set or both cleared.
    pub fn organisation_pair_consistent(&self) -> bool {
        self.organisation_id.is_some() == self.organisation_name.is_some()
    }
}

/// Targeted field update for a lead. The organisation pair and contact ids
/// are excluded; only the relationship coordinator writes those.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactPerson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<LeadSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lead_is_unlinked() {
        let lead = Lead::new(ContactPerson::default());
        assert!(lead.contact_ids.is_empty());
        assert!(lead.organisation_pair_consistent());
        assert_eq!(lead.status, LeadStatus::New);
    }

    #[test]
    fn test_pair_consistency() {
        let mut lead = Lead::new(ContactPerson::default());
        lead.organisation_id = Some("o1".to_string());
        assert!(!lead.organisation_pair_consistent());
        lead.organisation_name = Some("Acme".to_string());
        assert!(lead.organisation_pair_consistent());
    }

    #[test]
    fn test_unset_organisation_serializes_as_null() {
        let json = serde_json::to_value(Lead::new(ContactPerson::default())).unwrap();
        assert!(json["organisationId"].is_null());
        assert!(json["organisationName"].is_null());
        assert_eq!(json["contactIds"], serde_json::json!([]));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(LeadStatus::parse("WON"), LeadStatus::Won);
        assert!(LeadStatus::Lost.is_closed());
        assert!(!LeadStatus::Proposal.is_closed());
        assert_eq!(LeadSource::parse("referral"), LeadSource::Referral);
        assert_eq!(LeadSource::parse("fax"), LeadSource::Other);
    }
}
