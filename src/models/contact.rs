use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Active,
    Inactive,
    Lead,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Lead => "lead",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "inactive" => Self::Inactive,
            "lead" => Self::Lead,
            _ => Self::Active,
        }
    }
}

/// One membership of a contact in an organisation.
///
/// Owned by the contact document. `organisation_name` is a snapshot taken
/// when the link was written and is never refreshed on rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationLink {
    /// Relationship id, the handle used to edit or remove this link
    pub id: String,
    pub organisation_id: String,
    #[serde(default)]
    pub organisation_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_primary: bool,
    /// Lower sorts first
    #[serde(default)]
    pub priority: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrganisationLink {
    pub fn new(
        organisation_id: String,
        organisation_name: String,
        role: String,
        is_primary: bool,
        priority: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            organisation_id,
            organisation_name,
            role,
            is_primary,
            priority,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub status: ContactStatus,
    pub notes: Option<String>,
    #[serde(default)]
    pub organisations: Vec<OrganisationLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(full_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            full_name,
            email,
            phone: None,
            mobile: None,
            role: None,
            status: ContactStatus::default(),
            notes: None,
            organisations: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn link(&self, relationship_id: &str) -> Option<&OrganisationLink> {
        self.organisations.iter().find(|l| l.id == relationship_id)
    }

    /// The link shown first: lowest priority wins, primary breaks ties.
    pub fn primary_link(&self) -> Option<&OrganisationLink> {
        self.organisations
            .iter()
            .min_by_key(|l| (l.priority, !l.is_primary))
    }
}

/// Targeted field update for a contact. Organisation links are not part of
/// it; they are written only by the relationship coordinator.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(org: &str, priority: u32, primary: bool) -> OrganisationLink {
        OrganisationLink::new(org.to_string(), org.to_uppercase(), String::new(), primary, priority)
    }

    #[test]
    fn test_links_get_distinct_ids() {
        let a = link("o1", 10, false);
        let b = link("o1", 10, false);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_primary_link_prefers_lowest_priority() {
        let mut c = Contact::new("Ann".to_string(), "ann@example.com".to_string());
        assert!(c.primary_link().is_none());

        c.organisations.push(link("o1", 10, false));
        c.organisations.push(link("o2", 1, true));
        assert_eq!(c.primary_link().unwrap().organisation_id, "o2");

        let rel = c.organisations[0].id.clone();
        assert_eq!(c.link(&rel).unwrap().organisation_id, "o1");
        assert!(c.link("missing").is_none());
    }

    #[test]
    fn test_link_serializes_camel_case() {
        let json = serde_json::to_value(link("o1", 1, true)).unwrap();
        assert_eq!(json["organisationId"], "o1");
        assert_eq!(json["organisationName"], "O1");
        assert_eq!(json["isPrimary"], true);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("plain"));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ContactStatus::parse("lead"), ContactStatus::Lead);
        assert_eq!(ContactStatus::parse(""), ContactStatus::Active);
    }
}
