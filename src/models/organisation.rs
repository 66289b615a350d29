use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrganisationType {
    Client,
    #[default]
    Prospect,
    Partner,
    Supplier,
    Other,
}

impl OrganisationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Prospect => "prospect",
            Self::Partner => "partner",
            Self::Supplier => "supplier",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "client" => Self::Client,
            "partner" => Self::Partner,
            "supplier" => Self::Supplier,
            "other" => Self::Other,
            _ => Self::Prospect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrganisationStatus {
    #[default]
    Active,
    Inactive,
}

impl OrganisationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "inactive" => Self::Inactive,
            _ => Self::Active,
        }
    }
}

/// An organisation document. It carries no relationship fields: contacts and
/// leads point at it, never the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub org_type: OrganisationType,
    #[serde(default)]
    pub status: OrganisationStatus,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub billing_address: Address,
    #[serde(default)]
    pub shipping_address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organisation {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name,
            org_type: OrganisationType::default(),
            status: OrganisationStatus::default(),
            industry: None,
            website: None,
            notes: None,
            billing_address: Address::default(),
            shipping_address: Address::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Targeted field update for an organisation. `None` leaves a field alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub org_type: Option<OrganisationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrganisationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
}
