use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WebsiteStatus {
    #[default]
    Active,
    Inactive,
    Development,
}

impl WebsiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Development => "development",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "inactive" => Self::Inactive,
            "development" | "dev" => Self::Development,
            _ => Self::Active,
        }
    }
}

/// A website managed for a client. `organisation_id` is a plain reference
/// with no denormalized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    #[serde(default)]
    pub id: String,
    pub url: String,
    pub organisation_id: Option<String>,
    #[serde(default)]
    pub status: WebsiteStatus,
    pub hosting_provider: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Website {
    pub fn new(url: String) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            url,
            organisation_id: None,
            status: WebsiteStatus::default(),
            hosting_provider: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Host part of the url, lowercased, without scheme or `www.`.
    pub fn domain(&self) -> String {
        let rest = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, r)| r);
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        host.trim_start_matches("www.").to_lowercase()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsitePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WebsiteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosting_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain() {
        assert_eq!(Website::new("https://www.Acme.com/about".to_string()).domain(), "acme.com");
        assert_eq!(Website::new("shop.acme.io?x=1".to_string()).domain(), "shop.acme.io");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(WebsiteStatus::parse("dev"), WebsiteStatus::Development);
        assert_eq!(WebsiteStatus::parse("nope"), WebsiteStatus::Active);
    }
}
