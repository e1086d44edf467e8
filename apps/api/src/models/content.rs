use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four named collections shown on the site. Exactly one is active in the UI at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Experiences,
    Skills,
    Certifications,
    Education,
}

impl CollectionKind {
    /// Display order of the category tabs.
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Experiences,
        CollectionKind::Skills,
        CollectionKind::Certifications,
        CollectionKind::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Experiences => "experiences",
            CollectionKind::Skills => "skills",
            CollectionKind::Certifications => "certifications",
            CollectionKind::Education => "education",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CollectionKind::Experiences => "Expériences",
            CollectionKind::Skills => "Compétences",
            CollectionKind::Certifications => "Certifications",
            CollectionKind::Education => "Formation",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown collection '{0}'")]
pub struct UnknownCollection(pub String);

impl FromStr for CollectionKind {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}

/// Optional per-collection fields. Experiences use client/duration/sector/impact,
/// certifications use issuer, education may carry a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// One displayable record. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    /// Display string, e.g. "2024-12". Sorts chronologically when zero-padded.
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: ItemMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default = "default_owner_name")]
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
}

fn default_owner_name() -> String {
    "the portfolio owner".to_string()
}

fn default_assistant_name() -> String {
    "PortfolioAgent".to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: default_owner_name(),
            headline: String::new(),
            assistant_name: default_assistant_name(),
        }
    }
}

/// All site content: the owner profile plus the four ordered collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub experiences: Vec<ContentItem>,
    #[serde(default)]
    pub skills: Vec<ContentItem>,
    #[serde(default)]
    pub certifications: Vec<ContentItem>,
    #[serde(default)]
    pub education: Vec<ContentItem>,
}

impl Portfolio {
    pub fn collection(&self, kind: CollectionKind) -> &[ContentItem] {
        match kind {
            CollectionKind::Experiences => &self.experiences,
            CollectionKind::Skills => &self.skills,
            CollectionKind::Certifications => &self.certifications,
            CollectionKind::Education => &self.education,
        }
    }

    pub fn collections(&self) -> impl Iterator<Item = (CollectionKind, &[ContentItem])> {
        CollectionKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.collection(kind)))
    }

    pub fn total_items(&self) -> usize {
        self.collections().map(|(_, items)| items.len()).sum()
    }
}
