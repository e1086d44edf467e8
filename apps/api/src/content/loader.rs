use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::content::{CollectionKind, Portfolio};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read portfolio content at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed portfolio YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Item with empty id in '{collection}'")]
    EmptyId { collection: CollectionKind },

    #[error("Duplicate id '{id}' in '{collection}'")]
    DuplicateId {
        collection: CollectionKind,
        id: String,
    },
}

/// Reads and validates the portfolio file. Called once at startup.
pub fn load_portfolio(path: impl AsRef<Path>) -> Result<Portfolio, ContentError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let portfolio = parse_portfolio(&raw)?;
    info!(
        "Portfolio content loaded from {}: {} experiences, {} skills, {} certifications, {} education",
        path.display(),
        portfolio.experiences.len(),
        portfolio.skills.len(),
        portfolio.certifications.len(),
        portfolio.education.len(),
    );
    Ok(portfolio)
}

pub fn parse_portfolio(raw: &str) -> Result<Portfolio, ContentError> {
    let portfolio: Portfolio = serde_yaml::from_str(raw)?;
    validate(&portfolio)?;
    Ok(portfolio)
}

/// Ids must be non-empty and unique within their collection; the UI keys flip state on them.
pub fn validate(portfolio: &Portfolio) -> Result<(), ContentError> {
    for (collection, items) in portfolio.collections() {
        let mut seen = HashSet::new();
        for item in items {
            if item.id.trim().is_empty() {
                return Err(ContentError::EmptyId { collection });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(ContentError::DuplicateId {
                    collection,
                    id: item.id.clone(),
                });
            }
        }
    }
    Ok(())
}
