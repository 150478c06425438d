//! Diagnosis category and catalog record models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of recommended products carried by every diagnosis record.
pub const PRODUCTS_PER_DIAGNOSIS: usize = 4;

/// One of the seven fixed skin-condition classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisCategory {
    AcneAndPimples,
    Dryness,
    DarkSpots,
    Sensitivity,
    OilySkin,
    LinesWrinkles,
    PoreIssues,
}

impl DiagnosisCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::AcneAndPimples,
        Self::Dryness,
        Self::DarkSpots,
        Self::Sensitivity,
        Self::OilySkin,
        Self::LinesWrinkles,
        Self::PoreIssues,
    ];

    /// Stable snake_case identifier, matching the serde representation.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::AcneAndPimples => "acne_and_pimples",
            Self::Dryness => "dryness",
            Self::DarkSpots => "dark_spots",
            Self::Sensitivity => "sensitivity",
            Self::OilySkin => "oily_skin",
            Self::LinesWrinkles => "lines_wrinkles",
            Self::PoreIssues => "pore_issues",
        }
    }
}

impl fmt::Display for DiagnosisCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown diagnosis category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for DiagnosisCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == normalized)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// A recommended product shown under a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    /// Display name
    pub name: &'static str,
    /// Opaque asset identifier for the product picture
    pub image_reference: &'static str,
    /// Where the product can be bought
    pub purchase_url: &'static str,
}

impl ProductRecord {
    /// Parse the purchase link.
    pub fn parsed_url(&self) -> Result<url::Url, url::ParseError> {
        url::Url::parse(self.purchase_url)
    }
}

/// Display text and recommended products for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiagnosisRecord {
    pub title: &'static str,
    pub symptoms: &'static str,
    /// Display order is significant (rendered top-to-bottom).
    pub products: [ProductRecord; PRODUCTS_PER_DIAGNOSIS],
}

impl DiagnosisRecord {
    /// Product names in display order.
    pub fn product_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.products.iter().map(|product| product.name)
    }
}
