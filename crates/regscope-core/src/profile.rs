//! # Organization Profile — Scoping Questionnaire Data Model
//!
//! Defines the [`OrganizationProfile`] submitted by the scoping
//! questionnaire, together with the [`CompanySize`] taxonomy and the
//! optional revenue/data-subject band enums.
//!
//! ## Invariant
//!
//! A profile is transient input: constructed once per evaluation request and
//! never mutated. The rule evaluator treats every list field as a set and
//! must tolerate empty lists — partial questionnaires are valid input that
//! simply match fewer rules.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Company size bands used by rule triggers.
///
/// The four bands mirror the questionnaire's employee-count buckets:
///
/// | Band | Employees |
/// |------|-----------|
/// | `startup` | 1-10 |
/// | `sme` | 11-249 |
/// | `large` | 250-999 |
/// | `enterprise` | 1000+ |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    /// 1-10 employees.
    Startup,
    /// Small/medium enterprise, 11-249 employees.
    Sme,
    /// Large enterprise, 250-999 employees.
    Large,
    /// 1000+ employees.
    Enterprise,
}

/// Total number of company size bands. Used for exhaustiveness assertions.
pub const COMPANY_SIZE_COUNT: usize = 4;

impl CompanySize {
    /// Returns all size bands in ascending order.
    pub fn all() -> &'static [CompanySize] {
        &[Self::Startup, Self::Sme, Self::Large, Self::Enterprise]
    }

    /// Returns the snake_case string identifier for this band.
    ///
    /// Must match the serde serialization format and the codes used in
    /// rule-table trigger data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Sme => "sme",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
        }
    }
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanySize {
    type Err = ValidationError;

    /// Parse a company size from its snake_case identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "startup" => Ok(Self::Startup),
            "sme" => Ok(Self::Sme),
            "large" => Ok(Self::Large),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(ValidationError::UnknownCompanySize(other.to_string())),
        }
    }
}

/// Annual revenue bands from the optional questionnaire detail section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnualRevenueBand {
    /// Under €1M.
    #[serde(rename = "under_1m")]
    Under1M,
    /// €1M - €10M.
    #[serde(rename = "1m_10m")]
    From1MTo10M,
    /// €10M - €50M.
    #[serde(rename = "10m_50m")]
    From10MTo50M,
    /// €50M+.
    #[serde(rename = "50m_plus")]
    Over50M,
}

/// Data subject count bands from the optional questionnaire detail section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSubjectBand {
    /// Fewer than 1,000 data subjects.
    #[serde(rename = "under_1k")]
    Under1K,
    /// 1,000 - 10,000 data subjects.
    #[serde(rename = "1k_10k")]
    From1KTo10K,
    /// 10,000 - 100,000 data subjects.
    #[serde(rename = "10k_100k")]
    From10KTo100K,
    /// 100,000+ data subjects.
    #[serde(rename = "100k_plus")]
    Over100K,
}

/// An organization's scoping questionnaire responses.
///
/// Sector, data-type, and location codes are open vocabularies defined by
/// the loaded rule table (see the table's lookup lists); they are carried
/// here as plain strings. List fields default to empty so a partially
/// completed questionnaire still deserializes — the evaluator treats empty
/// fields as matching no set-intersection trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    /// Company size band. The only required scalar field.
    pub company_size: CompanySize,
    /// Sector codes the organization operates in.
    #[serde(default)]
    pub sectors: Vec<String>,
    /// Data-category codes the organization handles.
    #[serde(default)]
    pub data_types: Vec<String>,
    /// Jurisdiction codes where systems or data reside.
    #[serde(default)]
    pub system_locations: Vec<String>,
    /// Whether processing is delegated to third-party processors.
    #[serde(default)]
    pub has_data_processors: bool,
    /// Whether the organization is a public-sector body.
    #[serde(default)]
    pub is_public_sector: bool,
    /// Whether special-category data (health, biometric, …) is processed.
    #[serde(default)]
    pub handles_special_categories: bool,
    /// Optional headcount detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,
    /// Optional annual revenue band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<AnnualRevenueBand>,
    /// Optional data subject count band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_subject_count: Option<DataSubjectBand>,
}

impl OrganizationProfile {
    /// Create a minimal profile with the given size and all other fields empty.
    ///
    /// Primarily useful in tests and in wizard flows that evaluate a
    /// partially completed questionnaire.
    pub fn with_size(company_size: CompanySize) -> Self {
        Self {
            company_size,
            sectors: Vec::new(),
            data_types: Vec::new(),
            system_locations: Vec::new(),
            has_data_processors: false,
            is_public_sector: false,
            handles_special_categories: false,
            employee_count: None,
            annual_revenue: None,
            data_subject_count: None,
        }
    }

    /// Whether the profile lists the given sector code.
    pub fn has_sector(&self, code: &str) -> bool {
        self.sectors.iter().any(|s| s == code)
    }

    /// Whether the profile lists the given data-type code.
    pub fn has_data_type(&self, code: &str) -> bool {
        self.data_types.iter().any(|d| d == code)
    }

    /// Whether the profile lists the given system location code.
    pub fn has_location(&self, code: &str) -> bool {
        self.system_locations.iter().any(|l| l == code)
    }
}
