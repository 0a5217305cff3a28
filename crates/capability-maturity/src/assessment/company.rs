//! Profile of the organization under assessment.

use serde::{Deserialize, Serialize};

/// Headcount band of the assessed organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "< 500")]
    Under500,
    #[serde(rename = "500 - 2 000")]
    UpTo2k,
    #[serde(rename = "2 000 - 10 000")]
    UpTo10k,
    #[serde(rename = "10 000 - 50 000")]
    UpTo50k,
    #[serde(rename = "50 000 - 200 000")]
    UpTo200k,
    #[serde(rename = "> 200 000")]
    Over200k,
}

/// Annual revenue band, in euros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueBand {
    #[serde(rename = "< 250M€")]
    Under250M,
    #[serde(rename = "250M€ - 500M€")]
    UpTo500M,
    #[serde(rename = "500M€ - 1Md€")]
    UpTo1B,
    #[serde(rename = "1Md€ - 10Bd€")]
    UpTo10B,
    #[serde(rename = "+10Bd€")]
    Over10B,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub company_size: Option<CompanySize>,
    #[serde(default)]
    pub annual_revenue: Option<RevenueBand>,
    #[serde(default)]
    pub exact_employees: Option<u32>,
    #[serde(default)]
    pub effective_revenue: Option<f64>,
    #[serde(default)]
    pub it_department_size: Option<u32>,
    #[serde(default)]
    pub annual_it_cost: Option<f64>,
    #[serde(default)]
    pub it_budget_percentage: Option<f64>,
}

impl CompanyProfile {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("company name must not be blank".to_string());
        }
        if let Some(share) = self.it_budget_percentage {
            if !(0.0..=100.0).contains(&share) {
                return Err(format!("it_budget_percentage {share} must be between 0 and 100"));
            }
        }
        let negative = [self.effective_revenue, self.annual_it_cost]
            .into_iter()
            .flatten()
            .any(|amount| amount < 0.0);
        if negative {
            return Err("revenue and IT cost must not be negative".to_string());
        }
        Ok(())
    }
}
