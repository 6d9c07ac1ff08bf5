//! Inbound program data records.
//!
//! Status fields deserialize leniently (unknown text becomes
//! `StatusValue::Unknown`). Matrix axis fields stay raw strings so
//! out-of-enum values reach the matrix policy instead of failing the load.

use pmdash_core::matrix::MatrixEntity;
use pmdash_core::metrics::MetricPair;
use pmdash_core::status::StatusValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramData {
    pub program: String,
    pub milestones: Vec<MilestoneRecord>,
    pub cost_accounts: Vec<CostAccountRecord>,
    pub kpps: Vec<KppRecord>,
    pub readiness: Vec<ReadinessRecord>,
    pub test_campaigns: Vec<TestCampaignRecord>,
    pub requirements: Vec<RequirementRecord>,
    pub stakeholders: Vec<StakeholderRecord>,
    pub risks: Vec<RiskRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MilestoneRecord {
    pub id: String,
    pub name: String,
    pub due: String,
    pub complete: bool,
    pub status: StatusValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAccountRecord {
    pub id: String,
    pub name: String,
    pub actual_cost: u64,
    pub budget: u64,
    pub status: StatusValue,
}

/// Key Performance Parameter: actual vs target with a tracked status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KppRecord {
    pub id: String,
    pub name: String,
    pub actual: String,
    pub target: String,
    pub status: StatusValue,
}

/// TRL/MRL readiness as (current level, target level) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessRecord {
    pub id: String,
    pub name: String,
    pub trl: MetricPair,
    pub mrl: MetricPair,
    pub status: StatusValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestCampaignRecord {
    pub id: String,
    pub name: String,
    pub planned: u64,
    pub completed: u64,
    pub passed: u64,
    pub status: StatusValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementRecord {
    pub id: String,
    pub name: String,
    pub required: u64,
    pub verified: u64,
    pub in_process: u64,
    pub status: StatusValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StakeholderRecord {
    pub id: String,
    pub name: String,
    pub organization: String,
    pub influence: String,
    pub interest: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskRecord {
    pub id: String,
    pub title: String,
    pub owner: String,
    pub probability: String,
    pub impact: String,
    pub status: StatusValue,
    pub mitigation: String,
}

impl MatrixEntity for StakeholderRecord {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl MatrixEntity for RiskRecord {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::ProgramData;
    use pmdash_core::status::StatusValue;

    #[test]
    fn lenient_fields_do_not_fail_the_load() {
        let data: ProgramData = match serde_json::from_str(
            r#"{
                "program": "Atlas",
                "kpps": [{"id": "kpp-1", "name": "Range", "target": "500 km", "status": "Mauve"}],
                "stakeholders": [{"id": "sh-1", "influence": "extreme", "interest": "low"}],
                "readiness": [{"id": "rd-1", "trl": {"numerator": 6, "denominator": 9}}]
            }"#,
        ) {
            Ok(data) => data,
            Err(err) => panic!("data should parse: {err}"),
        };
        assert_eq!(data.program, "Atlas");
        assert_eq!(data.kpps[0].status, StatusValue::Unknown);
        assert_eq!(data.kpps[0].target, "500 km");
        assert!(data.kpps[0].actual.is_empty());
        assert_eq!(data.stakeholders[0].influence, "extreme");
        assert_eq!(data.readiness[0].trl.percentage(), 67);
        assert!(data.risks.is_empty());
    }
}
