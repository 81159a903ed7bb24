//! Configuration for the nomenclature service module

use crate::domain::resolver::{FilterPolicy, CALIBRATION_ACTIVITY, STANDARD_ACTIVITIES};
use crate::orchestrator::MAX_ATTACHMENT_BYTES;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Nomenclature service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum raw size of an uploaded image or logo in bytes
    #[serde(default = "default_max_attachment_bytes")]
    pub max_attachment_bytes: usize,

    /// Timeout applied to every request of a `RestClient` built from this config
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Activity name whose objects may carry quantities
    #[serde(default = "default_calibration_activity")]
    pub calibration_activity: String,

    /// Activity names whose characteristics may carry standards
    #[serde(default = "default_standard_activities")]
    pub standard_activities: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attachment_bytes: default_max_attachment_bytes(),
            request_timeout: default_request_timeout(),
            calibration_activity: default_calibration_activity(),
            standard_activities: default_standard_activities(),
        }
    }
}

impl Config {
    pub fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy {
            calibration_activity: self.calibration_activity.clone(),
            standard_activities: self.standard_activities.clone(),
        }
    }
}

fn default_max_attachment_bytes() -> usize {
    MAX_ATTACHMENT_BYTES
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_calibration_activity() -> String {
    CALIBRATION_ACTIVITY.to_string()
}

fn default_standard_activities() -> Vec<String> {
    STANDARD_ACTIVITIES.iter().map(|s| s.to_string()).collect()
}
