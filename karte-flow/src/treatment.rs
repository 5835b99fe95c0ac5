use serde::{Deserialize, Serialize};

/// Structured notes a stylist records about a single visit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentInfo {
    /// Services used during the visit, in the order they were selected
    pub services: Vec<String>,
    /// Style the customer asked for
    pub style: String,
    /// Special technique applied, if any
    pub tech: String,
    /// Hair type descriptor, e.g. "ミディアム, 普通"
    pub hair_type: String,
    /// Name of the stylist in charge
    pub stylist: String,
}

impl TreatmentInfo {
    /// Service list as shown to the customer.
    pub fn services_display(&self) -> String {
        self.services.join(", ")
    }
}

/// Output of one generation step.
///
/// Displayed on the result page and overwritten by the next generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub treatment_info: TreatmentInfo,
    pub ai_proposal: String,
}
