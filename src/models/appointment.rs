use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    SelfService,
    Commercial,
    Pickup,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::SelfService => "self-service",
            ServiceType::Commercial => "commercial",
            ServiceType::Pickup => "pickup",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "self-service" => Some(ServiceType::SelfService),
            "commercial" => Some(ServiceType::Commercial),
            "pickup" => Some(ServiceType::Pickup),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::SelfService => "Self-Service Laundromat",
            ServiceType::Commercial => "Commercial Wash & Fold",
            ServiceType::Pickup => "Pickup & Drop-Off Service",
        }
    }

    pub fn requires_load_size(&self) -> bool {
        matches!(self, ServiceType::Commercial | ServiceType::Pickup)
    }

    pub fn requires_pickup_address(&self) -> bool {
        matches!(self, ServiceType::Pickup)
    }

    /// Self-service customers collect their own laundry.
    pub fn requires_pickup_date(&self) -> bool {
        !matches!(self, ServiceType::SelfService)
    }
}

/// Appointment request as it arrives on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_off_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Returns the trimmed value, treating blank strings as absent.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub name: String,
    pub phone: String,
    pub service_type: ServiceType,
    pub load_size: Option<String>,
    pub pickup_address: Option<String>,
    pub drop_off_date: NaiveDate,
    pub pickup_date: Option<NaiveDate>,
    pub special_instructions: Option<String>,
}
