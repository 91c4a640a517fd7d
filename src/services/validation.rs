use chrono::NaiveDate;

use crate::models::appointment::present;
use crate::models::{Appointment, AppointmentRequest, ServiceType};

const MIN_PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All required fields must be provided")]
    MissingRequired,

    #[error("Unknown service type: {0}")]
    UnknownServiceType(String),

    #[error("Load size is required for commercial and pickup services")]
    MissingLoadSize,

    #[error("Pickup address is required for pickup service")]
    MissingPickupAddress,

    #[error("Pickup date is required for commercial and pickup services")]
    MissingPickupDate,

    #[error("Phone number must contain at least 10 digits")]
    InvalidPhone,

    #[error("Invalid date for {field}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str },

    #[error("Pickup date must be on or after the drop-off date")]
    PickupBeforeDropOff,

    #[error("Drop-off date cannot be in the past")]
    DropOffInPast,
}

impl ValidationError {
    /// Wording shown inline next to the web form.
    pub fn form_message(&self) -> &'static str {
        match self {
            ValidationError::MissingRequired => "Please fill in all required fields.",
            ValidationError::UnknownServiceType(_) => "Please select a service type.",
            ValidationError::MissingLoadSize => "Please select a load size for this service.",
            ValidationError::MissingPickupAddress => {
                "Please provide a pickup address for pickup service."
            }
            ValidationError::MissingPickupDate => "Please select a pickup date.",
            ValidationError::InvalidPhone => "Please enter a valid phone number.",
            ValidationError::InvalidDate { .. } => "Please enter valid dates.",
            ValidationError::PickupBeforeDropOff => {
                "Pickup date must be on or after drop-off/service date."
            }
            ValidationError::DropOffInPast => "Drop-off date cannot be in the past.",
        }
    }
}

/// Validates an incoming request and converts it into an [`Appointment`].
///
/// Checks run in a fixed order and the first failure is returned, so a
/// record missing several fields always reports the same error.
pub fn validate(req: &AppointmentRequest) -> Result<Appointment, ValidationError> {
    let (Some(name), Some(phone), Some(service_raw), Some(drop_off_raw)) = (
        present(&req.name),
        present(&req.phone),
        present(&req.service_type),
        present(&req.drop_off_date),
    ) else {
        return Err(ValidationError::MissingRequired);
    };

    let service_type = ServiceType::parse(service_raw)
        .ok_or_else(|| ValidationError::UnknownServiceType(service_raw.to_string()))?;

    let load_size = present(&req.load_size);
    if service_type.requires_load_size() && load_size.is_none() {
        return Err(ValidationError::MissingLoadSize);
    }

    let pickup_address = present(&req.pickup_address);
    if service_type.requires_pickup_address() && pickup_address.is_none() {
        return Err(ValidationError::MissingPickupAddress);
    }

    let pickup_raw = present(&req.pickup_date);
    if service_type.requires_pickup_date() && pickup_raw.is_none() {
        return Err(ValidationError::MissingPickupDate);
    }

    if !is_valid_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }

    let drop_off_date = parse_date(drop_off_raw, "dropOffDate")?;
    let pickup_date = pickup_raw
        .map(|raw| parse_date(raw, "pickupDate"))
        .transpose()?;

    if let Some(pickup) = pickup_date {
        if pickup < drop_off_date {
            return Err(ValidationError::PickupBeforeDropOff);
        }
    }

    Ok(Appointment {
        name: name.to_string(),
        phone: phone.to_string(),
        service_type,
        load_size: load_size.map(str::to_string),
        pickup_address: pickup_address.map(str::to_string),
        drop_off_date,
        pickup_date,
        special_instructions: present(&req.special_instructions).map(str::to_string),
    })
}

/// Digits, whitespace, dashes and parentheses only, with at least ten digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')'));
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    allowed && digits >= MIN_PHONE_DIGITS
}

fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate { field })
}
