//! Client side of the appointment form: field normalisation, inline
//! validation and submission to `/api/appointment`.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{Appointment, AppointmentRequest, ServiceType};
use crate::services::validation::{self, ValidationError};

const ENDPOINT_PATH: &str = "/api/appointment";

const SUCCESS_MESSAGE: &str = "Thank you! Your service request has been received. \
                               We will contact you shortly to confirm your booking.";
const FALLBACK_ERROR: &str = "Something went wrong. Please try again later.";
const NETWORK_ERROR: &str = "Unable to send request. Please check your connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Message shown beneath the form after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFeedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl FormFeedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }
}

impl From<ValidationError> for FormFeedback {
    fn from(e: ValidationError) -> Self {
        FormFeedback::error(e.form_message())
    }
}

/// Raw form input values. Empty strings mean the field was left blank.
#[derive(Debug, Clone, Default)]
pub struct AppointmentForm {
    pub name: String,
    pub phone: String,
    pub service_type: String,
    pub load_size: String,
    pub pickup_address: String,
    pub drop_off_date: String,
    pub pickup_date: String,
    pub special_instructions: String,
}

impl AppointmentForm {
    /// Switches the service type and clears fields that no longer apply.
    pub fn select_service(&mut self, service: ServiceType) {
        self.service_type = service.as_str().to_string();
        if !service.requires_load_size() {
            self.load_size.clear();
        }
        if !service.requires_pickup_address() {
            self.pickup_address.clear();
        }
        if !service.requires_pickup_date() {
            self.pickup_date.clear();
        }
    }

    pub fn to_request(&self) -> AppointmentRequest {
        fn field(v: &str) -> Option<String> {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_string())
        }

        AppointmentRequest {
            name: field(&self.name),
            phone: field(&self.phone),
            service_type: field(&self.service_type),
            load_size: field(&self.load_size),
            pickup_address: field(&self.pickup_address),
            drop_off_date: field(&self.drop_off_date),
            pickup_date: field(&self.pickup_date),
            special_instructions: field(&self.special_instructions),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Runs the shared checks plus the form's "no past dates" constraint.
pub fn validate_form(form: &AppointmentForm, today: NaiveDate) -> Result<Appointment, FormFeedback> {
    let appt = validation::validate(&form.to_request())?;
    if appt.drop_off_date < today {
        return Err(ValidationError::DropOffInPast.into());
    }
    Ok(appt)
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct AppointmentClient {
    endpoint: String,
    client: reqwest::Client,
}

impl AppointmentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}{ENDPOINT_PATH}", base_url.trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validates and submits the form. The form is reset after a successful
    /// submission and left untouched otherwise.
    pub async fn submit(&self, form: &mut AppointmentForm, today: NaiveDate) -> FormFeedback {
        if let Err(feedback) = validate_form(form, today) {
            return feedback;
        }

        let resp = match self.client.post(&self.endpoint).json(&form.to_request()).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %self.endpoint, "appointment request failed");
                return FormFeedback::error(NETWORK_ERROR);
            }
        };

        if resp.status().is_success() {
            form.reset();
            return FormFeedback::success(SUCCESS_MESSAGE);
        }

        let status = resp.status();
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| FALLBACK_ERROR.to_string());
        tracing::warn!(%status, %message, "appointment rejected by server");
        FormFeedback::error(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn filled() -> AppointmentForm {
        AppointmentForm {
            name: " Jane Doe ".to_string(),
            phone: "214 555 0123".to_string(),
            service_type: "pickup".to_string(),
            load_size: "large".to_string(),
            pickup_address: "12 Elm St".to_string(),
            drop_off_date: "2025-06-15".to_string(),
            pickup_date: "2025-06-17".to_string(),
            special_instructions: String::new(),
        }
    }

    #[test]
    fn test_select_self_service_clears_pickup_fields() {
        let mut form = filled();
        form.select_service(ServiceType::SelfService);
        assert_eq!(form.service_type, "self-service");
        assert!(form.load_size.is_empty());
        assert!(form.pickup_address.is_empty());
        assert!(form.pickup_date.is_empty());
        assert!(validate_form(&form, today()).is_ok());
    }

    #[test]
    fn test_select_commercial_keeps_load_and_pickup_date() {
        let mut form = filled();
        form.select_service(ServiceType::Commercial);
        assert_eq!(form.load_size, "large");
        assert!(form.pickup_address.is_empty());
        assert_eq!(form.pickup_date, "2025-06-17");
    }

    #[test]
    fn test_to_request_trims_and_drops_blanks() {
        let req = filled().to_request();
        assert_eq!(req.name.as_deref(), Some("Jane Doe"));
        assert_eq!(req.special_instructions, None);
    }

    #[test]
    fn test_validate_form_uses_form_wording() {
        let mut form = filled();
        form.phone = "555-0123".to_string();
        let err = validate_form(&form, today()).unwrap_err();
        assert_eq!(err, FormFeedback::error("Please enter a valid phone number."));

        let mut form = filled();
        form.name.clear();
        let err = validate_form(&form, today()).unwrap_err();
        assert_eq!(err.message, "Please fill in all required fields.");

        let mut form = filled();
        form.pickup_date = "2025-06-14".to_string();
        let err = validate_form(&form, today()).unwrap_err();
        assert_eq!(err.message, "Pickup date must be on or after drop-off/service date.");
    }

    #[test]
    fn test_validate_form_rejects_past_drop_off() {
        let mut form = filled();
        form.drop_off_date = "2025-06-09".to_string();
        let err = validate_form(&form, today()).unwrap_err();
        assert_eq!(err.message, "Drop-off date cannot be in the past.");

        form.drop_off_date = "2025-06-10".to_string();
        assert!(validate_form(&form, today()).is_ok());
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(
            AppointmentClient::new("http://localhost:3000/").endpoint(),
            "http://localhost:3000/api/appointment"
        );
        assert_eq!(
            AppointmentClient::new("https://example.com").endpoint(),
            "https://example.com/api/appointment"
        );
    }
}
