use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::AppointmentRequest;
use crate::services::mail::MailError;
use crate::services::notification::{self, BusinessInfo};
use crate::services::validation;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

// POST /api/appointment
pub async fn submit_appointment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AppointmentRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::warn!(error = %e, "rejected appointment payload");
        AppError::BadRequest(e.body_text())
    })?;

    // Clients validate too, but nothing they send is trusted.
    let appt = validation::validate(&req).inspect_err(|e| {
        tracing::info!(reason = %e, "appointment failed validation");
    })?;

    let business = BusinessInfo {
        name: state.config.business_name.clone(),
        address: state.config.business_address.clone(),
    };
    let email = notification::compose(&appt, &business, &state.config.email_to);

    state.mailer.send(&email).await.map_err(|e| match e {
        MailError::NotConfigured(reason) => {
            tracing::error!(%reason, "email service is not configured");
            AppError::MailNotConfigured
        }
        MailError::Transport(e) => {
            tracing::error!(error = %e, "failed to send service request email");
            AppError::Mail(e.to_string())
        }
    })?;

    tracing::info!(
        name = %appt.name,
        phone = %appt.phone,
        service = appt.service_type.display_name(),
        "service request email sent"
    );

    Ok(Json(SubmitResponse {
        success: true,
        message: "Service request received successfully".to_string(),
    }))
}
