use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub email_to: String,
    pub business_name: String,
    pub business_address: String,
    pub smtp_secret_url: String,
    pub smtp_secret_token: String,
    pub smtp_secret_timeout_secs: u64,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            email_to: env::var("EMAIL_TO").unwrap_or_else(|_| "carwash@theghaazi.com".to_string()),
            business_name: env::var("BUSINESS_NAME")
                .unwrap_or_else(|_| "Self Service Laundromat".to_string()),
            business_address: env::var("BUSINESS_ADDRESS")
                .unwrap_or_else(|_| "4722 E Grand Ave, Dallas, TX 75223".to_string()),
            smtp_secret_url: env::var("SMTP_SECRET_URL").unwrap_or_default(),
            smtp_secret_token: env::var("SMTP_SECRET_TOKEN").unwrap_or_default(),
            smtp_secret_timeout_secs: env::var("SMTP_SECRET_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_user: env::var("SMTP_USER").unwrap_or_default(),
            smtp_pass: env::var("SMTP_PASS").unwrap_or_default(),
        }
    }
}
