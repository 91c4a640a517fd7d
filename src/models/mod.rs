pub mod appointment;

pub use appointment::{Appointment, AppointmentRequest, ServiceType};
