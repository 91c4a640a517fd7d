pub mod mail;
pub mod notification;
pub mod validation;
