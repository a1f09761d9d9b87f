pub mod contact_service;
pub mod notification;
pub mod quote_service;
