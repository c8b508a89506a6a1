pub mod authentication;
pub mod chat;
