// Credential checks and session tokens

pub mod jwt;
pub mod password;
