pub mod basic;
pub mod token;

pub use basic::BasicCredentials;
pub use token::TokenVerifier;
