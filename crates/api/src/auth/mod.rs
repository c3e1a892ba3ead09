//! Token handling for the externally-issued credentials this service
//! accepts. The console's identity provider lives outside this service;
//! vitrine only validates the tokens it mints.

pub mod jwt;
