pub mod abilities;
pub mod admin;
pub mod api;
pub mod pages;
pub mod system;
pub mod verification;
