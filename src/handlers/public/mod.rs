// handlers/public/mod.rs - Handlers outside the page table
//
// Sign-in/sign-out form targets and the liveness check. Page GETs live in
// `handlers::pages` and are wired through `routes::ROUTES`.

pub mod auth;
pub mod health;

pub use auth::*;
pub use health::health;
