pub mod auth;
pub mod onboarding;

pub use auth::{extract_session_token, resolve_session, AdminSession, OptionalSession};
pub use onboarding::{onboarding_guard, GuardDecision, OnboardingFlags};
