// handlers/mod.rs - three security tiers
//
// Public (no session) → Protected (signed-in client, onboarding guard) → Elevated (admin session)
pub mod elevated;
pub mod protected;
pub mod public;
