// handlers/elevated - admin console API under /api/admin
//
// Every handler takes `AdminSession` as its first extractor, so the
// authorization check runs before any parameter handling or data access.
// Handlers make exactly one repository call and return its result as-is.
pub mod admin;
