/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// AUTH
// =============================================================================

/// Cookie carrying the admin session token
pub const ADMIN_TOKEN_COOKIE: &str = "adminToken";

/// bcrypt work factor for stored passwords
pub const PASSWORD_HASH_COST: u32 = 10;

// =============================================================================
// HOSPITAL DEFAULTS
// =============================================================================

/// Icon assigned to services created implicitly from a hospital form
pub const DEFAULT_SERVICE_ICON: &str = "fa-hospital";

/// Number of latest contacts shown on the dashboard
pub const DASHBOARD_RECENT_CONTACTS: i64 = 5;
