//! Application-wide constants
//!
//! This module contains constants used throughout the application.

/// Name of the cookie carrying the admin session.
/// Its value is the id of the signed-in user and is resolved directly
/// against the users table on every request.
pub const SESSION_COOKIE: &str = "admin_session";

/// Length of generated password-reset tokens in characters.
pub const RESET_TOKEN_LENGTH: usize = 64;

/// Password-reset tokens expire this many hours after issue.
pub const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Length of newsletter unsubscribe tokens in characters.
pub const UNSUBSCRIBE_TOKEN_LENGTH: usize = 64;

/// Maximum upload size for media files in bytes (10 MB).
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Reading speed used for the stored reading-time estimate (Dutch content).
pub const WORDS_PER_MINUTE_NL: usize = 200;

/// Reading speed for English reading-time estimates.
pub const WORDS_PER_MINUTE_EN: usize = 250;

/// Meta descriptions auto-filled from an excerpt are cut to this many
/// characters, on a char boundary.
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

/// Fixed primary key shared by all singleton settings rows.
pub const SINGLETON_ID: &str = "default";
