// ─── Module identity ───────────────────────────────────────────────────────

pub const MODULE_NAME: &str = "co-ep-rotating-funding";
pub const MODULE_VERSION: &str = "1.0.0";

// ─── Pool bounds ───────────────────────────────────────────────────────────

pub const MIN_POOL_MEMBERS: u32 = 3;
pub const MAX_POOL_MEMBERS: u32 = 20;

/// Default cycle window in ledgers: roughly one day to one year at
/// ten-minute blocks. The admin can move it with `set_cycle_bounds`.
pub const DEFAULT_MIN_CYCLE: u32 = 144;
pub const DEFAULT_MAX_CYCLE: u32 = 52_560;

// ─── Text bounds (bytes) ───────────────────────────────────────────────────

pub const MAX_NAME_LEN: u32 = 64;
pub const MAX_TITLE_LEN: u32 = 100;
pub const MAX_DESCRIPTION_LEN: u32 = 500;
pub const MAX_URL_LEN: u32 = 256;

// ─── Social trust ──────────────────────────────────────────────────────────

pub const MAX_COLLABORATORS: u32 = 10;

// ─── Enumerations ──────────────────────────────────────────────────────────

pub const POOL_CATEGORIES: [&str; 8] = [
    "narrative",
    "documentary",
    "short_film",
    "animation",
    "music_video",
    "series",
    "experimental",
    "web_content",
];

pub const GEO_FOCUSES: [&str; 5] = ["local", "regional", "national", "international", "global"];
