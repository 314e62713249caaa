//! Re-export of the workspace `logger` crate so library users can reach it as
//! `isms_view::logger`.

pub use logger::{
    debug, disable_debug, enable_debug, enable_verbose, error, info, init_file_logging,
    is_debug_enabled, set_level, set_level_from_str, warn, Level,
};
