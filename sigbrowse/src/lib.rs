pub mod commands;
pub mod handlers;

pub use handlers::{
    RunConfig, handle_run, init_logging, normalize_legacy_flags, run, split_specifiers,
};
