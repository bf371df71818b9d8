pub mod error;
pub mod fs;
pub mod path;
pub mod process;

pub use error::{InstallerError, Result};
pub use fs::{
    compute_sha256, ensure_dir_exists, file_mode, resolve_write_target, set_mode, write_atomic,
};
pub use path::{
    absolute_source_dir, is_contained_relative, logical_current_dir, normalize_lexically,
};
pub use process::ProcessExecutor;
