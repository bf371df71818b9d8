pub mod installer;
pub mod venv;

pub use installer::{PackageInstaller, PACKAGE_METADATA_FILES};
pub use venv::Venv;
