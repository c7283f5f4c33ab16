//! Configuration structures for wheel-building runs.
//!
//! [`Settings`] carries everything one run needs: module location, platform
//! list, output configuration and [`PackageMetadata`]. Construct it through
//! [`SettingsBuilder`], which applies the documented defaults.

mod builder;
mod core;
mod package;

pub use builder::SettingsBuilder;
pub use core::Settings;
pub use package::PackageMetadata;
