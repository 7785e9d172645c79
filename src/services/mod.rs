pub mod config_writer;
pub mod ignore_file;
pub mod key_generator;
pub mod key_presenter;
pub mod permission_service;

pub use config_writer::ConfigWriter;
pub use ignore_file::{IgnoreFileUpdate, IgnoreFileUpdater};
pub use key_generator::{classify_output, GeneratedKey, KeyGenerator, KeygenStatus};
pub use key_presenter::KeyPresenter;
pub use permission_service::{PermissionCheckResult, PermissionService};
