pub mod command;
pub mod workflow;

pub use command::validate_plugin_name;
pub use workflow::{InstallNotifier, InstallOutcome, InstallStatus, Installer};
