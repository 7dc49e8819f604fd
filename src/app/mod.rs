pub mod bootstrap;
pub mod report;
pub mod shell;

pub use bootstrap::{build_session, DynSession};
pub use shell::InteractiveShell;
