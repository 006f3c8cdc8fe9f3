pub mod export;
pub mod extract;
pub mod init;

pub use export::{export, ExportArgs};
pub use extract::{extract, ExtractArgs};
pub use init::{init, InitArgs};
