pub mod csv;

pub use self::csv::{import_into, import_network, ImportSummary};
