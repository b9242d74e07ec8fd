pub mod remote;
pub mod scan;

pub use remote::RemoteSearchEngine;
pub use scan::TermScanEngine;
