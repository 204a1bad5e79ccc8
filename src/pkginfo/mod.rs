//! Pkginfo records: reading, writing, and field mutation

pub mod date;
pub mod record;
pub mod value;

pub use date::{is_valid_date, parse_install_date, DateError};
pub use record::{PkgInfo, PkgInfoError};
pub use value::{parse_bulk_value, BulkValue};
