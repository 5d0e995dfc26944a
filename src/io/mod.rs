/*!
# IO utilities

Loading and saving of flattened Wikipedia splits (CSV, optionally gzip-compressed),
and of deduplication audit trails (JSON lines).
!*/
mod audit;
mod records;

pub use audit::write_audit;
pub use records::{is_gzip, read_records, write_records};
