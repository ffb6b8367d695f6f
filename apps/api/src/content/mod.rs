// Content resolution: classifies raw stored CV content and peels away
// layers of JSON escaping until HTML or a structured object remains.
// Nothing in here performs I/O.

pub mod sniffer;
pub mod unwrap;

pub use sniffer::{looks_like_json, sniff};
pub use unwrap::{unwrap, Resolved, MAX_UNWRAP_DEPTH};
