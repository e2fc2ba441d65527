//! TPTP front end

pub mod syntax;
pub mod tptp;

pub use tptp::{parse_tptp, parse_tptp_file};
