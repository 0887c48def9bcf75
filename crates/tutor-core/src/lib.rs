//! Types shared by every Tutor crate

mod error;

pub use error::HttpError;
