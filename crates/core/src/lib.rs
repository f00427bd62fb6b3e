//! discharge-core: Shared types for veterinary discharge note generation
//!
//! This crate holds the I/O-free parts of the pipeline: the consultation
//! record read from disk, the discharge note envelope written back, the
//! clean-up applied to model output, and the common error type.

pub mod consultation;
pub mod error;
pub mod note;

pub use consultation::{ConsultationData, REQUIRED_SECTIONS};
pub use error::DischargeError;
pub use note::{DischargeNote, clean_note};
