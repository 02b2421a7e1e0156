//! Conversions between local collections and their wire lists.
//!
//! Preprocessing is an ordered pipeline; tags and applications are unordered
//! sets whose wire order carries no meaning.

mod associations;
mod preprocessing;

pub use associations::{decode_applications, decode_tags, encode_applications, encode_tags};
pub use preprocessing::{decode_preprocessing, decode_step, encode_preprocessing, encode_step};
