// Canonical resume model and the normalizer that maps every recognized input
// shape (CV record envelope, canonical AI output, flat onboarding profile)
// onto it. Pure: no I/O, inputs are never mutated.

pub mod document;
pub mod fields;
pub mod normalizer;
pub mod shapes;

pub use document::{ContactInfo, Education, ResumeDocument};
pub use normalizer::{embedded_html, normalize};
