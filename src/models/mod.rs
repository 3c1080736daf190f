pub mod certificate;
pub mod question;

pub use certificate::{Category, Certificate, Variant};
pub use question::{Choice, ExplanationRecord, Question};
