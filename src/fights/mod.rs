pub mod outcome;
pub mod validation;
