//! Domain model module declarations.

pub mod case_study;
pub mod contact;
