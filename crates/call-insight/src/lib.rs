//! Sales-call lead qualification: BANT/MEDDIC extraction, confidence-weighted lead scoring,
//! and human-in-the-loop validation.

pub mod config;
pub mod error;
pub mod extraction;
pub mod scoring;
pub mod telemetry;
pub mod workflows;
