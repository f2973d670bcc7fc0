//! Deskpilot - Natural-Language Desktop Command Pipeline
//!
//! This crate turns free-form text into validated, executable actions against
//! a fixed catalog of desktop automation capabilities, with a three-stage
//! resolver cascade, sequential chain execution, and preference-backed
//! disambiguation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
