//! Core types and shared functionality for rozklad.
//!
//! This crate provides:
//! - Unified error types
//! - Configuration structures
//! - The TV schedule and bus timetable data model

pub mod config;
pub mod error;
pub mod schedule;
pub mod timetable;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use schedule::{Channel, ChannelReport, DayBlock, RunInfo, RunStats, ScheduleEntry};
pub use timetable::{BusRoute, KnownStop, StopMeta, StopRef, TimetableEntry};
