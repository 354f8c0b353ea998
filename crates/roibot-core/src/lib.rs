//! Roibot Core Library
//!
//! Matching pipeline and knowledge base for the roibot Value & ROI assistant.
//! The pipeline is pure: normalize the prompt, match a canonical problem,
//! rank levers, retrieve stories and compose an answer.

pub mod answer;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod levers;
pub mod logging;
pub mod matcher;
pub mod similarity;
pub mod stories;
pub mod text;
