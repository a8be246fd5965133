//! data_runtime: tunable data loaded at startup.
//!
//! Keeps configuration schemas and loaders out of the gameplay crates so the
//! harness and future callers share one stable data API.

pub mod configs {
    pub mod locomotion;
}
