//! Benchmark profiles for the dialogc compiler.
//!
//! - [`reference_profile`]: 20 classifications, 8 observations, 30 questions
//!   (640 states, 52 actions)
//! - [`stress_profile`]: 60 classifications, 12 observations, 100 questions
//!   (6 120 states, 162 actions, ~1M transition lines)

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dialogc::model::CompiledModel;
use dialogc::{Compiler, RandomConfusion};
use dialogc_test_utils::fixtures::synthetic_spec_json;

/// Dimensions of a synthetic specification.
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    /// Number of classifications.
    pub classes: usize,
    /// Number of observation symbols.
    pub observations: usize,
    /// Number of questions.
    pub questions: usize,
}

impl Profile {
    /// The specification document for this profile.
    pub fn spec_json(&self, seed: u64) -> String {
        synthetic_spec_json(self.classes, self.observations, self.questions, seed)
    }

    /// Compile this profile with a seeded random sensor.
    pub fn compile(&self, compiler: &Compiler, seed: u64) -> CompiledModel {
        compiler
            .compile_str(&self.spec_json(seed), &RandomConfusion::new(seed))
            .expect("synthetic profiles are always valid")
    }
}

/// Medium-sized profile for routine benchmarking.
pub fn reference_profile() -> Profile {
    Profile {
        classes: 20,
        observations: 8,
        questions: 30,
    }
}

/// Large profile for stress testing.
pub fn stress_profile() -> Profile {
    Profile {
        classes: 60,
        observations: 12,
        questions: 100,
    }
}
