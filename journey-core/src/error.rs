//! Error and outcome types for journey testing.

use crate::data::RecheckData;
use std::fmt;
use thiserror::Error;

/// Main error type for generation, replay and recheck.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JourneyError {
    /// The SUT and the model disagree after an applied step.
    #[error("invariant violated after step {step} ({command}): {diagnostic}")]
    InvariantViolated {
        step: usize,
        command: String,
        diagnostic: String,
    },

    /// A command reached replay although its precondition did not hold.
    ///
    /// Only raised for journeys that claim to be valid by construction.
    #[error("precondition of {command} does not hold at step {step} of a valid journey")]
    PreconditionViolated { step: usize, command: String },

    /// The SUT adapter was driven in a phase it does not support.
    #[error("malformed adapter call at step {step}: {reason}")]
    MalformedAdapterCall { step: usize, reason: String },

    /// An encoded recheck string could not be used.
    #[error("invalid recheck data `{input}`: {reason}")]
    InvalidRecheck { input: String, reason: String },

    /// Invalid generator construction.
    #[error("invalid generator: {message}")]
    InvalidGenerator { message: String },
}

/// Result type for journey operations.
pub type Result<T> = std::result::Result<T, JourneyError>;

/// A shrinking step in the failure progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    /// The counterexample value at this step.
    pub counterexample: String,
    /// The step number (0 = original, 1+ = successful shrinks).
    pub step: usize,
    /// Optional variable name for this input (e.g., "journey").
    pub variable_name: Option<String>,
}

/// Outcome of a property test.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    /// Test passed successfully.
    Pass {
        tests_run: usize,
        property_name: Option<String>,
        module_path: Option<String>,
    },

    /// Test failed with a counterexample.
    Fail {
        counterexample: String,
        tests_run: usize,
        shrinks_performed: usize,
        property_name: Option<String>,
        module_path: Option<String>,
        assertion_type: Option<String>,
        /// The shrinking progression showing how we reached the minimal counterexample.
        shrink_steps: Vec<ShrinkStep>,
        /// How to regenerate the minimal counterexample; `None` for hand-built results.
        recheck: Option<RecheckData>,
    },
}

impl TestResult {
    pub(crate) fn pass() -> Self {
        TestResult::Pass {
            tests_run: 1,
            property_name: None,
            module_path: None,
        }
    }

    pub(crate) fn fail(counterexample: String, assertion_type: &str) -> Self {
        TestResult::Fail {
            counterexample,
            tests_run: 0,
            shrinks_performed: 0,
            property_name: None,
            module_path: None,
            assertion_type: Some(assertion_type.to_string()),
            shrink_steps: Vec::new(),
            recheck: None,
        }
    }

    /// Check if the test passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }

    /// Check if the test failed.
    pub fn is_fail(&self) -> bool {
        matches!(self, TestResult::Fail { .. })
    }

    /// The encoded seed that reproduces this failure, if any.
    pub fn recheck_data(&self) -> Option<&RecheckData> {
        match self {
            TestResult::Fail { recheck, .. } => recheck.as_ref(),
            TestResult::Pass { .. } => None,
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass {
                tests_run,
                property_name,
                module_path,
            } => {
                if let Some(module) = module_path {
                    writeln!(f, "━━━ {} ━━━", module)?;
                }

                let prop_name = property_name.as_deref().unwrap_or("property");
                write!(f, "  ✓ {} passed {} tests.", prop_name, tests_run)
            }
            TestResult::Fail {
                counterexample,
                tests_run,
                shrinks_performed,
                property_name,
                module_path,
                assertion_type,
                shrink_steps,
                recheck,
            } => {
                if let Some(module) = module_path {
                    writeln!(f, "━━━ {} ━━━", module)?;
                }

                let prop_name = property_name.as_deref().unwrap_or("property");
                writeln!(
                    f,
                    "  ✗ {} failed after {} tests and {} shrinks.",
                    prop_name, tests_run, shrinks_performed
                )?;

                if !shrink_steps.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "    Shrinking progression:")?;
                    for step in shrink_steps {
                        match (&step.variable_name, step.step) {
                            (Some(var_name), n) => writeln!(
                                f,
                                "      │ forAll {} = {} -- {}",
                                n,
                                first_line(&step.counterexample),
                                var_name
                            )?,
                            (None, 0) => writeln!(
                                f,
                                "      │ Original: {}",
                                first_line(&step.counterexample)
                            )?,
                            (None, n) => writeln!(
                                f,
                                "      │ Step {}: {}",
                                n,
                                first_line(&step.counterexample)
                            )?,
                        }
                    }
                    writeln!(f)?;
                }

                if let Some(assertion) = assertion_type {
                    writeln!(f, "    === {} ===", assertion)?;
                }

                write!(f, "    Minimal counterexample: {}", counterexample)?;

                if let Some(data) = recheck {
                    writeln!(f)?;
                    writeln!(f)?;
                    write!(f, "    This failure can be reproduced with recheck \"{}\"", data)?;
                }

                Ok(())
            }
        }
    }
}

fn first_line(text: &str) -> &str {
    text.trim_start().lines().next().unwrap_or("")
}
