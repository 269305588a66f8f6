//! Property definitions for property-based testing.

use crate::error::ShrinkStep;
use crate::{data::*, error::*, gen::*, tree::*};
use std::fmt;

/// A property that can be tested with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    test_function: Box<dyn Fn(&T) -> TestResult>,
    variable_name: Option<String>,
}

impl<T> Property<T>
where
    T: 'static + fmt::Debug,
{
    /// Create a new property from a generator and test function.
    pub fn new<F>(generator: Gen<T>, test_function: F) -> Self
    where
        F: Fn(&T) -> TestResult + 'static,
    {
        Property {
            generator,
            test_function: Box::new(test_function),
            variable_name: None,
        }
    }

    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property::new(generator, move |input| {
            if condition(input) {
                TestResult::pass()
            } else {
                TestResult::fail(format!("{input:?}"), "Boolean Condition")
            }
        })
    }

    /// Create a property that checks a boolean condition with a named variable.
    pub fn for_all_named<F>(generator: Gen<T>, variable_name: &str, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property::for_all(generator, condition).named(variable_name)
    }

    /// Create a property from a check that explains its failures.
    ///
    /// The error's `Display` output becomes the assertion heading of the
    /// failure report.
    pub fn for_all_result<F, E>(generator: Gen<T>, check: F) -> Self
    where
        F: Fn(&T) -> std::result::Result<(), E> + 'static,
        E: fmt::Display,
    {
        Property::new(generator, move |input| match check(input) {
            Ok(()) => TestResult::pass(),
            Err(error) => TestResult::fail(format!("{input:?}"), &error.to_string()),
        })
    }

    /// Name the generated variable in the shrinking progression.
    pub fn named(mut self, variable_name: &str) -> Self {
        self.variable_name = Some(variable_name.to_string());
        self
    }

    /// Run this property with the given configuration.
    pub fn run(&self, config: &Config) -> TestResult {
        self.run_with_context(config, None, None)
    }

    /// Run this property with the given configuration and context information.
    pub fn run_with_context(
        &self,
        config: &Config,
        property_name: Option<&str>,
        module_path: Option<&str>,
    ) -> TestResult {
        let mut seed = config.seed.unwrap_or_else(Seed::random);
        let test_limit = config.test_limit.max(1);

        for test_num in 0..config.test_limit {
            let size = Size::new((test_num * config.size_limit) / test_limit);
            let (test_seed, next_seed) = seed.split();
            seed = next_seed;

            let tree = self.generator.generate(size, test_seed);
            let failure = (self.test_function)(&tree.value);
            if failure.is_pass() {
                continue;
            }

            let shrunk = self.shrink_failure(tree, failure, config);
            let recheck = RecheckData {
                size,
                seed: test_seed,
                shrink_path: shrunk.path,
            };
            tracing::info!(
                tests_run = test_num + 1,
                shrinks = shrunk.steps.len() - 1,
                recheck = %recheck,
                "property failed"
            );

            return shrunk.failure.finish(
                test_num + 1,
                shrunk.steps,
                recheck,
                property_name,
                module_path,
            );
        }

        TestResult::Pass {
            tests_run: config.test_limit,
            property_name: property_name.map(|s| s.to_string()),
            module_path: module_path.map(|s| s.to_string()),
        }
    }

    /// Regenerate one case from its recheck data and evaluate it once.
    ///
    /// The recorded shrink path is followed without searching again, so a
    /// failure reproduces the same minimal counterexample.
    pub fn recheck(&self, data: &RecheckData) -> Result<TestResult> {
        self.recheck_with_context(data, None, None)
    }

    /// Recheck with context information for the report.
    pub fn recheck_with_context(
        &self,
        data: &RecheckData,
        property_name: Option<&str>,
        module_path: Option<&str>,
    ) -> Result<TestResult> {
        let mut tree = self.generator.generate(data.size, data.seed);
        for (depth, &index) in data.shrink_path.iter().enumerate() {
            tree = tree
                .children()
                .nth(index)
                .ok_or_else(|| JourneyError::InvalidRecheck {
                    input: data.encode(),
                    reason: format!("no shrink {index} at depth {depth}"),
                })?;
        }

        tracing::info!(recheck = %data, "rechecking");

        let result = (self.test_function)(&tree.value);
        if result.is_pass() {
            return Ok(TestResult::Pass {
                tests_run: 1,
                property_name: property_name.map(|s| s.to_string()),
                module_path: module_path.map(|s| s.to_string()),
            });
        }

        let steps = vec![ShrinkStep {
            counterexample: format!("{:?}", tree.value),
            step: data.shrink_path.len(),
            variable_name: self.variable_name.clone(),
        }];
        Ok(result.finish(1, steps, data.clone(), property_name, module_path))
    }

    /// Greedy descent: take the first failing child at every level.
    fn shrink_failure(&self, tree: Tree<T>, failure: TestResult, config: &Config) -> Shrunk {
        let mut current = tree;
        let mut failure = failure;
        let mut path = Vec::new();
        let mut steps = vec![ShrinkStep {
            counterexample: format!("{:?}", current.value),
            step: 0,
            variable_name: self.variable_name.clone(),
        }];

        'descend: while path.len() < config.shrink_limit {
            for (index, child) in current.children().enumerate() {
                let result = (self.test_function)(&child.value);
                if result.is_fail() {
                    path.push(index);
                    tracing::debug!(shrinks = path.len(), index, "shrink still fails");
                    steps.push(ShrinkStep {
                        counterexample: format!("{:?}", child.value),
                        step: path.len(),
                        variable_name: self.variable_name.clone(),
                    });
                    current = child;
                    failure = result;
                    continue 'descend;
                }
            }
            break;
        }

        Shrunk {
            failure,
            steps,
            path,
        }
    }
}

struct Shrunk {
    failure: TestResult,
    steps: Vec<ShrinkStep>,
    path: Vec<usize>,
}

impl TestResult {
    fn finish(
        self,
        tests_run: usize,
        shrink_steps: Vec<ShrinkStep>,
        recheck: RecheckData,
        property_name: Option<&str>,
        module_path: Option<&str>,
    ) -> TestResult {
        match self {
            TestResult::Fail {
                counterexample,
                assertion_type,
                ..
            } => TestResult::Fail {
                counterexample,
                tests_run,
                shrinks_performed: recheck.shrink_path.len(),
                property_name: property_name.map(|s| s.to_string()),
                module_path: module_path.map(|s| s.to_string()),
                assertion_type,
                shrink_steps,
                recheck: Some(recheck),
            },
            pass => pass,
        }
    }
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: 'static + fmt::Debug,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition)
}

/// Create a property that checks a boolean condition with a named variable.
pub fn for_all_named<T, F>(generator: Gen<T>, variable_name: &str, condition: F) -> Property<T>
where
    T: 'static + fmt::Debug,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all_named(generator, variable_name, condition)
}

/// Create a property from a check returning `Result`.
pub fn for_all_result<T, F, E>(generator: Gen<T>, check: F) -> Property<T>
where
    T: 'static + fmt::Debug,
    F: Fn(&T) -> std::result::Result<(), E> + 'static,
    E: fmt::Display,
{
    Property::for_all_result(generator, check)
}
