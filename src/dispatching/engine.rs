//! Rule engine for multi-criteria dispatching.
//!
//! Composes a primary rule with tie-breaking rules, evaluated in sequence:
//! a later rule is consulted only when every earlier rule ties. Input
//! order settles whatever the rules leave tied.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, Job};
use crate::models::Ticks;

/// A composable rule engine for job selection.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::HighestPriority)
///     .with_rule(rules::FirstCome);
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "FCFS"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine (pure insertion order).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// `rule`, then lowest arrival time, then insertion order.
    ///
    /// This is the tie-break chain every built-in policy uses.
    pub fn canonical<R: DispatchingRule + 'static>(rule: R) -> Self {
        Self::new().with_rule(rule).with_rule(rules::FirstCome)
    }

    /// Appends a rule to the evaluation chain.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Orders two jobs; `Less` means `a` is dispatched first.
    pub fn compare(&self, a: &Job<'_>, b: &Job<'_>) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a).cmp(&rule.evaluate(b)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }

        a.index.cmp(&b.index)
    }

    /// Index of the best job among those ready at `clock`.
    ///
    /// Returns `None` when no job has arrived with work remaining.
    pub fn select_best(&self, jobs: &[Job<'_>], clock: Ticks) -> Option<usize> {
        jobs.iter()
            .enumerate()
            .filter(|(_, j)| j.is_ready_at(clock))
            .min_by(|(_, a), (_, b)| self.compare(a, b))
            .map(|(i, _)| i)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
