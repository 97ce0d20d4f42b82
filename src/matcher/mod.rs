//! Pattern matcher cascade
//!
//! Resolution order is fixed and earlier stages shadow later ones:
//! registry → navigation → search → filter → page actions → fallback chain.
//! Each family is an ordered table of `(name, pattern, builder)` rows, first
//! match wins. A builder may decline (return `None`) to let the next row try.

mod families;
mod fallback;
pub mod vocab;

use crate::error::TableError;
use crate::intent::{Action, Intent};
use crate::registry::Registry;
use crate::wake::normalize;
use regex::{Captures, Regex};

/// Turns a regex match into an action, or declines
pub type Builder = fn(&Captures<'_>) -> Option<Action>;

/// Static table row: rule name, anchored pattern, builder
pub type RuleRow = (&'static str, &'static str, Builder);

struct Rule {
    name: &'static str,
    pattern: Regex,
    build: Builder,
}

/// An ordered list of rules with a family-level priority (lower runs first)
pub struct Family {
    name: &'static str,
    priority: u8,
    rules: Vec<Rule>,
}

impl Family {
    /// Compile a table. A bad pattern is a load-time defect.
    pub fn compile(name: &'static str, priority: u8, table: &[RuleRow]) -> Result<Self, TableError> {
        let rules = table
            .iter()
            .map(|&(rule, pattern, build)| {
                let pattern = Regex::new(pattern).map_err(|source| TableError::Pattern {
                    family: name,
                    rule,
                    source,
                })?;
                Ok(Rule {
                    name: rule,
                    pattern,
                    build,
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;
        Ok(Self {
            name,
            priority,
            rules,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// First rule that matches and builds, with its name
    fn resolve(&self, command: &str) -> Option<(&'static str, Action)> {
        self.rules.iter().find_map(|rule| {
            let caps = rule.pattern.captures(command)?;
            (rule.build)(&caps).map(|action| (rule.name, action))
        })
    }
}

/// Which stage produced an intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub family: &'static str,
    pub rule: &'static str,
    pub intent: Intent,
}

pub struct Cascade {
    registry: Registry,
    families: Vec<Family>,
}

impl Cascade {
    pub fn new(registry: Registry) -> Result<Self, TableError> {
        let mut families = vec![
            Family::compile("navigation", 20, families::NAVIGATION)?,
            Family::compile("search", 30, families::SEARCH)?,
            Family::compile("filter", 40, families::FILTER)?,
            Family::compile("page", 50, families::PAGE_ACTIONS)?,
        ];
        families.sort_by_key(Family::priority);
        Ok(Self { registry, families })
    }

    /// Cascade over the built-in registry only
    pub fn builtin() -> Result<Self, TableError> {
        Self::new(Registry::builtin()?)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve a wake-word-stripped command. Total over input: no match is `None`.
    pub fn resolve(&self, command: &str) -> Option<Intent> {
        self.explain(command).map(|r| r.intent)
    }

    /// Like [`Cascade::resolve`] but also reports which stage matched
    pub fn explain(&self, command: &str) -> Option<Resolution> {
        let command = normalize(command);
        if command.is_empty() {
            return None;
        }

        let (family, rule, action) = if let Some(action) = self.registry.lookup(&command) {
            ("registry", "exact", action.clone())
        } else if let Some((family, rule, action)) = self
            .families
            .iter()
            .find_map(|f| f.resolve(&command).map(|(rule, action)| (f.name(), rule, action)))
        {
            (family, rule, action)
        } else {
            let (rule, action) = fallback::resolve(&command)?;
            ("fallback", rule, action)
        };

        tracing::debug!(family, rule, command = %command, "matched {}", action);
        Some(Resolution {
            family,
            rule,
            intent: action.with_utterance(command),
        })
    }
}
