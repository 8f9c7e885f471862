//! Rule registry and ruleset selection

use super::builtin::{
    LongFileRule, LongLineRule, MergeConflictMarkerRule, TodoCommentRule, TrailingWhitespaceRule,
};
use super::{Rule, RuleContext, RuleError};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Registry of available rules, in registration order
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule>>,
    order: Vec<String>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registry holding every rule compiled into lintgate
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MergeConflictMarkerRule));
        registry.register(Arc::new(LongFileRule));
        registry.register(Arc::new(LongLineRule));
        registry.register(Arc::new(TrailingWhitespaceRule));
        registry.register(Arc::new(TodoCommentRule));
        registry
    }

    /// Register a rule, replacing any rule with the same name
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        let name = rule.name().to_string();
        if self.rules.insert(name.clone(), rule).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.get(name)
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Rule names in registration order
    pub fn rule_names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Select the rules enabled by `filter`
    pub fn select(&self, filter: &RulesetFilter) -> Result<EnabledRules, RuleError> {
        for name in filter.enabled.iter().chain(filter.disabled.iter()) {
            if !self.has_rule(name) {
                return Err(RuleError::UnknownRule { name: name.clone() });
            }
        }

        let rules: Vec<Arc<dyn Rule>> = self
            .order
            .iter()
            .filter(|name| filter.enabled.is_empty() || filter.enabled.contains(*name))
            .filter(|name| !filter.disabled.contains(*name))
            .filter_map(|name| self.rules.get(name).cloned())
            .collect();

        if rules.is_empty() {
            return Err(RuleError::NoRulesLoaded);
        }

        tracing::info!(count = rules.len(), "rules loaded");
        Ok(EnabledRules {
            rules,
            context: RuleContext::new(filter.configurations.clone()),
        })
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Which rules run and with which options
#[derive(Debug, Clone, Default)]
pub struct RulesetFilter {
    /// When non-empty, only these rules are enabled
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
    pub configurations: BTreeMap<String, i64>,
}

/// Rules selected for a run, plus their options
#[derive(Clone)]
pub struct EnabledRules {
    rules: Vec<Arc<dyn Rule>>,
    context: RuleContext,
}

impl EnabledRules {
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn context(&self) -> &RuleContext {
        &self.context
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for EnabledRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnabledRules")
            .field("rules", &self.names())
            .field("context", &self.context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(filter: RulesetFilter) -> Result<Vec<&'static str>, RuleError> {
        RuleRegistry::builtin()
            .select(&filter)
            .map(|enabled| enabled.names())
    }

    #[test]
    fn test_builtin_registry() {
        let registry = RuleRegistry::builtin();
        assert_eq!(registry.len(), 5);
        assert!(registry.has_rule("long line"));
        assert_eq!(registry.rule_names()[0], "merge conflict marker");
    }

    #[test]
    fn test_select_all_by_default() {
        let selected = names(RulesetFilter::default()).unwrap();
        assert_eq!(selected.len(), 5);
    }

    #[test]
    fn test_select_enabled_only_keeps_registry_order() {
        let selected = names(RulesetFilter {
            enabled: vec!["todo comment".into(), "long line".into()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(selected, vec!["long line", "todo comment"]);
    }

    #[test]
    fn test_select_disabled() {
        let selected = names(RulesetFilter {
            disabled: vec!["long file".into()],
            ..Default::default()
        })
        .unwrap();
        assert!(!selected.contains(&"long file"));
        assert_eq!(selected.len(), 4);
    }

    #[test]
    fn test_unknown_rule_is_error() {
        let err = names(RulesetFilter {
            enabled: vec!["no such rule".into()],
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            RuleError::UnknownRule {
                name: "no such rule".into()
            }
        );
    }

    #[test]
    fn test_everything_disabled_means_no_rules() {
        let err = names(RulesetFilter {
            enabled: vec!["long line".into()],
            disabled: vec!["long line".into()],
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, RuleError::NoRulesLoaded);
    }

    #[test]
    fn test_empty_registry_loads_nothing() {
        let err = RuleRegistry::new()
            .select(&RulesetFilter::default())
            .unwrap_err();
        assert_eq!(err, RuleError::NoRulesLoaded);
    }
}
