//! Registry of available reporters

use super::{HtmlReporter, JsonReporter, Reporter, TextReporter, XmlReporter};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Reporter resolution failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReporterError {
    #[error("cannot find reporter for report type: {name} (available: {available})")]
    Unknown { name: String, available: String },

    /// Only reachable through [`ReporterRegistry::resolve`] directly; a
    /// driver run rejects an empty report list during configuration.
    #[error("no report type requested")]
    NoneRequested,
}

/// Reporters known to this build, keyed by name
pub struct ReporterRegistry {
    reporters: HashMap<&'static str, Arc<dyn Reporter>>,
}

impl ReporterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            reporters: HashMap::new(),
        }
    }

    /// Registry with the text, json, html and xml reporters
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextReporter));
        registry.register(Arc::new(JsonReporter));
        registry.register(Arc::new(HtmlReporter));
        registry.register(Arc::new(XmlReporter));
        registry
    }

    /// Register a reporter, replacing any reporter with the same name
    pub fn register(&mut self, reporter: Arc<dyn Reporter>) {
        self.reporters.insert(reporter.name(), reporter);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Reporter>> {
        self.reporters.get(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.reporters.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Resolve requested names in order; repeated names resolve once
    pub fn resolve(&self, names: &[String]) -> Result<Vec<Arc<dyn Reporter>>, ReporterError> {
        let mut resolved: Vec<Arc<dyn Reporter>> = Vec::new();

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let reporter = self.get(name).ok_or_else(|| ReporterError::Unknown {
                name: name.to_string(),
                available: self.names().join(", "),
            })?;
            if !resolved.iter().any(|r| r.name() == reporter.name()) {
                resolved.push(Arc::clone(reporter));
            }
        }

        if resolved.is_empty() {
            return Err(ReporterError::NoneRequested);
        }
        Ok(resolved)
    }
}

impl Default for ReporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(
            ReporterRegistry::builtin().names(),
            vec!["html", "json", "text", "xml"]
        );
    }

    #[test]
    fn test_resolve_keeps_requested_order() {
        let resolved = ReporterRegistry::builtin()
            .resolve(&request(&["xml", "text", "html"]))
            .unwrap();
        let names: Vec<_> = resolved.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["xml", "text", "html"]);
    }

    #[test]
    fn test_resolve_skips_repeats() {
        let resolved = ReporterRegistry::builtin()
            .resolve(&request(&["json", "json", " json "]))
            .unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_unknown_reporter() {
        let err = ReporterRegistry::builtin()
            .resolve(&request(&["text", "pmd"]))
            .err()
            .unwrap();
        assert!(matches!(err, ReporterError::Unknown { ref name, .. } if name == "pmd"));
        assert!(err.to_string().contains("pmd"));
    }

    #[test]
    fn test_nothing_requested() {
        let err = ReporterRegistry::builtin().resolve(&[]).err().unwrap();
        assert_eq!(err, ReporterError::NoneRequested);
    }
}
