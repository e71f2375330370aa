// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use chrono::Utc;

/// Resolves tokenised directory templates at archive time.
///
/// Expansion may depend on call-time context (typically the wall clock), so a
/// tokenised template must be re-expanded on every invocation.
pub trait TokenExpander {
    /// True when `template` contains tokens whose expansion can vary per call.
    fn is_templated(&self, template: &str) -> bool;

    /// Expands `template` into a concrete directory path.
    fn expand(&self, template: &str) -> String;
}

/// Expands chrono strftime conversions (`%Y`, `%m`, ...) against the current
/// UTC time, e.g. `archive/%Y-%m` -> `archive/2026-08`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrftimeExpander;

impl TokenExpander for StrftimeExpander {
    fn is_templated(&self, template: &str) -> bool {
        template.contains('%')
    }

    fn expand(&self, template: &str) -> String {
        Utc::now().format(template).to_string()
    }
}
