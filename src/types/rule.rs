use super::expr::Expr;

/// One compiled condition/action pair.
///
/// Rules are created by [`DecisionEngine`](super::DecisionEngine)
/// construction and never change afterwards. `position` is the rule's index
/// in the configured list; lower positions win when several rules match a row.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub(crate) position: usize,
    pub(crate) condition: Expr,
    pub(crate) source: Option<String>,
    pub(crate) action: usize,
}

impl Rule {
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn condition(&self) -> &Expr {
        &self.condition
    }

    /// The condition text this rule was parsed from, if it came from a string.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Ordered rules plus the default action and output key.
///
/// Distinct action strings are stored once in `actions`; rules and the
/// default refer to them by index so each is resolved once per call.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleChain {
    pub(crate) key: String,
    pub(crate) rules: Vec<Rule>,
    pub(crate) actions: Vec<String>,
    pub(crate) default_action: usize,
}

impl RuleChain {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn default_action(&self) -> &str {
        &self.actions[self.default_action]
    }

    /// The action string of `rule`.
    #[must_use]
    pub fn action_of(&self, rule: &Rule) -> &str {
        &self.actions[rule.action]
    }

    /// Every distinct action (rule actions and the default), in first-seen order.
    #[must_use]
    pub fn actions(&self) -> &[String] {
        &self.actions
    }
}
