use std::collections::HashMap;

use crate::types::{CompileError, Rule, RuleChain};
use crate::Expr;

/// A rule condition as supplied by the caller.
#[derive(Debug, Clone)]
pub(crate) enum Condition {
    Text(String),
    Parsed(Expr),
}

/// Parse every condition and intern every action. Fails on the first
/// malformed condition; no partial chain is produced.
pub(crate) fn compile(
    key: String,
    default_action: String,
    rules: Vec<(Condition, String)>,
) -> Result<RuleChain, CompileError> {
    let mut interner = ActionInterner::default();
    let mut compiled = Vec::with_capacity(rules.len());

    for (position, (condition, action)) in rules.into_iter().enumerate() {
        let (condition, source) = match condition {
            Condition::Text(text) => match crate::parse::parse(&text) {
                Ok(expr) => (expr, Some(text)),
                Err(source) => {
                    return Err(CompileError::InvalidCondition {
                        index: position,
                        condition: text,
                        source,
                    })
                }
            },
            Condition::Parsed(expr) => (expr, None),
        };
        compiled.push(Rule {
            position,
            condition,
            source,
            action: interner.intern(action),
        });
    }

    let default_action = interner.intern(default_action);

    tracing::debug!(
        key = %key,
        rules = compiled.len(),
        actions = interner.actions.len(),
        "compiled rule chain"
    );

    Ok(RuleChain {
        key,
        rules: compiled,
        actions: interner.actions,
        default_action,
    })
}

#[derive(Default)]
struct ActionInterner {
    actions: Vec<String>,
    index: HashMap<String, usize>,
}

impl ActionInterner {
    fn intern(&mut self, action: String) -> usize {
        if let Some(&idx) = self.index.get(&action) {
            return idx;
        }
        let idx = self.actions.len();
        self.index.insert(action.clone(), idx);
        self.actions.push(action);
        idx
    }
}
