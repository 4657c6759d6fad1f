use crate::types::{ActionValue, EvaluationError, Mask, ParallelConfig, Rule, RuleChain, Table};

/// Result of folding a rule chain over one table.
pub(crate) struct Decisions {
    pub(crate) values: Vec<String>,
    pub(crate) decided_by: Vec<Option<usize>>,
    pub(crate) rule_hits: Vec<usize>,
}

/// Evaluate every rule's mask, then fold them in rule order: a row takes the
/// action of the first rule whose mask is true for it, else the default.
pub(crate) fn apply(
    chain: &RuleChain,
    table: &Table,
    parallel: &ParallelConfig,
) -> Result<Decisions, EvaluationError> {
    let rows = table.num_rows();
    let masks = evaluate_masks(chain.rules(), table, parallel)?;

    let mut decided_by: Vec<Option<usize>> = vec![None; rows];
    let mut rule_hits = vec![0; chain.rules().len()];
    let mut undecided = rows;

    for (rule, mask) in chain.rules().iter().zip(&masks) {
        if undecided == 0 {
            break;
        }
        let mut hits = 0;
        for (slot, matched) in decided_by.iter_mut().zip(mask.iter()) {
            if matched && slot.is_none() {
                *slot = Some(rule.position);
                hits += 1;
            }
        }
        undecided -= hits;
        rule_hits[rule.position] = hits;
        tracing::trace!(rule = rule.position, hits, undecided, "rule applied");
    }

    let actions: Vec<ActionValue<'_>> = chain
        .actions()
        .iter()
        .map(|action| ActionValue::resolve(action, table))
        .collect();

    let values = decided_by
        .iter()
        .enumerate()
        .map(|(row, decided)| {
            let action = match decided {
                Some(position) => chain.rules()[*position].action,
                None => chain.default_action,
            };
            actions[action].value_at(row)
        })
        .collect();

    Ok(Decisions {
        values,
        decided_by,
        rule_hits,
    })
}

fn evaluate_rule(rule: &Rule, table: &Table) -> Result<Mask, EvaluationError> {
    crate::evaluate::evaluate(&rule.condition, table).map_err(|err| {
        tracing::debug!(rule = rule.position, error = %err, "rule failed to evaluate");
        err
    })
}

/// Masks in rule order. On failure the error of the lowest failing rule is
/// returned, whether or not evaluation ran in parallel.
fn evaluate_masks(
    rules: &[Rule],
    table: &Table,
    parallel: &ParallelConfig,
) -> Result<Vec<Mask>, EvaluationError> {
    if parallel.should_parallelize(table.num_rows(), rules.len()) {
        return evaluate_parallel(rules, table).into_iter().collect();
    }
    rules.iter().map(|rule| evaluate_rule(rule, table)).collect()
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(rules: &[Rule], table: &Table) -> Vec<Result<Mask, EvaluationError>> {
    use rayon::prelude::*;

    rules
        .par_iter()
        .map(|rule| evaluate_rule(rule, table))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(rules: &[Rule], table: &Table) -> Vec<Result<Mask, EvaluationError>> {
    rules.iter().map(|rule| evaluate_rule(rule, table)).collect()
}
