use proptest::prelude::*;
use rulefold::{col, lit, DecisionEngine, Expr, ParallelConfig, Table};

// --- Fixed column schema ---
// score  : number (0..=120, integral) or NaN
// amount : number (-50..50)
// region : string, one of REGIONS
// label  : string, one of LABELS (used for action indirection)

pub const REGIONS: &[&str] = &["us-east", "us-west", "eu", "ap"];
pub const LABELS: &[&str] = &["alpha", "beta", "gamma"];
pub const ACTIONS: &[&str] = &["approve", "review", "deny", "label"];

/// One generated row, kept so tests can compute expected results row by row.
#[derive(Debug, Clone)]
pub struct Row {
    pub score: f64,
    pub amount: f64,
    pub region: &'static str,
    pub label: &'static str,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<RowValue> {
        match column {
            "score" => Some(RowValue::Number(self.score)),
            "amount" => Some(RowValue::Number(self.amount)),
            "region" => Some(RowValue::Str(self.region)),
            "label" => Some(RowValue::Str(self.label)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RowValue {
    Number(f64),
    Str(&'static str),
}

impl RowValue {
    /// Rendering used when an action names this column.
    pub fn render(self) -> String {
        match self {
            RowValue::Number(v) => format!("{v:?}"),
            RowValue::Str(s) => s.to_owned(),
        }
    }
}

fn arb_row() -> impl Strategy<Value = Row> {
    (
        prop_oneof![9 => (0_u8..=120).prop_map(f64::from), 1 => Just(f64::NAN)],
        -50.0_f64..50.0,
        prop::sample::select(REGIONS),
        prop::sample::select(LABELS),
    )
        .prop_map(|(score, amount, region, label)| Row {
            score,
            amount,
            region,
            label,
        })
}

pub fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(arb_row(), 0..64)
}

pub fn table_of(rows: &[Row]) -> Table {
    Table::builder()
        .numeric("score", rows.iter().map(|r| r.score))
        .numeric("amount", rows.iter().map(|r| r.amount))
        .strings("region", rows.iter().map(|r| r.region))
        .strings("label", rows.iter().map(|r| r.label))
        .build()
        .unwrap()
}

/// Generate a well-typed boolean leaf over the schema.
fn arb_leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (0_u8..=120, 0_u8..6).prop_map(|(val, op)| {
            let c = col("score");
            let v = f64::from(val);
            match op {
                0 => c.eq(v),
                1 => c.neq(v),
                2 => c.gt(v),
                3 => c.gte(v),
                4 => c.lt(v),
                _ => c.lte(v),
            }
        }),
        (-50_i32..50, any::<bool>()).prop_map(|(val, gt)| {
            let sum = col("amount") + col("score");
            if gt {
                sum.gt(val)
            } else {
                sum.lte(val)
            }
        }),
        (prop::sample::select(REGIONS), any::<bool>()).prop_map(|(val, is_eq)| {
            if is_eq {
                col("region").eq(val)
            } else {
                col("region").neq(val)
            }
        }),
        any::<bool>().prop_map(lit),
    ]
}

/// Generate a boolean expression tree of bounded depth.
pub fn arb_condition() -> impl Strategy<Value = Expr> {
    arb_leaf().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.or(b)),
            inner.prop_map(|a| !a),
        ]
    })
}

/// A generated engine definition: conditions are kept as text so they go
/// through the parser, and as `Expr` for the row-by-row oracle.
#[derive(Debug, Clone)]
pub struct GenEngine {
    pub default_action: &'static str,
    pub rules: Vec<(Expr, &'static str)>,
}

impl GenEngine {
    pub fn build(&self) -> DecisionEngine {
        self.build_with(ParallelConfig::disabled())
    }

    pub fn build_with(&self, parallel: ParallelConfig) -> DecisionEngine {
        self.rules
            .iter()
            .fold(
                DecisionEngine::builder("action")
                    .default_action(self.default_action)
                    .parallel(parallel),
                |builder, (expr, action)| builder.rule(expr.to_string(), *action),
            )
            .build()
            .unwrap()
    }
}

pub fn arb_engine() -> impl Strategy<Value = GenEngine> {
    (
        prop::sample::select(ACTIONS),
        prop::collection::vec((arb_condition(), prop::sample::select(ACTIONS)), 0..6),
    )
        .prop_map(|(default_action, rules)| GenEngine {
            default_action,
            rules,
        })
}
