use rulefold::{DecisionEngine, ParallelConfig, RulefoldError, Table};

fn main() -> Result<(), RulefoldError> {
    let engine = DecisionEngine::builder("band")
        .default_action("high")
        .rule("model1 + model2 < 50", "low")
        .rule("(model1 + model2 >= 50) and model3 > 50", "high")
        .rule("(model1 + model2 < 99) and (model1 + model2 >= 50)", "medium")
        .parallel(ParallelConfig {
            enabled: true,
            min_rows: 1_000,
        })
        .build()?;

    let rows = 50_000;
    let table = Table::builder()
        .numeric("model1", (0..rows).map(|i| f64::from(i % 60)))
        .numeric("model2", (0..rows).map(|i| f64::from(i % 47)))
        .numeric("model3", (0..rows).map(|i| f64::from(i % 101)))
        .build()?;

    let report = engine.execute_detailed(&table)?;
    println!("{report}");
    for (rule, hits) in engine.rules().iter().zip(report.rule_hits()) {
        println!(
            "  #{} {:<50} -> {:<6} {hits} rows",
            rule.position(),
            rule.source().unwrap_or("<expr>"),
            engine.chain().action_of(rule),
        );
    }
    println!("  default -> {} rows", report.default_hits());
    Ok(())
}
