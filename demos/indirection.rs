use rulefold::{col, DecisionEngine, RulefoldError, Table};

/// Actions that name a column emit that column's per-row value.
fn main() -> Result<(), RulefoldError> {
    let engine = DecisionEngine::builder("offer")
        .default_action("base_offer")
        .rule("segment == 'vip' and spend > 1000", "vip_offer")
        .rule_expr(col("spend").gt(500), "silver")
        .build()?;

    let table = Table::builder()
        .strings("segment", ["vip", "vip", "retail", "retail"])
        .numeric("spend", [1500.0, 700.0, 800.0, 10.0])
        .strings("vip_offer", ["lounge", "lounge+", "-", "-"])
        .numeric("base_offer", [5.0, 5.0, 2.5, 2.5])
        .build()?;

    for (row, value) in engine.execute(&table)?.iter().enumerate() {
        println!("row {row}: {value}");
    }
    Ok(())
}
