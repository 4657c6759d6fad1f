use rulefold::{DecisionEngine, RulefoldError, Table};

fn main() -> Result<(), RulefoldError> {
    let engine = DecisionEngine::new(
        "risk",
        "high",
        [
            ("is_pep > 0", "auto_high"),
            ("score < 80", "low"),
            ("score <= 99", "medium"),
        ],
    )?;

    let table = Table::builder()
        .numeric("score", [0, 50, 85, 95, 105, 20])
        .numeric("is_pep", [0, 0, 0, 0, 0, 1])
        .build()?;

    let column = engine.execute(&table)?;
    println!("{engine}");
    println!("{column}");
    println!("possible actions: {:?}", engine.possible_actions());
    Ok(())
}
