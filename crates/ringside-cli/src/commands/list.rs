use ringside_core::CATALOG;

/// Render the timer catalog, the CLI's version of the create-timer screen.
pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&CATALOG)?);
        return Ok(());
    }

    println!("Create New Timer");
    println!();
    for entry in &CATALOG {
        println!("  {:<10} {}", entry.name, entry.description);
    }
    Ok(())
}
