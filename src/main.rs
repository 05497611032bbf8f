use spa_edge_router::handler::EdgeRouter;
use spa_edge_router::{logger, Config};
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config path without extension, "config" resolves config.toml
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    let router = EdgeRouter::from_config(&cfg)?;
    logger::log_startup(&cfg, router.policy());

    // One request descriptor per line in, one outcome per line out
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    for (number, line) in stdin.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = router.handle_json(&line).unwrap_or_else(|e| {
            // Not JSON: nothing to pass through, emit null to keep lines aligned
            logger::log_warning(&format!("Line {} is not JSON: {e}", number + 1));
            "null".to_string()
        });
        writeln!(stdout, "{outcome}")?;
        stdout.flush()?;
    }

    Ok(())
}
