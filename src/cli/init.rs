//! Init command - write a default geo-audit.toml

use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# geo-audit configuration
# CLI flags override the values below.

[criteria]
# Words required in the opening sentence (direct answer)
min_intro_words = 6
# H2-H4 headings required
min_headings = 2
# Numerals required (facts and numbers)
min_numbers = 1
# Items required in at least one list
min_list_items = 2
# Body words required
min_words = 500
# Meta description length, inclusive
meta_min_len = 120
meta_max_len = 160
# Stricter definition, facts and citation checks
strict = false

[wordpress]
# Safety limit on pages fetched
max_pages = 50
# Posts per page (1-100)
per_page = 100
# Pause between page requests
delay_ms = 200

[http]
timeout_secs = 20
user_agent = "Mozilla/5.0 (compatible; GeoAuditTool/1.0)"

[output]
# Initial rows per page in the HTML report
page_size = 10
"#;

/// Run the init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", path.display());
    }

    let config_path = path.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!(
            "{}{} already exists (use --force to overwrite)",
            style("✓ ").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{}Created {}",
        style("✓ ").green(),
        style(config_path.display()).cyan()
    );
    println!("\nNext steps:");
    println!(
        "  {}",
        style("geo-audit audit --source json --input articles.json").cyan()
    );

    Ok(())
}
