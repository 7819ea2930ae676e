use std::path::Path;

use anyhow::{Context as _, Result};
use clap::Args;
use helpdesk_core::config::{self, PROJECT_DIR, ProjectConfig};
use helpdesk_core::db;

use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Rewrite the config even if `.helpdesk/` already exists. Existing
    /// tickets are kept.
    #[arg(long)]
    pub force: bool,
}

/// Execute `hd init`. Creates the project skeleton:
///
/// ```text
/// .helpdesk/
///   config.toml        (default project config)
///   tickets.sqlite3    (empty ticket store)
/// ```
///
/// # Errors
///
/// Returns an error if `.helpdesk/` already exists and `--force` is not set,
/// or if any filesystem or store operation fails.
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let project_dir = project_root.join(PROJECT_DIR);
    if project_dir.exists() && !args.force {
        anyhow::bail!(
            "{PROJECT_DIR}/ already exists. Use `hd init --force` to rewrite its config."
        );
    }

    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("Failed to create {}", project_dir.display()))?;

    let project_config = ProjectConfig::default();
    let config_path = config::config_path(project_root);
    std::fs::write(&config_path, config::to_toml(&project_config)?)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    let store_path = project_config.store_path(project_root);
    db::open_store(&store_path)?;
    tracing::info!(root = %project_root.display(), "project initialized");

    render_success(output, &format!("Initialized {PROJECT_DIR}/ project structure."))?;
    if !output.is_json() {
        println!();
        println!("  Config: {PROJECT_DIR}/config.toml");
        println!("  Store:  {}", project_config.store.path.display());
        println!();
        println!("Next steps:");
        println!("  Open your first ticket:");
        println!("    hd create --title \"VPN drops\" --description \"Every hour since Monday\"");
        println!("  Browse the tickets you created:");
        println!("    hd list --source store");
    }

    Ok(())
}
