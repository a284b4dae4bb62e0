use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Table};

use scout_core::{AgentClient, HttpAgentClient, ScoutConfig};

pub async fn handle_agents_command(format: &str) -> anyhow::Result<()> {
    let config = ScoutConfig::load()?;
    let client = HttpAgentClient::new(&config.agent)?;

    let agents = client.list_agents().await?;

    if format == "json" {
        let output: Vec<serde_json::Value> = agents
            .iter()
            .map(|agent| {
                serde_json::json!({
                    "id": agent.id,
                    "name": agent.name,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if agents.is_empty() {
        println!("{}", "No agents available in the directory.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![Cell::new("Id"), Cell::new("Name")]);

    for agent in &agents {
        table.add_row(vec![
            Cell::new(&agent.id),
            Cell::new(agent.display_name()),
        ]);
    }

    println!("{table}");
    println!(
        "{} agent{} in the directory",
        agents.len(),
        if agents.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
