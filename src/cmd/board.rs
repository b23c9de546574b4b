//! Milestone dashboard — `teamctl milestones`.

use anyhow::Result;
use console::style;

use teamctl::api::ApiClient;

pub async fn cmd_milestones(client: &ApiClient) -> Result<()> {
    let milestones = client.list_milestones().await?;

    println!("{}", style("Milestones").bold());
    if milestones.is_empty() {
        println!("  No milestones yet.");
        return Ok(());
    }
    for milestone in &milestones {
        println!();
        println!(
            "{} - {}",
            style(&milestone.date).cyan(),
            style(&milestone.deadline).cyan()
        );
        for task in &milestone.tasks {
            print!("  {}", style(&task.title).bold());
            if let Some(time) = &task.time {
                print!(" ({})", time);
            }
            println!();
            if !task.labels.is_empty() {
                println!("    labels: {}", task.labels.join(", "));
            }
            if let Some(count) = task.attachments {
                println!(
                    "    {} attachment{}",
                    count,
                    if count == 1 { "" } else { "s" }
                );
            }
        }
    }
    Ok(())
}
