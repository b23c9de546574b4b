//! Project commands — `teamctl project create|list`.

use anyhow::Result;
use console::style;
use dialoguer::Input;

use teamctl::api::ApiClient;
use teamctl::draft::ProjectDraft;
use teamctl::models::Project;
use teamctl::schedule::closest_issue;
use teamctl::session::SessionStore;

use super::auth::prompt_if_missing;

pub async fn cmd_project_create(
    client: &ApiClient,
    store: &SessionStore,
    name: Option<String>,
    organization: Option<String>,
    contributors: Vec<String>,
) -> Result<()> {
    let session = store.require()?;

    let mut draft = ProjectDraft::new();
    draft.name = prompt_if_missing(name, "Project name")?;
    draft.organization = prompt_if_missing(organization, "Organization")?;

    for contributor in &contributors {
        draft.contributors.add(contributor);
    }
    // No contributor flags and a live terminal: collect them interactively,
    // Enter on an empty line to finish. Blank and duplicate entries are
    // dropped by the tag list itself.
    if contributors.is_empty() && console::user_attended() {
        loop {
            let entry: String = Input::new()
                .with_prompt("Contributor (empty to finish)")
                .allow_empty(true)
                .interact_text()?;
            if entry.trim().is_empty() {
                break;
            }
            draft.contributors.add(&entry);
        }
    }

    let payload = draft.into_payload(&session.user.id)?;
    let created = client.create_project(&session, &payload).await?;

    println!(
        "{} Created project {}{}",
        style("✓").green(),
        style(&created.name).bold(),
        created
            .id
            .as_deref()
            .map(|id| format!(" ({})", id))
            .unwrap_or_default()
    );
    Ok(())
}

pub async fn cmd_project_list(client: &ApiClient, store: &SessionStore) -> Result<()> {
    let session = store.require()?;
    let projects = client.list_projects(&session).await?;

    render_section("Created by me", &projects.as_creator);
    render_section("Contributing to", &projects.as_contributor);
    Ok(())
}

fn render_section(title: &str, projects: &[Project]) {
    println!();
    println!("{}", style(title).bold().underlined());
    if projects.is_empty() {
        println!("  No projects here yet.");
        return;
    }
    for project in projects {
        let id = project.id.as_deref().unwrap_or("-");
        println!(
            "  {} {} ({})",
            style(&project.name).cyan().bold(),
            style(&project.organization).dim(),
            id
        );
        match closest_issue(&project.issues) {
            Some(issue) => {
                println!(
                    "    next: {} — due {}",
                    issue.title,
                    style(&issue.deadline).yellow()
                );
                if !issue.labels.is_empty() {
                    println!("    labels: {}", issue.labels.join(", "));
                }
            }
            None => println!("    No issues yet"),
        }
    }
}
