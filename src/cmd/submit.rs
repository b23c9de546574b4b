//! Submission command — `teamctl submit`.
//!
//! Mirrors the submission page flow: fetch any existing submission to
//! prefill the draft, then PUT a replacement when one existed or POST the
//! first one otherwise.

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use dialoguer::Input;

use teamctl::api::ApiClient;
use teamctl::draft::SubmissionDraft;
use teamctl::draft::submission::parse_file_entry;

#[allow(clippy::too_many_arguments)]
pub async fn cmd_submit(
    client: &ApiClient,
    project_id: &str,
    issue_id: &str,
    name: Option<String>,
    materials: Vec<String>,
    material_files: Vec<PathBuf>,
    products: Vec<String>,
    product_files: Vec<PathBuf>,
) -> Result<()> {
    let existing = client.get_submission(project_id, issue_id).await?;
    let updating = existing.is_some();

    let mut draft = existing
        .as_ref()
        .map(SubmissionDraft::from_link)
        .unwrap_or_default();
    if let Some(name) = name {
        draft.name = name;
    }

    for raw in &materials {
        let entry = parse_file_entry(raw)?;
        draft.add_material(&entry.filename, &entry.sha256);
    }
    for path in &material_files {
        draft.add_material_from_path(path)?;
    }
    for raw in &products {
        let entry = parse_file_entry(raw)?;
        draft.add_product(&entry.filename, &entry.sha256);
    }
    for path in &product_files {
        draft.add_product_from_path(path)?;
    }

    let no_entry_flags = materials.is_empty()
        && material_files.is_empty()
        && products.is_empty()
        && product_files.is_empty();
    if no_entry_flags && console::user_attended() {
        collect_entries(&mut draft, Kind::Material)?;
        collect_entries(&mut draft, Kind::Product)?;
    }

    let link = draft.into_link(project_id, issue_id);
    if updating {
        client.update_submission(project_id, issue_id, &link).await?;
    } else {
        client.create_submission(project_id, issue_id, &link).await?;
    }

    println!(
        "{} {} submission for issue {} ({} materials, {} products).",
        style("✓").green(),
        if updating { "Updated" } else { "Created" },
        issue_id,
        link.materials.len(),
        link.products.len()
    );
    Ok(())
}

enum Kind {
    Material,
    Product,
}

/// Interactive entry loop. Input is either `filename=hash` or a path to an
/// existing file, which gets hashed.
fn collect_entries(draft: &mut SubmissionDraft, kind: Kind) -> Result<()> {
    let label = match kind {
        Kind::Material => "Material (filename=hash or path, empty to finish)",
        Kind::Product => "Product (filename=hash or path, empty to finish)",
    };
    loop {
        let raw: String = Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        let raw = raw.trim();
        if raw.is_empty() {
            break;
        }
        if raw.contains('=') {
            let entry = parse_file_entry(raw)?;
            match kind {
                Kind::Material => draft.add_material(&entry.filename, &entry.sha256),
                Kind::Product => draft.add_product(&entry.filename, &entry.sha256),
            }
        } else {
            let path = Path::new(raw);
            match kind {
                Kind::Material => draft.add_material_from_path(path)?,
                Kind::Product => draft.add_product_from_path(path)?,
            }
        }
    }
    Ok(())
}
