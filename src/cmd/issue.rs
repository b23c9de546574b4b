//! Issue commands — `teamctl issue create|list`.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, TimeZone, Utc};
use console::style;
use dialoguer::{Input, Select};

use teamctl::api::ApiClient;
use teamctl::draft::{IssueDraft, PatternList};
use teamctl::models::{RULE_TYPES, RuleType};
use teamctl::schedule::issues_due_on;
use teamctl::session::SessionStore;

use super::auth::prompt_if_missing;

#[allow(clippy::too_many_arguments)]
pub async fn cmd_issue_create(
    client: &ApiClient,
    store: &SessionStore,
    project_id: &str,
    title: Option<String>,
    deadline: Option<String>,
    name: Option<String>,
    labels: Vec<String>,
    command: Option<String>,
    materials: Vec<String>,
    products: Vec<String>,
) -> Result<()> {
    let session = store.require()?;

    let mut draft = IssueDraft::new();
    draft.title = prompt_if_missing(title, "Title")?;
    let deadline = prompt_if_missing(deadline, "Deadline (YYYY-MM-DD)")?;
    draft.deadline = Some(parse_deadline_input(&deadline)?);
    draft.name = prompt_if_missing(name, "Step name (e.g. build-step)")?;
    draft.command = command.unwrap_or_default();

    for label in &labels {
        draft.labels.add(label);
    }
    if labels.is_empty() && console::user_attended() {
        loop {
            let entry: String = Input::new()
                .with_prompt("Label (empty to finish)")
                .allow_empty(true)
                .interact_text()?;
            if entry.trim().is_empty() {
                break;
            }
            draft.labels.add(&entry);
        }
    }

    fill_patterns(&mut draft.materials, &materials, "material")?;
    fill_patterns(&mut draft.products, &products, "product")?;

    let payload = draft.into_payload(project_id)?;
    client.create_issue(&session, project_id, &payload).await?;

    println!(
        "{} Created issue {} on project {}.",
        style("✓").green(),
        style(&payload.title).bold(),
        project_id
    );
    Ok(())
}

pub async fn cmd_issue_list(
    client: &ApiClient,
    store: &SessionStore,
    project_id: &str,
    due: Option<&str>,
    today: bool,
) -> Result<()> {
    let session = store.require()?;

    let day = if today {
        Some(Local::now().date_naive())
    } else {
        due.map(parse_day).transpose()?
    };

    let issues = client.list_issues(&session, project_id).await?;
    let filtered = issues_due_on(day, &issues);

    if let Some(day) = day {
        println!("{}", style(format!("Issues due {}", day)).bold());
    } else {
        println!("{}", style("Issues").bold());
    }

    if filtered.is_empty() {
        println!("  No issues due on selected date.");
        return Ok(());
    }
    for issue in filtered {
        let id = issue.id.as_deref().unwrap_or("-");
        println!(
            "  {} — due {} ({})",
            style(&issue.title).cyan(),
            style(&issue.deadline).yellow(),
            id
        );
        if !issue.labels.is_empty() {
            println!("    labels: {}", issue.labels.join(", "));
        }
    }
    Ok(())
}

/// Parse a `RULE:PATTERN` flag value, e.g. `REQUIRE:*.cpp`.
pub(crate) fn parse_rule_pattern(raw: &str) -> Result<(RuleType, String)> {
    let (rule, pattern) = raw
        .split_once(':')
        .with_context(|| format!("Expected RULE:PATTERN, got '{}'", raw))?;
    let rule: RuleType = rule.trim().parse().map_err(|e: String| anyhow::anyhow!(e))?;
    Ok((rule, pattern.to_string()))
}

/// A calendar day on the issue form means local midnight, stored in UTC.
fn parse_deadline_input(raw: &str) -> Result<chrono::DateTime<Utc>> {
    let day = parse_day(raw)?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .context("Invalid deadline date")?;
    let local = Local
        .from_local_datetime(&midnight)
        .earliest()
        .context("Deadline date does not exist in the local timezone")?;
    Ok(local.with_timezone(&Utc))
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Expected a date as YYYY-MM-DD, got '{}'", raw))
}

/// Fill a pattern list from `RULE:PATTERN` flags, or interactively when no
/// flags were given and a terminal is attached.
fn fill_patterns(list: &mut PatternList, flags: &[String], kind: &str) -> Result<()> {
    for raw in flags {
        let (rule, pattern) = parse_rule_pattern(raw)?;
        list.add(rule, &pattern);
    }
    if flags.is_empty() && console::user_attended() {
        loop {
            let pattern: String = Input::new()
                .with_prompt(format!("Expected {} pattern (empty to finish)", kind))
                .allow_empty(true)
                .interact_text()?;
            if pattern.trim().is_empty() {
                break;
            }
            let rule_idx = Select::new()
                .with_prompt("Rule")
                .items(RULE_TYPES)
                .default(4) // REQUIRE, the form's default
                .interact()?;
            list.add(RULE_TYPES[rule_idx], &pattern);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rule_pattern_accepts_rule_and_glob() {
        let (rule, pattern) = parse_rule_pattern("REQUIRE:*.cpp").unwrap();
        assert_eq!(rule, RuleType::Require);
        assert_eq!(pattern, "*.cpp");
    }

    #[test]
    fn parse_rule_pattern_keeps_colons_in_pattern() {
        let (rule, pattern) = parse_rule_pattern("ALLOW:src:gen/*.rs").unwrap();
        assert_eq!(rule, RuleType::Allow);
        assert_eq!(pattern, "src:gen/*.rs");
    }

    #[test]
    fn parse_rule_pattern_rejects_unknown_rule() {
        assert!(parse_rule_pattern("FORBID:*.cpp").is_err());
        assert!(parse_rule_pattern("no-separator").is_err());
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert!(parse_day("2025-04-20").is_ok());
        assert!(parse_day("April 20").is_err());
    }

    #[test]
    fn deadline_input_is_local_midnight() {
        let dt = parse_deadline_input("2025-04-20").unwrap();
        assert_eq!(dt.with_timezone(&Local).date_naive().to_string(), "2025-04-20");
    }
}
