// src/cli/groups.rs — `heyme groups ...`

use super::docs::load_library;
use super::{confirm, CliContext, GroupsAction};

pub async fn run_groups(ctx: &CliContext, action: GroupsAction) -> anyhow::Result<()> {
    ctx.require_login()?;
    let groups = ctx.groups();

    match action {
        GroupsAction::List => {
            let library = load_library(ctx).await?;
            if library.groups().is_empty() {
                println!("No folders yet. Create one with `heyme groups create <name>`.");
                return Ok(());
            }
            for group in library.groups() {
                let count = library
                    .documents()
                    .iter()
                    .filter(|d| d.group_id.as_deref() == Some(group.id.as_str()))
                    .count();
                let persona = if group.persona_prompt.as_deref().is_some_and(|p| !p.is_empty()) {
                    " (persona set)"
                } else {
                    ""
                };
                println!("  {:<36}  {:>3} doc(s)  {}{}", group.id, count, group.name, persona);
                if let Some(desc) = group.description.as_deref().filter(|d| !d.is_empty()) {
                    println!("  {:<36}  {}", "", desc);
                }
            }
        }
        GroupsAction::Create { name, description } => {
            let group = groups.create(&name, description.as_deref()).await?;
            println!("Created folder {} ({}).", group.name, group.id);
        }
        GroupsAction::Rename { id, name } => {
            let group = groups.rename(&id, &name).await?;
            println!("Renamed {} to {}.", group.id, group.name);
        }
        GroupsAction::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete folder {id} and every document in it?")) {
                println!("Cancelled.");
                return Ok(());
            }
            groups.delete(&id).await?;
            println!("Deleted folder {id}.");
        }
        GroupsAction::Persona { id, text } => {
            let text = text.join(" ");
            let group = groups.update_persona(&id, text.trim()).await?;
            if text.trim().is_empty() {
                println!("Cleared the persona for {}.", group.name);
            } else {
                println!("Saved the persona for {}.", group.name);
            }
        }
    }
    Ok(())
}
