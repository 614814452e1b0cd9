// src/cli/docs.rs — `heyme docs ...`

use std::time::Duration;

use super::{confirm, format_bytes, CliContext, DocsAction};
use crate::library::Library;
use crate::poller;
use crate::services::UploadDocument;
use crate::types::{Document, DocumentStatus};

pub async fn run_docs(ctx: &CliContext, action: DocsAction) -> anyhow::Result<()> {
    ctx.require_login()?;
    let docs = ctx.documents();

    match action {
        DocsAction::List { group } => {
            let mut library = load_library(ctx).await?;
            library.select(group.as_deref())?;
            print_documents(&library);
        }
        DocsAction::Upload { path, title, group } => {
            let upload = UploadDocument::from_path(&path)
                .await?
                .with_title(title)
                .with_group(group);
            let size = upload.bytes.len() as u64;
            let doc = docs.upload(upload).await?;
            println!(
                "Uploaded {} ({}) as {} [{}]",
                doc.display_title(),
                format_bytes(size),
                doc.id,
                doc.status
            );
        }
        DocsAction::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete document {id}?")) {
                println!("Cancelled.");
                return Ok(());
            }
            docs.delete(&id).await?;
            println!("Deleted {id}.");
        }
        DocsAction::Index { id } => {
            let doc = docs.trigger_index(&id).await?;
            println!("{} is now {}", doc.display_title(), doc.status);
        }
        DocsAction::Move { id, group } => {
            let mut library = load_library(ctx).await?;
            let updated = docs.move_to_group(&id, group.as_deref()).await?;
            let dest = updated
                .group_id
                .as_deref()
                .and_then(|g| library.group(g))
                .map(|g| g.name.clone())
                .unwrap_or_else(|| "(root)".into());
            library.apply_move(updated)?;
            println!("Moved {id} to {dest}.");
        }
        DocsAction::Watch => {
            let interval = Duration::from_secs(ctx.config.documents.poll_interval_secs.max(1));
            let last = poller::watch_processing(&docs, interval, |listing| {
                let processing = listing
                    .iter()
                    .filter(|d| d.status == DocumentStatus::Processing)
                    .count();
                eprintln!("  {processing} of {} document(s) processing...", listing.len());
            })
            .await?;
            let mut library = Library::new();
            library.replace_documents(last);
            println!(
                "Done. {:.0}% of documents processed.",
                library.progress_percent()
            );
        }
    }
    Ok(())
}

/// Fetch documents and groups together.
pub(crate) async fn load_library(ctx: &CliContext) -> anyhow::Result<Library> {
    let (docs, folders) = (ctx.documents(), ctx.groups());
    let (documents, groups) = tokio::try_join!(docs.list(), folders.list())?;
    let mut library = Library::new();
    library.replace(documents, groups);
    Ok(library)
}

fn print_documents(library: &Library) {
    let visible = library.visible();
    let scope = library
        .selected()
        .and_then(|id| library.group(id))
        .map(|g| g.name.as_str())
        .unwrap_or("all folders");
    println!(
        "{} document(s) in {}, {:.0}% processed",
        visible.len(),
        scope,
        library.progress_percent()
    );
    if visible.is_empty() {
        return;
    }
    println!();
    for doc in visible {
        println!("  {}", document_line(library, doc));
    }
}

fn document_line(library: &Library, doc: &Document) -> String {
    let folder = doc
        .group_id
        .as_deref()
        .and_then(|g| library.group(g))
        .map(|g| g.name.as_str())
        .unwrap_or("-");
    let size = doc.size.map(format_bytes).unwrap_or_else(|| "?".into());
    format!(
        "{:<36}  {:<10}  {:>8}  {:<16}  {}",
        doc.id,
        doc.status,
        size,
        folder,
        doc.display_title()
    )
}
