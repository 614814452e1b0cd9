// src/cli/chat.rs — One-shot questions, the chat REPL, and share links

use std::sync::Arc;

use super::CliContext;
use crate::services::links::share_url;
use crate::transcript::Transcript;
use crate::types::{RagChatRequest, RagChatResponse};

/// Handle `heyme ask`.
pub async fn run_ask(
    ctx: &CliContext,
    question: &str,
    group: Option<String>,
    top_k: Option<u32>,
) -> anyhow::Result<()> {
    ctx.require_login()?;
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("Ask a question, e.g. `heyme ask what does the lease say about pets`");
    }

    let request = RagChatRequest {
        question: question.to_string(),
        group_id: group,
        top_k: Some(top_k.unwrap_or(ctx.config.documents.default_top_k)),
    };
    let response = ctx.chat().chat_with_rag(&request).await?;
    print_answer(&response);
    Ok(())
}

/// Run the interactive chat REPL. The transcript is registered with the
/// session so `/logout` wipes it.
pub async fn run_chat(ctx: &CliContext, group: Option<String>) -> anyhow::Result<()> {
    ctx.require_login()?;

    let transcript = Arc::new(Transcript::new());
    ctx.session.register(transcript.clone());

    let who = ctx
        .session
        .user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();
    eprintln!(
        "heyme v{} | {} | folder: {} | /help for commands\n",
        env!("CARGO_PKG_VERSION"),
        who,
        group.as_deref().unwrap_or("all"),
    );

    let chat = ctx.chat();
    while let Some(input) = read_input() {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            "/exit" | "/quit" | "exit" | "quit" => break,
            "/help" => {
                eprintln!("  /clear    forget this conversation");
                eprintln!("  /history  show this conversation");
                eprintln!("  /logout   log out and end the chat");
                eprintln!("  /exit     leave");
                continue;
            }
            "/clear" => {
                transcript.clear();
                eprintln!("  (conversation cleared)");
                continue;
            }
            "/history" => {
                for m in transcript.messages() {
                    let who = match m.role {
                        crate::transcript::Role::User => "you",
                        crate::transcript::Role::Model => "heyme",
                    };
                    println!("[{}] {}: {}", m.timestamp, who, m.text);
                }
                continue;
            }
            "/logout" => {
                ctx.session.logout()?;
                eprintln!("  Logged out. Transcript discarded ({} message(s) left).", transcript.len());
                break;
            }
            _ if trimmed.starts_with('/') => {
                eprintln!("  Unknown command: {trimmed}");
                continue;
            }
            _ => {}
        }

        transcript.push_user(trimmed);
        let request = RagChatRequest {
            question: trimmed.to_string(),
            group_id: group.clone(),
            top_k: Some(ctx.config.documents.default_top_k),
        };
        match chat.chat_with_rag(&request).await {
            Ok(response) => {
                transcript.push_model(response.answer.clone());
                print_answer(&response);
                println!();
            }
            // Keep the REPL alive; the question stays in the transcript.
            Err(e) => eprintln!("  error: {e}"),
        }
    }

    Ok(())
}

/// Handle `heyme share`.
pub async fn run_share(ctx: &CliContext, group: Option<String>, list: bool) -> anyhow::Result<()> {
    ctx.require_login()?;
    let links = ctx.links();
    let origin = &ctx.config.api.public_origin;

    if list {
        let all = links.list().await?;
        if all.is_empty() {
            println!("No share links yet.");
        }
        for link in all {
            println!("  {}", share_url(origin, &link.id));
        }
        return Ok(());
    }

    let Some(group_id) = group else {
        anyhow::bail!("Pick a folder to share: `heyme share <group-id>` (see `heyme groups list`)");
    };
    let link = links.create_for_group(&group_id).await?;
    println!("Share link: {}", share_url(origin, &link.id));
    Ok(())
}

fn print_answer(response: &RagChatResponse) {
    println!("{}", response.answer);
    if response.sources.is_empty() {
        return;
    }
    println!();
    println!("Sources:");
    for source in &response.sources {
        let name = source
            .title
            .as_deref()
            .or(source.original_file_name.as_deref())
            .unwrap_or(&source.id);
        println!("  {:.2}  {}", source.score, name);
    }
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}
