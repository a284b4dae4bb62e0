use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use scout_core::{
    identity, AgentClient, ChatMessage, ChatRole, ChatSession, HttpAgentClient, ScoutConfig,
    ScoutError, SendOptions,
};

pub async fn handle_chat_command(agent: Option<String>) -> anyhow::Result<()> {
    let config = ScoutConfig::load()?;
    let caller = identity::load_or_generate()?;
    let client = HttpAgentClient::new(&config.agent)?.with_user_handle(caller);

    let mut session = ChatSession::new();
    session.generate_local_id();

    match agent {
        Some(id) => session.set_remote_id(id),
        None => match client.list_agents().await {
            Ok(agents) if !agents.is_empty() => {
                session.set_remote_id(agents[0].id.clone());
            }
            Ok(_) => warn!("Agent directory is empty; sends will address the local session"),
            Err(e) => warn!("Agent discovery failed: {}", e),
        },
    }

    let mut rendered = 0;
    if session.welcome_pending() {
        session.send_welcome();
        rendered = render_new(&session, rendered);
    }

    println!(
        "{}",
        "Type a message and press Enter. /clear resets the session, /quit exits.".dimmed()
    );

    // One Ctrl-C cancels the in-flight send and ends the session.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            cancel.cancel();
        });
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(format!("{} ", "you>".green().bold()).as_bytes()).await?;
        stdout.flush().await?;

        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else { break };

        match line.trim() {
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear();
                println!("{}", "Session cleared.".dimmed());
                rendered = 0;
                continue;
            }
            _ => {}
        }

        session.set_draft(line);

        let draft = session.draft().to_string();
        let options = SendOptions {
            cancel: Some(cancel.child_token()),
            ..SendOptions::default()
        };

        match session.send(&client, &draft, options).await {
            Ok(_) => {}
            Err(ScoutError::SendCancelled) => {
                rendered = render_new(&session, rendered);
                println!("{}", "Send cancelled.".yellow());
                break;
            }
            // Failures are already part of the transcript as system turns.
            Err(e) => e.log(),
        }

        rendered = render_new(&session, rendered);
    }

    println!("{}", "Goodbye.".dimmed());
    Ok(())
}

/// Print every turn appended since the last call, returning the new cursor.
fn render_new(session: &ChatSession, from: usize) -> usize {
    let messages = session.messages();
    for message in &messages[from..] {
        render_message(message);
    }
    messages.len()
}

fn render_message(message: &ChatMessage) {
    let label = match message.role {
        ChatRole::User => message.sender_label().green().bold(),
        ChatRole::Assistant => message.sender_label().cyan().bold(),
        ChatRole::System => message.sender_label().red().bold(),
    };

    println!("{}: {}", label, message.content);

    if let Some(url) = &message.url {
        println!("  {}", url.underline().dimmed());
    }
}
