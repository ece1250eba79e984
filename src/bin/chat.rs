use std::env;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use movedesk::config;
use movedesk::orchestrator::TurnOrchestrator;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let mut settings = config::load_or_default()?;
    if env::args().any(|arg| arg == "--mock") {
        settings.mock_mode = true;
    }
    if settings.api_key == "mock" {
        settings.mock_mode = true;
    }

    let orchestrator = TurnOrchestrator::new(settings)?;
    let mut session_id = String::new();

    println!("이사 민원 도우미입니다. 메시지를 입력하세요. (종료: exit)");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }

        match orchestrator.handle_turn(&session_id, message) {
            Ok(response) => {
                session_id = response.session_id.clone();
                println!("\n{}\n", response.assistant_message_markdown);
                if let Some(draft_id) = &response.draft_id {
                    println!("(초안 ID: {draft_id})");
                }
            }
            Err(err) => println!("오류: {err}"),
        }
    }

    Ok(())
}
