//! `recap chat` - converse with generated summaries

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cli::{Cli, OutputFormat};
use recap_core::config::{Config, GlobalConfig};
use recap_core::error::{RecapError, Result};
use recap_core::rag::{self, chat::ChatSession};
use recap_core::summarize::OllamaClient;

pub fn run(cli: &Cli, summaries: &Path, model: Option<&str>, query: Option<&str>) -> Result<()> {
    let defaults = Config::default();
    let global = GlobalConfig::load().unwrap_or_default();

    let model = model
        .map(str::to_string)
        .or(global.model)
        .unwrap_or(defaults.model);
    let host = global.ollama_host.unwrap_or(defaults.ollama_host);

    let documents = rag::load_documents(summaries)?;
    if documents.is_empty() {
        return Err(RecapError::Other(format!(
            "no summaries found in {}",
            summaries.display()
        )));
    }

    let client = OllamaClient::new(&host, &model, defaults.request_timeout_seconds);
    let mut session = ChatSession::new(documents, client);

    if let Some(question) = query {
        let reply = session.chat(question);
        if cli.format == OutputFormat::Json {
            println!(
                "{}",
                serde_json::json!({ "query": question, "response": reply })
            );
        } else {
            println!("{}", reply);
        }
        return Ok(());
    }

    repl(cli, &mut session)
}

fn repl(cli: &Cli, session: &mut ChatSession<OllamaClient>) -> Result<()> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);

    let _ = ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    });

    if !cli.quiet {
        println!("Chatting with your summaries. Type 'exit' or press Ctrl-C to quit.");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if interrupted.load(Ordering::SeqCst) {
            break;
        }

        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        let reply = session.chat(message);
        println!("{}\n", reply);
    }

    if !cli.quiet {
        println!("Goodbye.");
    }
    Ok(())
}
