use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use textgenie::core::capability::MockProvider;
use textgenie::logging::{init_logging, LogConfig};
use textgenie::shared::emit::StatusSink;
use textgenie::shared::events::ServiceEvent;
use textgenie::shared::settings::TextGenieSettings;
use textgenie::shared::types::{Origin, Sender};
use textgenie::{Session, TextService};

const HELP: &str = "\
Type text to detect its language, or a command:
  /summarize                 summarize the last text
  /translate [code]          translate the last text
  /translate-summary [code]  translate the last summary
  /languages                 list target languages
  /history                   show the conversation
  /quit                      exit";

enum Command<'a> {
    Submit(&'a str),
    Summarize,
    Translate(Option<&'a str>),
    TranslateSummary(Option<&'a str>),
    Languages,
    History,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse(line: &str) -> Command<'_> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Command::Submit(line);
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match name {
        "/summarize" => Command::Summarize,
        "/translate" => Command::Translate(arg),
        "/translate-summary" => Command::TranslateSummary(arg),
        "/languages" => Command::Languages,
        "/history" => Command::History,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Unknown(other),
    }
}

fn origin_note(origin: Origin) -> &'static str {
    match origin {
        Origin::Native => "",
        Origin::Fallback => " (local fallback)",
    }
}

fn progress_printer() -> StatusSink {
    StatusSink::new().with_listener(|event| match event {
        ServiceEvent::DownloadStarted(capability) => {
            println!("Downloading {} model...", capability);
        }
        ServiceEvent::DownloadProgress { progress, .. } => {
            if let Some(fraction) = progress.fraction() {
                print!("\r  {:>3.0}%", fraction * 100.0);
                let _ = std::io::stdout().flush();
            }
        }
        ServiceEvent::DownloadFinished(_) => println!(),
        ServiceEvent::FallbackUsed(_) => {}
    })
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging(&LogConfig::default()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let settings = TextGenieSettings::load().await.unwrap_or_else(|e| {
        tracing::warn!("[Main] Failed to load settings: {}", e);
        TextGenieSettings::default()
    });
    let preferences = settings.preferences;

    // No host AI object exists in a terminal, so every capability runs on its fallback
    let service = TextService::new(MockProvider::new()).with_status_sink(progress_printer());
    let mut session = Session::new(service, preferences.clone());

    println!("TextGenie");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("[Main] Failed to read stdin: {}", e);
                break;
            }
        };

        match parse(&line) {
            Command::Submit("") => continue,
            Command::Submit(text) => match session.submit(text).await {
                Ok(detection) => println!("Detected Language: {}", detection.describe()),
                Err(e) => println!("Error: {}", e),
            },
            Command::Summarize => match session.summarize().await {
                Ok(summary) => println!("Summary{}: {}", origin_note(summary.origin), summary.text),
                Err(e) => println!("Error: {}", e),
            },
            Command::Translate(target) | Command::TranslateSummary(target)
                if target.is_some_and(|code| !preferences.offers(code)) =>
            {
                println!(
                    "Unsupported target language '{}'. See /languages.",
                    target.unwrap_or_default()
                );
            }
            Command::Translate(target) => match session.translate(target).await {
                Ok(t) => println!("Translation ({}){}: {}", t.target_language, origin_note(t.origin), t.text),
                Err(e) => println!("Error: {}", e),
            },
            Command::TranslateSummary(target) => match session.translate_summary(target).await {
                Ok(t) => println!(
                    "Summary translation ({}){}: {}",
                    t.target_language,
                    origin_note(t.origin),
                    t.text
                ),
                Err(e) => println!("Error: {}", e),
            },
            Command::Languages => {
                for lang in session.target_languages() {
                    println!("  {:<4} {}", lang.code, lang.name);
                }
            }
            Command::History => {
                for message in session.messages() {
                    let who = match message.sender {
                        Sender::User => "you",
                        Sender::Bot => "bot",
                    };
                    println!("[{}] {}: {}", message.timestamp.format("%H:%M:%S"), who, message.text);
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(name) => println!("Unknown command '{}'. Type /help.", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!(parse("  Hello there "), Command::Submit("Hello there")));
        assert!(matches!(parse("/summarize"), Command::Summarize));
        assert!(matches!(parse("/translate  es "), Command::Translate(Some("es"))));
        assert!(matches!(parse("/translate"), Command::Translate(None)));
        assert!(matches!(parse("/translate-summary pt"), Command::TranslateSummary(Some("pt"))));
        assert!(matches!(parse("/exit"), Command::Quit));
        assert!(matches!(parse("/rewrite"), Command::Unknown("/rewrite")));
    }
}
