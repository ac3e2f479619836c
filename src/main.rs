//! Chatline binary entry point.
//!
//! A thin terminal front end over the library: it prints whatever state
//! the session controller produces and forwards input lines to it. All
//! chat logic lives in the library.

use std::io::Write;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use chatline::{cli, logging, Config, Message, Role, SessionController, TokenStore};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("chatline: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("chatline: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_with_filter(config.log_filter());
    info!("chatline v{}", env!("CARGO_PKG_VERSION"));

    let client = match config.to_client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("chatline: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = match config.storage.data_dir {
        Some(ref dir) => TokenStore::new(dir),
        None => match TokenStore::default_location() {
            Ok(store) => store,
            Err(e) => {
                eprintln!("chatline: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let mut chat = match SessionController::initialize(client, store).await {
        Ok(chat) => chat,
        Err(e) => {
            eprintln!("chatline: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(session = %chat.token(), "session ready");
    for message in chat.messages() {
        print_message(message);
    }
    println!("Connected. /new starts a fresh session, /quit exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if let Some(notice) = chat.take_notice() {
            eprintln!("! {}", notice);
        }

        print!("you> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("chatline: {}", e);
                break;
            }
        };

        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/new" => match chat.reset() {
                Ok(_) => println!("Started a new session."),
                Err(e) => eprintln!("chatline: {}", e),
            },
            _ => {
                if let Some(placeholder) = chat.submit(&line).await {
                    if let Some(reply) = chat.conversation().get(placeholder) {
                        print_message(reply);
                    }
                }
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_message(message: &Message) {
    match message.role() {
        Role::User => println!("you> {}", message.content()),
        Role::Assistant => println!("bot> {}", message.content()),
    }
}
