//! Terminal driver for the chat panel over a loopback room.
//!
//! Lines typed on stdin are chat messages unless they start with a command:
//! `/open`, `/close`, `/ask <question> | <answer>`, `/pay <peer-id> <amount>`,
//! `/quit`.

use std::sync::Arc;

use roomchat::config::SessionConfig;
use roomchat::peers::{self, InMemoryPeerDirectory, PeerDirectory, RestPeerDirectory};
use roomchat::services::panel::PanelUpdate;
use roomchat::services::session::{Collaborators, Session};
use roomchat::state::LocalIdentity;
use roomchat::transport::LoopbackTransport;
use roomchat::wallet::{JsonRpcWallet, Wallet};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use uuid::Uuid;

enum Command<'a> {
    Open,
    Close,
    Ask { question: &'a str, answer: &'a str },
    Pay { peer: &'a str, amount: &'a str },
    Quit,
    Say(&'a str),
    Usage(&'static str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    let (head, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    match head {
        "/open" => Command::Open,
        "/close" => Command::Close,
        "/quit" => Command::Quit,
        "/ask" => match rest.split_once('|') {
            Some((question, answer)) => Command::Ask { question: question.trim(), answer: answer.trim() },
            None => Command::Usage("/ask <question> | <answer>"),
        },
        "/pay" => match rest.trim().split_once(' ') {
            Some((peer, amount)) => Command::Pay { peer, amount: amount.trim() },
            None => Command::Usage("/pay <peer-id> <amount>"),
        },
        _ => Command::Say(line),
    }
}

/// Run one input line. Returns `false` when the user asked to quit.
async fn handle_line(session: &mut Session, line: &str) -> bool {
    match parse_command(line) {
        Command::Open => {
            session.panel_mut().open();
            println!("[panel open]");
        }
        Command::Close => {
            session.panel_mut().close();
            println!("[panel closed]");
        }
        Command::Ask { question, answer } => {
            if let Err(e) = session.ask_question(question, answer) {
                println!("! {e}");
            }
        }
        Command::Pay { peer, amount } => match Uuid::parse_str(peer) {
            Ok(peer_id) => {
                if let Err(e) = session.transfer_to(peer_id, amount).await {
                    println!("! {}", e.notice().text);
                }
            }
            Err(_) => println!("! not a peer id: {peer}"),
        },
        Command::Quit => return false,
        Command::Say(text) => {
            if let Err(e) = session.submit(text) {
                println!("! {e}");
            }
        }
        Command::Usage(usage) => println!("usage: {usage}"),
    }
    true
}

fn print_update(session: &Session, update: &PanelUpdate, printed: &mut usize) {
    let panel = session.panel();
    if update.question_changed {
        if let Some(banner) = panel.quiz().banner() {
            println!("[quiz] {banner}");
        }
    }
    for record in panel.records().iter().skip(*printed) {
        let marker = if record.highlighted { "*" } else { " " };
        println!("{marker} {}", record.line);
    }
    *printed = panel.records().len();

    for notice in &update.notifications {
        println!(">> {}", notice.text);
    }
    if panel.celebration().is_active() {
        println!("[celebrating]");
    }
    let state = panel.state();
    if !state.is_open && state.unread_count > 0 {
        println!("[{} unread]", state.unread_count);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = SessionConfig::from_env().expect("invalid session config");

    let directory: Arc<dyn PeerDirectory> = match &config.directory {
        Some(cfg) => Arc::new(RestPeerDirectory::new(cfg).expect("peer directory init failed")),
        None => Arc::new(InMemoryPeerDirectory::default()),
    };

    let wallet = config
        .wallet
        .as_ref()
        .map(JsonRpcWallet::new)
        .transpose()
        .expect("wallet init failed")
        .map(Arc::new);
    let wallet_address = match &wallet {
        Some(wallet) => match wallet.account().await {
            Ok(address) => Some(address.to_string()),
            Err(e) => {
                warn!(error = %e, "wallet account unavailable; registering without address");
                None
            }
        },
        None => None,
    };

    let peer = peers::register(directory.as_ref(), config.peer_id, &config.display_name, wallet_address.as_deref())
        .await
        .expect("peer registration failed");
    info!(peer_id = %peer.id, display_name = %peer.display_name, "registered");

    let participant_id = peer.id.to_string();
    let (transport, mut deliveries) = LoopbackTransport::new(config.room_url.clone(), participant_id.clone());
    let transport = Arc::new(transport);
    let collaborators = Collaborators {
        room: transport.clone(),
        transport,
        wallet: wallet.map(|w| w as Arc<dyn Wallet>),
        directory,
    };
    let identity = LocalIdentity { participant_id, display_name: peer.display_name };
    let mut session = Session::join(identity, config.celebration_window, collaborators)
        .await
        .expect("failed to join room");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printed = 0;
    loop {
        tokio::select! {
            Some(delivery) = deliveries.recv() => {
                let update = session.ingest(delivery);
                print_update(&session, &update, &mut printed);
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_line(&mut session, &line).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "stdin read failed");
                    break;
                }
            },
        }
    }

    session.leave().await;
}
