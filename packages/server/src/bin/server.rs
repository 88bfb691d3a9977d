//! Chatroom server: rebroadcasts every message to all other connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatroom-server
//! cargo run --bin chatroom-server -- --addr tcp://127.0.0.1:9000 --admin-addr 127.0.0.1:9001
//! ```
//!
//! Then connect with e.g. `nc localhost 9000`.

use std::sync::Arc;

use chatroom_server::{
    infrastructure::registry::InMemoryConnectionRegistry,
    ui::{DEFAULT_LISTEN_ADDR, ListenAddr, Server, ServerError},
    usecase::ChatRoom,
};
use chatroom_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chatroom-server")]
#[command(about = "Multi-client TCP chat relay", long_about = None)]
struct Args {
    /// Address to listen on, as <protocol>://<host>:<port>
    #[arg(short = 'a', long, default_value = DEFAULT_LISTEN_ADDR)]
    addr: String,

    /// Run event handlers on multiple worker threads
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    multicore: bool,

    /// Number of worker threads when multicore is enabled (default: number of CPUs)
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Serve the admin HTTP API (health, open connections) on this address
    #[arg(long)]
    admin_addr: Option<String>,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_BIN_NAME"),
        &args.log_level,
    );

    let runtime = if args.multicore {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        if let Some(workers) = args.workers {
            builder.worker_threads(workers.max(1));
        }
        builder.enable_all().build()
    } else {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
    };
    let runtime = match runtime {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(args)) {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let listen_addr: ListenAddr = args.addr.parse()?;

    // 1. Registry → 2. ChatRoom → 3. Server
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let chat_room = Arc::new(ChatRoom::new(registry));

    let mut server = Server::bind(&listen_addr, chat_room).await?;
    if let Some(admin_addr) = &args.admin_addr {
        server = server.with_admin(admin_addr).await?;
    }

    server.run().await
}
