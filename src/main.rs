//! digg-stream - Main Entry Point
//!
//! Native: follows the submission stream and prints the five newest entries.
//! WASM: content-script entry that renders into the page's `#events` list.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser)]
#[command(name = "digg-stream")]
#[command(about = "Follow the Digg submission stream and show the newest entries")]
struct Args {
    /// Event-stream endpoint
    #[arg(long, default_value = digg_stream::config::STREAM_ENDPOINT)]
    endpoint: String,

    /// Interpolate fields without HTML escaping (legacy markup)
    #[arg(long)]
    verbatim: bool,
}

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use digg_stream::config::RendererConfig;
    use digg_stream::native::{SseClient, StreamSession};
    use digg_stream::{StreamRenderer, VisibleList};

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = if args.verbatim {
        RendererConfig::verbatim()
    } else {
        RendererConfig::default()
    };

    let renderer = StreamRenderer::with_config(VisibleList::new(), config);
    let mut session = StreamSession::new(SseClient::new(args.endpoint), renderer);
    let mut updates = session.subscribe();
    session.start()?;

    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let visible = updates.borrow_and_update().clone();
            println!("---");
            for fragment in &visible {
                println!("{}", fragment);
            }
        }
    });

    let interrupted = tokio::select! {
        result = session.wait() => {
            result?;
            false
        }
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        tracing::info!("Interrupted");
        session.stop();
    }

    // Dropping the session closes the update channel; the printer drains the
    // last snapshot and exits
    let (rendered, dropped) = session.stats();
    drop(session);
    printer.await?;

    tracing::info!(rendered, dropped, "Stream finished");
    Ok(())
}

// WASM entry point (content script)
#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    digg_stream::web::init_console_logging();
    web_sys::console::log_1(&"[WASM] digg-stream content script loaded".into());
    if let Err(e) = digg_stream::web::launch() {
        web_sys::console::error_1(&format!("[WASM] digg-stream failed to start: {}", e).into());
    }
}
