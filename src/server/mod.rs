//! Development server with live reload
//!
//! Pages are served from the public directory. With live reload on, every
//! HTML response carries a small script that listens on `/__livereload`
//! and refreshes the page after each successful rebuild.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::commands::build;
use crate::Site;

const RELOAD_ENDPOINT: &str = "/__livereload";

/// Client side of live reload: reload on a message, and once the server
/// is reachable again after a restart
const RELOAD_CLIENT: &str = r#"<script>
(function () {
  function connect(reloadOnOpen) {
    var socket = new WebSocket('ws://' + location.host + '/__livereload');
    socket.onopen = function () { if (reloadOnOpen) location.reload(); };
    socket.onmessage = function () { location.reload(); };
    socket.onclose = function () { setTimeout(function () { connect(true); }, 1000); };
  }
  connect(false);
})();
</script>
"#;

struct DevServer {
    public_dir: PathBuf,
    rebuilt: broadcast::Sender<()>,
    live_reload: bool,
}

/// Start the development server; with `watch`, rebuild on change and
/// reload connected browsers
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (rebuilt, _) = broadcast::channel::<()>(8);

    let server = Arc::new(DevServer {
        public_dir: site.public_dir.clone(),
        rebuilt: rebuilt.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route(RELOAD_ENDPOINT, get(reload_socket))
        .fallback(serve_file)
        .layer(TraceLayer::new_for_http())
        .with_state(server);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let url = format!("http://{}:{}", ip, port);
    println!("Serving {} at {}", site.public_dir.display(), url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let site = site.clone();
        let drafts = site.config.render_drafts;
        tokio::task::spawn_blocking(move || {
            let notify_browsers = || {
                // No receivers just means no open tabs
                let _ = rebuilt.send(());
            };
            if let Err(e) = build::watch(&site, drafts, notify_browsers) {
                tracing::error!("File watcher stopped: {:#}", e);
            }
        });
    }

    axum::serve(listener, app).await?;
    Ok(())
}

async fn reload_socket(ws: WebSocketUpgrade, State(server): State<Arc<DevServer>>) -> Response {
    let rebuilt = server.rebuilt.subscribe();
    ws.on_upgrade(move |socket| push_reloads(socket, rebuilt))
}

/// Forward rebuild notifications until the browser goes away
async fn push_reloads(mut socket: WebSocket, mut rebuilt: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        let open = tokio::select! {
            signal = rebuilt.recv() => match signal {
                // Missed signals collapse into one reload
                Ok(()) | Err(RecvError::Lagged(_)) => {
                    socket.send(Message::Text("reload".into())).await.is_ok()
                }
                Err(RecvError::Closed) => false,
            },
            incoming = socket.recv() => {
                !matches!(incoming, None | Some(Err(_)) | Some(Ok(Message::Close(_))))
            }
        };
        if !open {
            break;
        }
    }

    tracing::debug!("Live reload client disconnected");
}

async fn serve_file(State(server): State<Arc<DevServer>>, request: Request<Body>) -> Response {
    let Some(file) = resolve_path(&server.public_dir, request.uri().path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let is_html = file
        .extension()
        .is_some_and(|ext| ext == "html" || ext == "htm");

    if server.live_reload && is_html {
        return match tokio::fs::read_to_string(&file).await {
            Ok(html) => Html(with_reload_client(&html)).into_response(),
            Err(_) => StatusCode::NOT_FOUND.into_response(),
        };
    }

    match ServeDir::new(&server.public_dir).try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Map a request path to a file under the public directory.
///
/// Directories resolve to their `index.html`; `/uses` falls back to
/// `uses.html`. Paths escaping the public directory resolve to nothing.
fn resolve_path(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let clean_path = request_path.trim_start_matches('/');
    let relative = Path::new(clean_path);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }

    if clean_path.is_empty() {
        return Some(public_dir.join("index.html"));
    }

    let candidate = public_dir.join(relative);
    if candidate.is_dir() {
        return Some(candidate.join("index.html"));
    }
    if !candidate.exists() {
        let with_html = public_dir.join(format!("{}.html", clean_path.trim_end_matches('/')));
        if with_html.exists() {
            return Some(with_html);
        }
    }
    Some(candidate)
}

/// Insert the reload client before the last `</body>`, or append it
fn with_reload_client(html: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => {
            let mut out = String::with_capacity(html.len() + RELOAD_CLIENT.len());
            out.push_str(&html[..at]);
            out.push_str(RELOAD_CLIENT);
            out.push_str(&html[at..]);
            out
        }
        None => format!("{}{}", html, RELOAD_CLIENT),
    }
}

fn open_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = std::process::Command::new("cmd");
        cmd.args(["/c", "start"]);
        cmd
    } else {
        std::process::Command::new("xdg-open")
    };
    command.arg(url).spawn().map(|_| ())
}
