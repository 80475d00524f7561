//! Gallery server lifecycle: port discovery, one scan per run, HTTP listener, stop.

pub mod browser;
pub mod port;

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use tokio::net::TcpListener;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

use crate::http::{self, state::AppState};
use crate::icons::{scanner, IconLibrary};

pub const DEFAULT_ICONS_PATH: &str = "src/components/app-svg";
pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_GALLERY_DIR: &str = "dist/gallery";
pub const DEFAULT_MAX_PORT_ATTEMPTS: u32 = 100;

/// Options for one [`GalleryServer::start`] call.
#[derive(Debug, Clone)]
pub struct GalleryServerOptions {
    /// Directories to scan for icon components.
    pub icons_path: Vec<PathBuf>,
    /// Preferred port; the next free one upwards is used if it is taken.
    pub port: u16,
    /// Launch the default browser once the server is listening.
    pub open: bool,
    pub host: IpAddr,
    /// Built gallery UI served at `/` and as static assets.
    pub gallery_dir: PathBuf,
    /// Upper bound on ports probed before giving up.
    pub max_port_attempts: u32,
}

impl Default for GalleryServerOptions {
    fn default() -> Self {
        Self {
            icons_path: vec![PathBuf::from(DEFAULT_ICONS_PATH)],
            port: DEFAULT_PORT,
            open: true,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            gallery_dir: PathBuf::from(DEFAULT_GALLERY_DIR),
            max_port_attempts: DEFAULT_MAX_PORT_ATTEMPTS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to probe port {port}: {source}")]
    Probe { port: u16, source: io::Error },
    #[error("no free port found from {start} after {attempts} attempt(s)")]
    NoAvailablePort { start: u16, attempts: u32 },
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("failed to read listener address: {0}")]
    LocalAddr(io::Error),
}

/// Cheap-to-clone view of a running server. Clones of the same run compare
/// equal under [`ServerHandle::same_server`].
#[derive(Debug, Clone)]
pub struct ServerHandle {
    inner: Arc<HandleInfo>,
}

#[derive(Debug)]
struct HandleInfo {
    local_addr: SocketAddr,
    icon_count: usize,
}

impl ServerHandle {
    fn new(local_addr: SocketAddr, icon_count: usize) -> Self {
        Self {
            inner: Arc::new(HandleInfo { local_addr, icon_count }),
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }

    pub fn port(&self) -> u16 {
        self.inner.local_addr.port()
    }

    /// Address shown to the user and handed to the browser.
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port())
    }

    /// Number of icons captured by the startup scan.
    pub fn icon_count(&self) -> usize {
        self.inner.icon_count
    }

    /// True when both handles came from the same `start`.
    pub fn same_server(&self, other: &ServerHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

struct Running {
    handle: ServerHandle,
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

/// Owner of at most one running gallery listener.
///
/// The slot lock is held for the whole start and stop transitions, so a
/// `start` racing another `start` waits for it and then returns the handle
/// it produced instead of probing, scanning or binding again.
#[derive(Default)]
pub struct GalleryServer {
    running: Mutex<Option<Running>>,
}

static GLOBAL: LazyLock<GalleryServer> = LazyLock::new(GalleryServer::new);

impl GalleryServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance, for hosts that start and stop the gallery from
    /// unrelated call sites.
    pub fn global() -> &'static GalleryServer {
        &GLOBAL
    }

    /// Start serving, or return the current handle if already running.
    ///
    /// Order: find a port, scan `icons_path` once, bind, spawn the serve
    /// task, optionally open the browser. Only probe and bind failures are
    /// errors; an empty scan still starts the server.
    pub async fn start(&self, options: GalleryServerOptions) -> Result<ServerHandle, ServerError> {
        let mut slot = self.running.lock().await;
        if let Some(running) = slot.as_ref() {
            tracing::info!("Gallery server already running on {}", running.handle.url());
            return Ok(running.handle.clone());
        }

        let port = port::find_available_port(options.host, options.port, options.max_port_attempts)?;
        let library = scan_icons(options.icons_path.clone()).await;

        let addr = SocketAddr::new(options.host, port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

        let handle = ServerHandle::new(local_addr, library.len());
        let app = http::build_router(AppState::new(library, options.gallery_dir));

        let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.recv().await;
                })
                .await
                .unwrap_or_else(|e| tracing::error!("Gallery server error: {}", e));
        });

        tracing::info!(
            "Gallery server listening on {} ({} icons)",
            handle.url(),
            handle.icon_count()
        );

        if options.open {
            browser::open_browser(&handle.url());
        }

        *slot = Some(Running {
            handle: handle.clone(),
            shutdown_tx,
            task,
        });
        Ok(handle)
    }

    /// Stop the listener and wait for in-flight requests to drain.
    /// Does nothing when no server is running.
    pub async fn stop(&self) {
        let mut slot = self.running.lock().await;
        let Some(running) = slot.take() else {
            return;
        };

        let _ = running.shutdown_tx.send(());
        if let Err(e) = running.task.await {
            tracing::warn!("Gallery server task ended abnormally: {}", e);
        }
        tracing::info!("Gallery server on port {} stopped", running.handle.port());
    }

    /// Handle of the running server, if any.
    pub async fn handle(&self) -> Option<ServerHandle> {
        self.running
            .lock()
            .await
            .as_ref()
            .map(|running| running.handle.clone())
    }

    pub async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }
}

/// The walk is synchronous filesystem work, so it runs off the async workers.
/// A panicking scan degrades to an empty gallery.
async fn scan_icons(roots: Vec<PathBuf>) -> IconLibrary {
    tokio::task::spawn_blocking(move || scanner::scan(&roots))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Icon scan aborted: {}", e);
            IconLibrary::new()
        })
}
