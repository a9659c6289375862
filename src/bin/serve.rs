//! Static file server for the web build
//!
//! `PORT` picks the port (default 8080), `FLAPPY_WEB_ROOT` the directory
//! holding index.html and the wasm bundle (default: current directory).

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> std::io::Result<()> {
    use flappy::server;

    env_logger::init();

    let port = server::parse_port(std::env::var("PORT").ok().as_deref());
    let root = std::env::var("FLAPPY_WEB_ROOT").unwrap_or_else(|_| ".".to_string());

    server::serve(root, port).await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
