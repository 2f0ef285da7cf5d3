//! Inbound HTTP: `GET /`, `GET /drawtree/{treeindex}`, `GET /cachedtree/{treeindex}`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::error::{RenderError, ViewerError, ViewerResult};
use crate::node::Node;
use crate::registry::TreeRegistry;
use crate::render::{Renderer, render_svg};
use crate::source::TreeSource;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Everything a request needs, shared by all handlers.
#[derive(Debug)]
pub struct AppState<S> {
    pub registry: TreeRegistry,
    pub source: S,
    pub renderer: Renderer,
    pub canvas_side: u32,
    pub max_canvas_side: u32,
}

pub fn router<S: TreeSource>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/drawtree/{treeindex}", get(draw_tree::<S>))
        .route("/cachedtree/{treeindex}", get(cached_tree::<S>))
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve<S: TreeSource>(addr: SocketAddr, state: Arc<AppState<S>>) -> ViewerResult<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Parses the `{treeindex}` path segment. Negative and non-numeric values are rejected.
pub fn parse_tree_index(raw: &str) -> ViewerResult<usize> {
    let invalid = |reason| ViewerError::InvalidIndex {
        raw: raw.to_string(),
        reason,
    };
    let value: i64 = raw.trim().parse().map_err(|_| invalid("not an integer"))?;
    if value < 0 {
        return Err(invalid("negative"));
    }
    usize::try_from(value).map_err(|_| invalid("out of range"))
}

async fn index() -> &'static str {
    "Hello, I'm the viewer!\n"
}

#[instrument(skip(state))]
async fn draw_tree<S: TreeSource>(
    State(state): State<Arc<AppState<S>>>,
    Path(treeindex): Path<String>,
) -> ViewerResult<Response> {
    info!("the drawtree handler was accessed");
    let index = parse_tree_index(&treeindex)?;
    state.registry.check_index(index)?;

    let tree = state.source.fetch(index).await?;
    state.registry.ensure_and_insert(index, tree)?;
    let tree = state.registry.get(index)?;

    svg_response(&state, tree).await
}

#[instrument(skip(state))]
async fn cached_tree<S: TreeSource>(
    State(state): State<Arc<AppState<S>>>,
    Path(treeindex): Path<String>,
) -> ViewerResult<Response> {
    let index = parse_tree_index(&treeindex)?;
    let tree = state.registry.get_or_placeholder(index)?;
    svg_response(&state, tree).await
}

async fn svg_response<S>(state: &AppState<S>, tree: Arc<Node>) -> ViewerResult<Response> {
    let renderer = state.renderer;
    let (side, max_side) = (state.canvas_side, state.max_canvas_side);
    let document = tokio::task::spawn_blocking(move || render_svg(&renderer, &tree, side, max_side))
        .await
        .map_err(RenderError::backend)??;
    Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], document).into_response())
}
