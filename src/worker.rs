//! Background request execution
//!
//! The UI loop never awaits the network. Queued [`Request`]s are spawned
//! onto the runtime and their [`Response`]s posted back over a channel.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::api::Gateway;
use crate::app::{Request, Response};
use crate::launcher;

/// Run one request to completion
pub async fn execute(request: Request, gateway: &dyn Gateway) -> Response {
    match request {
        Request::Page(req) => {
            let result = req.execute(gateway).await;
            Response::Page(req, result)
        }
        Request::Genres(media_type) => {
            let result = gateway.genres(media_type).await;
            Response::Genres(media_type, result)
        }
        Request::Details(req) => {
            let result = req.execute(gateway).await;
            Response::Details(req, result)
        }
        Request::Search(req) => {
            let result = req.execute(gateway).await;
            Response::Search(req, result)
        }
        Request::Synthesis(req) => {
            let result = req.execute(gateway).await;
            Response::Synthesis(req, result)
        }
        Request::OpenUrl(url) => {
            let result = launcher::open_url(&url).await.map_err(anyhow::Error::from);
            Response::Opened(url, result)
        }
    }
}

/// Spawn a request; the response is sent to `tx`
pub fn spawn(request: Request, gateway: Arc<dyn Gateway>, tx: UnboundedSender<Response>) {
    tokio::spawn(async move {
        let response = execute(request, gateway.as_ref()).await;
        if tx.send(response).is_err() {
            debug!("ui loop gone, dropping response");
        }
    });
}
