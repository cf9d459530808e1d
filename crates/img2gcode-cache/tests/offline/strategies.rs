use std::sync::Arc;

use img2gcode_cache::{Destination, Method, OfflineWorker, Request, OFFLINE_PAGE};

use crate::mock::MockNetwork;

const ORIGIN: &str = "https://app.example";

fn url(path: &str) -> String {
    format!("{}{}", ORIGIN, path)
}

#[tokio::test]
async fn test_cache_first_hit_skips_network() {
    let network = Arc::new(MockNetwork::new());
    network.serve(&url("/js/app.js"), "v1");
    let worker = OfflineWorker::new(network.clone()).with_precache(Vec::<String>::new());

    let first = worker.handle_fetch(&Request::get(url("/js/app.js"))).await.unwrap();
    assert_eq!(first.body_text(), "v1");
    assert_eq!(network.calls(), 1);

    network.serve(&url("/js/app.js"), "v2");
    let second = worker.handle_fetch(&Request::get(url("/js/app.js"))).await.unwrap();
    assert_eq!(second.body_text(), "v1");
    assert_eq!(network.calls(), 1);
}

#[tokio::test]
async fn test_default_route_is_network_first() {
    let network = Arc::new(MockNetwork::new());
    network.serve(&url("/designer"), "fresh");
    let worker = OfflineWorker::new(network.clone()).with_precache(Vec::<String>::new());

    let request = Request::get(url("/designer"));
    assert_eq!(worker.handle_fetch(&request).await.unwrap().body_text(), "fresh");
    network.serve(&url("/designer"), "fresher");
    assert_eq!(worker.handle_fetch(&request).await.unwrap().body_text(), "fresher");
    assert_eq!(network.calls(), 2);

    network.set_offline(true);
    assert_eq!(worker.handle_fetch(&request).await.unwrap().body_text(), "fresher");
}

#[tokio::test]
async fn test_stale_while_revalidate_refreshes_in_background() {
    let network = Arc::new(MockNetwork::new());
    let logo = url("/uploads/logo.png");
    network.serve(&logo, "old");
    let worker = OfflineWorker::new(network.clone()).with_precache(Vec::<String>::new());
    let request = Request::get(logo.as_str()).with_destination(Destination::Image);

    assert_eq!(worker.handle_fetch(&request).await.unwrap().body_text(), "old");
    network.serve(&logo, "new");
    assert_eq!(worker.handle_fetch(&request).await.unwrap().body_text(), "old");
    worker.settle().await;
    assert_eq!(worker.handle_fetch(&request).await.unwrap().body_text(), "new");
    worker.settle().await;
}

#[tokio::test]
async fn test_finished_revalidations_are_released() {
    let network = Arc::new(MockNetwork::new());
    let icon = url("/icons/tool.svg");
    network.serve(&icon, "<svg/>");
    let worker = OfflineWorker::new(network.clone()).with_precache(Vec::<String>::new());
    let request = Request::get(icon.as_str()).with_destination(Destination::Image);

    for _ in 0..200 {
        assert!(worker.handle_fetch(&request).await.is_some());
        tokio::task::yield_now().await;
    }
    assert!(worker.pending_revalidations() <= 2);
    worker.settle().await;
    assert_eq!(worker.pending_revalidations(), 0);
}

#[tokio::test]
async fn test_unhandled_requests() {
    let worker = OfflineWorker::new(Arc::new(MockNetwork::new()));
    assert!(worker
        .handle_fetch(&Request::new(Method::Post, url("/api/projects")))
        .await
        .is_none());
    assert!(worker
        .handle_fetch(&Request::get("chrome-extension://abc/x.js"))
        .await
        .is_none());
}

#[tokio::test]
async fn test_offline_fallbacks() {
    let network = Arc::new(MockNetwork::new());
    network.serve(OFFLINE_PAGE, "<h1>Offline</h1>");
    let worker = OfflineWorker::new(network.clone()).with_precache([OFFLINE_PAGE]);
    worker.install().await;
    network.set_offline(true);

    let page = worker.handle_fetch(&Request::navigate(url("/projects"))).await.unwrap();
    assert_eq!(page.body_text(), "<h1>Offline</h1>");

    let image = worker
        .handle_fetch(&Request::get(url("/photo.png")).with_destination(Destination::Image))
        .await
        .unwrap();
    assert_eq!(image.content_type, "image/svg+xml");
    assert!(image.body_text().contains("Image unavailable"));

    let api = worker.handle_fetch(&Request::get(url("/api/status"))).await.unwrap();
    assert_eq!(api.status, 503);
    assert_eq!(api.content_type, "text/plain");
}
