use std::sync::Arc;

use img2gcode_cache::{CacheNames, CacheStorage, OfflineWorker, Response, OFFLINE_PAGE};

use crate::mock::MockNetwork;

#[tokio::test]
async fn test_install_precaches_into_static_cache() {
    let network = Arc::new(MockNetwork::new());
    network.serve("/", "index");
    network.serve(OFFLINE_PAGE, "offline");
    let worker = OfflineWorker::new(network.clone()).with_precache(["/", OFFLINE_PAGE, "/missing.js"]);

    let report = worker.install().await;
    assert_eq!(report.cached, vec!["/".to_string(), OFFLINE_PAGE.to_string()]);
    assert_eq!(report.failed, vec!["/missing.js".to_string()]);
    assert!(!report.is_complete());

    let cache = worker.names().static_cache();
    assert_eq!(worker.storage().len(&cache), 2);
    assert_eq!(network.calls(), 3);
}

#[tokio::test]
async fn test_activate_removes_old_versions() {
    let storage = CacheStorage::new();
    let old = CacheNames::new(1);
    for name in old.all() {
        storage.put(&name, "/x", Response::text(200, "old"));
    }
    storage.put("unrelated", "/y", Response::text(200, "y"));

    let worker = OfflineWorker::new(Arc::new(MockNetwork::new()))
        .with_storage(storage.clone())
        .with_names(CacheNames::new(2));
    worker.install().await;
    let mut deleted = worker.activate().await;
    deleted.sort();

    let mut expected: Vec<String> = old.all().to_vec();
    expected.push("unrelated".to_string());
    expected.sort();
    assert_eq!(deleted, expected);
    assert_eq!(storage.names(), vec!["img2gcode-static-v2".to_string()]);
}
