use media_store::{
    build_media_store, LocalConfig, MediaBackend, MediaKind, MediaStoreConfig, ProbeConfig,
    S3Config,
};
use std::io::Write;

fn local_config(root: &std::path::Path) -> MediaStoreConfig {
    MediaStoreConfig {
        backend: MediaBackend::Local,
        local: LocalConfig {
            root_dir: root.to_path_buf(),
            public_base_url: "http://localhost:8000/public/media".to_string(),
        },
        s3: S3Config {
            bucket: String::new(),
            region: "us-east-1".to_string(),
            base_url: String::new(),
            path_style: false,
            endpoint: None,
        },
        probe: ProbeConfig {
            enabled: false,
            ffprobe_path: "ffprobe".to_string(),
        },
    }
}

#[tokio::test]
async fn local_backend_round_trip_through_trait_object() {
    let root = tempfile::tempdir().unwrap();
    let store = build_media_store(&local_config(root.path())).await.unwrap();
    store.health_check().await.unwrap();

    let mut thumbnail = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    thumbnail.write_all(b"jpeg bytes").unwrap();

    let stored = store
        .upload(thumbnail.path(), MediaKind::Image, Some("image/jpeg"))
        .await
        .unwrap();

    let relative = stored
        .url
        .strip_prefix("http://localhost:8000/public/media/")
        .unwrap();
    assert!(root.path().join(relative).exists());

    store.delete(&stored.url, MediaKind::Image).await.unwrap();
    assert!(!root.path().join(relative).exists());
}
