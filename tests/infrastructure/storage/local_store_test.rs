use std::io;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream;

use transcribe_gateway::application::ports::{StagingStore, StagingStoreError};
use transcribe_gateway::domain::{AudioFormat, StagingName, UploadId};
use transcribe_gateway::infrastructure::storage::LocalStagingStore;

fn create_test_store(max_upload_bytes: u64) -> (tempfile::TempDir, LocalStagingStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStagingStore::new(dir.path().to_path_buf(), max_upload_bytes).unwrap();
    (dir, store)
}

fn staging_name(filename: &str) -> StagingName {
    StagingName::new(&UploadId::new(), filename, AudioFormat::Wav)
}

fn entries(dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

#[tokio::test]
async fn given_chunked_stream_when_storing_then_file_holds_all_bytes() {
    let (dir, store) = create_test_store(1024);
    let name = staging_name("clip.wav");

    let chunks = vec![Ok(Bytes::from("RIFF")), Ok(Bytes::from("....WAVE"))];
    let staged = store
        .store(&name, stream::iter(chunks).boxed())
        .await
        .unwrap();

    assert_eq!(staged.size_bytes, 12);
    assert_eq!(staged.name, name);
    assert!(staged.path.starts_with(std::fs::canonicalize(dir.path()).unwrap()));
    assert_eq!(std::fs::read(&staged.path).unwrap(), b"RIFF....WAVE");
}

#[tokio::test]
async fn given_stream_over_limit_when_storing_then_rejects_and_leaves_nothing() {
    let (dir, store) = create_test_store(8);
    let name = staging_name("big.wav");

    let chunks = vec![Ok(Bytes::from("12345")), Ok(Bytes::from("67890"))];
    let result = store.store(&name, stream::iter(chunks).boxed()).await;

    assert!(matches!(result, Err(StagingStoreError::TooLarge { limit: 8 })));
    assert_eq!(entries(&dir), 0);
}

#[tokio::test]
async fn given_stream_error_when_storing_then_returns_io_error_and_leaves_nothing() {
    let (dir, store) = create_test_store(1024);
    let name = staging_name("clip.wav");

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "client went away")),
    ];
    let result = store.store(&name, stream::iter(chunks).boxed()).await;

    assert!(matches!(result, Err(StagingStoreError::Io(_))));
    assert_eq!(entries(&dir), 0);
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_file_is_removed() {
    let (dir, store) = create_test_store(1024);
    let name = staging_name("clip.wav");

    let staged = store
        .store(&name, stream::iter(vec![Ok(Bytes::from("data"))]).boxed())
        .await
        .unwrap();
    store.delete(&name).await.unwrap();

    assert!(!staged.path.exists());
    assert_eq!(entries(&dir), 0);
}

#[tokio::test]
async fn given_missing_file_when_deleting_then_succeeds() {
    let (_dir, store) = create_test_store(1024);

    let result = store.delete(&staging_name("never-written.wav")).await;

    assert!(result.is_ok());
}
