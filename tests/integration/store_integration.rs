//! Integration tests for the persistent store

use merkledag::store::{open_store, StorageBackend, StorageConfig};
use merkledag::tree::hasher::Sha256Provider;
use merkledag::tree::key::derive_key;
use merkledag::tree::walker::Walker;
use merkledag::{add, DagBuilder, KvStore, Node, SledStore};
use std::fs;
use tempfile::TempDir;

/// Test that a tree added to sled survives a reopen
#[test]
fn test_sled_entries_persist() {
    let store_dir = TempDir::new().unwrap();
    let tree = Node::directory(vec![Node::file(b"A".to_vec()), Node::file(b"B".to_vec())]);

    {
        let store = SledStore::open(store_dir.path()).unwrap();
        add(&store, &tree).unwrap();
        store.flush().unwrap();
    }

    let store = SledStore::open(store_dir.path()).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.get("file_41").unwrap(), Some(b"A".to_vec()));
    assert_eq!(store.get("file_42").unwrap(), Some(b"B".to_vec()));
    let dir_key = derive_key(&tree, &Sha256Provider).unwrap();
    assert_eq!(store.get(dir_key.as_str()).unwrap(), Some(b"AB".to_vec()));
}

/// Test that re-adding a tree to an existing sled store adds nothing new
#[test]
fn test_sled_readd_is_noop() {
    let store_dir = TempDir::new().unwrap();
    let store = SledStore::open(store_dir.path()).unwrap();
    let tree = Node::directory(vec![
        Node::file(b"one".to_vec()),
        Node::directory(vec![Node::file(b"two".to_vec())]),
    ]);

    let first = add(&store, &tree).unwrap();
    let count = store.len();
    let second = add(&store, &tree).unwrap();

    assert_eq!(first, second);
    assert_eq!(store.len(), count);
}

/// Test adding a filesystem tree through a store opened from configuration
#[test]
fn test_walker_into_configured_store() {
    let workspace = TempDir::new().unwrap();
    let root = workspace.path().join("data");
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("docs").join("readme.md"), "# readme").unwrap();
    fs::write(root.join("main.rs"), "fn main() {}").unwrap();

    let store_dir = TempDir::new().unwrap();
    let config = StorageConfig {
        backend: StorageBackend::Sled,
        path: store_dir.path().join("db"),
    };
    let store = open_store(&config).unwrap();

    let tree = Walker::new(&root).load().unwrap();
    let root_digest = DagBuilder::new(&*store).add(&tree).unwrap();
    assert_eq!(root_digest.len(), 64);

    assert!(store
        .get(&format!("file_{}", hex::encode("fn main() {}")))
        .unwrap()
        .is_some());
    assert_eq!(
        store
            .get(derive_key(&tree, &Sha256Provider).unwrap().as_str())
            .unwrap(),
        Some(b"# readmefn main() {}".to_vec())
    );
}
