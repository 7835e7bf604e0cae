//! End-to-end tests for adding trees to a store

use merkledag::tree::hasher::Sha256Provider;
use merkledag::tree::key::derive_key;
use merkledag::tree::serializer::serialize;
use merkledag::{
    add, reduce, DagBuilder, DagError, HashAlgorithm, KvStore, MemoryStore, Node, NodeKind,
};
use sha2::{Digest, Sha256};

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// A directory of two files "A" and "B" commits to
/// hex(sha256(hex(sha256("A")) + hex(sha256("B"))))
#[test]
fn test_two_file_directory_vector() {
    let store = MemoryStore::new();
    let tree = Node::directory(vec![Node::file(b"A".to_vec()), Node::file(b"B".to_vec())]);

    let root = add(&store, &tree).unwrap();

    let expected = sha256_hex(format!("{}{}", sha256_hex(b"A"), sha256_hex(b"B")).as_bytes());
    assert_eq!(root, expected);

    let file_a = format!("file_{}", hex::encode(b"A"));
    let file_b = format!("file_{}", hex::encode(b"B"));
    assert_eq!(store.get(&file_a).unwrap(), Some(b"A".to_vec()));
    assert_eq!(store.get(&file_b).unwrap(), Some(b"B".to_vec()));
    let dir_key = format!("dir_{}", sha256_hex(b"file_41file_42"));
    assert_eq!(store.get(&dir_key).unwrap(), Some(b"AB".to_vec()));
}

/// Repeated adds of the same tree to fresh stores yield the same root
#[test]
fn test_add_is_deterministic() {
    let tree = Node::directory(vec![
        Node::file(b"alpha".to_vec()),
        Node::directory(vec![Node::file(b"beta".to_vec()), Node::file(b"gamma".to_vec())]),
        Node::file(b"delta".to_vec()),
    ]);

    let roots: Vec<String> = (0..5)
        .map(|_| add(&MemoryStore::new(), &tree).unwrap())
        .collect();

    assert!(roots.windows(2).all(|w| w[0] == w[1]));
}

/// Re-adding identical file content writes the same key, leaving one entry
#[test]
fn test_idempotent_file_storage() {
    let store = MemoryStore::new();
    let file = Node::file(b"same bytes".to_vec());

    let first = add(&store, &file).unwrap();
    let second = add(&store, &file).unwrap();

    assert_eq!(first, second);
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.keys(),
        vec![format!("file_{}", hex::encode(b"same bytes"))]
    );
    assert_eq!(
        derive_key(&file, &Sha256Provider).unwrap().as_str(),
        format!("file_{}", hex::encode(b"same bytes"))
    );
}

/// Duplicate children inside one directory collapse to one file entry
#[test]
fn test_duplicate_children_share_entry() {
    let store = MemoryStore::new();
    let tree = Node::directory(vec![Node::file(b"x".to_vec()), Node::file(b"x".to_vec())]);

    add(&store, &tree).unwrap();

    assert_eq!(store.len(), 2);
}

/// Child order is part of the committed content
#[test]
fn test_child_order_changes_root() {
    let ab = Node::directory(vec![Node::file(b"A".to_vec()), Node::file(b"B".to_vec())]);
    let ba = Node::directory(vec![Node::file(b"B".to_vec()), Node::file(b"A".to_vec())]);

    assert_ne!(
        add(&MemoryStore::new(), &ab).unwrap(),
        add(&MemoryStore::new(), &ba).unwrap()
    );
}

/// Directories of equal aggregate size but different content do not collide
#[test]
fn test_equal_size_directories_do_not_collide() {
    let store = MemoryStore::new();
    let left = Node::directory(vec![Node::file(b"1234".to_vec())]);
    let right = Node::directory(vec![Node::file(b"abcd".to_vec())]);

    let left_root = add(&store, &left).unwrap();
    let right_root = add(&store, &right).unwrap();

    assert_ne!(left_root, right_root);
    let dir_keys: Vec<_> = store
        .keys()
        .into_iter()
        .filter(|k| k.starts_with("dir_"))
        .collect();
    assert_eq!(dir_keys.len(), 2);
}

/// Padding makes [A,B,C] and [A,B,C,C] share a root digest, but each keeps
/// its own store entry
#[test]
fn test_padded_directories_keep_separate_entries() {
    let store = MemoryStore::new();
    let files = |names: &[&str]| -> Node {
        Node::directory(names.iter().map(|n| Node::file(n.as_bytes())).collect())
    };
    let three = files(&["A", "B", "C"]);
    let four = files(&["A", "B", "C", "C"]);

    let three_root = add(&store, &three).unwrap();
    let four_root = add(&store, &four).unwrap();
    assert_eq!(three_root, four_root);

    let three_key = derive_key(&three, &Sha256Provider).unwrap();
    let four_key = derive_key(&four, &Sha256Provider).unwrap();
    assert_ne!(three_key, four_key);

    // three files, two directories
    assert_eq!(store.len(), 5);
    assert_eq!(store.get(three_key.as_str()).unwrap(), Some(b"ABC".to_vec()));
    assert_eq!(store.get(four_key.as_str()).unwrap(), Some(b"ABCC".to_vec()));
}

/// A three-child directory uses the odd-length padding path
#[test]
fn test_three_child_directory_matches_reducer() {
    let store = MemoryStore::new();
    let tree = Node::directory(vec![
        Node::file(b"a".to_vec()),
        Node::file(b"b".to_vec()),
        Node::file(b"c".to_vec()),
    ]);

    let root = add(&store, &tree).unwrap();

    let leaves = [sha256_hex(b"a"), sha256_hex(b"b"), sha256_hex(b"c")];
    let left = sha256_hex(format!("{}{}", leaves[0], leaves[1]).as_bytes());
    let right = sha256_hex(format!("{}{}", leaves[2], leaves[2]).as_bytes());
    let expected = sha256_hex(format!("{}{}", left, right).as_bytes());

    assert_eq!(root, expected);
    assert_eq!(reduce(&Sha256Provider, &leaves).unwrap(), expected);
}

/// Nested directories are reduced level by level
#[test]
fn test_nested_directory_root() {
    let store = MemoryStore::new();
    let tree = Node::directory(vec![
        Node::directory(vec![Node::file(b"A".to_vec()), Node::file(b"B".to_vec())]),
        Node::file(b"C".to_vec()),
    ]);

    let root = add(&store, &tree).unwrap();

    let inner = sha256_hex(format!("{}{}", sha256_hex(b"A"), sha256_hex(b"B")).as_bytes());
    let expected = sha256_hex(format!("{}{}", inner, sha256_hex(b"C")).as_bytes());
    assert_eq!(root, expected);

    // root dir, inner dir, three files
    assert_eq!(store.len(), 5);
    let inner_key = format!("dir_{}", sha256_hex(b"file_41file_42"));
    let root_key = format!("dir_{}", sha256_hex(format!("{}file_43", inner_key).as_bytes()));
    assert_eq!(
        root_key,
        derive_key(&tree, &Sha256Provider).unwrap().as_str()
    );
    assert_eq!(store.get(&root_key).unwrap(), Some(serialize(&tree).unwrap()));
    assert_eq!(store.get(&inner_key).unwrap(), Some(b"AB".to_vec()));
}

/// A symlink anywhere in the tree aborts before any write
#[test]
fn test_unsupported_kind_performs_no_writes() {
    let store = MemoryStore::new();
    let tree = Node::directory(vec![
        Node::file(b"A".to_vec()),
        Node::directory(vec![Node::file(b"B".to_vec()), Node::symlink("../A")]),
    ]);

    match add(&store, &tree) {
        Err(DagError::UnsupportedNodeKind(kind)) => assert_eq!(kind, NodeKind::Symlink),
        other => panic!("expected UnsupportedNodeKind, got {:?}", other),
    }
    assert!(store.is_empty());

    assert!(matches!(
        serialize(&Node::symlink("x")),
        Err(DagError::UnsupportedNodeKind(NodeKind::Symlink))
    ));
    assert!(matches!(
        derive_key(&Node::symlink("x"), &Sha256Provider),
        Err(DagError::UnknownNodeKind(NodeKind::Symlink))
    ));
}

/// The configured algorithm flows through leaves and pairs alike
#[test]
fn test_blake3_root() {
    let store = MemoryStore::new();
    let tree = Node::directory(vec![Node::file(b"A".to_vec()), Node::file(b"B".to_vec())]);

    let root = DagBuilder::new(&store)
        .with_algorithm(HashAlgorithm::Blake3)
        .add(&tree)
        .unwrap();

    let leaf = |d: &[u8]| blake3::hash(d).to_hex().to_string();
    let expected = leaf(format!("{}{}", leaf(b"A"), leaf(b"B")).as_bytes());
    assert_eq!(root, expected);
}
