use splitree::{Split, TreeManip};

fn split_with_bits(num_leaves: usize, bits: &[usize]) -> Split {
    let mut s = Split::new(num_leaves);
    for &b in bits {
        s.set_bit(b);
    }
    s
}

// --- TESTS SPLIT ALGEBRA ---
#[test]
fn test_complement_is_equivalent_but_not_equal() {
    let a = split_with_bits(4, &[2, 3]);
    let b = split_with_bits(4, &[0, 1]);
    assert_ne!(a, b);
    assert!(a.is_equivalent(&b));
    assert!(b.is_equivalent(&a));
}

#[test]
fn test_equivalence_is_reflexive() {
    let a = split_with_bits(4, &[1, 2]);
    assert!(a.is_equivalent(&a.clone()));
}

#[test]
fn test_compatibility_is_symmetric() {
    let splits = [
        split_with_bits(6, &[0, 1]),
        split_with_bits(6, &[0, 1, 2]),
        split_with_bits(6, &[1, 2]),
        split_with_bits(6, &[3, 4]),
        split_with_bits(6, &[5]),
    ];
    for a in &splits {
        for b in &splits {
            assert_eq!(a.is_compatible_with(b), b.is_compatible_with(a));
            assert_eq!(a.conflicts_with(b), !a.is_compatible_with(b));
        }
    }
}

#[test]
fn test_union_accumulates() {
    let mut acc = Split::new(6);
    acc.add(&split_with_bits(6, &[0, 2]));
    acc.add(&split_with_bits(6, &[2, 4]));
    assert_eq!(acc.pattern(), "*-*-*-");

    acc.clear();
    assert_eq!(acc.pattern(), "------");
}

#[test]
fn test_splits_spanning_word_boundary() {
    let low = split_with_bits(70, &[0, 1, 62, 63]);
    let high = split_with_bits(70, &[64, 65, 69]);

    // Disjoint across the word boundary
    assert!(low.is_compatible_with(&high));

    let mut all = low.clone();
    all.add(&high);
    assert!(all.bit_at(63));
    assert!(all.bit_at(64));
    assert_eq!(all.pattern().matches('*').count(), 7);
}

// --- TESTS SPLITS FROM TREES ---
#[test]
fn test_same_topology_same_split_set() {
    let mut a = TreeManip::new();
    a.build_from_newick("(1:0.1,2:0.2,(3:0.3,4:0.4):0.5);", false, false)
        .unwrap();
    let mut b = TreeManip::new();
    b.build_from_newick("(1:0.9,2:0.8,(3:0.7,4:0.6):0.1);", false, false)
        .unwrap();
    assert_eq!(a.store_splits(), b.store_splits());
}

#[test]
fn test_different_topology_different_split_set() {
    let mut a = TreeManip::new();
    a.build_from_newick("(1:0.1,2:0.2,(3:0.3,4:0.4):0.5);", false, false)
        .unwrap();
    let mut b = TreeManip::new();
    b.build_from_newick("(1:0.1,3:0.2,(2:0.3,4:0.4):0.5);", false, false)
        .unwrap();
    assert_ne!(a.store_splits(), b.store_splits());
}

#[test]
fn test_sibling_order_does_not_matter() {
    let mut a = TreeManip::new();
    a.build_from_newick("(1:0.1,2:0.2,(3:0.3,4:0.4):0.5);", false, false)
        .unwrap();
    let mut b = TreeManip::new();
    b.build_from_newick("((4:0.4,3:0.3):0.5,2:0.2,1:0.1);", false, false)
        .unwrap();
    assert_eq!(a.store_splits(), b.store_splits());
}
