use splitree::{TreeError, TreeSummary};

const T1: &str = "(1:0.1,2:0.2,(3:0.3,4:0.4):0.5);";
const T2: &str = "(1:0.1,3:0.2,(2:0.3,4:0.4):0.5);";
const T3: &str = "(1:0.9,2:0.8,(3:0.7,4:0.6):0.1);";

// --- TESTS CLUSTERING ---
#[test]
fn test_groups_by_topology_in_first_seen_order() {
    let mut summary = TreeSummary::new();
    summary.read_trees([T1, T2, T3], 0).unwrap();

    assert_eq!(summary.num_trees(), 3);
    // T1 and T3 share a topology; T2 differs. Groups are numbered by
    // first appearance
    assert_eq!(summary.topologies(), &[vec![0, 2], vec![1]]);
}

#[test]
fn test_skip_discards_burnin() {
    let mut summary = TreeSummary::new();
    summary.read_trees([T1, T2, T3], 1).unwrap();

    assert_eq!(summary.num_trees(), 2);
    assert_eq!(summary.newick(0), Ok(T2));
    assert_eq!(summary.topologies(), &[vec![0], vec![1]]);
}

#[test]
fn test_stored_newicks_are_verbatim() {
    let mut summary = TreeSummary::new();
    summary.read_trees([T1, T2], 0).unwrap();

    assert_eq!(summary.newick(0), Ok(T1));
    assert_eq!(summary.newick(1), Ok(T2));
    assert_eq!(
        summary.newick(2),
        Err(TreeError::TreeIndexOutOfRange { index: 2, len: 2 })
    );
}

#[test]
fn test_rebuild_stored_tree() {
    let mut summary = TreeSummary::new();
    summary.read_trees([T1], 0).unwrap();

    let tree = summary.tree(0).unwrap();
    assert_eq!(tree.num_leaves(), 4);
    assert_eq!(tree.num_internals(), 2);

    assert!(matches!(
        summary.tree(7),
        Err(TreeError::TreeIndexOutOfRange { index: 7, len: 1 })
    ));
}

#[test]
fn test_bad_description_stops_reading() {
    let mut summary = TreeSummary::new();
    let err = summary
        .read_trees([T1, "(1:0.1,2:0.2);", T2], 0)
        .unwrap_err();
    assert_eq!(err, TreeError::TooFewLeaves(2));

    // Trees read before the failure are kept; the bad one is not stored
    assert_eq!(summary.num_trees(), 1);
    assert_eq!(summary.newick(0), Ok(T1));
}

#[test]
fn test_leaf_number_beyond_leaf_count_is_an_error() {
    let mut summary = TreeSummary::new();
    let err = summary
        .read_trees(["(1:0.1,2:0.2,(3:0.3,9:0.4):0.5);"], 0)
        .unwrap_err();
    assert_eq!(
        err,
        TreeError::LeafNumberOutOfRange {
            number: 9,
            num_leaves: 4
        }
    );
    assert_eq!(summary.num_trees(), 0);
}

#[test]
fn test_clear_forgets_everything() {
    let mut summary = TreeSummary::new();
    summary.read_trees([T1, T2], 0).unwrap();
    summary.clear();
    assert_eq!(summary.num_trees(), 0);
    assert!(summary.topologies().is_empty());
}

// --- TESTS REPORT ---
#[test]
fn test_summarize_report() {
    let mut summary = TreeSummary::new();
    summary.read_trees([T1, T2, T3], 0).unwrap();
    let report = summary.summarize();

    assert!(report.contains("Read 3 trees"));
    assert!(report.contains("Topology 1 seen in these 2 trees:"));
    assert!(report.contains(" 0 2"));
    assert!(report.contains("Topology 2 seen in these 1 trees:"));
    assert!(report.contains("Topologies sorted by sample frequency:"));

    // Frequency rows are sorted by count, descending
    let rows: Vec<Vec<&str>> = report
        .lines()
        .rev()
        .take(2)
        .map(|l| l.split_whitespace().collect())
        .collect();
    assert_eq!(rows[1], ["1", "2"]);
    assert_eq!(rows[0], ["2", "1"]);
}

#[test]
fn test_summarize_frequency_ties_keep_first_seen_order() {
    let mut summary = TreeSummary::new();
    summary.read_trees([T1, T2], 0).unwrap();
    let report = summary.summarize();

    let rows: Vec<Vec<&str>> = report
        .lines()
        .rev()
        .take(2)
        .map(|l| l.split_whitespace().collect())
        .collect();
    // Both topologies were seen once; topology 1 stays first
    assert_eq!(rows[1], ["1", "1"]);
    assert_eq!(rows[0], ["2", "1"]);
}
