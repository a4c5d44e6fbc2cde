//! Randomized tests to try to catch CRLF seam errors.

use unirope::Rope;

#[test]
fn crlf_inserts() {
    let mut tree = Rope::new();

    // Do a bunch of random incoherent inserts of CRLF pairs.
    for _ in 0..(1 << 10) {
        let len = tree.len_chars().max(1);
        tree = tree.insert(fastrand::usize(..len), "\r\n\r\n");
        tree = tree.insert(fastrand::usize(..len), "\n\r\n\r");
        tree = tree.insert(fastrand::usize(..len), "\r\n\r\n");
        tree = tree.insert(fastrand::usize(..len), "\n\r\n\r");
        tree = tree.insert(fastrand::usize(..len), "\r\n\r\n");
        tree = tree.insert(fastrand::usize(..len), "こんいちは、");
        tree = tree.insert(fastrand::usize(..len), "\n\r\n\r");
        tree = tree.insert(fastrand::usize(..len), "\r\n\r\n");
        tree = tree.insert(fastrand::usize(..len), "\n\r\n\r");
        tree = tree.insert(fastrand::usize(..len), "みんなさん！");

        // Make sure the tree is sound.
        tree.assert_invariants();
    }
}

#[test]
fn crlf_removals() {
    let mut tree = Rope::new();

    // Build tree.
    for _ in 0..(1 << 8) {
        let len = tree.len_chars().max(1);
        tree = tree.insert(
            fastrand::usize(..len),
            "\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\nこんいちは、\n\
             \r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\
             みんなさん！\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\r\n\r\n\r\n\r\n\r\n\rみんなさん！",
        );
    }

    // Do a bunch of random incoherent removals.
    for _ in 0..(1 << 9) {
        let start = fastrand::usize(..tree.len_chars().max(1));
        let end = (start + 5).min(tree.len_chars());
        tree = tree.remove(start, end);

        let start = fastrand::usize(..tree.len_chars().max(1));
        let end = (start + 9).min(tree.len_chars());
        tree = tree.remove(start, end);

        // Make sure the tree is sound.
        tree.assert_invariants();
    }
}
