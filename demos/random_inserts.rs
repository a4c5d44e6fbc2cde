//! Hammers `insert` with random offsets to exercise rebalancing.

use unirope::Rope;

fn main() {
    let mut tree = Rope::new();

    for _ in 0..(1 << 14) {
        let len = tree.len_chars().max(1);
        tree = tree.insert(fastrand::usize(..len), "Hello ");
        tree = tree.insert(fastrand::usize(..len), "world! ");
        tree = tree.insert(fastrand::usize(..len), "How are ");
        tree = tree.insert(fastrand::usize(..len), "you ");
        tree = tree.insert(fastrand::usize(..len), "doing?\r\n");
        tree = tree.insert(fastrand::usize(..len), "Let's ");
        tree = tree.insert(fastrand::usize(..len), "keep ");
        tree = tree.insert(fastrand::usize(..len), "inserting ");
        tree = tree.insert(fastrand::usize(..len), "more ");
        tree = tree.insert(fastrand::usize(..len), "items.\r\n");
        tree = tree.insert(fastrand::usize(..len), "こんいちは、");
        tree = tree.insert(fastrand::usize(..len), "みんなさん！");
    }

    println!("Final char count: {}", tree.len_chars());
}
