//! Repeatedly inserting at a fixed (wrapping) char offset.

use unirope::Rope;

fn main() {
    let mut tree = Rope::new();

    for _ in 0..16 {
        let len = tree.len_chars().max(1);
        tree = tree.insert(1298809 % len, "Hello world! How are you doing?\r\n");
        let len = tree.len_chars().max(1);
        tree = tree.insert(1298809 % len, "Let's keep inserting more items.\r\n");
        let len = tree.len_chars().max(1);
        tree = tree.insert(1298809 % len, "こんいちは、みんなさん！");
    }

    println!("{}", tree);
}
