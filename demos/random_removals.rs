//! Builds a large rope with `RopeBuilder`, then hammers `remove` with
//! random small spans.

use unirope::RopeBuilder;

fn main() {
    let mut builder = RopeBuilder::new();

    for _ in 0..(1 << 14) {
        builder.append(
            "Hello world! How are you doing? Let's keep inserting more items.\r\nこんいちは、みんなさん！ ",
        );
    }

    let mut tree = builder.finish();

    println!("Starting char count: {}", tree.len_chars());

    let mut remove_count = 0;
    for _ in 0..(1 << 14) {
        for _ in 0..12 {
            let len = tree.len_chars().max(1);
            let start = fastrand::usize(..len);
            let end = (start + 6).min(tree.len_chars());
            tree = tree.remove(start, end);
        }
        remove_count += 12;
    }

    println!("Removals: {}", remove_count);
    println!("Final char count: {}", tree.len_chars());
}
