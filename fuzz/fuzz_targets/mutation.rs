#![no_main]

use libfuzzer_sys::{
    arbitrary::{self, Arbitrary},
    fuzz_target,
};
use unirope::Rope;

const SMALL_TEXT: &str = "Hello, world!\r\nA couple of lines of plain text.\n";
const MEDIUM_TEXT: &str = "Hello there! How're you doing? It's a fine day, isn't it?\r\n\
Aren't the birds singing? I love Mondays!\n\
こんにちは、みなさん！\n";

#[derive(Arbitrary, Copy, Clone, Debug)]
enum Op<'a> {
    Insert(usize, &'a str),
    Remove(usize, usize),
    SplitAt(usize, bool),
    Append(&'a str),
}

#[derive(Arbitrary, Copy, Clone, Debug)]
enum StartingText<'a> {
    Small,
    Medium,
    Custom(&'a str),
}

fuzz_target!(|data: (StartingText, Vec<Op>)| {
    let mut r = Rope::from_str(match data.0 {
        StartingText::Small => SMALL_TEXT,
        StartingText::Medium => MEDIUM_TEXT,
        StartingText::Custom(s) => s,
    });

    for op in data.1 {
        match op {
            Op::Insert(idx, s) => {
                if let Ok(new_r) = r.try_insert(idx, s) {
                    r = new_r;
                }
            }
            Op::Remove(idx_1, idx_2) => {
                let (start, end) = if idx_1 <= idx_2 { (idx_1, idx_2) } else { (idx_2, idx_1) };
                if let Ok(new_r) = r.try_remove(start, end) {
                    r = new_r;
                }
            }
            Op::SplitAt(idx, keep_right) => {
                if let Ok((left, right)) = r.try_split_at(idx) {
                    r = if keep_right { right } else { left };
                }
            }
            Op::Append(s) => {
                r = r.append(&Rope::from_str(s));
            }
        }
    }

    r.assert_invariants();
});
