//! Basic search-and-replace built on top of `unirope`.
//!
//! Usage:
//!     search_and_replace <search_pattern> <replacement_text> <input_filepath>
//!
//! The file contents with the search-and-replace performed on it is sent to
//! stdout.

use unirope::{iter::Chars, Rope};

fn main() {
    let (search_pattern, replacement_text, filepath) = if std::env::args().count() > 3 {
        (
            std::env::args().nth(1).unwrap(),
            std::env::args().nth(2).unwrap(),
            std::env::args().nth(3).unwrap(),
        )
    } else {
        eprintln!(
            "Usage:\n    search_and_replace <search_pattern> <replacement_text> <input_filepath>"
        );
        return;
    };

    let contents = std::fs::read_to_string(&filepath)
        .expect("Cannot read file: either it doesn't exist, file permissions don't allow reading, or it is not utf8 text.");
    let text = Rope::from_str(&contents);

    let result = search_and_replace(&text, &search_pattern, &replacement_text);

    println!("{}", result);
}

/// Searches `rope` for `search_pattern` and replaces all matches with
/// `replacement_text`, returning the resulting rope.
///
/// Matches are found and replaced in batches: collect a fixed number of
/// matches, replace them, then resume the search from where the batch
/// left off. This bounds the memory used to track in-flight matches
/// while still amortizing the cost of restarting the search over
/// multiple matches.
fn search_and_replace(rope: &Rope, search_pattern: &str, replacement_text: &str) -> Rope {
    const BATCH_SIZE: usize = 256;
    let replacement_text_len = replacement_text.chars().count();

    let mut result = rope.clone();
    let mut head = 0;
    let mut matches = Vec::with_capacity(BATCH_SIZE);
    loop {
        matches.clear();
        let tail = result.slice(head, result.len_chars());
        for m in SearchIter::from_rope(&tail, search_pattern).take(BATCH_SIZE) {
            matches.push(m);
        }

        if matches.is_empty() {
            break;
        }

        let mut index_diff: isize = 0;
        for &(start, end) in matches.iter() {
            let start_d = (head as isize + start as isize + index_diff) as usize;
            let end_d = (head as isize + end as isize + index_diff) as usize;

            result = result.remove(start_d, end_d);
            result = result.insert(start_d, replacement_text);

            let match_len = (end - start) as isize;
            index_diff = index_diff - match_len + replacement_text_len as isize;
        }

        head = (head as isize + index_diff + matches.last().unwrap().1 as isize) as usize;
    }

    result
}

/// An iterator over simple textual matches in a rope.
///
/// Naive (no Boyer-Moore/KMP), but the important thing is the
/// interface: a regex-backed implementation could drop in here without
/// `search_and_replace` noticing.
struct SearchIter<'a> {
    char_iter: Chars<'a>,
    search_pattern: &'a str,
    search_pattern_char_len: usize,
    cur_index: usize,
    possible_matches: Vec<std::str::Chars<'a>>,
}

impl<'a> SearchIter<'a> {
    fn from_rope<'b>(rope: &'b Rope, search_pattern: &'b str) -> SearchIter<'b> {
        assert!(
            !search_pattern.is_empty(),
            "Can't search using an empty search pattern."
        );
        SearchIter {
            char_iter: rope.chars(),
            search_pattern,
            search_pattern_char_len: search_pattern.chars().count(),
            cur_index: 0,
            possible_matches: Vec::new(),
        }
    }
}

impl<'a> Iterator for SearchIter<'a> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        while let Some(next_char) = self.char_iter.next() {
            self.cur_index += 1;

            self.possible_matches.push(self.search_pattern.chars());

            let mut i = 0;
            while i < self.possible_matches.len() {
                let pattern_char = self.possible_matches[i].next().unwrap();
                if next_char == pattern_char {
                    if self.possible_matches[i].clone().next().is_none() {
                        let char_match_range = (
                            self.cur_index - self.search_pattern_char_len,
                            self.cur_index,
                        );
                        self.possible_matches.clear();
                        return Some(char_match_range);
                    } else {
                        i += 1;
                    }
                } else {
                    self.possible_matches.swap_remove(i);
                }
            }
        }

        None
    }
}
