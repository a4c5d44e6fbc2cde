//! This test file ensures that all of the iterator lifetimes work the
//! way we want, and that there are no regressions. It's a "does this
//! compile?" test.

use unirope::Rope;

const TEXT: &str = "Hello there! How're you doing? It's a fine day, \
isn't it? Aren't the birds singing?\nI love Mondays!";

fn main() {
    let rope = Rope::from_str(TEXT);

    // `chars()`/`chunks()` borrow the rope, and the items they yield
    // are tied to the rope's lifetime, not to the iterator's — so
    // collecting into owned values after the iterator is dropped
    // should compile fine.
    let (char_count, chunk_count, first_char, last_chunk) = {
        let mut char_count = 0;
        let mut first_char = None;
        for c in rope.chars() {
            if first_char.is_none() {
                first_char = Some(c);
            }
            char_count += 1;
        }

        let mut chunk_count = 0;
        let mut last_chunk = "";
        for chunk in rope.chunks() {
            last_chunk = chunk;
            chunk_count += 1;
        }

        (char_count, chunk_count, first_char, last_chunk)
    };

    // `line()`/`slice()` return owned `Rope`s, so chaining them doesn't
    // borrow from any intermediate value at all.
    let nested = rope.slice(4, 50).slice(4, 40).line(0);

    println!(
        "{} {} {:?} {} {}",
        char_count, chunk_count, first_char, last_chunk, nested
    );
}
