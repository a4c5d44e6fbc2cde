//! A small end-to-end tour of the basic API surface.

use unirope::Rope;

const BOOK: &str = "Chapter one.\nIt was a dark and stormy night.\n\
Chapter two.\nThe weather hadn't improved.\n\
Chapter three.\nSomeone really should fix the weather.\n";

fn main() {
    let mut text = Rope::from_str(BOOK);

    // Print the second line (zero-indexed) to see the terrible writing.
    println!("{}", text.line(1));

    // Get the start/end char indices of the line.
    let start_idx = text.line_to_char(1);
    let end_idx = text.line_to_char(2);

    // Remove the line and replace it with something better. Both
    // operations return a new rope, so we reassign `text`.
    text = text.remove(start_idx, end_idx);
    text = text.insert(start_idx, "The flowers are... so... dunno.\n");

    // Print the changes, along with the previous line for context.
    let start_idx = text.line_to_char(0);
    let end_idx = text.line_to_char(2);
    println!("{}", text.slice(start_idx, end_idx));
}
