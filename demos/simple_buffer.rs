//! A minimal text-editor buffer built on top of `unirope::Rope`.

#![allow(dead_code)]

use unirope::iter::{Chars, Chunks, Lines};
use unirope::Rope;

struct TextBuffer {
    text: Rope,
    path: String,
    dirty: bool,
}

impl TextBuffer {
    fn from_path(path: &str) -> std::io::Result<TextBuffer> {
        let contents = std::fs::read_to_string(path)?;
        Ok(TextBuffer {
            text: Rope::from_str(&contents),
            path: path.to_string(),
            dirty: false,
        })
    }

    fn get_line(&self, idx: usize) -> Rope {
        self.text.line(idx)
    }

    fn chars(&self) -> Chars<'_> {
        self.text.chars()
    }

    fn lines(&self) -> Lines<'_> {
        self.text.lines()
    }

    fn chunks(&self) -> Chunks<'_> {
        self.text.chunks()
    }

    fn edit(&mut self, start: usize, end: usize, text: &str) {
        if start != end {
            self.text = self.text.remove(start, end);
        }
        if !text.is_empty() {
            self.text = self.text.insert(start, text);
        }
        self.dirty = true;
    }
}

fn main() {
    let filepath = if std::env::args().count() > 1 {
        std::env::args().nth(1).unwrap()
    } else {
        println!(
            "You must pass a filepath! Only received {} arguments.",
            std::env::args().count()
        );
        std::process::exit(1);
    };

    let mut buf = TextBuffer::from_path(&filepath).unwrap();

    buf.edit(3, 5, "Hello!");
    println!("{}", buf.get_line(2));

    // Exercise the rest of the buffer's read API too.
    let _ = buf.chars().count();
    let _ = buf.lines().count();
    let _ = buf.chunks().count();
}
