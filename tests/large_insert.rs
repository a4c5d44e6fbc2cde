use unirope::Rope;

#[test]
fn insert_multi_kilobyte_string_stays_sound() {
    let rope = Rope::from_str("Hello, world!");
    let big_text: String = "abcdefghij\r\n".repeat(1000);

    let rope = rope.insert(5, &big_text);
    rope.assert_invariants();

    let expected = format!("Hello{}, world!", big_text);
    assert_eq!(expected, rope.to_string());
}

#[test]
fn insert_multi_kilobyte_string_into_existing_leaf() {
    // The receiver's own leaf is non-trivial but still small, so the
    // inserted text dominates the resulting size entirely.
    let rope = Rope::from_str(&"x".repeat(100));
    let big_text = "y".repeat(20_000);

    let rope = rope.insert(50, &big_text);
    rope.assert_invariants();

    let expected = format!("{}{}{}", "x".repeat(50), big_text, "x".repeat(50));
    assert_eq!(expected, rope.to_string());
}
