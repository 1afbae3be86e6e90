/// Flattens parenthesized sub-text into numbered groups.
///
/// Each innermost-first `(...)` span is replaced by `@N`, where `N` is the
/// group's index, and its inner text (with any nested groups already replaced)
/// becomes group `N`. Unmatched `)` are left in place; unclosed `(` stay as
/// literal text.
#[must_use]
pub fn group_parens(text: &str) -> (String, Vec<String>) {
    let mut text = text.to_string();
    let mut groups = Vec::new();
    let mut open = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        match text.as_bytes()[pos] {
            b'(' => open.push(pos),
            b')' => {
                if let Some(start) = open.pop() {
                    let token = format!("@{}", groups.len());
                    groups.push(text[start + 1..pos].to_string());
                    text.replace_range(start..=pos, &token);
                    pos = start + token.len() - 1;
                }
            }
            _ => {}
        }
        pos += 1;
    }
    (text, groups)
}
