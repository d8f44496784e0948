/// Checks that every `)`, `]` and `}` closes the latest still-open bracket of the
/// same kind and that nothing is left open. Other characters are skipped.
pub(crate) fn validate_brackets(s: &str) -> bool {
    let mut stack = Vec::new();
    for c in s.chars() {
        let opener = match c {
            '(' | '[' | '{' => {
                stack.push(c);
                continue;
            }
            ')' => '(',
            ']' => '[',
            '}' => '{',
            _ => continue,
        };
        if stack.pop() != Some(opener) {
            return false;
        }
    }
    stack.is_empty()
}
