/// Wrap text to fit within `width` columns, breaking at word boundaries.
/// Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                result.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            result.push(word.into_iter().collect());
            word = rest;
        }
        let word_len = word.len();
        if current_len == 0 {
            current = word.into_iter().collect();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.extend(word);
            current_len += 1 + word_len;
        } else {
            result.push(std::mem::replace(&mut current, word.into_iter().collect()));
            current_len = word_len;
        }
    }
    if current_len > 0 {
        result.push(current);
    }
    if result.is_empty() {
        result.push(String::new());
    }
    result
}
