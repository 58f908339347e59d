//! Line-boundary segmentation with overlap.

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Splits a single line longer than `max_chars` into char-bounded chunks.
fn chunk_chars(line: &str, max_chars: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in line.char_indices() {
        if count == max_chars {
            chunks.push(&line[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < line.len() {
        chunks.push(&line[start..]);
    }
    chunks
}

/// Trailing whole pieces of `segment` whose combined length fits in `overlap_chars`.
fn overlap_tail<'a>(segment: &[&'a str], overlap_chars: usize) -> Vec<&'a str> {
    let mut total = 0;
    let mut tail = Vec::new();
    for piece in segment.iter().rev() {
        let len = char_len(piece);
        if total + len > overlap_chars {
            break;
        }
        total += len;
        tail.push(*piece);
    }
    tail.reverse();
    tail
}

/// Splits `text` into segments of at most `max_chars` chars.
///
/// Text that fits (or `max_chars == 0`) comes back as a single segment. Otherwise segments break
/// on line boundaries and each one after the first starts with the last whole lines of the
/// previous segment, up to `overlap_chars`. Lines longer than `max_chars` are cut by chars.
/// Every input line appears in at least one segment, in order.
pub fn split_segments(text: &str, max_chars: usize, overlap_chars: usize) -> Vec<String> {
    if max_chars == 0 || char_len(text) <= max_chars {
        return vec![text.to_string()];
    }

    let mut pieces: Vec<&str> = Vec::new();
    for line in text.split_inclusive('\n') {
        if char_len(line) <= max_chars {
            pieces.push(line);
        } else {
            pieces.extend(chunk_chars(line, max_chars));
        }
    }

    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;
    for piece in pieces {
        let len = char_len(piece);
        if current_len + len > max_chars && !current.is_empty() {
            segments.push(current.concat());
            current = overlap_tail(&current, overlap_chars);
            current_len = current.iter().map(|p| char_len(p)).sum();
            if current_len + len > max_chars {
                current.clear();
                current_len = 0;
            }
        }
        current.push(piece);
        current_len += len;
    }
    if !current.is_empty() {
        segments.push(current.concat());
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_segment() {
        assert_eq!(split_segments("a\nb", 10, 2), vec!["a\nb".to_string()]);
        assert_eq!(split_segments("", 10, 2), vec![String::new()]);
    }

    #[test]
    fn test_zero_max_disables_splitting() {
        let text = "x".repeat(50);
        assert_eq!(split_segments(&text, 0, 0), vec![text]);
    }

    #[test]
    fn test_splits_on_lines_without_overlap() {
        let text = "aaaa\nbbbb\ncccc\n";
        let segments = split_segments(text, 10, 0);
        assert_eq!(segments, vec!["aaaa\nbbbb\n", "cccc\n"]);
    }

    #[test]
    fn test_overlap_repeats_previous_tail() {
        let text = "aaaa\nbbbb\ncccc\ndddd\n";
        let segments = split_segments(text, 10, 5);
        assert_eq!(segments, vec!["aaaa\nbbbb\n", "bbbb\ncccc\n", "cccc\ndddd\n"]);
        for segment in &segments {
            assert!(segment.chars().count() <= 10);
        }
    }

    #[test]
    fn test_long_line_is_cut() {
        let text = "0123456789abcdef";
        let segments = split_segments(text, 6, 0);
        assert_eq!(segments, vec!["012345", "6789ab", "cdef"]);
    }

    #[test]
    fn test_char_boundaries_respected() {
        let text = "привет\nмир\nещё строка\n";
        let segments = split_segments(text, 8, 0);
        assert!(segments.len() > 1);
        let joined: String = segments.concat();
        assert_eq!(joined, text);
    }
}
