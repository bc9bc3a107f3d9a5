//! Diff rendering for fixture comparison.

/// Render a diff between expected and actual output.
///
/// Outputs are single-line, so the diff marks the first differing column
/// under the actual value.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let column = expected
        .chars()
        .zip(actual.chars())
        .take_while(|(e, a)| e == a)
        .count();

    let mut out = String::new();
    out.push_str(&format!("-{expected}\n"));
    out.push_str(&format!("+{actual}\n"));
    out.push_str(&format!(" {}^ column {}\n", " ".repeat(column), column + 1));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical() {
        assert_eq!(render_diff("::1", "::1"), "[identical]");
    }

    #[test]
    fn marks_first_difference() {
        let diff = render_diff("2001:db8::1", "2001:db8:0:0:0:0:0:1");
        assert_eq!(
            diff,
            "-2001:db8::1\n+2001:db8:0:0:0:0:0:1\n          ^ column 10\n"
        );
    }

    #[test]
    fn prefix_difference_points_past_shorter_value() {
        let diff = render_diff("7f00", "7f0000");
        assert!(diff.ends_with("     ^ column 5\n"), "{diff}");
    }
}
