//! Line diff for change logs.

/// Above this many line pairs the LCS table is skipped and the whole message
/// is shown as replaced.
const MAX_TABLE_CELLS: usize = 4_000_000;

/// Render changed lines of `old` -> `new`: removed lines prefixed `-`, added
/// lines prefixed `+`. Unchanged lines are omitted.
pub fn message_diff(old: &str, new: &str) -> String {
    let a: Vec<&str> = old.lines().collect();
    let b: Vec<&str> = new.lines().collect();

    let mut out = Vec::new();
    if (a.len() + 1).saturating_mul(b.len() + 1) > MAX_TABLE_CELLS {
        out.extend(a.iter().map(|line| format!("-{line}")));
        out.extend(b.iter().map(|line| format!("+{line}")));
        return out.join("\n");
    }

    // lcs[i][j] = length of the longest common subsequence of a[i..] and b[j..].
    let width = b.len() + 1;
    let mut lcs = vec![0u32; (a.len() + 1) * width];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            lcs[i * width + j] = if a[i] == b[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            out.push(format!("-{}", a[i]));
            i += 1;
        } else {
            out.push(format!("+{}", b[j]));
            j += 1;
        }
    }
    out.extend(a[i..].iter().map(|line| format!("-{line}")));
    out.extend(b[j..].iter().map(|line| format!("+{line}")));

    // Only line endings differ.
    if out.is_empty() && old != new {
        return format!("-{old:?}\n+{new:?}");
    }
    out.join("\n")
}
