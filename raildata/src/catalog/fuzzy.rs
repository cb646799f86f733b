//! Approximate name matching.
//!
//! Free-text names from the API differ from the catalog in punctuation,
//! abbreviations and suffixes ("Trenton Transit Ctr"). Matching is scored by
//! the length of the longest common subsequence.

/// Length of the longest common subsequence of `a` and `b`, in characters.
pub fn lcs_len(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Whether a match of length `lcs` is good enough for a query of
/// `query_len` characters.
///
/// A match needs more than two characters in common, and at least a quarter
/// of the query.
pub fn accept(lcs: usize, query_len: usize) -> bool {
    lcs > 2 && lcs >= query_len / 4
}

/// The best fuzzy candidate found so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FuzzyMatch {
    pub entry: usize,
    pub lcs: usize,
    pub candidate_len: usize,
}

/// Score every `(entry index, lowercase candidate)` pair against a lowercase
/// query and return the best one.
///
/// Higher LCS wins; on equal LCS the shorter candidate wins; a remaining tie
/// goes to the entry whose code sorts first.
pub(super) fn best_match<'a>(
    query: &str,
    candidates: impl IntoIterator<Item = (usize, &'a str)>,
    code_of: impl Fn(usize) -> &'a str,
) -> Option<FuzzyMatch> {
    let mut best: Option<FuzzyMatch> = None;

    for (entry, candidate) in candidates {
        let lcs = lcs_len(query, candidate);
        if lcs == 0 {
            continue;
        }
        let found = FuzzyMatch {
            entry,
            lcs,
            candidate_len: candidate.chars().count(),
        };

        let better = match best {
            None => true,
            Some(b) => {
                (found.lcs, std::cmp::Reverse(found.candidate_len))
                    > (b.lcs, std::cmp::Reverse(b.candidate_len))
                    || (found.lcs == b.lcs
                        && found.candidate_len == b.candidate_len
                        && code_of(found.entry) < code_of(b.entry))
            }
        };
        if better {
            best = Some(found);
        }
    }

    best
}
