use rapidfuzz::distance::indel;

/// Case-insensitive similarity ratio in `[0.0, 1.0]`.
///
/// Indel normalized similarity: twice the longest common subsequence divided
/// by the combined length. `similarity(a, a) == 1.0`, `similarity(a, "") == 0.0`
/// for non-empty `a`, and the ratio is symmetric.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    indel::normalized_similarity(a.chars(), b.chars())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_is_one() {
        assert!(close(similarity("Davis", "Davis"), 1.0));
        assert!(close(similarity("DAVIS", "davis"), 1.0));
    }

    #[test]
    fn empty_side_is_zero() {
        assert!(close(similarity("Davis", ""), 0.0));
        assert!(close(similarity("", "Davis"), 0.0));
    }

    #[test]
    fn ratio_counts_common_subsequence() {
        // "kat" is a subsequence of both: 2*3/(3+5) and 2*3/(3+4).
        assert!(close(similarity("Kat", "Katie"), 0.75));
        assert!(close(similarity("Kat", "Kate"), 6.0 / 7.0));
    }

    #[test]
    fn symmetric() {
        assert!(close(similarity("Davison", "Davis"), similarity("Davis", "Davison")));
    }
}
