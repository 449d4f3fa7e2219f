// File: src/core/distance.rs
use crate::core::types::FrequencyProfile;
use std::cmp::Ordering;

/// Euclidean distance over the union of characters seen in either profile.
/// A character missing from one side counts as probability 0.0.
///
/// Both profiles are walked together in character order, so the summation
/// order is the same for `(a, b)` and `(b, a)` and the result is exactly
/// symmetric. O(K) in the combined number of distinct characters.
pub fn euclidean_distance(a: &FrequencyProfile, b: &FrequencyProfile) -> f64 {
    let mut left = a.iter().peekable();
    let mut right = b.iter().peekable();
    let mut sum_of_squares = 0.0;

    loop {
        let diff = match (left.peek(), right.peek()) {
            (Some(&(lc, lp)), Some(&(rc, rp))) => match lc.cmp(&rc) {
                Ordering::Less => {
                    left.next();
                    lp
                }
                Ordering::Greater => {
                    right.next();
                    rp
                }
                Ordering::Equal => {
                    left.next();
                    right.next();
                    lp - rp
                }
            },
            (Some(&(_, lp)), None) => {
                left.next();
                lp
            }
            (None, Some(&(_, rp))) => {
                right.next();
                rp
            }
            (None, None) => break,
        };
        sum_of_squares += diff * diff;
    }

    sum_of_squares.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::build_profile;

    #[test]
    fn test_identity_is_zero() {
        for text in ["", "abc", "The quick brown fox", "ação"] {
            let p = build_profile(text);
            assert_eq!(euclidean_distance(&p, &p), 0.0);
        }
    }

    #[test]
    fn test_symmetric() {
        let texts = ["", "aab", "hello world", "olá mundo", "zzz yyy", "Привет"];
        for a in texts {
            for b in texts {
                let (pa, pb) = (build_profile(a), build_profile(b));
                assert_eq!(euclidean_distance(&pa, &pb), euclidean_distance(&pb, &pa));
            }
        }
    }

    #[test]
    fn test_disjoint_profiles() {
        // {a: 1.0} vs {b: 1.0} -> sqrt(1 + 1)
        let d = euclidean_distance(&build_profile("a"), &build_profile("b"));
        assert!((d - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_against_non_empty_is_norm() {
        let p = build_profile("aab");
        let norm = p.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        let empty = build_profile("");
        assert!((euclidean_distance(&empty, &p) - norm).abs() < 1e-12);
        assert_eq!(euclidean_distance(&empty, &empty), 0.0);
    }
}
