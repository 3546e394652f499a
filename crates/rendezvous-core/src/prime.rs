//! Prime moduli for the number-theoretic hopping sequences.
//!
//! Modular clock, jump-stay and CRSeq all walk a cyclic group whose order is
//! a prime no smaller than the channel count. A linear walk modulo a prime
//! visits every residue before it repeats; residues past the channel count
//! are folded back by each strategy's wrap rule.

/// True if `n` is prime (trial division up to `√n`).
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2u64;
    while divisor.saturating_mul(divisor) <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Smallest prime `>= m`; 2 for `m < 2`.
pub fn next_prime(m: u64) -> u64 {
    scan(m, m)
}

/// Smallest prime `> m`; 2 for `m < 2`.
///
/// This is the modulus the hopping strategies use: it always exceeds the
/// channel count, even when the count is itself prime.
pub fn next_prime_after(m: u64) -> u64 {
    scan(m, m.saturating_add(1))
}

/// Scan upwards from `start` for a prime.
///
/// Bertrand's postulate places a prime in `[m, 2m]` for every `m >= 1`, so
/// the loop stops within `m` candidates.
fn scan(m: u64, start: u64) -> u64 {
    if m < 2 {
        return 2;
    }
    let mut candidate = start;
    while !is_prime(candidate) {
        candidate += 1;
    }
    debug_assert!(candidate <= m.saturating_mul(2));
    candidate
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn small_primes() {
        let primes: Vec<u64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn below_two_yields_two() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime_after(0), 2);
        assert_eq!(next_prime_after(1), 2);
    }

    #[test]
    fn inclusive_and_strict_scans() {
        assert_eq!(next_prime(5), 5);
        assert_eq!(next_prime_after(5), 7);
        assert_eq!(next_prime(4), 5);
        assert_eq!(next_prime_after(4), 5);
        assert_eq!(next_prime(20), 23);
        assert_eq!(next_prime_after(23), 29);
    }

    proptest! {
        #[test]
        fn prop_next_prime_is_minimal(m in 1u64..5000) {
            let p = next_prime(m);
            prop_assert!(is_prime(p));
            prop_assert!(p >= m);
            prop_assert!(p <= 2 * m);
            prop_assert!((m..p).all(|n| !is_prime(n)));
        }

        #[test]
        fn prop_next_prime_after_is_strict(m in 2u64..5000) {
            let p = next_prime_after(m);
            prop_assert!(is_prime(p));
            prop_assert!(p > m);
            prop_assert!(p < 2 * m);
            prop_assert!((m + 1..p).all(|n| !is_prime(n)));
        }
    }
}
