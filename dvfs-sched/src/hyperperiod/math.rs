/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! GCD and overflow-checked LCM over task periods.

use super::HyperperiodError;

/// Euclidean GCD; `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// LCM of two periods, `Err(Overflow)` if it does not fit in `u64`.
///
/// Divides before multiplying so only genuinely huge results overflow.
pub fn lcm(a: u64, b: u64) -> Result<u64, HyperperiodError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(HyperperiodError::Overflow { a, b })
}

/// LCM of every period yielded by `periods`; `Ok(0)` when there are none.
pub fn lcm_all<I>(periods: I) -> Result<u64, HyperperiodError>
where
    I: IntoIterator<Item = u64>,
{
    let mut iter = periods.into_iter();
    let Some(first) = iter.next() else {
        return Ok(0);
    };
    iter.try_fold(first, lcm)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
