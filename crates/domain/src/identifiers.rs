// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Human-facing identifiers for assignments and employees.
//!
//! Both identifiers are built from caller-supplied entropy so that this
//! crate stays free of clocks and random number generators.

use serde::{Deserialize, Serialize};

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const ASSIGNMENT_PREFIX: &str = "#ASN";
const EMPLOYEE_CODE_PREFIX: &str = "#23454GH";

/// Encodes `value` in upper-case base 36, keeping only the last `width` digits.
///
/// Shorter values are left-padded with `0`.
fn base36_tail(mut value: u128, width: usize) -> String {
    let mut digits: Vec<u8> = Vec::with_capacity(width);
    for _ in 0..width {
        let idx: usize = usize::try_from(value % 36).unwrap_or(0);
        digits.push(BASE36_DIGITS[idx]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Identifier of one assignment of a lead to an employee.
///
/// Format: `#ASN` + the last six base-36 digits of the millisecond
/// timestamp + four random base-36 characters. A new identifier is issued
/// every time a lead changes hands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(String);

impl AssignmentId {
    /// Builds an assignment id from a millisecond timestamp and random bits.
    ///
    /// # Arguments
    ///
    /// * `timestamp_millis` - Milliseconds since the Unix epoch
    /// * `random` - Random bits for the four-character suffix
    #[must_use]
    pub fn from_entropy(timestamp_millis: u128, random: u64) -> Self {
        Self(format!(
            "{ASSIGNMENT_PREFIX}{}{}",
            base36_tail(timestamp_millis, 6),
            base36_tail(u128::from(random), 4)
        ))
    }

    /// Wraps an identifier read back from storage.
    #[must_use]
    pub const fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates an employee code: `#23454GH` followed by six random base-36 characters.
#[must_use]
pub fn employee_code_from_entropy(random: u64) -> String {
    format!(
        "{EMPLOYEE_CODE_PREFIX}{}",
        base36_tail(u128::from(random), 6)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36_tail_pads_and_truncates() {
        assert_eq!(base36_tail(0, 4), "0000");
        assert_eq!(base36_tail(35, 2), "0Z");
        // 36^2 wraps back to all zeros when only two digits are kept
        assert_eq!(base36_tail(1296, 2), "00");
    }

    #[test]
    fn test_assignment_id_format() {
        let id: AssignmentId = AssignmentId::from_entropy(1_760_000_000_000, 123_456);
        let text: &str = id.value();

        assert!(text.starts_with("#ASN"));
        assert_eq!(text.len(), 14);
        assert!(
            text[4..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_assignment_id_changes_with_entropy() {
        let first: AssignmentId = AssignmentId::from_entropy(1_760_000_000_000, 1);
        let second: AssignmentId = AssignmentId::from_entropy(1_760_000_000_000, 2);
        assert_ne!(first, second);
    }

    #[test]
    fn test_employee_code_format() {
        let code: String = employee_code_from_entropy(u64::MAX);
        assert!(code.starts_with("#23454GH"));
        assert_eq!(code.len(), 14);
    }
}
