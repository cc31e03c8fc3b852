//! Bracket balance queries over raw instruction text.
//!
//! Only `[` and `]` are looked at; every other character is transparent.
//! Both markers are ASCII, so the byte indices returned here are always
//! valid `str` slice boundaries.

pub const OPEN: u8 = b'[';
pub const CLOSE: u8 = b']';

/// Balance state of an instruction string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// A close marker appeared before its opener.
    Invalid,
    /// More opens than closes so far; more input is needed.
    Open,
    /// Every open has its close (vacuously true with no brackets).
    Closed,
}

/// Classify the bracket balance of `code`.
///
/// Scans left to right and stops at the first point where closes outnumber
/// opens, since nothing after that can make the string valid again.
pub fn classify(code: &str) -> BlockState {
    let mut balance: usize = 0;
    for byte in code.bytes() {
        match byte {
            OPEN => balance += 1,
            CLOSE => {
                let Some(next) = balance.checked_sub(1) else {
                    return BlockState::Invalid;
                };
                balance = next;
            }
            _ => {}
        }
    }

    if balance > 0 {
        BlockState::Open
    } else {
        BlockState::Closed
    }
}

/// Index of the close marker matching the first open marker in `code`.
///
/// Returns `None` when the first opener is never closed, or when a close
/// marker shows up before any opener.
pub fn find_matching_close(code: &str) -> Option<usize> {
    let mut balance: usize = 0;
    for (i, byte) in code.bytes().enumerate() {
        match byte {
            OPEN => balance += 1,
            CLOSE => {
                balance = balance.checked_sub(1)?;
                if balance == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// True if `code` contains either marker.
pub fn has_brackets(code: &str) -> bool {
    code.bytes().any(|b| b == OPEN || b == CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_closed() {
        assert_eq!(classify(""), BlockState::Closed);
    }

    #[test]
    fn lone_close_is_invalid() {
        assert_eq!(classify("]"), BlockState::Invalid);
    }

    #[test]
    fn invalid_wins_over_later_balance() {
        assert_eq!(classify("+]["), BlockState::Invalid);
        assert_eq!(classify("[]][[[["), BlockState::Invalid);
    }

    #[test]
    fn open_and_closed() {
        assert_eq!(classify("[+"), BlockState::Open);
        assert_eq!(classify("[[-]"), BlockState::Open);
        assert_eq!(classify("[+[-]>]"), BlockState::Closed);
        assert_eq!(classify("hello, world"), BlockState::Closed);
    }

    #[test]
    fn matching_close_skips_nested_pairs() {
        assert_eq!(find_matching_close("[+[-]>]"), Some(6));
        assert_eq!(find_matching_close("++[-]>[+]"), Some(4));
    }

    #[test]
    fn matching_close_not_found() {
        assert_eq!(find_matching_close("[[+]"), None);
        assert_eq!(find_matching_close("+++"), None);
        assert_eq!(find_matching_close("]["), None);
    }

    #[test]
    fn has_brackets_sees_either_marker() {
        assert!(has_brackets("a]"));
        assert!(!has_brackets("+-<>.,"));
    }
}
