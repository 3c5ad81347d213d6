//! Round resolution: what a host judgment does to a player's money.

/// Result of applying one judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Judgment {
    /// Money after the judgment.
    pub money: u64,

    /// Whether this judgment knocks the player out.
    pub eliminated: bool,
}

/// Applies a judgment to `money` given the round's `bid`.
///
/// - A zero bid means the player sat the round out: money drops to 0 and
///   the player is out, whatever `correct` says.
/// - Correct: the bid is matched, so the player gains `bid`.
/// - Incorrect: the player loses `bid`; hitting 0 knocks them out.
///
/// This is applied against whatever money the player holds right now, so
/// judging the same player twice in a round compounds.
pub fn resolve(money: u64, bid: u64, correct: bool) -> Judgment {
    if bid == 0 {
        return Judgment {
            money: 0,
            eliminated: true,
        };
    }

    if correct {
        Judgment {
            money: money.saturating_add(bid),
            eliminated: false,
        }
    } else {
        let money = money.saturating_sub(bid);
        Judgment {
            money,
            eliminated: money == 0,
        }
    }
}
