//! Rules adapter contract
//!
//! The engine knows nothing about any particular game. Everything it needs
//! comes through [`Rules`]: a termination test, a terminal utility and an
//! ordered successor list. [`FnRules`] wraps plain closures for callers who
//! would rather not define a type, and [`TicTacToe`] is the adapter used by
//! the tests, benches and the GUI.
//!
//! Adapters must be pure: the same state must always give the same answers,
//! or moves already stored in an engine's cache go stale without notice.

pub mod tictactoe;
pub mod win;

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

pub use tictactoe::TicTacToe;
pub use win::{winner, winning_line, WIN_LINES};

/// Game rules consumed by the search.
pub trait Rules {
    /// Position type. Used as a cache key, so it must compare and hash by value.
    type State: Clone + Eq + Hash;

    /// True iff the game has ended in `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Payoff of a terminal state for the maximizing side. Only the sign is
    /// used: positive is a win, negative a loss, zero a draw.
    ///
    /// The same holds for a non-terminal state with no successors, which
    /// scores `utility.signum()` with no depth adjustment. A payoff of 7 there
    /// is worth 1, below any terminal win reached in the tree.
    fn utility(&self, state: &Self::State) -> i32;

    /// All legal next states, in the order the search should try them.
    /// Empty for terminal states; see [`Rules::utility`] for live states
    /// without successors.
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Whether the maximizing side moves in `state`, if the rules can tell.
    ///
    /// Used when the engine has to search from a state missing from its
    /// cache. Returning `None` makes the engine infer the role by alternating
    /// turns from its initial state, which only works for states reachable
    /// from there.
    fn maximizer_to_move(&self, _state: &Self::State) -> Option<bool> {
        None
    }
}

impl<R: Rules + ?Sized> Rules for &R {
    type State = R::State;

    fn is_terminal(&self, state: &Self::State) -> bool {
        (**self).is_terminal(state)
    }

    fn utility(&self, state: &Self::State) -> i32 {
        (**self).utility(state)
    }

    fn successors(&self, state: &Self::State) -> Vec<Self::State> {
        (**self).successors(state)
    }

    fn maximizer_to_move(&self, state: &Self::State) -> Option<bool> {
        (**self).maximizer_to_move(state)
    }
}

/// [`Rules`] built from three closures.
///
/// ```
/// use minimax::rules::{FnRules, Rules};
///
/// // Take one or two from a pile; whoever takes the last one wins.
/// let rules = FnRules::new(
///     |pile: &(u8, bool)| pile.0 == 0,
///     |pile: &(u8, bool)| if pile.1 { -1 } else { 1 },
///     |pile: &(u8, bool)| {
///         (1..=2u8.min(pile.0)).map(|take| (pile.0 - take, !pile.1)).collect()
///     },
/// );
/// assert_eq!(rules.successors(&(3, true)), vec![(2, false), (1, false)]);
/// ```
pub struct FnRules<S, T, U, G> {
    is_terminal: T,
    utility: U,
    successors: G,
    _state: PhantomData<fn(&S)>,
}

impl<S, T, U, G> FnRules<S, T, U, G>
where
    S: Clone + Eq + Hash,
    T: Fn(&S) -> bool,
    U: Fn(&S) -> i32,
    G: Fn(&S) -> Vec<S>,
{
    pub fn new(is_terminal: T, utility: U, successors: G) -> Self {
        Self {
            is_terminal,
            utility,
            successors,
            _state: PhantomData,
        }
    }
}

impl<S, T, U, G> Rules for FnRules<S, T, U, G>
where
    S: Clone + Eq + Hash,
    T: Fn(&S) -> bool,
    U: Fn(&S) -> i32,
    G: Fn(&S) -> Vec<S>,
{
    type State = S;

    fn is_terminal(&self, state: &S) -> bool {
        (self.is_terminal)(state)
    }

    fn utility(&self, state: &S) -> i32 {
        (self.utility)(state)
    }

    fn successors(&self, state: &S) -> Vec<S> {
        (self.successors)(state)
    }
}

impl<S, T, U, G> fmt::Debug for FnRules<S, T, U, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRules").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown() -> FnRules<u8, impl Fn(&u8) -> bool, impl Fn(&u8) -> i32, impl Fn(&u8) -> Vec<u8>> {
        FnRules::new(
            |n: &u8| *n == 0,
            |n: &u8| if *n == 0 { 1 } else { 0 },
            |n: &u8| if *n == 0 { Vec::new() } else { vec![n - 1] },
        )
    }

    #[test]
    fn test_fn_rules_forwards_to_closures() {
        let rules = countdown();
        assert!(rules.is_terminal(&0));
        assert!(!rules.is_terminal(&3));
        assert_eq!(rules.utility(&0), 1);
        assert_eq!(rules.successors(&3), vec![2]);
        assert!(rules.successors(&0).is_empty());
        assert_eq!(rules.maximizer_to_move(&3), None);
    }

    #[test]
    fn test_reference_is_rules() {
        fn terminal_via<R: Rules>(rules: R, state: &R::State) -> bool {
            rules.is_terminal(state)
        }
        let rules = countdown();
        assert!(terminal_via(&rules, &0));
    }
}
