use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// An action checked against the acting seat's stack, carrying the chips it
/// moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    /// Total chips paid: the call plus the raise increment.
    Raise { to_call: u32, raise: u32 },
    AllIn(u32),
}

impl ValidatedAction {
    /// Chips the seat moves into its current bet.
    pub fn chips(&self) -> u32 {
        match self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n) | ValidatedAction::Bet(n) | ValidatedAction::AllIn(n) => *n,
            ValidatedAction::Raise { to_call, raise } => to_call + raise,
        }
    }

    /// The action as it is reported to other players.
    pub fn as_action(&self) -> A {
        match *self {
            ValidatedAction::Fold => A::Fold,
            ValidatedAction::Check => A::Check,
            ValidatedAction::Call(_) => A::Call,
            ValidatedAction::Bet(n) => A::Bet(n),
            ValidatedAction::Raise { raise, .. } => A::Raise(raise),
            ValidatedAction::AllIn(_) => A::AllIn,
        }
    }
}

/// Validates a player action according to betting rules and stack size.
///
/// Converts a [`crate::player::PlayerAction`] into a [`ValidatedAction`],
/// enforcing minimum bet and raise sizes, and turning any action the stack
/// cannot cover into an all-in.
///
/// # Arguments
///
/// * `stack` - Player's remaining chips
/// * `to_call` - Amount needed to match the street's highest bet
/// * `min_raise` - Minimum bet or raise increment (the big blind, or the
///   last raise size)
/// * `action` - The action the player wishes to perform
///
/// # Errors
///
/// - [`GameError::CannotCheck`] - Player tries to check when facing a bet
/// - [`GameError::InvalidBetAmount`] - Bet/raise amount is below minimum
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, ValidatedAction};
/// use holdem_engine::player::PlayerAction;
///
/// let result = validate_action(1000, 50, 100, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::Call(50)));
///
/// // All-in when stack is insufficient for the full raise
/// let result = validate_action(80, 50, 100, PlayerAction::Raise(100));
/// assert_eq!(result, Ok(ValidatedAction::AllIn(80)));
/// ```
///
/// ```
/// use holdem_engine::rules::validate_action;
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::errors::GameError;
///
/// let result = validate_action(1000, 50, 100, PlayerAction::Check);
/// assert_eq!(result, Err(GameError::CannotCheck { to_call: 50 }));
/// ```
pub fn validate_action(
    stack: u32,
    to_call: u32,
    min_raise: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else if stack <= to_call {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        // a bet into an open bet is treated as a raise of the same size
        A::Bet(amount) if to_call > 0 => validate_action(stack, to_call, min_raise, A::Raise(amount)),
        A::Bet(amount) => {
            if amount >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else if amount == 0 || amount < min_raise {
                Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: min_raise.max(1),
                })
            } else {
                Ok(ValidatedAction::Bet(amount))
            }
        }
        A::Raise(amount) => {
            if amount.saturating_add(to_call) >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else if amount == 0 || amount < min_raise {
                Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: min_raise.max(1),
                })
            } else {
                Ok(ValidatedAction::Raise {
                    to_call,
                    raise: amount,
                })
            }
        }
        A::AllIn => Ok(ValidatedAction::AllIn(stack)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_with_nothing_to_call_is_a_check() {
        assert_eq!(validate_action(100, 0, 10, A::Call), Ok(ValidatedAction::Check));
    }

    #[test]
    fn bet_below_minimum_is_rejected() {
        assert_eq!(
            validate_action(100, 0, 10, A::Bet(5)),
            Err(GameError::InvalidBetAmount {
                amount: 5,
                minimum: 10
            })
        );
        assert!(validate_action(100, 0, 10, A::Bet(0)).is_err());
    }

    #[test]
    fn bet_facing_a_bet_becomes_a_raise() {
        assert_eq!(
            validate_action(500, 20, 20, A::Bet(40)),
            Ok(ValidatedAction::Raise {
                to_call: 20,
                raise: 40
            })
        );
    }

    #[test]
    fn short_stack_goes_all_in() {
        assert_eq!(validate_action(30, 50, 10, A::Call), Ok(ValidatedAction::AllIn(30)));
        assert_eq!(validate_action(30, 0, 10, A::Bet(30)), Ok(ValidatedAction::AllIn(30)));
        assert_eq!(ValidatedAction::AllIn(30).chips(), 30);
    }
}
