use crate::matcher::core::is_help;

/// The command line tokens of one parse pass, along with which of them have been consumed.
///
/// A consumed token is invisible to every definition that scans afterwards.
/// Consumption is tracked alongside the tokens (rather than blanking their text), so an empty token remains a legitimate value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<String>,
    consumed: Vec<bool>,
}

impl TokenStream {
    /// Create a token stream where nothing is consumed yet.
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            consumed: vec![false; tokens.len()],
        }
    }

    /// The number of token positions, consumed or not.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether there are no token positions at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The (possibly reduced) token at `position`, or `None` if it was consumed or is out of bounds.
    pub fn get(&self, position: usize) -> Option<&str> {
        match self.consumed.get(position) {
            Some(false) => Some(self.tokens[position].as_str()),
            _ => None,
        }
    }

    /// Whether the token at `position` was consumed.
    /// Out of bounds positions count as consumed.
    pub fn is_consumed(&self, position: usize) -> bool {
        self.get(position).is_none()
    }

    /// Consume the tokens from `position` through `position + count - 1`.
    /// Already consumed and out of bounds positions are left alone.
    pub fn consume(&mut self, position: usize, count: usize) {
        let end = std::cmp::min(position + count, self.tokens.len());

        for index in position..end {
            self.consumed[index] = true;
        }
    }

    /// Whether any unconsumed token is a help trigger (`-h` or `--help`).
    pub fn help_requested(&self) -> bool {
        (0..self.len()).any(|position| self.get(position).map_or(false, is_help))
    }

    pub(crate) fn replace(&mut self, position: usize, token: String) {
        if !self.is_consumed(position) {
            self.tokens[position] = token;
        }
    }

    /// The tokens which have not been consumed, in order.
    pub fn remaining(&self) -> Vec<String> {
        self.tokens
            .iter()
            .zip(self.consumed.iter())
            .filter(|(_, consumed)| !**consumed)
            .map(|(token, _)| token.clone())
            .collect()
    }
}
