use crate::constant::*;
use crate::matcher::TokenStream;

/// What a single token says about one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recognition {
    /// The token is a help trigger (`-h` or `--help`); scanning must stop and help be shown.
    Help,
    /// How many times the token names the option (`0` when it does not match).
    Occurrences(usize),
}

/// The identity of an option on the command line: its names and how many value tokens follow each occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    short: Option<char>,
    long: Option<String>,
    arity: u8,
}

impl Pattern {
    pub(crate) fn new(short: Option<char>, long: Option<String>, arity: u8) -> Self {
        Self { short, long, arity }
    }

    /// The short name, used with a single dash.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The long name, used with a double dash.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// The number of value tokens consumed per occurrence.
    pub fn arity(&self) -> u8 {
        self.arity
    }

    /// Render the name as `-s`, `--long`, or `-s|--long`.
    /// An unnamed pattern (rejected when the parser is built) renders as an empty string.
    pub fn canonical_name(&self) -> String {
        match (&self.short, &self.long) {
            (Some(short), Some(long)) => format!("-{short}|--{long}"),
            (Some(short), None) => format!("-{short}"),
            (None, Some(long)) => format!("--{long}"),
            (None, None) => String::default(),
        }
    }

    /// Check whether `token` names this option, and how many times.
    ///
    /// Zero arity options may be combined with other short options in a single token (ex: `-vvx`), each character counting as one occurrence.
    /// Options that take values must stand alone (ex: `-n` or `--number`).
    pub fn check(&self, token: &str) -> Recognition {
        if is_help(token) {
            return Recognition::Help;
        }

        if let Some(long) = &self.long {
            if long_name(token) == Some(long.as_str()) {
                return Recognition::Occurrences(1);
            }
        }

        if let Some(short) = self.short {
            if let Some(cluster) = short_cluster(token) {
                if self.arity == 0 {
                    return Recognition::Occurrences(cluster.matches(short).count());
                } else if is_single(cluster, short) {
                    return Recognition::Occurrences(1);
                }
            }
        }

        Recognition::Occurrences(0)
    }

    /// Consume the option matched at `position`, so that later scans skip it.
    ///
    /// Standalone matches consume the token along with its values.
    /// Combined short matches only remove this option's character, leaving the other characters for their own options.
    /// Reducing an already consumed position does nothing.
    pub fn reduce(&self, position: usize, tokens: &mut TokenStream) {
        let token = match tokens.get(position) {
            Some(token) => token.to_string(),
            None => return,
        };
        let span = 1 + self.arity as usize;

        if let Some(long) = &self.long {
            if long_name(&token) == Some(long.as_str()) {
                tokens.consume(position, span);
                return;
            }
        }

        if let Some(short) = self.short {
            if let Some(cluster) = short_cluster(&token) {
                if self.arity == 0 {
                    if cluster.contains(short) {
                        let reduced = cluster.replace(short, "");

                        if reduced.is_empty() {
                            tokens.consume(position, 1);
                        } else {
                            tokens.replace(position, format!("-{reduced}"));
                        }
                    }
                } else if is_single(cluster, short) {
                    tokens.consume(position, span);
                }
            }
        }
    }
}

pub(super) fn is_help(token: &str) -> bool {
    match (long_name(token), short_cluster(token)) {
        (Some(name), _) => name == HELP_NAME,
        (_, Some(cluster)) => is_single(cluster, HELP_SHORT),
        _ => false,
    }
}

// `--name`, where the name does not itself start with a dash.
fn long_name(token: &str) -> Option<&str> {
    token
        .strip_prefix("--")
        .filter(|name| !name.is_empty() && !name.starts_with('-'))
}

// `-abc`, where the cluster does not start with a dash.
fn short_cluster(token: &str) -> Option<&str> {
    token
        .strip_prefix('-')
        .filter(|cluster| !cluster.is_empty() && !cluster.starts_with('-'))
}

fn is_single(cluster: &str, short: char) -> bool {
    let mut characters = cluster.chars();
    characters.next() == Some(short) && characters.next().is_none()
}
