pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_MESSAGE: &str = "Print help information";

// Used when the terminal width cannot be determined (ex: output is piped).
pub(crate) const DEFAULT_TERMINAL_WIDTH: usize = 80;
