use crate::parser::base::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_DESCRIPTION_WIDTH: usize = 17;

/// Two column layout for the help options: the names on the left, the wrapped description on the right.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    indent: usize,
    left: usize,
    padding: usize,
    description: usize,
}

impl ColumnRenderer {
    /// Produce a renderer that fits the `description` within `total` columns, if it can.
    /// The description column never drops below [`MINIMUM_DESCRIPTION_WIDTH`].
    pub(crate) fn guided(
        indent: usize,
        left: usize,
        padding: usize,
        description: usize,
        total: usize,
    ) -> Self {
        let non_description = indent + left + padding;
        let available = total.saturating_sub(non_description);
        let guided = std::cmp::max(
            std::cmp::min(description, available),
            MINIMUM_DESCRIPTION_WIDTH,
        );
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_description} within total {total}.  Selecting description: {guided}.");
        }

        Self::new(indent, left, padding, guided)
    }

    pub(crate) fn new(indent: usize, left: usize, padding: usize, description: usize) -> Self {
        assert!(
            description >= 2,
            "internal error - description must fit a hyphenated character"
        );
        Self {
            indent,
            left,
            padding,
            description,
        }
    }

    pub(crate) fn render(&self, left: &str, description: &str) -> Vec<String> {
        let ColumnRenderer {
            indent,
            left: left_width,
            padding,
            description: description_width,
        } = *self;
        let lines = wrap(description, description_width);

        if lines.is_empty() {
            return vec![format!("{:indent$}{left}", "")];
        }

        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let left = if i == 0 { left } else { "" };
                format!("{:indent$}{left:left_width$}{:padding$}{line}", "", "")
            })
            .collect()
    }
}

/// Wrap the words of `paragraph` into lines of at most `width` characters.
/// Words longer than a line are hyphenated.
pub(crate) fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        let length = word.chars().count();

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + length + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let mut pieces = characters.as_slice();

    while pieces.len() > width {
        let (head, tail) = pieces.split_at(width - 1);
        lines.push(format!("{}-", head.iter().collect::<String>()));
        pieces = tail;
    }

    current.extend(pieces.iter());
}

/// Where the parser writes its output.
pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }
}
