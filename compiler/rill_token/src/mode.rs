//! Grammatical categories for reserved tokens.

use std::fmt;

/// Grammatical category of a reserved token.
///
/// The lexer driver hands modes to the parser so it can classify a token
/// without comparing lexemes: `|` and `;` are control, `+` and `-` modify,
/// `var` and `func` bind, `exec` and `bg` run things, `int` and `bool`
/// name types.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// No grammatical role (the sentinel, `EOF`).
    #[default]
    None,
    /// Control flow and structure: `if`, `while`, delimiters.
    Control,
    /// Value modifiers: `+`, `-`.
    Modifier,
    /// Binding forms: `var`, `func`.
    Assign,
    /// Command words: `exec`, `exit`, `bg`.
    Command,
    /// Type names: `str`, `int`, `bool`.
    Type,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::None => "none",
            Mode::Control => "control",
            Mode::Modifier => "modifier",
            Mode::Assign => "assign",
            Mode::Command => "command",
            Mode::Type => "type",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Mode;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_none() {
        assert_eq!(Mode::default(), Mode::None);
    }

    #[test]
    fn display_names() {
        let cases = [
            (Mode::None, "none"),
            (Mode::Control, "control"),
            (Mode::Modifier, "modifier"),
            (Mode::Assign, "assign"),
            (Mode::Command, "command"),
            (Mode::Type, "type"),
        ];
        for (mode, name) in cases {
            assert_eq!(mode.to_string(), name);
        }
    }
}
