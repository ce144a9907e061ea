//! Command words and parsed commands.

use std::fmt;

use crate::tokenizer::ArgToken;

/// A command word understood by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `create <Kind>`
    Create,
    /// `show <Kind> <id>`
    Show,
    /// `destroy <Kind> <id>`
    Destroy,
    /// `all [<Kind>]`
    All,
    /// `update <Kind> <id> <field> <value>` or `update <Kind> <id> <map>`
    Update,
    /// `count <Kind>`
    Count,
    /// `help [<command>]`
    Help,
    /// `quit`
    Quit,
    /// End of input
    Eof,
}

impl Verb {
    /// Every command word, in help order.
    pub const ALL: [Verb; 9] = [
        Verb::All,
        Verb::Count,
        Verb::Create,
        Verb::Destroy,
        Verb::Eof,
        Verb::Help,
        Verb::Quit,
        Verb::Show,
        Verb::Update,
    ];

    /// Returns the word that invokes this verb.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Show => "show",
            Self::Destroy => "destroy",
            Self::All => "all",
            Self::Update => "update",
            Self::Count => "count",
            Self::Help => "help",
            Self::Quit => "quit",
            Self::Eof => "EOF",
        }
    }

    /// Looks up a verb by its exact word.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verb| verb.name() == word)
    }

    /// Returns true for the six verbs reachable through `Kind.verb(...)`.
    #[must_use]
    pub const fn is_dispatch(self) -> bool {
        !matches!(self, Self::Help | Self::Quit | Self::Eof)
    }

    /// Returns true for the verbs that end the session.
    #[must_use]
    pub const fn is_exit(self) -> bool {
        matches!(self, Self::Quit | Self::Eof)
    }

    /// One-line usage text shown by `help <verb>`.
    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Create => {
                "Creates a new instance, saves it, and prints its id. Usage: create <class>"
            }
            Self::Show => "Prints an instance. Usage: show <class> <id> or <class>.show(<id>)",
            Self::Destroy => {
                "Deletes an instance. Usage: destroy <class> <id> or <class>.destroy(<id>)"
            }
            Self::All => "Prints all instances, optionally of one class. Usage: all [<class>] or <class>.all()",
            Self::Update => {
                "Sets attributes on an instance. Usage: update <class> <id> <name> <value> \
                 or <class>.update(<id>, {<name>: <value>, ...})"
            }
            Self::Count => "Prints the number of instances of a class. Usage: count <class> or <class>.count()",
            Self::Help => "List available commands with \"help\" or detailed help with \"help cmd\".",
            Self::Quit => "Quit command to exit the program",
            Self::Eof => "EOF command to exit the program",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A command line resolved to its verb and argument tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// The command word
    pub verb: Verb,
    /// Arguments after the command word
    pub args: Vec<ArgToken>,
}

impl Command {
    /// Creates a command.
    #[must_use]
    pub fn new(verb: Verb, args: Vec<ArgToken>) -> Self {
        Self { verb, args }
    }

    /// Returns the text of the argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(ArgToken::text)
    }
}
