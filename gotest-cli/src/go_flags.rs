//! Acceptance of Go-style single-dash long flags.
//!
//! `go test` users type `-run=a_test.go -tags=integration`; clap only knows
//! `--run`. Before parsing, single-dash spellings of our long flags are
//! rewritten to double-dash. Boolean flags also take Go's `-race=true` and
//! `-race=false` forms. A single-dash flag gotest does not own, such as
//! `-parallel=8` or `-count=1`, belongs to `go test`: a `--` is inserted in
//! front of it so it and everything after it is forwarded untouched.
//! Rewriting stops at `--` or at the first argument that is neither a flag nor
//! a flag's value.

use std::ffi::OsString;

use crate::{
    ARG_COVERPKG, ARG_COVERPROFILE, ARG_GO, ARG_PREFIX, ARG_RACE, ARG_RUN, ARG_SHUFFLE, ARG_TAGS,
};

const VALUE_FLAGS: [&str; 6] = [
    ARG_RUN,
    ARG_TAGS,
    ARG_COVERPROFILE,
    ARG_COVERPKG,
    ARG_PREFIX,
    ARG_GO,
];
const SWITCH_FLAGS: [&str; 2] = [ARG_SHUFFLE, ARG_RACE];
const VERBOSE_SHORT: &str = "v";
const PARALLELISM_SHORT: &str = "p";
const CLAP_SHORTS: [&str; 2] = ["h", "V"];
const END_OF_FLAGS: &str = "--";

/// Rewrite `-name[=value]` to `--name[=value]` for known long flags.
///
/// The first element is the program name and is kept as-is.
pub(crate) fn normalise_go_style_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut normalised: Vec<OsString> = iter.next().into_iter().collect();
    let mut awaiting_value = false;
    let mut rewriting = true;

    for arg in iter {
        if !rewriting || awaiting_value {
            awaiting_value = false;
            normalised.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalised.push(arg);
            continue;
        };
        match classify(text) {
            Token::EndOfFlags | Token::Positional => {
                rewriting = false;
                normalised.push(arg);
            }
            Token::Forwarded => {
                rewriting = false;
                normalised.push(OsString::from(END_OF_FLAGS));
                normalised.push(arg);
            }
            Token::Disabled => {}
            Token::Flag {
                rewritten,
                takes_value,
            } => {
                awaiting_value = takes_value;
                normalised.push(rewritten.map_or(arg, OsString::from));
            }
        }
    }
    normalised
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    EndOfFlags,
    Positional,
    /// A single-dash flag for `go test` itself.
    Forwarded,
    /// A boolean flag explicitly set to false; nothing to pass on.
    Disabled,
    Flag {
        rewritten: Option<String>,
        /// The next argument is this flag's value.
        takes_value: bool,
    },
}

fn classify(text: &str) -> Token {
    if text == END_OF_FLAGS {
        return Token::EndOfFlags;
    }
    let Some(body) = text.strip_prefix('-') else {
        return Token::Positional;
    };
    if body.is_empty() {
        return Token::Positional;
    }
    let (name, inline_value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    if let Some(long_name) = name.strip_prefix('-') {
        return Token::Flag {
            rewritten: None,
            takes_value: inline_value.is_none() && VALUE_FLAGS.contains(&long_name),
        };
    }
    if VALUE_FLAGS.contains(&name) {
        return Token::Flag {
            rewritten: Some(format!("-{text}")),
            takes_value: inline_value.is_none(),
        };
    }
    if name == PARALLELISM_SHORT {
        return Token::Flag {
            rewritten: None,
            takes_value: inline_value.is_none(),
        };
    }
    if name == VERBOSE_SHORT {
        return switch(format!("-{name}"), text, inline_value);
    }
    if SWITCH_FLAGS.contains(&name) {
        return switch(format!("--{name}"), &format!("-{text}"), inline_value);
    }
    if CLAP_SHORTS.contains(&name) {
        return Token::Flag {
            rewritten: None,
            takes_value: false,
        };
    }
    Token::Forwarded
}

/// Spell a boolean flag for clap, honouring Go's `-flag=true|false` form.
///
/// A value Go would not accept is left attached so clap reports it.
fn switch(enabled: String, unparsed: &str, inline_value: Option<&str>) -> Token {
    match inline_value.map(parse_go_bool) {
        None | Some(Some(true)) => Token::Flag {
            rewritten: Some(enabled),
            takes_value: false,
        },
        Some(Some(false)) => Token::Disabled,
        Some(None) => Token::Flag {
            rewritten: Some(unparsed.to_owned()),
            takes_value: false,
        },
    }
}

/// Boolean spellings accepted by Go's `strconv.ParseBool`.
fn parse_go_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
