use std::path::Path;

use crate::error::GenerateError;

#[cfg(test)]
use crate::test::assert_contains;

const PLAIN_TEMPLATE: &str = include_str!("../templates/bind_action.rs.tmpl");
const CAPTURING_TEMPLATE: &str = include_str!("../templates/bind_fallible_action.rs.tmpl");

/// Which kind of binder a template produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// The callback's return value is recorded as is.
    Plain,
    /// The callback returns `Result<Ret, ActionError>`; a semantic error's payload is recorded in place of the value.
    Capturing,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Plain => write!(f, "plain"),
            Variant::Capturing => write!(f, "capturing"),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "plain" => Ok(Variant::Plain),
            "capturing" => Ok(Variant::Capturing),
            _ => Err(format!("unknown variant: {value}")),
        }
    }
}

/// A named placeholder in a binder template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hole {
    /// `Ret: 'static, Arg0: Clone + 'static, ..`
    Generics,
    /// `fn(Arg0, ..) -> Ret`
    Signature,
    /// `Arg0, ..`
    ParamTypes,
    /// One extraction statement per argument.
    Extract,
    /// `arg0, ..`
    CallArgs,
    /// The error-capturing match over the callback's outcome.
    Capture,
}

impl Hole {
    pub const ALL: [Hole; 6] = [
        Hole::Generics,
        Hole::Signature,
        Hole::ParamTypes,
        Hole::Extract,
        Hole::CallArgs,
        Hole::Capture,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Hole::Generics => "$$GENERICS$$",
            Hole::Signature => "$$SIGNATURE$$",
            Hole::ParamTypes => "$$PARAM_TYPES$$",
            Hole::Extract => "$$EXTRACT$$",
            Hole::CallArgs => "$$CALL_ARGS$$",
            Hole::Capture => "$$CAPTURE$$",
        }
    }

    fn from_token(token: &str) -> Option<Hole> {
        Hole::ALL.into_iter().find(|hole| hole.token() == token)
    }

    fn required_by(&self, variant: Variant) -> bool {
        match self {
            Hole::Capture => variant == Variant::Capturing,
            _ => true,
        }
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A validated binder template.
///
/// Every hole the variant requires appears exactly once, and no other `$$NAME$$` token is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderTemplate {
    origin: String,
    variant: Variant,
    text: String,
}

impl BinderTemplate {
    /// The template shipped with this crate for `variant`.
    pub fn builtin(variant: Variant) -> Self {
        let text = match variant {
            Variant::Plain => PLAIN_TEMPLATE,
            Variant::Capturing => CAPTURING_TEMPLATE,
        };
        Self::parse(format!("<builtin {variant}>"), variant, text)
            .unwrap_or_else(|e| unreachable!("internal error - builtin template is invalid: {e}"))
    }

    /// Read and validate a template file.
    pub fn from_file(path: impl AsRef<Path>, variant: Variant) -> Result<Self, GenerateError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GenerateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path.display().to_string(), variant, text)
    }

    /// Validate template `text`; `origin` names it in error messages.
    pub fn parse(
        origin: impl Into<String>,
        variant: Variant,
        text: impl Into<String>,
    ) -> Result<Self, GenerateError> {
        let origin = origin.into();
        let text = text.into();

        for token in hole_tokens(&text) {
            match Hole::from_token(token) {
                Some(hole) if !hole.required_by(variant) => {
                    return Err(GenerateError::UnexpectedHole {
                        origin,
                        hole,
                        variant,
                    });
                }
                Some(_) => {}
                None => {
                    return Err(GenerateError::UnknownHole {
                        origin,
                        token: token.to_string(),
                    });
                }
            }
        }

        for hole in Hole::ALL.into_iter().filter(|h| h.required_by(variant)) {
            match text.matches(hole.token()).count() {
                0 => return Err(GenerateError::MissingHole { origin, hole }),
                1 => {}
                count => {
                    return Err(GenerateError::DuplicateHole {
                        origin,
                        hole,
                        count,
                    });
                }
            }
        }

        Ok(Self {
            origin,
            variant,
            text,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace each hole with its value.
    ///
    /// A value spanning multiple lines is indented to the column of its hole.
    pub(crate) fn fill(&self, values: &[(Hole, String)]) -> String {
        let mut out = self.text.clone();

        for (hole, value) in values {
            let indent = indentation_of(&out, hole.token());
            let value = value
                .lines()
                .collect::<Vec<_>>()
                .join(&format!("\n{indent}"));
            out = out.replacen(hole.token(), &value, 1);
        }

        out
    }
}

/// All `$$NAME$$` tokens in `text`, in order of appearance.
/// A name is any run of non-whitespace characters, so misspelled holes are found too.
pub(crate) fn hole_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::default();
    let mut rest = text;
    let mut offset = 0;

    while let Some(start) = rest.find("$$") {
        let after = &rest[start + 2..];
        match after.find("$$") {
            Some(end)
                if end > 0 && !after[..end].chars().any(char::is_whitespace) =>
            {
                let begin = offset + start;
                let finish = begin + end + 4;
                tokens.push(&text[begin..finish]);
                offset = finish;
                rest = &text[finish..];
            }
            _ => {
                offset += start + 2;
                rest = &text[offset..];
            }
        }
    }

    tokens
}

// The leading whitespace of the line holding `token`.
fn indentation_of<'a>(text: &'a str, token: &str) -> &'a str {
    match text.find(token) {
        Some(position) => {
            let line_start = text[..position].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let prefix = &text[line_start..position];
            let width = prefix.len() - prefix.trim_start().len();
            &prefix[..width]
        }
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Variant::Plain)]
    #[case(Variant::Capturing)]
    fn builtin_valid(#[case] variant: Variant) {
        // Execute
        let template = BinderTemplate::builtin(variant);

        // Verify
        assert_eq!(template.variant(), variant);
        assert_contains!(template.origin(), &variant.to_string());
    }

    #[test]
    fn parse_missing_hole() {
        // Setup
        let text = "impl<$$GENERICS$$> X<$$SIGNATURE$$> for F where F: Fn($$PARAM_TYPES$$) { $$EXTRACT$$ }";

        // Execute
        let error = BinderTemplate::parse("t", Variant::Plain, text).unwrap_err();

        // Verify
        assert_matches!(
            error,
            GenerateError::MissingHole {
                hole: Hole::CallArgs,
                ..
            }
        );
        assert_eq!(
            error.to_string(),
            "Malformed template 't' - missing hole $$CALL_ARGS$$."
        );
    }

    #[test]
    fn parse_duplicate_hole() {
        // Setup
        let text = "$$GENERICS$$ $$SIGNATURE$$ $$PARAM_TYPES$$ $$EXTRACT$$ $$CALL_ARGS$$ $$CALL_ARGS$$";

        // Execute
        let error = BinderTemplate::parse("t", Variant::Plain, text).unwrap_err();

        // Verify
        assert_matches!(
            error,
            GenerateError::DuplicateHole {
                hole: Hole::CallArgs,
                count: 2,
                ..
            }
        );
    }

    #[rstest]
    #[case("$$RETURN$$")]
    #[case("$$ARG0$$")]
    #[case("$$EXTRACT2$$")]
    #[case("$$Generics$$")]
    fn parse_unknown_hole(#[case] unknown: &str) {
        // Setup
        let text = format!("$$GENERICS$$ $$SIGNATURE$$ $$PARAM_TYPES$$ $$EXTRACT$$ $$CALL_ARGS$$ {unknown}");

        // Execute
        let error = BinderTemplate::parse("t", Variant::Plain, text).unwrap_err();

        // Verify
        assert_matches!(error, GenerateError::UnknownHole { token, .. } if token == unknown);
    }

    #[test]
    fn parse_capture_hole_in_plain() {
        // Setup
        let text = "$$GENERICS$$ $$SIGNATURE$$ $$PARAM_TYPES$$ $$EXTRACT$$ $$CALL_ARGS$$ $$CAPTURE$$";

        // Execute
        let error = BinderTemplate::parse("t", Variant::Plain, text).unwrap_err();

        // Verify
        assert_matches!(
            error,
            GenerateError::UnexpectedHole {
                hole: Hole::Capture,
                variant: Variant::Plain,
                ..
            }
        );
    }

    #[test]
    fn parse_capturing_requires_capture() {
        // Setup
        let text = "$$GENERICS$$ $$SIGNATURE$$ $$PARAM_TYPES$$ $$EXTRACT$$ $$CALL_ARGS$$";

        // Execute
        let error = BinderTemplate::parse("t", Variant::Capturing, text).unwrap_err();

        // Verify
        assert_matches!(
            error,
            GenerateError::MissingHole {
                hole: Hole::Capture,
                ..
            }
        );
    }

    #[rstest]
    #[case("", vec![])]
    #[case("$$A$$", vec!["$$A$$"])]
    #[case("x $$A_B$$ y $$C$$", vec!["$$A_B$$", "$$C$$"])]
    #[case("$$ not a hole $$", vec![])]
    #[case("$$$$", vec![])]
    #[case("a $$ b $$GENERICS$$", vec!["$$GENERICS$$"])]
    #[case("$$ARG0$$ $$EXTRACT2$$", vec!["$$ARG0$$", "$$EXTRACT2$$"])]
    #[case("$$call_args$$", vec!["$$call_args$$"])]
    fn tokens(#[case] text: &str, #[case] expected: Vec<&str>) {
        // Execute
        let found = hole_tokens(text);

        // Verify
        assert_eq!(found, expected);
    }

    #[test]
    fn fill_indents_multiline() {
        // Setup
        let text = "fn f() {\n    $$EXTRACT$$\n    $$CALL_ARGS$$ $$GENERICS$$ $$SIGNATURE$$ $$PARAM_TYPES$$\n}";
        let template = BinderTemplate::parse("t", Variant::Plain, text).unwrap();

        // Execute
        let out = template.fill(&[
            (Hole::Extract, "a;\nb;".to_string()),
            (Hole::CallArgs, "c".to_string()),
            (Hole::Generics, "d".to_string()),
            (Hole::Signature, "e".to_string()),
            (Hole::ParamTypes, "f".to_string()),
        ]);

        // Verify
        assert_eq!(out, "fn f() {\n    a;\n    b;\n    c d e f\n}");
    }

    #[test]
    fn variant_from_str() {
        assert_eq!("plain".parse::<Variant>(), Ok(Variant::Plain));
        assert_eq!("Capturing".parse::<Variant>(), Ok(Variant::Capturing));
        assert_eq!(
            "other".parse::<Variant>(),
            Err("unknown variant: other".to_string())
        );
    }
}
