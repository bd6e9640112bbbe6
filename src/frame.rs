//! Newline-delimited framing for reassembled message bodies.
//!
//! A complete body has the layout `<source>\n<destination>\n<payload>`. Only
//! the first two newlines are structural; the payload runs to the end of the
//! body and may contain any byte value, including further newlines.
//!
//! Tokens are validated before a message is handed to a dispatcher:
//!
//! - the source may contain alphanumeric characters and `.`;
//! - the destination may contain alphanumeric characters only and must not
//!   start with [`RESERVED_DESTINATION_PREFIX`].
//!
//! Alphanumeric means a Unicode letter (`L*`) or number (`N*`) from the Basic
//! Multilingual Plane. Combining marks and characters outside the BMP are
//! rejected.

use std::fmt;

use thiserror::Error;
use unicode_general_category::{GeneralCategory, get_general_category};

/// Byte separating the structural fields of a message body.
pub const DELIMITER: u8 = b'\n';

/// Destination prefix reserved for internal routing.
pub const RESERVED_DESTINATION_PREFIX: &str = "interfaces";

/// Structural field of a message body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Identifier of the producer of the message.
    Source,
    /// Forwarding target of the message.
    Destination,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Reasons a reassembled body is rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The body ended before both structural delimiters were seen.
    #[error("insufficient fields: found {found} of 2 delimiters")]
    MissingDelimiter { found: usize },
    /// A token is not valid UTF-8.
    #[error("{field} is not valid UTF-8")]
    NonUtf8 { field: Field },
    /// The source contains a character other than alphanumerics and `.`.
    #[error("invalid source \"{token}\"")]
    InvalidSource { token: String },
    /// The destination contains a non-alphanumeric character.
    #[error("invalid destination \"{token}\"")]
    InvalidDestination { token: String },
    /// The destination starts with the reserved prefix.
    #[error(
        "invalid destination \"{token}\": must not start with \"{prefix}\"",
        prefix = RESERVED_DESTINATION_PREFIX
    )]
    ReservedDestination { token: String },
}

/// A validated message ready for dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMessage {
    source: String,
    destination: String,
    payload: Vec<u8>,
}

impl ParsedMessage {
    /// Build a message from its parts, applying the same token rules as
    /// [`parse`].
    ///
    /// # Errors
    ///
    /// Returns a [`FrameError`] when either token is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use pushwire::frame::ParsedMessage;
    /// let message = ParsedMessage::new("org.example", "weather", b"22C".to_vec())
    ///     .expect("valid tokens");
    /// assert_eq!(message.encode(), b"org.example\nweather\n22C");
    /// ```
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        payload: Vec<u8>,
    ) -> Result<Self, FrameError> {
        let source = source.into();
        let destination = destination.into();
        check_source(&source)?;
        check_destination(&destination)?;
        Ok(Self {
            source,
            destination,
            payload,
        })
    }

    /// Identifier of the application that produced the message.
    #[must_use]
    pub fn source(&self) -> &str { &self.source }

    /// Target the message should be forwarded to.
    #[must_use]
    pub fn destination(&self) -> &str { &self.destination }

    /// Opaque payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] { self.payload.as_slice() }

    /// Consume the message, returning `(source, destination, payload)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String, Vec<u8>) {
        (self.source, self.destination, self.payload)
    }

    /// Encode the message into a body accepted by [`parse`].
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut body =
            Vec::with_capacity(self.source.len() + self.destination.len() + self.payload.len() + 2);
        body.extend_from_slice(self.source.as_bytes());
        body.push(DELIMITER);
        body.extend_from_slice(self.destination.as_bytes());
        body.push(DELIMITER);
        body.extend_from_slice(&self.payload);
        body
    }
}

/// Parse and validate a reassembled message body.
///
/// The source token is validated before the destination delimiter is looked
/// for, so a body with a bad source reports [`FrameError::InvalidSource`] even
/// when it is also truncated.
///
/// # Errors
///
/// Returns a [`FrameError`] describing the first rule the body violates.
///
/// # Examples
///
/// ```
/// use pushwire::frame::{FrameError, parse};
/// let message = parse(b"abc\ndef\nPAYLOAD").expect("valid body");
/// assert_eq!(message.source(), "abc");
/// assert_eq!(message.destination(), "def");
/// assert_eq!(message.payload(), b"PAYLOAD");
///
/// assert_eq!(
///     parse(b"abc\ndef"),
///     Err(FrameError::MissingDelimiter { found: 1 })
/// );
/// ```
pub fn parse(body: &[u8]) -> Result<ParsedMessage, FrameError> {
    let (source, rest) = split_field(body).ok_or(FrameError::MissingDelimiter { found: 0 })?;
    let source = decode_token(source, Field::Source)?;
    check_source(source)?;

    let (destination, payload) =
        split_field(rest).ok_or(FrameError::MissingDelimiter { found: 1 })?;
    let destination = decode_token(destination, Field::Destination)?;
    check_destination(destination)?;

    Ok(ParsedMessage {
        source: source.to_owned(),
        destination: destination.to_owned(),
        payload: payload.to_vec(),
    })
}

fn split_field(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let position = bytes.iter().position(|&byte| byte == DELIMITER)?;
    Some((&bytes[..position], &bytes[position + 1..]))
}

fn decode_token(bytes: &[u8], field: Field) -> Result<&str, FrameError> {
    std::str::from_utf8(bytes).map_err(|_| FrameError::NonUtf8 { field })
}

fn is_letter_or_number(ch: char) -> bool {
    if ch.len_utf16() != 1 {
        return false;
    }
    matches!(
        get_general_category(ch),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

fn check_source(token: &str) -> Result<(), FrameError> {
    if token.chars().all(|ch| is_letter_or_number(ch) || ch == '.') {
        Ok(())
    } else {
        Err(FrameError::InvalidSource {
            token: token.to_owned(),
        })
    }
}

fn check_destination(token: &str) -> Result<(), FrameError> {
    if !token.chars().all(is_letter_or_number) {
        return Err(FrameError::InvalidDestination {
            token: token.to_owned(),
        });
    }
    if token.starts_with(RESERVED_DESTINATION_PREFIX) {
        return Err(FrameError::ReservedDestination {
            token: token.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Field, FrameError, ParsedMessage, parse};

    #[test]
    fn splits_three_fields() {
        let message = parse(b"abc\ndef\nPAYLOAD").expect("valid body");
        assert_eq!(message.source(), "abc");
        assert_eq!(message.destination(), "def");
        assert_eq!(message.payload(), b"PAYLOAD");
    }

    #[test]
    fn payload_bytes_pass_through_untouched() {
        let message = parse(b"app.one\nsink\n\n\r\x00\xff").expect("valid body");
        assert_eq!(message.payload(), b"\n\r\x00\xff");
    }

    #[test]
    fn payload_may_be_empty() {
        let message = parse(b"a\nb\n").expect("valid body");
        assert!(message.payload().is_empty());
    }

    #[test]
    fn source_allows_dots_and_unicode_letters() {
        let message = parse("org.ex\u{e4}mple.2\nZiel9\nx".as_bytes()).expect("valid body");
        assert_eq!(message.source(), "org.ex\u{e4}mple.2");
        assert_eq!(message.destination(), "Ziel9");
    }

    #[test]
    fn letter_and_number_categories_are_accepted() {
        // Lt, Lm, Nl and No alongside the common letter and digit classes.
        let message = parse("\u{1c5}\u{2b0}\u{2160}\u{b2}.x\nZ\u{663}\nx".as_bytes())
            .expect("valid body");
        assert_eq!(message.source(), "\u{1c5}\u{2b0}\u{2160}\u{b2}.x");
        assert_eq!(message.destination(), "Z\u{663}");
    }

    #[test]
    fn empty_tokens_are_accepted() {
        let message = parse(b"\n\npayload").expect("empty tokens carry no bad characters");
        assert_eq!(message.source(), "");
        assert_eq!(message.destination(), "");
    }

    #[rstest]
    #[case::no_delimiter(&b"abc"[..], FrameError::MissingDelimiter { found: 0 })]
    #[case::one_delimiter(&b"abc\ndef"[..], FrameError::MissingDelimiter { found: 1 })]
    #[case::bad_source(&b"ab!c\ndef\nX"[..], FrameError::InvalidSource { token: "ab!c".into() })]
    #[case::bad_source_before_truncation(
        &b"ab c\ndef"[..],
        FrameError::InvalidSource { token: "ab c".into() }
    )]
    #[case::carriage_return_in_source(
        &b"abc\r\ndef\nX"[..],
        FrameError::InvalidSource { token: "abc\r".into() }
    )]
    #[case::dot_in_destination(
        &b"abc\nd.ef\nX"[..],
        FrameError::InvalidDestination { token: "d.ef".into() }
    )]
    #[case::reserved_prefix(
        &b"abc\ninterfacesX\nY"[..],
        FrameError::ReservedDestination { token: "interfacesX".into() }
    )]
    #[case::reserved_exact(
        &b"abc\ninterfaces\nY"[..],
        FrameError::ReservedDestination { token: "interfaces".into() }
    )]
    #[case::non_utf8_destination(
        &b"abc\n\xff\nY"[..],
        FrameError::NonUtf8 { field: Field::Destination }
    )]
    #[case::combining_mark_in_source(
        "\u{915}\u{93e}\nd\nx".as_bytes(),
        FrameError::InvalidSource { token: "\u{915}\u{93e}".into() }
    )]
    #[case::astral_letter_in_destination(
        "s\n\u{1d400}\nx".as_bytes(),
        FrameError::InvalidDestination { token: "\u{1d400}".into() }
    )]
    #[case::symbol_in_destination(
        "s\nd\u{2122}\nx".as_bytes(),
        FrameError::InvalidDestination { token: "d\u{2122}".into() }
    )]
    fn rejects_invalid_bodies(#[case] body: &[u8], #[case] expected: FrameError) {
        assert_eq!(parse(body), Err(expected));
    }

    #[test]
    fn reserved_prefix_check_is_case_sensitive() {
        let message = parse(b"abc\nInterfacesX\nY").expect("prefix match is case-sensitive");
        assert_eq!(message.destination(), "InterfacesX");
    }

    #[test]
    fn new_enforces_token_rules() {
        assert_eq!(
            ParsedMessage::new("a", "interfaces1", Vec::new()),
            Err(FrameError::ReservedDestination {
                token: "interfaces1".into()
            })
        );
        let message = ParsedMessage::new("a.b", "c", b"\n\n".to_vec()).expect("valid tokens");
        assert_eq!(parse(&message.encode()), Ok(message));
    }
}
