// SPDX-License-Identifier: MIT

//! Provides an `Hrp` type that represents the human-readable prefix of an address.
//!
//! The prefix is everything before the rightmost `'1'` separator. It must contain at least one
//! US-ASCII character, each in the printable range [33-126]. It is case-insensitive: every
//! computation (checksum, encoding) uses its lowercase form.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::string::String;
#[cfg(feature = "alloc")]
use alloc::string::ToString;
use core::iter::FusedIterator;
use core::str::FromStr;
use core::{fmt, hash};

/// The human-readable prefix, bound into the checksum of every address.
#[derive(Clone, Copy)]
pub struct Hrp<'s> {
    inner: &'s str,
}

impl<'s> Hrp<'s> {
    /// Parses the human-readable prefix.
    ///
    /// This does _not_ check that `hrp` is a prefix in use on any network (eg, "xch"), any
    /// printable ASCII string is accepted. Case is preserved here but ignored everywhere else.
    ///
    /// # Errors
    ///
    /// If `hrp` is empty or contains a byte outside the printable US-ASCII range.
    pub fn parse(hrp: &'s str) -> Result<Self, Error> {
        use Error::*;

        if hrp.is_empty() {
            return Err(Empty);
        }

        for c in hrp.chars() {
            if !c.is_ascii() {
                return Err(NonAsciiChar(c));
            }
            let b = c as u8;
            if !(33..=126).contains(&b) {
                return Err(InvalidAsciiByte(b));
            }
        }

        Ok(Hrp { inner: hrp })
    }

    /// Creates an `Hrp` without validating it.
    ///
    /// Only for use with string literals already known to be valid prefixes.
    pub const fn parse_unchecked(hrp: &'static str) -> Hrp<'static> { Hrp { inner: hrp } }

    /// Returns the prefix as a lowercase string.
    #[cfg(feature = "alloc")]
    pub fn to_lowercase(&self) -> String { self.lowercase_char_iter().collect() }

    /// Creates a lowercase iterator over the bytes (ASCII characters) of this prefix.
    pub fn lowercase_byte_iter(&self) -> LowercaseByteIter<'s> {
        LowercaseByteIter { iter: self.inner.bytes() }
    }

    /// Creates a lowercase iterator over the characters of this prefix.
    pub fn lowercase_char_iter(&self) -> LowercaseCharIter<'s> {
        LowercaseCharIter { iter: self.lowercase_byte_iter() }
    }

    /// Returns the prefix exactly as it was parsed.
    pub fn as_str(&self) -> &'s str { self.inner }

    /// Returns the length (number of characters) of the prefix.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.inner.len() }
}

impl fmt::Debug for Hrp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Hrp(")?;
        for c in self.lowercase_char_iter() {
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Displays the prefix in lowercase, the form it takes in an encoded address.
impl fmt::Display for Hrp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.lowercase_char_iter() {
            fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

impl PartialEq for Hrp<'_> {
    fn eq(&self, other: &Self) -> bool { self.inner.eq_ignore_ascii_case(other.inner) }
}

impl Eq for Hrp<'_> {}

impl hash::Hash for Hrp<'_> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for b in self.lowercase_byte_iter() {
            state.write_u8(b);
        }
    }
}

/// Iterator over the prefix, as lowercase ASCII byte values.
pub struct LowercaseByteIter<'s> {
    iter: core::str::Bytes<'s>,
}

impl<'s> Iterator for LowercaseByteIter<'s> {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<u8> { self.iter.next().map(|b| b.to_ascii_lowercase()) }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { (self.len(), Some(self.len())) }
}

impl<'s> ExactSizeIterator for LowercaseByteIter<'s> {
    #[inline]
    fn len(&self) -> usize { self.iter.len() }
}

impl<'s> FusedIterator for LowercaseByteIter<'s> {}

/// Iterator over the prefix, as lowercase characters.
pub struct LowercaseCharIter<'s> {
    iter: LowercaseByteIter<'s>,
}

impl<'s> Iterator for LowercaseCharIter<'s> {
    type Item = char;
    #[inline]
    fn next(&mut self) -> Option<char> { self.iter.next().map(char::from) }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { self.iter.size_hint() }
}

impl<'s> ExactSizeIterator for LowercaseCharIter<'s> {
    #[inline]
    fn len(&self) -> usize { self.iter.len() }
}

impl<'s> FusedIterator for LowercaseCharIter<'s> {}

/// The prefixes in common use. Any other valid prefix is accepted by the codec as well.
#[derive(Copy, PartialEq, Eq, Clone, Hash, Debug)]
#[non_exhaustive]
pub enum KnownPrefix {
    /// Mainnet coin addresses - "xch".
    Xch,
    /// Testnet coin addresses - "txch".
    Txch,
    /// NFT launcher ids - "nft".
    Nft,
    /// Decentralized identities - "did".
    Did,
}

impl KnownPrefix {
    /// Returns the prefix string, always lowercase.
    pub fn as_str(self) -> &'static str {
        use KnownPrefix::*;

        match self {
            Xch => "xch",
            Txch => "txch",
            Nft => "nft",
            Did => "did",
        }
    }
}

impl fmt::Display for KnownPrefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Parses a [`KnownPrefix`] from a string, ignoring case.
///
/// # Examples
///
/// ```
/// # use core::str::FromStr;
/// # use puzzle_address::primitives::hrp::KnownPrefix;
/// assert!(KnownPrefix::from_str("randomvalidprefix").is_err());
/// assert_eq!(KnownPrefix::from_str("xch").expect("xch is known"), KnownPrefix::Xch);
/// assert_eq!(KnownPrefix::from_str("TXCH").expect("uppercase is valid also"), KnownPrefix::Txch);
/// ```
impl FromStr for KnownPrefix {
    type Err = UnknownPrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use KnownPrefix::*;

        [Xch, Txch, Nft, Did]
            .iter()
            .copied()
            .find(|known| known.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPrefixError {
                #[cfg(feature = "alloc")]
                unknown: s.to_string(),
            })
    }
}

/// Creates an [`Hrp`] from a [`KnownPrefix`].
///
/// # Examples
///
/// ```
/// # use puzzle_address::primitives::hrp::{Hrp, KnownPrefix};
/// assert_eq!(Hrp::parse("XCH").expect("XCH is valid"), Hrp::from(KnownPrefix::Xch))
/// ```
impl From<KnownPrefix> for Hrp<'static> {
    fn from(prefix: KnownPrefix) -> Self { Hrp::parse_unchecked(prefix.as_str()) }
}

/// Error if string is not one of the [`KnownPrefix`]es.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPrefixError {
    #[cfg(feature = "alloc")]
    unknown: String,
}

impl fmt::Display for UnknownPrefixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[cfg(feature = "alloc")]
        return write!(f, "{} is not a known address prefix", self.unknown);
        #[cfg(not(feature = "alloc"))]
        return write!(f, "encountered an unknown address prefix");
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownPrefixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}

/// Errors encountered while checking the human-readable prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The prefix is empty.
    Empty,
    /// Found a non-ASCII character.
    NonAsciiChar(char),
    /// Byte value not within the printable US-ASCII range.
    InvalidAsciiByte(u8),
}

impl Error {
    /// Returns the character that made the prefix invalid, if any.
    pub fn offending_char(&self) -> Option<char> {
        use Error::*;

        match *self {
            Empty => None,
            NonAsciiChar(c) => Some(c),
            InvalidAsciiByte(b) => Some(char::from(b)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            Empty => write!(f, "prefix is empty, must have at least 1 character"),
            NonAsciiChar(c) => write!(f, "found non-ASCII character: {:?}", c),
            InvalidAsciiByte(b) => write!(f, "byte value is not printable US-ASCII: '0x{:02x}'", b),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            Empty | NonAsciiChar(_) | InvalidAsciiByte(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! check_parse_ok {
        ($($test_name:ident, $hrp:literal);* $(;)?) => {
            $(
                #[test]
                fn $test_name() {
                    assert!(Hrp::parse($hrp).is_ok());
                }
            )*
        }
    }
    check_parse_ok! {
        parse_ok_0, "xch";
        parse_ok_1, "txch";
        parse_ok_2, "XCH";
        parse_ok_3, "XcH";
        parse_ok_4, "a1b";
        parse_ok_5, "?";
        parse_ok_6, "~!@#$%^&*()_+";
        parse_ok_7, "an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio";
        parse_ok_8, "averyveryveryveryveryveryveryveryveryveryveryveryveryveryveryveryveryveryveryveryveryverylongprefix";
    }

    macro_rules! check_parse_err {
        ($($test_name:ident, $hrp:literal, $err:expr);* $(;)?) => {
            $(
                #[test]
                fn $test_name() {
                    assert_eq!(Hrp::parse($hrp), Err($err));
                }
            )*
        }
    }
    check_parse_err! {
        parse_err_empty, "", Error::Empty;
        parse_err_space, "x h", Error::InvalidAsciiByte(b' ');
        parse_err_del, "x\u{7f}", Error::InvalidAsciiByte(0x7f);
        parse_err_newline, "xch\n", Error::InvalidAsciiByte(b'\n');
        parse_err_non_ascii, "x\u{e9}", Error::NonAsciiChar('\u{e9}');
    }

    #[test]
    fn lowercase_iterators() {
        let hrp = Hrp::parse("TxCh").expect("valid hrp");
        assert!(hrp.lowercase_byte_iter().eq(b"txch".iter().copied()));
        assert!(hrp.lowercase_char_iter().eq("txch".chars()));
        assert_eq!(hrp.lowercase_char_iter().len(), 4);
        assert_eq!(hrp.as_str(), "TxCh");
    }

    #[test]
    fn lowercase_leaves_symbols_alone() {
        let hrp = Hrp::parse("@[`{").expect("valid hrp");
        assert!(hrp.lowercase_char_iter().eq("@[`{".chars()));
    }

    #[test]
    fn equality_ignores_case() {
        assert_eq!(Hrp::parse("XCH").unwrap(), Hrp::parse("xch").unwrap());
        assert_ne!(Hrp::parse("xch").unwrap(), Hrp::parse("txch").unwrap());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Hrp::parse("NFT").unwrap().to_string(), "nft");
        assert_eq!(format!("{:?}", Hrp::parse("Did").unwrap()), "Hrp(did)");
    }

    #[test]
    fn known_prefixes() {
        for (s, known) in [
            ("xch", KnownPrefix::Xch),
            ("txch", KnownPrefix::Txch),
            ("nft", KnownPrefix::Nft),
            ("did", KnownPrefix::Did),
        ] {
            assert_eq!(s.parse::<KnownPrefix>(), Ok(known));
            assert_eq!(known.to_string(), s);
            assert_eq!(Hrp::from(known), Hrp::parse(s).unwrap());
        }
        let err = "bc".parse::<KnownPrefix>().unwrap_err();
        #[cfg(feature = "alloc")]
        assert_eq!(err.to_string(), "bc is not a known address prefix");
        #[cfg(not(feature = "alloc"))]
        assert_eq!(err.to_string(), "encountered an unknown address prefix");
    }

    #[test]
    fn offending_char() {
        assert_eq!(Error::Empty.offending_char(), None);
        assert_eq!(Error::InvalidAsciiByte(b' ').offending_char(), Some(' '));
        assert_eq!(Error::NonAsciiChar('\u{2192}').offending_char(), Some('\u{2192}'));
    }
}
