use std::{
    convert::Infallible,
    io::{self, BufRead},
    str::Chars,
};

use text_size::TextSize;

use super::SourceError;

/// A forward-only provider of symbols.
///
/// Sources cannot go back. Reading a symbol removes it from the source for good, which is why
/// [`LookaheadBuffer`](super::LookaheadBuffer) keeps the symbols a consumer may want to see again.
pub trait SymbolSource {
    type Symbol: Clone;
    type Error;

    /// Reads the next symbol, or `Ok(None)` once the source is exhausted.
    fn next_symbol(&mut self) -> Result<Option<Self::Symbol>, Self::Error>;
}

impl<S: SymbolSource + ?Sized> SymbolSource for &mut S {
    type Error = S::Error;
    type Symbol = S::Symbol;

    #[inline]
    fn next_symbol(&mut self) -> Result<Option<Self::Symbol>, Self::Error> {
        (**self).next_symbol()
    }
}

/// The characters of a string.
#[derive(Debug, Clone)]
pub struct StrSource<'s> {
    chars:  Chars<'s>,
    offset: TextSize,
}

impl<'s> StrSource<'s> {
    pub fn new(input: &'s str) -> Self {
        Self {
            chars:  input.chars(),
            offset: 0.into(),
        }
    }

    /// The byte offset of the next character that will be read.
    #[inline]
    pub fn offset(&self) -> TextSize {
        self.offset
    }
}

impl SymbolSource for StrSource<'_> {
    type Error = Infallible;
    type Symbol = char;

    #[inline]
    fn next_symbol(&mut self) -> Result<Option<char>, Infallible> {
        Ok(self.chars.next().map(|c| {
            self.offset += TextSize::of(c);
            c
        }))
    }
}

/// The UTF-8 decoded characters of a reader.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    offset: TextSize,
}

impl<R: BufRead> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0.into(),
        }
    }

    /// The byte offset of the next character that will be read.
    #[inline]
    pub fn offset(&self) -> TextSize {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let byte = buf[0];
                    self.reader.consume(1);
                    return Ok(Some(byte));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: BufRead> SymbolSource for ReadSource<R> {
    type Error = SourceError;
    type Symbol = char;

    fn next_symbol(&mut self) -> Result<Option<char>, SourceError> {
        let invalid = SourceError::InvalidUtf8 {
            offset: self.offset.into(),
        };
        let first = match self.read_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };
        let width = utf8_width(first);
        if width == 0 {
            return Err(invalid);
        }

        let mut bytes = [first, 0, 0, 0];
        for slot in &mut bytes[1..width] {
            match self.read_byte()? {
                Some(byte) => *slot = byte,
                // input ends in the middle of a sequence
                None => return Err(invalid),
            }
        }
        self.offset += TextSize::from(width as u32);

        match std::str::from_utf8(&bytes[..width]) {
            Ok(decoded) => Ok(decoded.chars().next()),
            Err(_) => Err(invalid),
        }
    }
}

/// Length of the UTF-8 sequence introduced by `first`, or 0 if `first` cannot start a sequence.
fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Any iterator, e.g. over the tokens produced by a lexer.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator> IterSource<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter(),
        }
    }
}

impl<I> SymbolSource for IterSource<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Error = Infallible;
    type Symbol = I::Item;

    #[inline]
    fn next_symbol(&mut self) -> Result<Option<I::Item>, Infallible> {
        Ok(self.iter.next())
    }
}
