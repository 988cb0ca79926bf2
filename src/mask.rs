//!
//! Mask pattern and per-position character classes.
//!

use crate::{InputMode, MaskError, upos_type};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// One position of the input mask.
#[allow(variant_size_differences)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MaskSlot {
    /// `9`: ASCII digit.
    Digit,
    /// `A`: letter. Content is stored uppercase.
    Letter,
    /// `w`: letter or digit. Content keeps its case.
    LetterOrDigit,
    /// Fixed separator character. Not user-editable content.
    Separator(char),
}

impl Display for MaskSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = match self {
            MaskSlot::Digit => '9',
            MaskSlot::Letter => 'A',
            MaskSlot::LetterOrDigit => 'w',
            MaskSlot::Separator(sep) => *sep,
        };
        write!(f, "{}", c)
    }
}

impl Debug for MaskSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MaskSlot::Digit => write!(f, "9"),
            MaskSlot::Letter => write!(f, "A"),
            MaskSlot::LetterOrDigit => write!(f, "w"),
            MaskSlot::Separator(sep) => write!(f, "\\{}", sep),
        }
    }
}

impl MaskSlot {
    /// Separator slot.
    #[inline]
    pub fn is_separator(&self) -> bool {
        matches!(self, MaskSlot::Separator(_))
    }

    /// Valid input for this slot.
    #[inline]
    pub fn accepts(&self, c: char) -> bool {
        match self {
            MaskSlot::Digit => c.is_ascii_digit(),
            MaskSlot::Letter => c.is_ascii_alphabetic(),
            MaskSlot::LetterOrDigit => c.is_ascii_alphanumeric(),
            MaskSlot::Separator(sep) => *sep == c,
        }
    }

    /// The char as stored for this slot.
    #[inline]
    pub(crate) fn store(&self, c: char) -> char {
        match self {
            MaskSlot::Letter => c.to_ascii_uppercase(),
            MaskSlot::Digit | MaskSlot::LetterOrDigit => c,
            MaskSlot::Separator(sep) => *sep,
        }
    }

    /// Input mode for this slot. None for separators.
    #[inline]
    pub fn input_mode(&self) -> Option<InputMode> {
        match self {
            MaskSlot::Digit => Some(InputMode::Digit),
            MaskSlot::Letter => Some(InputMode::Letter),
            MaskSlot::LetterOrDigit => Some(InputMode::LetterOrDigit),
            MaskSlot::Separator(_) => None,
        }
    }
}

/// Parsed input mask. One slot per pattern char, immutable once built.
///
/// * `9`: can enter a digit.
/// * `A`: can enter a letter, stored uppercase.
/// * `w`: can enter a letter or digit.
/// * everything else is a separator with that exact char.
///
/// There is no escape syntax, a mask cannot contain a literal `9`, `A`
/// or `w`.
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    slots: Vec<MaskSlot>,
}

impl Display for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{}", slot)?;
        }
        Ok(())
    }
}

impl Debug for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({})", self)
    }
}

impl FromStr for Mask {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mask::parse(s)
    }
}

impl Mask {
    /// Parse the mask pattern.
    pub fn parse(pattern: &str) -> Result<Mask, MaskError> {
        if pattern.is_empty() {
            return Err(MaskError::InvalidMask(pattern.into()));
        }

        let slots = pattern
            .chars()
            .map(|c| match c {
                '9' => MaskSlot::Digit,
                'A' => MaskSlot::Letter,
                'w' => MaskSlot::LetterOrDigit,
                c => MaskSlot::Separator(c),
            })
            .collect();

        Ok(Mask { slots })
    }

    /// Number of slots. Hard maximum for the formatted text.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.slots.len() as upos_type
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at the given index.
    #[inline]
    pub fn slot_at(&self, index: upos_type) -> Result<&MaskSlot, MaskError> {
        self.slots
            .get(index as usize)
            .ok_or(MaskError::IndexOutOfBounds(index, self.len()))
    }

    /// Does the char satisfy the slot at the given index?
    #[inline]
    pub fn classify(&self, index: upos_type, c: char) -> Result<bool, MaskError> {
        Ok(self.slot_at(index)?.accepts(c))
    }

    /// Iterate the slots.
    #[inline]
    pub fn slots(&self) -> impl Iterator<Item = &MaskSlot> {
        self.slots.iter()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&MaskSlot> {
        self.slots.get(index)
    }

    /// First non-separator slot at or after the given index.
    pub fn first_input_slot(&self, from: upos_type) -> Option<upos_type> {
        self.slots
            .iter()
            .enumerate()
            .skip(from as usize)
            .find(|(_, slot)| !slot.is_separator())
            .map(|(i, _)| i as upos_type)
    }
}
