//!
//! Mask-driven reflow engine.
//!
//! The host text widget snapshots its text before an edit, lets the edit
//! happen, and hands both snapshots plus the reported change to
//! [MaskEngine::reflow]. The returned [Correction] carries the text and
//! caret the host should apply, if either differs from its current state.
//! After the host has settled on final content, [MaskEngine::input_mode_at]
//! answers which input mode fits the next character to be typed.
//!
//! Writing the correction back into the host re-triggers the host's own
//! change notification. That echo is recognized in [MaskEngine::reflow]
//! before any other work and answered from state, which keeps the
//! write-back loop from running twice.
//!

use crate::mask::Mask;
use crate::{InputMode, MaskError, upos_type};

mod reflow_op;

/// One reported edit: the snapshots before and after, plus the position
/// data from the host's change notification.
///
/// Built per edit, discarded after reflow. The host-reported `start`,
/// `removed` and `added` counts are advisory. The engine derives the
/// changed region from the snapshots itself, host frameworks are known
/// to report sloppy positions.
#[derive(Debug, Clone, Copy)]
pub struct EditDelta<'a> {
    /// Text before the edit.
    pub old_text: &'a str,
    /// Text after the edit.
    pub new_text: &'a str,
    /// Start of the change in the old text, as reported.
    pub start: upos_type,
    /// Number of removed chars, as reported.
    pub removed: upos_type,
    /// Number of added chars, as reported.
    pub added: upos_type,
}

impl<'a> EditDelta<'a> {
    /// New delta from one edit notification.
    pub fn new(
        old_text: &'a str,
        new_text: &'a str,
        start: upos_type,
        removed: upos_type,
        added: upos_type,
    ) -> Self {
        Self {
            old_text,
            new_text,
            start,
            removed,
            added,
        }
    }
}

/// Result of a reflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Corrected formatted text.
    pub text: String,
    /// Caret position in the corrected text. Always within `0..=text-len`.
    pub cursor: upos_type,
}

/// Format a raw value against a mask.
///
/// Behaves like pasting `raw` into an empty field.
pub fn format(mask: &Mask, raw: &str) -> String {
    let delta = EditDelta::new("", raw, 0, 0, raw.chars().count() as upos_type);
    reflow_op::reflow(mask, &delta).text
}

/// Stateful mask engine.
///
/// Owns the parsed [Mask] for its whole lifetime and remembers the last
/// formatted text it produced or accepted. There is no reset, a new mask
/// means a new engine.
#[derive(Debug)]
pub struct MaskEngine {
    mask: Mask,
    last_text: String,
    last_cursor: upos_type,
}

impl MaskEngine {
    /// New engine for the given mask.
    pub fn new(mask: Mask) -> Self {
        Self {
            mask,
            last_text: String::new(),
            last_cursor: 0,
        }
    }

    /// New engine, parsing the mask pattern first.
    pub fn with_pattern(pattern: &str) -> Result<Self, MaskError> {
        Ok(Self::new(Mask::parse(pattern)?))
    }

    /// The mask.
    #[inline]
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Current formatted text.
    #[inline]
    pub fn value(&self) -> &str {
        &self.last_text
    }

    /// Caret position that goes with [value](Self::value).
    #[inline]
    pub fn cursor(&self) -> upos_type {
        self.last_cursor
    }

    /// Every input slot filled?
    #[inline]
    pub fn is_complete(&self) -> bool {
        let len = self.last_text.chars().count() as upos_type;
        self.mask.first_input_slot(len).is_none()
    }

    /// Reflow one edit.
    ///
    /// Validates the changed region against the mask, drops characters
    /// that don't fit their slot, injects/removes separators and computes
    /// the caret position for the corrected text.
    ///
    /// An echo of the engine's own write-back (new text equals the last
    /// produced text) short-circuits to the stored result.
    pub fn reflow(&mut self, delta: EditDelta<'_>) -> Correction {
        if delta.new_text == self.last_text {
            return Correction {
                text: self.last_text.clone(),
                cursor: self.last_cursor,
            };
        }

        let fix = reflow_op::reflow(&self.mask, &delta);
        self.last_text = fix.text.clone();
        self.last_cursor = fix.cursor;
        fix
    }

    /// Replace the content with a freshly formatted raw value.
    ///
    /// Behaves like pasting `raw` into an empty field.
    pub fn set_value(&mut self, raw: &str) -> Correction {
        let delta = EditDelta::new("", raw, 0, 0, raw.chars().count() as upos_type);
        let fix = reflow_op::reflow(&self.mask, &delta);
        self.last_text = fix.text.clone();
        self.last_cursor = fix.cursor;
        fix
    }

    /// Input mode for the next character to be typed.
    ///
    /// That is the class of the slot at the end of the current text,
    /// skipping over separators. None once the mask is exhausted, the
    /// host leaves its input mode alone then.
    ///
    /// Fails if the cursor lies beyond the current text, which indicates
    /// a host integration bug.
    pub fn input_mode_at(&self, cursor: upos_type) -> Result<Option<InputMode>, MaskError> {
        let len = self.last_text.chars().count() as upos_type;
        if cursor > len {
            return Err(MaskError::IndexOutOfBounds(cursor, len));
        }

        let Some(slot) = self.mask.first_input_slot(len) else {
            return Ok(None);
        };
        Ok(self.mask.slot_at(slot)?.input_mode())
    }
}
