//!
//! The reflow pipeline for [MaskEngine](crate::MaskEngine).
//!

use crate::mask::{Mask, MaskSlot};
use crate::mask_engine::{Correction, EditDelta};
use crate::upos_type;
use log::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Changed region between the two snapshots, in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Changed {
    pub(crate) start: usize,
    pub(crate) removed: usize,
    pub(crate) added: usize,
}

/// Common-prefix/common-suffix diff of old vs new.
pub(crate) fn diff_edit(old: &[char], new: &[char]) -> Changed {
    let max = old.len().min(new.len());

    let mut prefix = 0;
    while prefix < max && old[prefix] == new[prefix] {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < max - prefix && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix] {
        suffix += 1;
    }

    Changed {
        start: prefix,
        removed: old.len() - prefix - suffix,
        added: new.len() - prefix - suffix,
    }
}

// The char sits on a separator slot and equals that slot's literal.
// Such chars were injected by a prior reflow, not typed.
#[inline]
fn is_auto_separator(mask: &Mask, index: usize, c: char) -> bool {
    matches!(mask.get(index), Some(MaskSlot::Separator(sep)) if *sep == c)
}

/// Reflow one edit against the mask.
pub(crate) fn reflow(mask: &Mask, delta: &EditDelta<'_>) -> Correction {
    let old: Vec<char> = delta.old_text.chars().collect();
    let new: Vec<char> = delta.new_text.chars().collect();

    let mut change = diff_edit(&old, &new);

    let reported = Changed {
        start: delta.start as usize,
        removed: delta.removed as usize,
        added: delta.added as usize,
    };
    if change != reported {
        debug!("host reported {:?} but snapshots diff as {:?}", reported, change);
    }

    // A backspace that hits only separators removes the previous real
    // char as well. One backspace, one meaningful char.
    if change.added == 0
        && change.removed > 0
        && old[change.start..change.start + change.removed]
            .iter()
            .enumerate()
            .all(|(i, &c)| is_auto_separator(mask, change.start + i, c))
    {
        while change.start > 0 && is_auto_separator(mask, change.start - 1, old[change.start - 1])
        {
            change.start -= 1;
            change.removed += 1;
        }
        if change.start > 0 {
            change.start -= 1;
            change.removed += 1;
        }
    }

    // The raw stream: the added chars verbatim, then the old tail with
    // the auto-inserted separators stripped back out.
    let mut raw = String::new();
    raw.extend(&new[change.start..change.start + change.added]);
    for (i, &c) in old.iter().enumerate().skip(change.start + change.removed) {
        if !is_auto_separator(mask, i, c) {
            raw.push(c);
        }
    }

    // Everything before the change keeps its slots.
    let mut out: Vec<char> = old[..change.start].to_vec();
    out.truncate(mask.len() as usize);

    // Walk the mask from the first changed slot. Slot index and output
    // position stay aligned throughout.
    let mut slot = out.len();
    let mut last_insert_end = None;
    let mut raw_pos = 0;

    for g in raw.graphemes(true) {
        let from_insert = raw_pos < change.added;
        raw_pos += g.chars().count();

        let mut chars = g.chars();
        let c = chars.next().expect("grapheme");
        if chars.next().is_some() {
            // a multi-char cluster never fits a slot
            continue;
        }

        let Some(next) = mask.first_input_slot(slot as upos_type) else {
            // mask exhausted, the rest of the raw stream is discarded
            break;
        };
        let next = next as usize;
        let ms = *mask.get(next).expect("slot");

        if ms.accepts(c) {
            for i in slot..next {
                if let Some(MaskSlot::Separator(sep)) = mask.get(i) {
                    out.push(*sep);
                }
            }
            out.push(ms.store(c));
            slot = next + 1;
            if from_insert {
                last_insert_end = Some(out.len());
            }
        }
        // rejected chars are dropped and the slot does not advance
    }

    let cursor = if change.added > 0 {
        match last_insert_end {
            Some(mut pos) => {
                if pos == out.len() {
                    // the insert is the last content. emit the separator
                    // run up to the next input slot so the caret can
                    // land just before it.
                    let stop = mask
                        .first_input_slot(slot as upos_type)
                        .map(|v| v as usize)
                        .unwrap_or(mask.len() as usize);
                    for i in slot..stop {
                        if let Some(MaskSlot::Separator(sep)) = mask.get(i) {
                            out.push(*sep);
                        }
                    }
                }
                while pos < out.len() && mask.get(pos).map(|v| v.is_separator()).unwrap_or(false)
                {
                    pos += 1;
                }
                pos
            }
            // nothing of the insert survived, the caret stays put
            None => change.start.min(out.len()),
        }
    } else if change.removed > 0 {
        // a deletion leaves no dangling separator run at the end
        while out
            .last()
            .map(|&c| is_auto_separator(mask, out.len() - 1, c))
            .unwrap_or(false)
        {
            out.pop();
        }
        change.start.min(out.len())
    } else {
        change.start.min(out.len())
    };

    Correction {
        text: out.iter().collect(),
        cursor: cursor as upos_type,
    }
}
