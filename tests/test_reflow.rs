use mask_format::{Correction, EditDelta, MaskEngine};

const IBAN: &str = "99 AAAA wwww wwww wwww wwww";

fn engine() -> MaskEngine {
    MaskEngine::with_pattern(IBAN).unwrap()
}

fn fix(text: &str, cursor: u32) -> Correction {
    Correction {
        text: text.into(),
        cursor,
    }
}

#[test]
fn test_insert_char() {
    let mut e = engine();

    let c = e.reflow(EditDelta::new("34", "34s", 2, 0, 1));
    assert_eq!(c, fix("34 S", 4));

    // the write-back echoes as a new event. answered from state.
    let c = e.reflow(EditDelta::new("34s", "34 S", 2, 0, 1));
    assert_eq!(c, fix("34 S", 4));
}

#[test]
fn test_insert_uppercases() {
    let mut e = engine();

    let c = e.reflow(EditDelta::new("34 S", "34 aS", 3, 0, 1));
    assert_eq!(c, fix("34 AS", 4));
}

#[test]
fn test_insert_rejected() {
    let mut e = engine();

    // a digit can't go into a letter slot. dropped, caret stays.
    let c = e.reflow(EditDelta::new("34 AS", "34 A1S", 4, 0, 1));
    assert_eq!(c, fix("34 AS", 4));
}

#[test]
fn test_insert_at_full_mask() {
    let mut e = engine();

    let c = e.reflow(EditDelta::new(
        "34 ASFG asdf qwer 3412 rter",
        "34 ASFG asdf qwer 3412 rtera",
        27,
        0,
        1,
    ));
    assert_eq!(c, fix("34 ASFG asdf qwer 3412 rter", 27));
}

#[test]
fn test_insert_into_full_mask_truncates() {
    let mut e = engine();

    // inserting mid-text shifts the tail right. the char falling off
    // the end of the mask is gone.
    let c = e.reflow(EditDelta::new(
        "34 ASFG asdf qwer 3412 rter",
        "34 ASFG assdf qwer 3412 rter",
        10,
        0,
        1,
    ));
    assert_eq!(c, fix("34 ASFG assd fqwe r341 2rte", 11));
}

#[test]
fn test_typing_progression() {
    let mut e = engine();

    let c = e.reflow(EditDelta::new("", "3", 0, 0, 1));
    assert_eq!(c, fix("3", 1));

    // completing the digit group emits the separator and puts the
    // caret in front of the next input slot.
    let c = e.reflow(EditDelta::new("3", "34", 1, 0, 1));
    assert_eq!(c, fix("34 ", 3));

    let c = e.reflow(EditDelta::new("34 ", "34 x", 3, 0, 1));
    assert_eq!(c, fix("34 X", 4));
}

#[test]
fn test_paste() {
    let mut e = engine();

    let c = e.reflow(EditDelta::new("", "34ASFGasdfqwer3412rter", 0, 0, 22));
    assert_eq!(c, fix("34 ASFG asdf qwer 3412 rter", 27));
    assert!(e.is_complete());
}

#[test]
fn test_paste_mid_text() {
    let mut e = engine();

    let c = e.reflow(EditDelta::new("34 ASF", "34 ASqwerF", 4, 0, 4));
    assert_eq!(c, fix("34 ASQW erF", 10));
}

#[test]
fn test_paste_with_rejects() {
    let mut e = engine();

    // '!' fits nowhere and is dropped, the rest keeps filling.
    let c = e.reflow(EditDelta::new("", "3!4", 0, 0, 3));
    assert_eq!(c, fix("34 ", 3));
}

#[test]
fn test_paste_preformatted() {
    let mut e = engine();

    // pasting an already formatted value. the separators coincide with
    // their slots and pass through.
    let c = e.reflow(EditDelta::new("", "34 ASFG asdf", 0, 0, 12));
    assert_eq!(c, fix("34 ASFG asdf ", 13));
}

#[test]
fn test_paste_truncates() {
    let mut e = engine();

    let c = e.reflow(EditDelta::new("", "34ASFGasdfqwer3412rterEXTRA", 0, 0, 27));
    assert_eq!(c, fix("34 ASFG asdf qwer 3412 rter", 27));
}

#[test]
fn test_paste_monotonic_truncation() {
    // of N pasted chars exactly the fitting k survive, independent of N.
    for extra in ["", "X", "XXXX", "XXXXXXXXXXXXXXXXXXXX"] {
        let mut e = engine();
        let pasted = format!("34ASFGasdfqwer3412rter{}", extra);
        let c = e.reflow(EditDelta::new("", &pasted, 0, 0, pasted.len() as u32));
        assert_eq!(c.text, "34 ASFG asdf qwer 3412 rter");
    }
}

#[test]
fn test_remove_last_char() {
    let mut e = engine();

    // deleting the last char takes the dangling separator with it.
    let c = e.reflow(EditDelta::new("34 S", "34 ", 3, 1, 0));
    assert_eq!(c, fix("34", 2));

    let c = e.reflow(EditDelta::new("34 ", "34", 2, 1, 0));
    assert_eq!(c, fix("34", 2));
}

#[test]
fn test_remove_separator_collapses() {
    let mut e = engine();

    // backspacing a separator removes the real char before it.
    let c = e.reflow(EditDelta::new("34 ", "34", 2, 1, 0));
    assert_eq!(c, fix("3", 1));
}

#[test]
fn test_remove_mid_text() {
    let mut e = engine();

    // the tail slides left and is validated against its new slots.
    let c = e.reflow(EditDelta::new("34 SGAH refa r", "34 S refa r", 4, 3, 0));
    assert_eq!(c, fix("34 SREF ar", 4));
}

#[test]
fn test_remove_selection_across_groups() {
    let mut e = engine();

    // selection delete across a group boundary. the tail chars land on
    // letter slots now and are stored uppercase.
    let c = e.reflow(EditDelta::new("34 ABCD wxyz", "34 AByz", 5, 5, 0));
    assert_eq!(c, fix("34 ABYZ", 5));
}

#[test]
fn test_remove_all() {
    let mut e = engine();

    e.reflow(EditDelta::new("", "34ASFG", 0, 0, 6));
    let c = e.reflow(EditDelta::new("34 ASFG ", "", 0, 8, 0));
    assert_eq!(c, fix("", 0));
    assert_eq!(e.value(), "");
}

#[test]
fn test_replace_selection() {
    let mut e = engine();

    // select "ABCD", type 'x'.
    let c = e.reflow(EditDelta::new("34 ABCD", "34 x", 3, 4, 1));
    assert_eq!(c, fix("34 X", 4));
}

#[test]
fn test_reflow_idempotent() {
    let mut e = engine();

    let c = e.reflow(EditDelta::new("", "34ASFGasdf", 0, 0, 10));
    let echoed = c.text.clone();

    for _ in 0..3 {
        let c2 = e.reflow(EditDelta::new(&echoed, &echoed, 0, 0, 0));
        assert_eq!(c2, c);
    }
}

#[test]
fn test_sloppy_host_positions() {
    let mut e = engine();

    // the host reports nonsense positions. the snapshots win.
    let c = e.reflow(EditDelta::new("34 S", "34 aS", 0, 2, 2));
    assert_eq!(c, fix("34 AS", 4));
}

#[test]
fn test_class_conformance() {
    let mut e = engine();
    let mask = e.mask().clone();

    let c = e.reflow(EditDelta::new("", "34ASFGas df!qw er3412rterXX", 0, 0, 27));
    for (i, ch) in c.text.chars().enumerate() {
        assert!(mask.classify(i as u32, ch).unwrap(), "slot {} char {:?}", i, ch);
    }
}

#[test]
fn test_cursor_in_bounds() {
    let deltas: &[(&str, &str)] = &[
        ("", "34ASFGasdfqwer3412rterEXTRA"),
        ("34 S", "34 "),
        ("34 ASFG", "34 "),
        ("34", "34!"),
        ("34 ASFG asdf", "asdf"),
    ];
    for (old, new) in deltas {
        let mut e = engine();
        let c = e.reflow(EditDelta::new(old, new, 0, 0, 0));
        assert!(
            (c.cursor as usize) <= c.text.chars().count(),
            "cursor {} beyond {:?}",
            c.cursor,
            c.text
        );
    }
}

#[test]
fn test_set_value() {
    let mut e = engine();

    let c = e.set_value("34ASFGasdfqwer3412rter");
    assert_eq!(c, fix("34 ASFG asdf qwer 3412 rter", 27));
    assert_eq!(e.value(), "34 ASFG asdf qwer 3412 rter");
    assert_eq!(e.cursor(), 27);
    assert!(e.is_complete());

    let c = e.set_value("34");
    assert_eq!(c, fix("34 ", 3));
    assert!(!e.is_complete());
}

#[test]
fn test_format() {
    let mask = mask_format::Mask::parse(IBAN).unwrap();
    assert_eq!(
        mask_format::format(&mask, "34ASFGasdfqwer3412rter"),
        "34 ASFG asdf qwer 3412 rter"
    );
    assert_eq!(mask_format::format(&mask, "34"), "34 ");
    assert_eq!(mask_format::format(&mask, ""), "");
}

#[test]
fn test_date_mask() {
    let mut e = MaskEngine::with_pattern("99/99/9999").unwrap();

    let c = e.reflow(EditDelta::new("", "31121999", 0, 0, 8));
    assert_eq!(c, fix("31/12/1999", 10));

    let mut e = MaskEngine::with_pattern("99/99/9999").unwrap();
    let c = e.reflow(EditDelta::new("", "31", 0, 0, 2));
    assert_eq!(c, fix("31/", 3));
    let c = e.reflow(EditDelta::new("31/", "31/1", 3, 0, 1));
    assert_eq!(c, fix("31/1", 4));
}
