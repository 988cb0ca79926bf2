//!
//! Drives the mask engine like a host text widget would.
//!
//! Commands:
//! * `i <pos> <text>` insert text at pos
//! * `d <pos> <n>` delete n chars at pos
//! * `v <raw>` replace with a raw value
//! * `q` quit
//!

use anyhow::Error;
use mask_format::{EditDelta, MaskEngine};
use std::fs;
use std::io;
use std::io::{BufRead, Write};

fn main() -> Result<(), Error> {
    setup_logging()?;

    let mut engine = MaskEngine::with_pattern("99 AAAA wwww wwww wwww wwww")?;

    println!("mask [{}]", engine.mask());
    print_field(&engine);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let cmd = line.trim_end_matches(['\r', '\n']);
        let mut parts = cmd.splitn(3, ' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("i"), Some(pos), Some(text)) => {
                let pos = pos.parse()?;
                edit(&mut engine, pos, 0, text);
            }
            (Some("d"), Some(pos), Some(n)) => {
                let pos = pos.parse()?;
                let n = n.parse()?;
                edit(&mut engine, pos, n, "");
            }
            (Some("v"), Some(raw), None) => {
                engine.set_value(raw);
            }
            (Some("v"), Some(raw), Some(rest)) => {
                engine.set_value(&format!("{} {}", raw, rest));
            }
            (Some("q"), None, None) => break,
            (Some(""), None, None) => continue,
            _ => {
                println!("i <pos> <text> | d <pos> <n> | v <raw> | q");
                continue;
            }
        }

        print_field(&engine);
    }

    Ok(())
}

/// Replay one edit the way a host widget reports it: snapshot before,
/// modified text after, then the reflowed correction echoed back.
fn edit(engine: &mut MaskEngine, pos: usize, remove: usize, insert: &str) {
    let old = engine.value().to_string();
    let chars: Vec<char> = old.chars().collect();
    let pos = pos.min(chars.len());
    let remove = remove.min(chars.len() - pos);

    let mut new: String = chars[..pos].iter().collect();
    new.push_str(insert);
    new.extend(&chars[pos + remove..]);

    let fix = engine.reflow(EditDelta::new(
        &old,
        &new,
        pos as u32,
        remove as u32,
        insert.chars().count() as u32,
    ));

    // applying the correction re-triggers the host notification.
    let echo = engine.reflow(EditDelta::new(&new, &fix.text, 0, 0, 0));
    assert_eq!(echo, fix);
}

fn print_field(engine: &MaskEngine) {
    println!("[{}]", engine.value());
    println!(" {}^", " ".repeat(engine.cursor() as usize));
    match engine.input_mode_at(engine.cursor()) {
        Ok(Some(mode)) => println!("mode {:?}", mode),
        Ok(None) => println!("mode none, field is full"),
        Err(e) => println!("{}", e),
    }
}

fn setup_logging() -> Result<(), Error> {
    _ = fs::remove_file("log.log");
    fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file("log.log")?)
        .apply()?;
    Ok(())
}
