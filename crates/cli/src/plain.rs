// Non-interactive output: `scriptview --plain`

use std::io::{self, Write};

use scriptview_core::{ScriptLine, Viewer};

use crate::util;

/// Print every line of the loaded script, numbered.
pub fn print_script(viewer: &Viewer, out: &mut impl Write) -> io::Result<()> {
    let lines = viewer.script().lines();
    let width = util::digit_count(lines.len());
    for (i, line) in lines.iter().enumerate() {
        write_line(out, i + 1, width, line)?;
    }
    Ok(())
}

/// Print only the visible window, followed by its position.
pub fn print_window(viewer: &Viewer, out: &mut impl Write) -> io::Result<()> {
    let width = util::digit_count(viewer.script().len());
    for (offset, line) in viewer.visible_window().iter().enumerate() {
        write_line(out, viewer.cursor() + offset + 1, width, line)?;
    }
    match viewer.position() {
        Some(pos) => writeln!(out, "-- lines {}-{} of {} --", pos.first, pos.last, pos.total),
        None => writeln!(out, "-- empty script --"),
    }
}

fn write_line(
    out: &mut impl Write,
    number: usize,
    width: usize,
    line: &ScriptLine,
) -> io::Result<()> {
    match line {
        ScriptLine::Dialogue { .. } => match line.speaker() {
            Some(speaker) => {
                writeln!(out, "{:>w$}  {}: {}", number, speaker, line.text(), w = width)
            }
            None => writeln!(out, "{:>w$}  {}", number, line.text(), w = width),
        },
        ScriptLine::Technical { text } => {
            writeln!(out, "{:>w$}  [technical] {}", number, text, w = width)
        }
        ScriptLine::Music { text } => writeln!(out, "{:>w$}  [music] {}", number, text, w = width),
    }
}
