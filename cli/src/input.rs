//! Console interaction.

use std::io::{self, BufRead, Write};

/// Printed before a map is read from the console.
pub(crate) const INSTRUCTIONS: &str = "
Please draw the rectangle map.
Materials: \".\" - Air , \"#\" - Solid.
Points: \"S\" - Start point, \"X\" - Destination point.
Then write DONE on the new line.

";

/// Line that ends console map input, compared case-insensitively.
const DONE: &str = "done";

/// Read map rows until a `DONE` line or end of input.
pub(crate) fn read_console_map(input: &mut impl BufRead) -> io::Result<Vec<String>> {
    let mut rows = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim_end_matches('\r').eq_ignore_ascii_case(DONE) {
            return Ok(rows);
        }
        rows.push(line);
    }
    log::debug!("console input ended without {DONE:?}");
    Ok(rows)
}

/// Ask `question` until the answer is `y` or `n`. End of input counts as `n`.
pub(crate) fn prompt_yes_no(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
) -> io::Result<bool> {
    let mut answer = String::new();
    loop {
        write!(out, "{question}")?;
        out.flush()?;

        answer.clear();
        if input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        match answer.trim_end_matches(['\r', '\n']) {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => writeln!(out, "Wrong answer.")?,
        }
    }
}
